//! Hexagonal core: port traits, outbound events, and the controller
//! service that fuses the tick source, debounce filters, output toggle,
//! and power-latch FSM into one loop pass.

pub mod events;
pub mod ports;
pub mod service;
