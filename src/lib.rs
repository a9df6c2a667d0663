//! LatchBox firmware library.
//!
//! Battery-powered latching power controller for accessibility switches:
//! a debounced external switch toggles a relay, a hold-to-confirm power
//! switch latches the supply, and an inactivity countdown (with a warning
//! blink phase) powers the unit back off.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod debounce;
pub mod fsm;
pub mod led;
pub mod tick;
pub mod toggle;

pub mod pins;

// The ESPidf-only internals are guarded by cfg attributes inside.
pub mod adapters;
pub mod drivers;
