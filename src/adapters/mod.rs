//! Driven adapters: implementations of the port traits over real hardware
//! (or the tick-source statics). Everything here is host-compilable; only
//! the concrete pin types come from ESP-IDF.

pub mod hardware;
pub mod log_sink;
pub mod tick;
