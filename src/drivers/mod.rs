//! Boot-time hardware bring-up and the 1 kHz tick timer.

pub mod hw_init;
pub mod hw_timer;
