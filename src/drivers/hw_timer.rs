//! Hardware tick timer using ESP-IDF's esp_timer API.
//!
//! Runs one periodic 1 kHz timer whose callback bumps the millisecond
//! counter in [`crate::tick`]. On simulation targets the main loop drives
//! the tick by sleeping instead.
//!
//! The callback executes in the ESP timer task context (not ISR), so the
//! lock-free atomics in `tick` are more than enough.

#[cfg(target_os = "espidf")]
use crate::tick;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: TICK_TIMER is written once in `start_tick_timer()` before any
/// timer callbacks fire. Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn tick_timer() -> esp_timer_handle_t {
    unsafe { TICK_TIMER }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(_arg: *mut core::ffi::c_void) {
    tick::timer_tick();
}

/// Start the 1 kHz millisecond tick timer.
#[cfg(target_os = "espidf")]
pub fn start_tick_timer() {
    // SAFETY: TICK_TIMER is written here once at boot from the single
    // main-task context before any timer callbacks fire. The callback only
    // touches the lock-free atomics in `tick`.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"ms_tick\0".as_ptr() as *const _,
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
        if ret != ESP_OK as i32 {
            log::error!("hw_timer: tick timer create failed (rc={})", ret);
            return;
        }
        let ret = esp_timer_start_periodic(TICK_TIMER, 1_000); // 1 ms
        if ret != ESP_OK as i32 {
            log::error!("hw_timer: tick timer start failed (rc={})", ret);
            return;
        }

        info!("hw_timer: 1 kHz tick started");
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer() {
    log::info!("hw_timer(sim): tick driven by sleep loop");
}

/// Stop the tick timer.
#[cfg(target_os = "espidf")]
pub fn stop_tick_timer() {
    // SAFETY: tick_timer() contract — main task only; null-check prevents
    // stopping a timer that never started.
    unsafe {
        let t = tick_timer();
        if !t.is_null() {
            esp_timer_stop(t);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_tick_timer() {}
