//! Event sink that writes application events to the serial log.

use core::fmt::Write;

use log::info;

use crate::app::events::{AppEvent, PowerOffReason};
use crate::app::ports::EventSink;

/// Formats each [`AppEvent`] into a fixed-capacity buffer and logs it.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        let mut buf = heapless::String::<96>::new();
        let _ = match event {
            AppEvent::Started(state) => {
                write!(buf, "controller started in {:?}", state)
            }
            AppEvent::StateChanged { from, to } => {
                write!(buf, "state {:?} -> {:?}", from, to)
            }
            AppEvent::OutputToggled(on) => {
                write!(buf, "relay {}", if *on { "asserted" } else { "released" })
            }
            AppEvent::ActivityReset => write!(buf, "activity countdown reloaded"),
            AppEvent::PoweredOff(reason) => {
                let cause = match reason {
                    PowerOffReason::TimeoutExpired => "inactivity timeout",
                    PowerOffReason::SwitchReleased => "switch released",
                    PowerOffReason::ConfirmAborted => "confirm hold aborted",
                };
                write!(buf, "powered off: {}", cause)
            }
        };
        info!("{}", buf);
    }
}
