//! Output line cache that suppresses redundant writes.
//!
//! Tracks the last level written to each output line and whether the line
//! has been claimed as an output at all.  Writing the level a claimed line
//! already holds is a no-op: no GPIO traffic and no `PinChanged` event.
//! Every other write reconfigures the line as output, drives it, records
//! the new level, and reports the change.

use log::warn;

use crate::app::events::EngineEvent;
use crate::app::ports::{EventSink, LinePort};
use crate::pins::LINES_PER_ROLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineState {
    pin: u8,
    state: bool,
    is_output: bool,
}

pub struct OutputCache {
    lines: [LineState; LINES_PER_ROLE],
}

impl OutputCache {
    pub fn new(outputs: [u8; LINES_PER_ROLE]) -> Self {
        Self {
            lines: outputs.map(|pin| LineState {
                pin,
                state: false,
                is_output: false,
            }),
        }
    }

    /// Drive `pin` to `state` unless it already holds it.
    ///
    /// Returns `true` when a raw write happened.
    pub fn set<H, S>(&mut self, hw: &mut H, sink: &mut S, pin: u8, state: bool) -> bool
    where
        H: LinePort,
        S: EventSink,
    {
        let slot = self.lines.iter_mut().find(|l| l.pin == pin);
        if let Some(line) = &slot {
            if line.is_output && line.state == state {
                return false;
            }
        }

        hw.configure_output(pin);
        hw.raw_write(pin, state);

        match slot {
            Some(line) => {
                line.state = state;
                line.is_output = true;
            }
            None => warn!("OutputCache: pin {} not in output table, write not cached", pin),
        }

        sink.emit(&EngineEvent::PinChanged { pin, state });
        true
    }

    /// Last level written to `pin`, or `None` if it was never claimed.
    pub fn state(&self, pin: u8) -> Option<bool> {
        self.lines
            .iter()
            .find(|l| l.pin == pin && l.is_output)
            .map(|l| l.state)
    }

    /// Output pins tracked by this cache, in table order.
    pub fn pins(&self) -> [u8; LINES_PER_ROLE] {
        self.lines.map(|l| l.pin)
    }

    /// Forget every claim; the next write to any line goes through.
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.state = false;
            line.is_output = false;
        }
    }
}
