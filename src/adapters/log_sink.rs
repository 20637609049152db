//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing engine events to the `log` facade
//! (which goes to UART / USB-CDC in production).  Pin changes keep the
//! `CHANGE Pin <n> -> <0|1>` line format the bench tooling greps for.

use log::{info, warn};

use crate::app::events::EngineEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`EngineEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events written since construction.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &EngineEvent) {
        self.emitted = self.emitted.wrapping_add(1);
        match event {
            EngineEvent::PinChanged { pin, state } => {
                info!("CHANGE Pin {} -> {}", pin, u8::from(*state));
            }
            EngineEvent::Started => {
                info!("START | lines configured");
            }
            EngineEvent::RuleAccepted { index, kind } => {
                info!("RULE | #{} accepted ({:?})", index, kind);
            }
            EngineEvent::RuleRejected(e) => {
                warn!("RULE | rejected: {}", e);
            }
            EngineEvent::LoopEntered { gate } => {
                info!("LOOP | gate {} active, entering loop", gate);
            }
            EngineEvent::LoopExited { gate } => {
                info!("LOOP | gate {} released, turning OFF pins", gate);
            }
            EngineEvent::ShutdownComplete => {
                info!("EgLang shutdown complete");
            }
        }
    }
}
