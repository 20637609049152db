//! Outbound engine events.
//!
//! The [`RuleEngine`](super::service::RuleEngine) and the output cache emit
//! these through the [`EventSink`](super::ports::EventSink) port.  Adapters
//! on the other side decide what to do with them: log to serial, count them
//! in a test, etc.

use crate::error::Error;
use crate::rule::RuleKind;

/// Structured events emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// Lines configured; the engine will now evaluate rules.
    Started,

    /// A rule compiled and was appended at `index`.
    RuleAccepted { index: usize, kind: RuleKind },

    /// A rule was refused; nothing was added to the table.
    RuleRejected(Error),

    /// An output line was actually written (cache miss).
    PinChanged { pin: u8, state: bool },

    /// A loop's gate went active.
    LoopEntered { gate: u8 },

    /// A loop's gate released; its lines are being turned off.
    LoopExited { gate: u8 },

    /// All rules reset and every output released to high-Z.
    ShutdownComplete,
}
