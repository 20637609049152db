//! Port traits: the hexagonal boundary between the engine and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RuleEngine (domain)
//! ```
//!
//! Driven adapters (GPIO bank, diagnostic log) implement these traits.  The
//! [`RuleEngine`](super::service::RuleEngine) consumes them via generics, so
//! the rule logic never touches hardware directly.  The inter-sample delay
//! used for debouncing comes from [`embedded_hal::delay::DelayNs`] on the
//! same hardware handle.

use super::events::EngineEvent;

// ───────────────────────────────────────────────────────────────
// Line port (driven adapter: domain ↔ GPIO bank)
// ───────────────────────────────────────────────────────────────

/// Raw access to the digital lines named in the pin-role table.
///
/// Implementations must treat every `configure_*` call as idempotent; the
/// output cache reconfigures a line as output on every real write.
pub trait LinePort {
    /// Electrical level of the line: `true` = HIGH.
    ///
    /// Inputs are pulled up, so an *active* input reads `false`.
    fn raw_read(&mut self, pin: u8) -> bool;

    /// Drive an output line HIGH (`true`) or LOW.
    fn raw_write(&mut self, pin: u8, high: bool);

    /// Input with pull-up enabled.
    fn configure_input(&mut self, pin: u8);

    /// Push-pull output.
    fn configure_output(&mut self, pin: u8);

    /// High-impedance: neither driven nor pulled.
    fn configure_disabled(&mut self, pin: u8);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The engine emits structured [`EngineEvent`]s through this port: pin
/// changes, rule registration, loop transitions, shutdown.
pub trait EventSink {
    fn emit(&mut self, event: &EngineEvent);
}
