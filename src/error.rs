//! Unified error types for the EgLang rule engine.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! registration path's error handling uniform. All variants are `Copy` so
//! they travel through the event sink without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible engine operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The rule text did not compile.
    Compile(CompileError),
    /// The rule table already holds the maximum number of rules.
    TableFull,
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compile(e) => write!(f, "compile: {e}"),
            Self::TableFull => write!(f, "rule table full"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Compile errors
// ---------------------------------------------------------------------------

/// Why a rule string was rejected by the compiler.
///
/// Pin-carrying variants hold the offending pin number so the rejection
/// notice can name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileError {
    /// Rule text is empty.
    Empty,
    /// Rule text is shorter than the smallest valid rule.
    TooShort,
    /// Rule text exceeds the 31-character limit.
    TooLong,
    /// A pin token is not 1–2 decimal digits.
    BadPin,
    /// A pin number does not fit the 0–15 range.
    PinOutOfRange(u8),
    /// A trigger or gate pin is not configured as an input.
    NotAnInput(u8),
    /// A target pin is not configured as an output.
    NotAnOutput(u8),
    /// A state token is not exactly one `0` or `1`.
    BadState,
    /// A `,` separator is missing between pin and state.
    MissingComma,
    /// A conditional rule has no `!` action separator, or an empty condition.
    MissingAction,
    /// The condition segment of a conditional rule exceeds 15 characters.
    ConditionTooLong,
    /// A loop rule has no `:` after the gate pin.
    MissingColon,
    /// A loop rule has no commands between `:` and `]`.
    EmptyCommandList,
    /// A loop command list exceeds 23 characters.
    CommandListTooLong,
    /// A loop command list decodes to more than 10 commands.
    TooManyCommands,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty rule"),
            Self::TooShort => write!(f, "rule too short"),
            Self::TooLong => write!(f, "rule longer than 31 characters"),
            Self::BadPin => write!(f, "pin must be 1-2 decimal digits"),
            Self::PinOutOfRange(p) => write!(f, "pin {p} out of range"),
            Self::NotAnInput(p) => write!(f, "pin {p} is not an input"),
            Self::NotAnOutput(p) => write!(f, "pin {p} is not an output"),
            Self::BadState => write!(f, "state must be a single 0 or 1"),
            Self::MissingComma => write!(f, "expected <pin>,<state>"),
            Self::MissingAction => write!(f, "expected ?<condition>!<action>"),
            Self::ConditionTooLong => write!(f, "condition longer than 15 characters"),
            Self::MissingColon => write!(f, "expected [<gate>:<commands>]"),
            Self::EmptyCommandList => write!(f, "loop has no commands"),
            Self::CommandListTooLong => write!(f, "loop commands longer than 23 characters"),
            Self::TooManyCommands => write!(f, "loop has more than 10 commands"),
        }
    }
}

impl From<CompileError> for Error {
    fn from(e: CompileError) -> Self {
        Self::Compile(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Engine-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
