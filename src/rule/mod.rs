//! Rule language: parsed forms shared by the compiler and the automaton.
//!
//! ```text
//!   "2,1"            SimpleCommand          drive pin 2 HIGH once
//!   "?5,1&7,0!2,1"   ConditionalContinuous  pin 2 HIGH while 5 active and 7 inactive
//!   "[5:2,1;2,0]"    Loop                   toggle pin 2 while gate 5 is active
//! ```
//!
//! A rule that fails [`compile`] never exists as a value, so every
//! [`ParsedRule`] is valid by construction.

pub mod automaton;
pub mod compiler;

pub use automaton::{LoopPhase, Outcome, Rule, RuleIo};
pub use compiler::compile;

/// Maximum number of rules in the table.
pub const MAX_RULES: usize = 20;
/// Maximum rule text length (characters).
pub const MAX_RULE_LEN: usize = 31;
/// Maximum length of a loop's command list segment.
pub const MAX_LOOP_TEXT: usize = 23;
/// Maximum number of decoded loop sub-commands.
pub const MAX_LOOP_COMMANDS: usize = 10;
/// Maximum length of a conditional rule's condition segment.
pub const MAX_CONDITION_LEN: usize = 15;

/// Bounded rule source text.
pub type RuleText = heapless::String<MAX_RULE_LEN>;
/// Bounded loop command-list text.
pub type LoopText = heapless::String<MAX_LOOP_TEXT>;

/// The three mutually exclusive rule shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    SimpleCommand,
    ConditionalContinuous,
    Loop,
}

/// Drive one output line to a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub pin: u8,
    pub state: bool,
}

impl Command {
    /// Same line, forced inactive. Used when a loop's gate releases.
    pub const fn off(self) -> Self {
        Self {
            pin: self.pin,
            state: false,
        }
    }
}

/// One input comparison of a conditional rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub pin: u8,
    pub state: bool,
}

/// `?<trigger>[&<trigger>]!<action>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conditional {
    pub first: Trigger,
    pub second: Option<Trigger>,
    pub action: Command,
}

impl Conditional {
    pub fn uses_and(&self) -> bool {
        self.second.is_some()
    }
}

/// `[<gate>:<cmd>;<cmd>...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopProgram {
    /// Input line that enables the loop.
    pub gate: u8,
    /// Decoded sub-commands in list order.
    pub commands: heapless::Vec<Command, MAX_LOOP_COMMANDS>,
    /// Command list as written, between `:` and `]`.
    pub text: LoopText,
    /// At least two sub-commands differ textually; the list is re-applied
    /// every tick while the gate stays active.
    pub alternating: bool,
}

/// Compiled form of one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRule {
    Simple(Command),
    Conditional(Conditional),
    Loop(LoopProgram),
}

impl ParsedRule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Simple(_) => RuleKind::SimpleCommand,
            Self::Conditional(_) => RuleKind::ConditionalContinuous,
            Self::Loop(_) => RuleKind::Loop,
        }
    }
}
