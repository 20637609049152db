//! Per-rule runtime state machine.
//!
//! | Kind                  | States           | Acts when                        |
//! |-----------------------|------------------|----------------------------------|
//! | SimpleCommand         | Pending → Done   | first evaluation after a reset   |
//! | ConditionalContinuous | (stateless)      | every tick its condition holds   |
//! | Loop                  | Idle ⇄ Active    | on gate release (off-sequence)   |
//!
//! All line access goes through [`RuleIo`], so a rule can be driven by the
//! scheduler on hardware or by a scripted fake in tests.

use crate::app::events::EngineEvent;
use crate::error::CompileError;
use crate::pins::PinRoles;

use super::{Command, Conditional, LoopProgram, ParsedRule, RuleKind, RuleText, compile};

// ───────────────────────────────────────────────────────────────
// Line access seam
// ───────────────────────────────────────────────────────────────

/// What a rule needs from the engine while it is being evaluated.
pub trait RuleIo {
    /// Debounced read; `true` when the line is active (electrically LOW).
    fn read_stable(&mut self, pin: u8) -> bool;

    /// Drive an output line through the output cache.
    fn set_output(&mut self, pin: u8, state: bool);

    /// Report a rule-level transition to the diagnostic sink.
    fn notify(&mut self, event: &EngineEvent);
}

/// Result of one evaluation, used by the scheduler's cursor logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Acted,
    Idle,
}

/// Loop gating state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopPhase {
    #[default]
    Idle,
    Active,
}

// ───────────────────────────────────────────────────────────────
// Rule
// ───────────────────────────────────────────────────────────────

/// One entry of the rule table: source text, compiled form, runtime flags.
#[derive(Debug, Clone)]
pub struct Rule {
    source: RuleText,
    parsed: ParsedRule,
    /// Simple command has fired; loop has completed a gate cycle.
    done: bool,
    phase: LoopPhase,
}

impl Rule {
    /// Compile `text` into a fresh rule in its initial state.
    pub fn compile(text: &str, roles: &PinRoles) -> Result<Self, CompileError> {
        let parsed = compile(text, roles)?;
        let source = RuleText::try_from(text).map_err(|_| CompileError::TooLong)?;
        Ok(Self {
            source,
            parsed,
            done: false,
            phase: LoopPhase::Idle,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn parsed(&self) -> &ParsedRule {
        &self.parsed
    }

    pub fn kind(&self) -> RuleKind {
        self.parsed.kind()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn loop_phase(&self) -> LoopPhase {
        self.phase
    }

    /// Back to the initial state. Loops drop out of `Active` without
    /// running their off-sequence.
    pub fn reset(&mut self) {
        self.done = false;
        self.phase = LoopPhase::Idle;
    }

    /// Run one tick of this rule.
    pub fn evaluate(&mut self, io: &mut impl RuleIo) -> Outcome {
        match &self.parsed {
            ParsedRule::Simple(cmd) => {
                if self.done {
                    return Outcome::Idle;
                }
                self.done = true;
                io.set_output(cmd.pin, cmd.state);
                Outcome::Acted
            }

            ParsedRule::Conditional(cond) => evaluate_conditional(cond, io),

            ParsedRule::Loop(program) => {
                let gate_active = io.read_stable(program.gate);
                match (self.phase, gate_active) {
                    (LoopPhase::Idle, false) => Outcome::Idle,

                    (LoopPhase::Idle, true) => {
                        self.phase = LoopPhase::Active;
                        io.notify(&EngineEvent::LoopEntered { gate: program.gate });
                        run_commands(program, io);
                        Outcome::Idle
                    }

                    (LoopPhase::Active, true) => {
                        // [3:8,1;8,0] blinks; [3:8,1] was already applied on entry.
                        if program.alternating {
                            run_commands(program, io);
                        }
                        Outcome::Idle
                    }

                    (LoopPhase::Active, false) => {
                        self.phase = LoopPhase::Idle;
                        io.notify(&EngineEvent::LoopExited { gate: program.gate });
                        run_off_sequence(program, io);
                        self.done = true;
                        Outcome::Acted
                    }
                }
            }
        }
    }
}

fn evaluate_conditional(cond: &Conditional, io: &mut impl RuleIo) -> Outcome {
    let first = io.read_stable(cond.first.pin) == cond.first.state;
    let second = match cond.second {
        Some(t) => io.read_stable(t.pin) == t.state,
        None => true,
    };

    let Command { pin, state } = cond.action;
    if first && second {
        io.set_output(pin, state);
        return Outcome::Acted;
    }

    // Only an asserting rule releases its line; a `,0` action never restores it.
    if state {
        io.set_output(pin, false);
    }
    Outcome::Idle
}

fn run_commands(program: &LoopProgram, io: &mut impl RuleIo) {
    for cmd in &program.commands {
        io.set_output(cmd.pin, cmd.state);
    }
}

/// Off variant of every sub-command, in list order.  Repeats of a pin are
/// absorbed by the output cache.
fn run_off_sequence(program: &LoopProgram, io: &mut impl RuleIo) {
    for cmd in &program.commands {
        let off = cmd.off();
        io.set_output(off.pin, off.state);
    }
}
