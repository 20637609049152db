//! Rule compiler: text → [`ParsedRule`].
//!
//! Dispatches on the rule's outer shape (`[...]` loop, `?` conditional,
//! otherwise a simple command) and validates every pin against the
//! [`PinRoles`] table. Pure and deterministic; every failure is a typed
//! [`CompileError`].

use log::debug;

use crate::error::CompileError;
use crate::pins::{MAX_PIN, PinRoles};

use super::{
    Command, Conditional, LoopProgram, LoopText, MAX_CONDITION_LEN, MAX_LOOP_COMMANDS,
    MAX_LOOP_TEXT, MAX_RULE_LEN, ParsedRule, Trigger,
};

/// Shortest possible rule, `"2,1"`.
const MIN_RULE_LEN: usize = 3;

/// Compile one rule against the board's role table.
pub fn compile(text: &str, roles: &PinRoles) -> Result<ParsedRule, CompileError> {
    if text.is_empty() {
        return Err(CompileError::Empty);
    }
    if text.len() > MAX_RULE_LEN {
        return Err(CompileError::TooLong);
    }
    if text.len() < MIN_RULE_LEN {
        return Err(CompileError::TooShort);
    }

    if let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        compile_loop(inner, roles).map(ParsedRule::Loop)
    } else if let Some(rest) = text.strip_prefix('?') {
        compile_conditional(rest, roles).map(ParsedRule::Conditional)
    } else {
        output_command(text, roles).map(ParsedRule::Simple)
    }
}

// ── Rule shapes ───────────────────────────────────────────────

fn compile_loop(inner: &str, roles: &PinRoles) -> Result<LoopProgram, CompileError> {
    let (gate, list) = inner.split_once(':').ok_or(CompileError::MissingColon)?;

    let gate = parse_pin(gate)?;
    if !roles.is_input(gate) {
        return Err(CompileError::NotAnInput(gate));
    }

    if list.is_empty() {
        return Err(CompileError::EmptyCommandList);
    }
    if list.len() > MAX_LOOP_TEXT {
        return Err(CompileError::CommandListTooLong);
    }

    // No partial loops: one bad sub-command rejects the whole rule.
    let mut commands = heapless::Vec::new();
    for segment in list.split(';') {
        let cmd = output_command(segment, roles)?;
        commands
            .push(cmd)
            .map_err(|_| CompileError::TooManyCommands)?;
    }

    let text = LoopText::try_from(list).map_err(|_| CompileError::CommandListTooLong)?;
    let alternating = has_alternation(list);

    Ok(LoopProgram {
        gate,
        commands,
        text,
        alternating,
    })
}

fn compile_conditional(rest: &str, roles: &PinRoles) -> Result<Conditional, CompileError> {
    let (condition, action) = rest.split_once('!').ok_or(CompileError::MissingAction)?;
    if condition.is_empty() {
        return Err(CompileError::MissingAction);
    }

    let action = output_command(action, roles)?;

    if condition.len() > MAX_CONDITION_LEN {
        return Err(CompileError::ConditionTooLong);
    }

    let (first, second) = match condition.split_once('&') {
        Some((a, b)) => (input_trigger(a, roles)?, Some(input_trigger(b, roles)?)),
        None => (input_trigger(condition, roles)?, None),
    };

    Ok(Conditional {
        first,
        second,
        action,
    })
}

// ── Terminals ─────────────────────────────────────────────────

/// `<pin>,<state>` where pin must be an output.
fn output_command(segment: &str, roles: &PinRoles) -> Result<Command, CompileError> {
    let (pin, state) = pin_state(segment)?;
    if !roles.is_output(pin) {
        return Err(CompileError::NotAnOutput(pin));
    }
    Ok(Command { pin, state })
}

/// `<pin>,<state>` where pin must be an input.
fn input_trigger(segment: &str, roles: &PinRoles) -> Result<Trigger, CompileError> {
    let (pin, state) = pin_state(segment)?;
    if !roles.is_input(pin) {
        return Err(CompileError::NotAnInput(pin));
    }
    Ok(Trigger { pin, state })
}

fn pin_state(segment: &str) -> Result<(u8, bool), CompileError> {
    let (pin, state) = segment.split_once(',').ok_or(CompileError::MissingComma)?;
    Ok((parse_pin(pin)?, parse_state(state)?))
}

/// 1–2 ASCII digits, no sign or whitespace.
fn parse_pin(token: &str) -> Result<u8, CompileError> {
    if token.is_empty() || token.len() > 2 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CompileError::BadPin);
    }
    let pin = token.bytes().fold(0u8, |acc, b| acc * 10 + (b - b'0'));
    if pin > MAX_PIN {
        return Err(CompileError::PinOutOfRange(pin));
    }
    Ok(pin)
}

fn parse_state(token: &str) -> Result<bool, CompileError> {
    match token {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(CompileError::BadState),
    }
}

// ── Alternation ───────────────────────────────────────────────

/// True when at least two sub-commands differ textually.
///
/// Sub-commands are compared after stripping leading spaces; the search
/// stops at the first differing pair.
pub(crate) fn has_alternation(list: &str) -> bool {
    let mut parts: heapless::Vec<&str, MAX_LOOP_COMMANDS> = heapless::Vec::new();
    for part in list.split(';') {
        let part = part.trim_start_matches(' ');
        if part.is_empty() {
            continue;
        }
        if parts.push(part).is_err() {
            break;
        }
    }

    if parts.len() <= 1 {
        debug!("loop '{}': single command, not alternating", list);
        return false;
    }

    for (i, a) in parts.iter().enumerate() {
        if let Some(b) = parts[i + 1..].iter().find(|b| *b != a) {
            debug!("loop '{}': '{}' != '{}', alternating", list, a, b);
            return true;
        }
    }

    debug!("loop '{}': all commands identical, not alternating", list);
    false
}
