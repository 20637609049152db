//! Rule table and per-tick evaluation pass.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Rule table (insertion order = evaluation order, ≤ 20)       │
//! │                                                              │
//! │   #0 "2,1"        #1 "?5,1!4,1"   #2 "[7:6,1;6,0]"  #3 "2,0" │
//! │    ▲ cursor                                                  │
//! │                                                              │
//! │  tick():                                                     │
//! │   1. evaluate every rule through RuleIo                      │
//! │   2. if rules[cursor] is a simple command that has fired,    │
//! │      advance; on wrap, re-arm every simple command           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cursor gives simple commands a program-counter feel while
//! conditionals and loops stay live on every tick regardless of where it
//! points.  A cursor parked on a conditional or loop never advances.

use log::{debug, info};

use crate::error::{Error, Result};
use crate::pins::PinRoles;
use crate::rule::{MAX_RULES, Rule, RuleIo, RuleKind};

/// Fixed-capacity rule table plus the simple-command cursor.
///
/// Decoupled from hardware: every line access goes through the [`RuleIo`]
/// handed to [`tick`](Self::tick), so the table can be driven by a fake in
/// tests.
#[derive(Debug, Default)]
pub struct Scheduler {
    rules: heapless::Vec<Rule, MAX_RULES>,
    cursor: usize,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `text` and append it.  Returns the table index.
    ///
    /// Nothing is appended on failure.
    pub fn register(&mut self, text: &str, roles: &PinRoles) -> Result<usize> {
        if self.rules.is_full() {
            return Err(Error::TableFull);
        }
        let rule = Rule::compile(text, roles)?;
        let index = self.rules.len();
        self.rules.push(rule).map_err(|_| Error::TableFull)?;
        info!("Scheduler: rule '{}' at slot {}", text, index);
        Ok(index)
    }

    /// One evaluation pass over the whole table.
    pub fn tick(&mut self, io: &mut impl RuleIo) {
        if self.rules.is_empty() {
            return;
        }

        for rule in &mut self.rules {
            let _ = rule.evaluate(io);
        }

        let Some(current) = self.rules.get(self.cursor) else {
            return;
        };
        if current.kind() == RuleKind::SimpleCommand && current.is_done() {
            self.cursor += 1;
            if self.cursor >= self.rules.len() {
                debug!("Scheduler: cursor wrapped, re-arming simple commands");
                self.cursor = 0;
                for rule in &mut self.rules {
                    if rule.kind() == RuleKind::SimpleCommand {
                        rule.reset();
                    }
                }
            }
        }
    }

    /// Cursor to zero and every rule back to its initial state.
    pub fn reset(&mut self) {
        self.cursor = 0;
        for rule in &mut self.rules {
            rule.reset();
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
