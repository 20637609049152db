//! Line assignments for the EgLang controller board.
//!
//! Single source of truth for the sample role table. The compiler and the
//! output cache both resolve pins through a [`PinRoles`] built from here.
//! Inputs are pulled up and read active-LOW; outputs idle in high-Z until a
//! rule first claims them.

use serde::{Deserialize, Serialize};

/// Number of lines in each role set.
pub const LINES_PER_ROLE: usize = 6;

/// Largest pin number a rule may reference (4-bit pin field).
pub const MAX_PIN: u8 = 15;

// ---------------------------------------------------------------------------
// Sample board table
// ---------------------------------------------------------------------------

/// Switch / sensor inputs (pulled up, active LOW).
pub const INPUT_PINS: [u8; LINES_PER_ROLE] = [3, 5, 7, 9, 11, 13];

/// Relay / LED outputs.
pub const OUTPUT_PINS: [u8; LINES_PER_ROLE] = [2, 4, 6, 8, 10, 12];

// ---------------------------------------------------------------------------
// Role table
// ---------------------------------------------------------------------------

/// Which line IDs are inputs and which are outputs.
///
/// Immutable once the engine is constructed. [`RuleEngine::new`] refuses a
/// table whose two sets overlap.
///
/// [`RuleEngine::new`]: crate::app::service::RuleEngine::new
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRoles {
    pub inputs: [u8; LINES_PER_ROLE],
    pub outputs: [u8; LINES_PER_ROLE],
}

impl PinRoles {
    pub const fn new(inputs: [u8; LINES_PER_ROLE], outputs: [u8; LINES_PER_ROLE]) -> Self {
        Self { inputs, outputs }
    }

    pub fn is_input(&self, pin: u8) -> bool {
        self.inputs.contains(&pin)
    }

    pub fn is_output(&self, pin: u8) -> bool {
        self.outputs.contains(&pin)
    }
}

impl Default for PinRoles {
    fn default() -> Self {
        Self::new(INPUT_PINS, OUTPUT_PINS)
    }
}
