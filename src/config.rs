//! Engine configuration
//!
//! The pin-role table, tick pacing and the boot rule program, loaded from
//! the JSON document baked into the firmware image.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins::{MAX_PIN, PinRoles};
use crate::rule::{MAX_RULES, RuleText};

/// Core engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Which lines are inputs and which are outputs.
    pub pins: PinRoles,
    /// Delay between scheduler ticks (milliseconds)
    pub tick_interval_ms: u32,
    /// Rules registered at boot, in evaluation order.
    #[serde(default)]
    pub rules: heapless::Vec<RuleText, MAX_RULES>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pins: PinRoles::default(),
            tick_interval_ms: 50, // 20 Hz
            rules: heapless::Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Range- and consistency-check every field.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be non-zero"));
        }
        let roles = [&self.pins.inputs, &self.pins.outputs];
        for set in roles {
            for (i, pin) in set.iter().enumerate() {
                if *pin > MAX_PIN {
                    return Err(Error::Config("pin numbers must be 0-15"));
                }
                if set[i + 1..].contains(pin) {
                    return Err(Error::Config("duplicate pin within a role"));
                }
            }
        }
        if self.pins.inputs.iter().any(|p| self.pins.outputs.contains(p)) {
            return Err(Error::Config("a pin cannot be both input and output"));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
