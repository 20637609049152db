//! Fuzz target: rule compiler and engine registration
//!
//! Feeds arbitrary bytes through `compile` and `RuleEngine::register`,
//! then ticks the engine, verifying:
//! - No panics under arbitrary rule text
//! - A rule is registered exactly when it compiles
//! - Every output write stays on a configured output line
//!
//! cargo fuzz run fuzz_compile

#![no_main]

use eglang::app::events::EngineEvent;
use eglang::app::ports::{EventSink, LinePort};
use eglang::config::EngineConfig;
use eglang::pins::{OUTPUT_PINS, PinRoles};
use eglang::rule::compile;
use eglang::RuleEngine;
use embedded_hal::delay::DelayNs;
use libfuzzer_sys::fuzz_target;

// ── Input-driven line bank ────────────────────────────────────

struct FuzzLines<'a> {
    levels: &'a [u8],
    pos: usize,
}

impl LinePort for FuzzLines<'_> {
    fn raw_read(&mut self, pin: u8) -> bool {
        let byte = self.levels.get(self.pos).copied().unwrap_or(0xFF);
        self.pos = self.pos.wrapping_add(1);
        byte & (1 << (pin % 8)) != 0
    }

    fn raw_write(&mut self, pin: u8, _high: bool) {
        assert!(OUTPUT_PINS.contains(&pin), "write to non-output pin {pin}");
    }

    fn configure_input(&mut self, _pin: u8) {}
    fn configure_output(&mut self, _pin: u8) {}
    fn configure_disabled(&mut self, _pin: u8) {}
}

impl DelayNs for FuzzLines<'_> {
    fn delay_ns(&mut self, _ns: u32) {}
}

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &EngineEvent) {}
}

fuzz_target!(|data: &[u8]| {
    // First half: rule texts separated by newlines. Second half: line levels.
    let split = data.len() / 2;
    let (rules, levels) = data.split_at(split);
    let Ok(text) = std::str::from_utf8(rules) else {
        return;
    };

    let roles = PinRoles::default();
    let Ok(mut engine) = RuleEngine::new(EngineConfig::default()) else {
        return;
    };
    let mut hw = FuzzLines { levels, pos: 0 };
    let mut sink = NullSink;
    engine.start(&mut hw, &mut sink);

    for line in text.lines() {
        let compiles = compile(line, &roles).is_ok();
        let before = engine.len();
        let accepted = engine.try_register(line, &mut sink);
        assert!(!accepted || compiles, "non-compiling rule accepted: {line:?}");
        assert_eq!(engine.len(), before + usize::from(accepted));
    }

    for _ in 0..8 {
        engine.tick(&mut hw, &mut sink);
    }
    engine.shutdown(&mut hw, &mut sink);
});
