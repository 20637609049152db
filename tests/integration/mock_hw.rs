//! Mock line bank and event sink for integration tests.
//!
//! Records every port call so tests can assert on the full write history
//! without touching real GPIO registers.

use std::collections::{HashMap, VecDeque};

use eglang::app::events::EngineEvent;
use eglang::app::ports::{EventSink, LinePort};
use embedded_hal::delay::DelayNs;

// ── Port call record ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortCall {
    Write { pin: u8, high: bool },
    ConfigureInput(u8),
    ConfigureOutput(u8),
    ConfigureDisabled(u8),
}

// ── MockLines ─────────────────────────────────────────────────

/// Inputs idle HIGH (pulled up); `press` pulls one LOW.
pub struct MockLines {
    pub calls: Vec<PortCall>,
    levels: HashMap<u8, bool>,
    /// Per-pin raw samples consumed before falling back to `levels`.
    scripted: HashMap<u8, VecDeque<bool>>,
    pub delay_ns_total: u64,
}

#[allow(dead_code)]
impl MockLines {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            levels: HashMap::new(),
            scripted: HashMap::new(),
            delay_ns_total: 0,
        }
    }

    /// Hold an input active (electrically LOW).
    pub fn press(&mut self, pin: u8) {
        self.levels.insert(pin, false);
    }

    pub fn release(&mut self, pin: u8) {
        self.levels.insert(pin, true);
    }

    /// Queue raw electrical samples for `pin`, consumed one per read.
    pub fn script(&mut self, pin: u8, samples: &[bool]) {
        self.scripted.entry(pin).or_default().extend(samples);
    }

    /// Only the raw writes, in order.
    pub fn writes(&self) -> Vec<(u8, bool)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PortCall::Write { pin, high } => Some((*pin, *high)),
                _ => None,
            })
            .collect()
    }

    pub fn writes_to(&self, pin: u8) -> Vec<bool> {
        self.writes()
            .into_iter()
            .filter(|(p, _)| *p == pin)
            .map(|(_, high)| high)
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockLines {
    fn default() -> Self {
        Self::new()
    }
}

impl LinePort for MockLines {
    fn raw_read(&mut self, pin: u8) -> bool {
        if let Some(sample) = self.scripted.get_mut(&pin).and_then(VecDeque::pop_front) {
            return sample;
        }
        self.levels.get(&pin).copied().unwrap_or(true)
    }

    fn raw_write(&mut self, pin: u8, high: bool) {
        self.calls.push(PortCall::Write { pin, high });
    }

    fn configure_input(&mut self, pin: u8) {
        self.calls.push(PortCall::ConfigureInput(pin));
    }

    fn configure_output(&mut self, pin: u8) {
        self.calls.push(PortCall::ConfigureOutput(pin));
    }

    fn configure_disabled(&mut self, pin: u8) {
        self.calls.push(PortCall::ConfigureDisabled(pin));
    }
}

impl DelayNs for MockLines {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ns_total += u64::from(ns);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Event sink that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<EngineEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin_changes(&self) -> Vec<(u8, bool)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                EngineEvent::PinChanged { pin, state } => Some((*pin, *state)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&EngineEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &EngineEvent) {
        self.events.push(*event);
    }
}
