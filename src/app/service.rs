//! Rule engine service, the hexagonal core.
//!
//! [`RuleEngine`] owns the rule table, the output cache and the pin-role
//! configuration.  It exposes register / tick / reset / shutdown; all I/O
//! flows through port traits injected at call sites, making the whole
//! engine testable with mock adapters.
//!
//! ```text
//!  LinePort + DelayNs ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                         │         RuleEngine         │
//!         LinePort    ◀── │ Scheduler · OutputCache    │
//!                         └────────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::EngineConfig;
use crate::drivers::debounce;
use crate::drivers::output_cache::OutputCache;
use crate::error::Result;
use crate::rule::{Rule, RuleIo};
use crate::scheduler::Scheduler;

use super::events::EngineEvent;
use super::ports::{EventSink, LinePort};

// ───────────────────────────────────────────────────────────────
// RuleEngine
// ───────────────────────────────────────────────────────────────

/// One explicitly owned engine instance per controller board.
pub struct RuleEngine {
    config: EngineConfig,
    scheduler: Scheduler,
    outputs: OutputCache,
    started: bool,
    /// `tick` before `start` has been reported once.
    idle_warned: bool,
}

impl RuleEngine {
    /// Construct the engine from configuration.
    ///
    /// The configuration is validated first, so the pin-role table the
    /// compiler sees always has disjoint input and output sets.  Does
    /// **not** touch the lines; call [`start`](Self::start) next.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let outputs = OutputCache::new(config.pins.outputs);
        Ok(Self {
            config,
            scheduler: Scheduler::new(),
            outputs,
            started: false,
            idle_warned: false,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Configure inputs as pulled-up inputs and park every output in
    /// high-Z until a rule claims it.  Idempotent.
    pub fn start(&mut self, hw: &mut impl LinePort, sink: &mut impl EventSink) {
        if self.started {
            return;
        }
        for pin in self.config.pins.inputs {
            hw.configure_input(pin);
        }
        for pin in self.config.pins.outputs {
            hw.configure_disabled(pin);
        }
        self.started = true;
        sink.emit(&EngineEvent::Started);
        info!(
            "RuleEngine started (inputs {:?}, outputs {:?})",
            self.config.pins.inputs, self.config.pins.outputs
        );
    }

    /// Reset every rule, release every output to high-Z and forget all
    /// cached output state.  Safe to call repeatedly.
    pub fn shutdown(&mut self, hw: &mut impl LinePort, sink: &mut impl EventSink) {
        self.scheduler.reset();
        for pin in self.outputs.pins() {
            hw.configure_disabled(pin);
        }
        self.outputs.clear();
        sink.emit(&EngineEvent::ShutdownComplete);
    }

    /// Cursor to zero, every rule re-armed.  Output lines keep their level.
    pub fn reset(&mut self) {
        self.scheduler.reset();
    }

    // ── Registration ──────────────────────────────────────────

    /// Compile and append one rule.  Returns its table index.
    ///
    /// Registration does not configure any line; rules are only evaluated
    /// once [`start`](Self::start) has run.
    pub fn register(&mut self, text: &str, sink: &mut impl EventSink) -> Result<usize> {
        match self.scheduler.register(text, &self.config.pins) {
            Ok(index) => {
                let kind = self.scheduler.rules()[index].kind();
                sink.emit(&EngineEvent::RuleAccepted { index, kind });
                Ok(index)
            }
            Err(e) => {
                warn!("RuleEngine: rejected '{}': {}", text, e);
                sink.emit(&EngineEvent::RuleRejected(e));
                Err(e)
            }
        }
    }

    /// [`register`](Self::register), reporting only whether the rule was
    /// accepted into the table.
    pub fn try_register(&mut self, text: &str, sink: &mut impl EventSink) -> bool {
        self.register(text, sink).is_ok()
    }

    /// Register the boot program from the configuration.  Returns how many
    /// rules were accepted; rejected ones are reported and skipped.
    pub fn register_configured(&mut self, sink: &mut impl EventSink) -> usize {
        let program = self.config.rules.clone();
        let mut accepted = 0;
        for text in &program {
            if self.try_register(text, sink) {
                accepted += 1;
            }
        }
        info!("RuleEngine: {}/{} configured rules accepted", accepted, program.len());
        accepted
    }

    // ── Per-tick evaluation ───────────────────────────────────

    /// Run one scheduler pass.
    ///
    /// The `hw` parameter satisfies **both** [`LinePort`] and [`DelayNs`]
    /// because the debounced reader needs the inter-sample delay from the same
    /// handle that reads the lines.
    pub fn tick(&mut self, hw: &mut (impl LinePort + DelayNs), sink: &mut impl EventSink) {
        if !self.started {
            if !self.idle_warned {
                warn!("RuleEngine: tick() before start(), rules are not evaluated");
                self.idle_warned = true;
            }
            return;
        }
        let mut io = TickIo {
            hw,
            outputs: &mut self.outputs,
            sink,
        };
        self.scheduler.tick(&mut io);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn rules(&self) -> &[Rule] {
        self.scheduler.rules()
    }

    pub fn len(&self) -> usize {
        self.scheduler.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduler.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.scheduler.cursor()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Last level written to an output line, `None` if never claimed.
    pub fn output_state(&self, pin: u8) -> Option<bool> {
        self.outputs.state(pin)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

// ───────────────────────────────────────────────────────────────
// Tick-scoped I/O bundle
// ───────────────────────────────────────────────────────────────

/// Borrows the ports and the output cache for the duration of one tick.
struct TickIo<'a, H, S> {
    hw: &'a mut H,
    outputs: &'a mut OutputCache,
    sink: &'a mut S,
}

impl<H, S> RuleIo for TickIo<'_, H, S>
where
    H: LinePort + DelayNs,
    S: EventSink,
{
    fn read_stable(&mut self, pin: u8) -> bool {
        debounce::read_stable(self.hw, pin)
    }

    fn set_output(&mut self, pin: u8, state: bool) {
        self.outputs.set(self.hw, self.sink, pin, state);
    }

    fn notify(&mut self, event: &EngineEvent) {
        self.sink.emit(event);
    }
}
