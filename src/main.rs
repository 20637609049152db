//! EgLang controller: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  GpioAdapter (LinePort + DelayNs)   LogEventSink     │
//! │  ───────────────── Port Trait Boundary ───────────── │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │  RuleEngine: Scheduler · OutputCache           │  │
//! │  └────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The boot program is baked in from `program.json` at build time and run
//! on a fixed tick.
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use eglang::adapters::hardware::GpioAdapter;
use eglang::adapters::log_sink::LogEventSink;
use eglang::{EngineConfig, RuleEngine};

const BOOT_PROGRAM: &str = include_str!("../program.json");

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  EgLang v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = match EngineConfig::from_json(BOOT_PROGRAM) {
        Ok(c) => c,
        Err(e) => {
            warn!("Boot program unusable ({}), running with defaults", e);
            EngineConfig::default()
        }
    };
    let tick = Duration::from_millis(u64::from(config.tick_interval_ms));

    let mut hw = GpioAdapter::new();
    let mut sink = LogEventSink::new();
    let mut engine = RuleEngine::new(config)
        .map_err(|e| anyhow::anyhow!("engine configuration rejected: {e}"))?;

    engine.start(&mut hw, &mut sink);
    let accepted = engine.register_configured(&mut sink);
    if accepted == 0 {
        warn!("No rules loaded; outputs stay released");
    }

    info!("System ready. Ticking every {} ms.", tick.as_millis());
    loop {
        engine.tick(&mut hw, &mut sink);
        std::thread::sleep(tick);
    }
}
