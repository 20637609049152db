//! EgLang rule engine library.
//!
//! Exposes the rule compiler, the tick scheduler and the engine service for
//! integration testing and bench tools. All ESP-IDF-specific code is guarded
//! by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod rule;
pub mod scheduler;

pub use app::service::RuleEngine;
pub use config::EngineConfig;
pub use error::{CompileError, Error, Result};
