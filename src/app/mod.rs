//! Application core: rule table orchestration, zero direct I/O.
//!
//! All interaction with the GPIO bank and the diagnostic log happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real lines.

pub mod events;
pub mod ports;
pub mod service;
