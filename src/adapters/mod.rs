//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements          | Connects to                     |
//! |-------------|---------------------|---------------------------------|
//! | `hardware`  | LinePort + DelayNs  | ESP32 GPIO / simulated line bank|
//! | `log_sink`  | EventSink           | Serial log output               |

pub mod hardware;
pub mod log_sink;
