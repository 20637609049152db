//! Line-level primitives shared by every rule: debounced reads and the
//! deduplicating output cache.

pub mod debounce;
pub mod output_cache;
