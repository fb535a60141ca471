//! Alert synthesis.
//!
//! Alerts are regenerated from scratch on every signal change. Nothing here
//! remembers what was issued before; deduplication across time and read
//! state belong to the caller.

pub mod synthesis;

pub use synthesis::synthesize;
