//! Configuration errors.
//!
//! Building a hierarchy is the only fallible operation in this crate. Once a
//! `CacheHierarchy` exists every reference resolves to a latency, so there is
//! no per-access error type. Contract breaches inside a set (inserting a tag
//! that is already present, a size above capacity) are assertions, not errors.

use thiserror::Error;

/// Reasons a cache configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The shared line size is zero or not a power of two.
    #[error("line size {0} is not a power of two")]
    LineSizeNotPowerOfTwo(u64),

    /// A level's set count is neither zero (disabled) nor a power of two.
    #[error("{level}: set count {sets} must be zero or a power of two")]
    SetCountNotPowerOfTwo {
        /// Name of the offending level (`"L1-I"`, `"L1-D"`, `"L2"`).
        level: &'static str,
        /// The rejected set count.
        sets: u64,
    },

    /// The configuration document could not be deserialized.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
