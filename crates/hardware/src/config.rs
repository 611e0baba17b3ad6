//! Configuration system for the cache hierarchy.
//!
//! This module defines the configuration structures used to parameterize a
//! `CacheHierarchy`. It provides:
//! 1. **Defaults:** Baseline geometry and latency constants.
//! 2. **Structures:** Per-level geometry, the shared hierarchy parameters, and main memory.
//! 3. **Validation:** Power-of-two checks performed before any level is built.
//!
//! Configuration is supplied as JSON by the driver, or use `Config::default()`.

use serde::Deserialize;

use crate::common::ConfigError;
use crate::common::addr::AddressDecoder;

/// Default configuration constants.
///
/// These values describe a small, enabled hierarchy that is used whenever a
/// field is omitted from the configuration document.
mod defaults {
    /// Default number of sets in each L1 cache.
    pub const L1_SETS: u64 = 64;

    /// Default L1 associativity.
    pub const L1_WAYS: usize = 2;

    /// Default L1 hit time in cycles.
    pub const L1_LATENCY: u64 = 1;

    /// Default number of sets in the L2 cache.
    pub const L2_SETS: u64 = 256;

    /// Default L2 associativity.
    pub const L2_WAYS: usize = 8;

    /// Default L2 hit time in cycles.
    pub const L2_LATENCY: u64 = 10;

    /// Default line size in bytes, shared by all levels.
    pub const LINE_BYTES: u64 = 64;

    /// Default main memory latency in cycles.
    pub const MEMORY_LATENCY: u64 = 100;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::Config;
///
/// let json = r#"{
///     "cache": {
///         "l1_i": { "sets": 0 },
///         "l1_d": { "sets": 1, "ways": 1, "latency": 1 },
///         "l2":   { "sets": 1, "ways": 2, "latency": 10 },
///         "line_bytes": 64,
///         "inclusive": true
///     },
///     "memory": { "latency": 100 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.l1_i.sets, 0);
/// assert_eq!(config.cache.l2.ways, 2);
/// assert!(config.cache.inclusive);
/// assert_eq!(config.memory.latency, 100);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Cache hierarchy configuration
    #[serde(default)]
    pub cache: CacheHierarchyConfig,
    /// Main memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields, and
    /// the errors of [`validate`](Self::validate) for impossible geometry.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every power-of-two constraint without building any level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LineSizeNotPowerOfTwo`] if the shared line size is
    /// invalid, or [`ConfigError::SetCountNotPowerOfTwo`] naming the first level
    /// whose set count is neither zero nor a power of two.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cache = &self.cache;
        for (level, config) in cache.levels() {
            let _ = AddressDecoder::new(level, cache.line_bytes, config.sets)?;
        }
        Ok(())
    }
}

/// Cache hierarchy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheHierarchyConfig {
    /// L1 instruction cache
    #[serde(default = "CacheConfig::default_l1")]
    pub l1_i: CacheConfig,
    /// L1 data cache
    #[serde(default = "CacheConfig::default_l1")]
    pub l1_d: CacheConfig,
    /// Unified L2 cache
    #[serde(default = "CacheConfig::default_l2")]
    pub l2: CacheConfig,

    /// Line size in bytes, shared by every level
    #[serde(default = "CacheHierarchyConfig::default_line")]
    pub line_bytes: u64,

    /// Back-invalidate L1 lines when the L2 evicts them
    #[serde(default)]
    pub inclusive: bool,
}

impl CacheHierarchyConfig {
    /// Level names paired with their configuration, L1-I first.
    pub const fn levels(&self) -> [(&'static str, &CacheConfig); 3] {
        [("L1-I", &self.l1_i), ("L1-D", &self.l1_d), ("L2", &self.l2)]
    }

    /// Returns the default line size in bytes.
    const fn default_line() -> u64 {
        defaults::LINE_BYTES
    }
}

impl Default for CacheHierarchyConfig {
    /// Creates a default, non-inclusive hierarchy.
    fn default() -> Self {
        Self {
            l1_i: CacheConfig::default_l1(),
            l1_d: CacheConfig::default_l1(),
            l2: CacheConfig::default_l2(),
            line_bytes: defaults::LINE_BYTES,
            inclusive: false,
        }
    }
}

/// Individual cache level configuration.
///
/// A set count of zero disables the level: references pass straight through
/// to the next level and the level's counters never move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Number of sets (zero or a power of two)
    pub sets: u64,

    /// Associativity (tags per set)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Hit time in cycles
    #[serde(default = "CacheConfig::default_latency")]
    pub latency: u64,
}

impl CacheConfig {
    /// A disabled level.
    pub const fn disabled() -> Self {
        Self {
            sets: 0,
            ways: 0,
            latency: 0,
        }
    }

    /// Returns `true` unless the level is the disabled sentinel.
    #[inline]
    pub const fn is_enabled(&self) -> bool {
        self.sets != 0
    }

    /// Returns the default associativity for a level whose `ways` field is omitted.
    const fn default_ways() -> usize {
        1
    }

    /// Returns the default hit time for a level whose `latency` field is omitted.
    const fn default_latency() -> u64 {
        1
    }

    /// Returns the default L1 geometry.
    const fn default_l1() -> Self {
        Self {
            sets: defaults::L1_SETS,
            ways: defaults::L1_WAYS,
            latency: defaults::L1_LATENCY,
        }
    }

    /// Returns the default L2 geometry.
    const fn default_l2() -> Self {
        Self {
            sets: defaults::L2_SETS,
            ways: defaults::L2_WAYS,
            latency: defaults::L2_LATENCY,
        }
    }
}

/// Main memory configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Fixed access latency in cycles
    #[serde(default = "MemoryConfig::default_latency")]
    pub latency: u64,
}

impl MemoryConfig {
    /// Returns the default memory latency in cycles.
    const fn default_latency() -> u64 {
        defaults::MEMORY_LATENCY
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            latency: defaults::MEMORY_LATENCY,
        }
    }
}
