//! Cache hierarchy timing simulator library.
//!
//! This crate models the latency of a three-level memory hierarchy for
//! trace-driven performance analysis:
//! 1. **Decoding:** Addresses split into tag, set index, and line offset per level.
//! 2. **Levels:** Set-associative caches with true LRU replacement and hit/miss counters.
//! 3. **Hierarchy:** Split L1-I/L1-D caches over a unified L2 over fixed-latency memory,
//!    with optional inclusion enforcement.
//! 4. **Configuration & statistics:** JSON-deserializable geometry and serializable
//!    per-level counters (miss rate, average penalty, AMAT).
//!
//! Trace reading and report formatting belong to the driver; this crate only
//! consumes addresses and returns latencies and counters.
//!
//! ```
//! use cachesim_core::{AccessType, CacheHierarchy, Config};
//!
//! let mut hierarchy = CacheHierarchy::new(&Config::default()).unwrap();
//! let cold = hierarchy.access(AccessType::Read, 0x1000);
//! let warm = hierarchy.access(AccessType::Read, 0x1000);
//! assert_eq!(cold, 1 + 10 + 100);
//! assert_eq!(warm, 1);
//! ```

/// Common types (address decoding, access kinds, errors).
pub mod common;
/// Hierarchy configuration (defaults, per-level geometry, validation).
pub mod config;
/// Cache hierarchy and cache levels.
pub mod core;
/// Main memory timing model.
pub mod memory;
/// Per-level and hierarchy-wide statistics.
pub mod stats;

/// Reference kind used to route trace entries.
pub use crate::common::AccessType;
/// Error returned when a configuration is rejected.
pub use crate::common::ConfigError;
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// The simulator itself; construct with `CacheHierarchy::new`.
pub use crate::core::CacheHierarchy;
/// Statistics snapshot returned by `CacheHierarchy::stats`.
pub use crate::stats::{CacheStats, HierarchyStats};
