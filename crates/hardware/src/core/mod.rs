//! Cache hierarchy core.
//!
//! This module contains the hierarchy that routes references through the split
//! L1 caches into the unified L2, and the per-level cache units it is built from.

/// Split-L1 / unified-L2 hierarchy and its entry points.
pub mod hierarchy;

/// Functional units (cache levels and their replacement state).
pub mod units;

pub use self::hierarchy::CacheHierarchy;
