//! Cache hierarchy statistics.
//!
//! This module tracks the counters each level accumulates during a run. It provides:
//! 1. **Per-level counters:** References, misses, and cumulative miss penalty cycles.
//! 2. **Derived metrics:** Hit/miss rates and average miss penalty, zero when undefined.
//! 3. **Hierarchy summary:** All three levels plus the cycles charged to top-level
//!    references, from which the average memory access time follows.
//!
//! Statistics serialize with serde so a driver can report them in any format.

use serde::Serialize;

/// Counters for one cache level.
///
/// All three counters are monotonically non-decreasing during a run and
/// `misses <= references` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups performed by this level (disabled levels never count).
    pub references: u64,
    /// Lookups that did not find the line.
    pub misses: u64,
    /// Cycles charged by lower levels while servicing this level's misses.
    pub penalty_cycles: u64,
}

impl CacheStats {
    /// References that hit.
    #[inline]
    pub const fn hits(&self) -> u64 {
        self.references - self.misses
    }

    /// `misses / references`, or 0 when nothing was referenced.
    pub fn miss_rate(&self) -> f64 {
        ratio(self.misses, self.references)
    }

    /// `hits / references`, or 0 when nothing was referenced.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits(), self.references)
    }

    /// `penalty_cycles / misses`, or 0 when there were no misses.
    pub fn average_penalty(&self) -> f64 {
        ratio(self.penalty_cycles, self.misses)
    }
}

/// Snapshot of every level in a hierarchy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HierarchyStats {
    /// L1 instruction cache.
    pub icache: CacheStats,
    /// L1 data cache.
    pub dcache: CacheStats,
    /// Unified L2 cache.
    pub l2: CacheStats,
    /// References issued through the hierarchy's entry points.
    pub references: u64,
    /// Total latency returned for those references.
    pub total_cycles: u64,
}

impl HierarchyStats {
    /// Average memory access time in cycles per top-level reference.
    pub fn amat(&self) -> f64 {
        ratio(self.total_cycles, self.references)
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}
