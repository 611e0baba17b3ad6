//! Three-level cache hierarchy.
//!
//! Split L1 instruction and data caches share a unified L2, which is backed by
//! fixed-latency main memory. Each reference is resolved completely, including
//! every cascading lower-level access, before the call returns.
//!
//! When the hierarchy is inclusive, a line the L2 evicts is also dropped from
//! both L1 caches. The requesting L1 drops it before installing its own line, so
//! the back-invalidation can free the slot the install would otherwise take.

use tracing::{debug, trace};

use crate::common::{AccessType, ConfigError};
use crate::config::Config;
use crate::core::units::cache::{Access, CacheLevel, NextLevel};
use crate::memory::SimpleController;
use crate::stats::HierarchyStats;

/// Which L1 a reference enters through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Instruction,
    Data,
}

/// The L2 as seen from an L1 miss.
///
/// Forwards the miss to the L2 (and through it to memory). Under inclusion the
/// L2's victim is handed back to the requesting L1 and remembered so the
/// hierarchy can drop it from the other L1 as well.
struct L2Port<'a> {
    l2: &'a mut CacheLevel,
    memory: &'a mut SimpleController,
    inclusive: bool,
    back_invalidated: Option<u64>,
}

impl NextLevel for L2Port<'_> {
    fn access(&mut self, addr: u64) -> Access {
        let access = self.l2.access(addr, &mut *self.memory);
        let evicted = access.evicted.filter(|_| self.inclusive);
        if let Some(line) = evicted {
            trace!("L2 evicted line {line:#x}, back-invalidating L1");
        }
        self.back_invalidated = evicted;
        Access {
            cycles: access.cycles,
            evicted,
        }
    }
}

/// Split-L1, unified-L2 cache hierarchy with its own statistics.
///
/// Construct one per simulated core. Sets are mutated in place, so a hierarchy
/// shared between threads must be serialized by the caller.
#[derive(Clone, Debug)]
pub struct CacheHierarchy {
    icache: CacheLevel,
    dcache: CacheLevel,
    l2: CacheLevel,
    memory: SimpleController,
    line_bytes: u64,
    inclusive: bool,
    references: u64,
    total_cycles: u64,
}

impl CacheHierarchy {
    /// Builds an empty hierarchy from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the line size or any level's set count
    /// violates its power-of-two constraint. No level is built in that case.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let cache = &config.cache;
        let hierarchy = Self {
            icache: CacheLevel::new("L1-I", &cache.l1_i, cache.line_bytes)?,
            dcache: CacheLevel::new("L1-D", &cache.l1_d, cache.line_bytes)?,
            l2: CacheLevel::new("L2", &cache.l2, cache.line_bytes)?,
            memory: SimpleController::from_config(&config.memory),
            line_bytes: cache.line_bytes,
            inclusive: cache.inclusive,
            references: 0,
            total_cycles: 0,
        };
        debug!(
            line_bytes = cache.line_bytes,
            inclusive = cache.inclusive,
            memory_latency = config.memory.latency,
            "built cache hierarchy"
        );
        for level in hierarchy.levels() {
            debug!(
                level = level.name(),
                sets = level.set_count(),
                ways = level.ways(),
                latency = level.latency(),
                enabled = level.is_enabled(),
                "cache level"
            );
        }
        Ok(hierarchy)
    }

    /// Services one trace reference, routing by kind.
    ///
    /// Fetches go to the instruction cache; reads and writes to the data cache.
    pub fn access(&mut self, kind: AccessType, addr: u64) -> u64 {
        match kind {
            AccessType::Fetch => self.instruction_access(addr),
            AccessType::Read | AccessType::Write => self.data_access(addr),
        }
    }

    /// Instruction fetch through the L1 instruction cache.
    pub fn instruction_access(&mut self, addr: u64) -> u64 {
        self.l1_access(Side::Instruction, addr)
    }

    /// Load or store through the L1 data cache.
    pub fn data_access(&mut self, addr: u64) -> u64 {
        self.l1_access(Side::Data, addr)
    }

    /// Reference issued directly to the L2, bypassing both L1 caches.
    pub fn l2_access(&mut self, addr: u64) -> u64 {
        let access = self.l2.access(addr, &mut self.memory);
        if self.inclusive {
            if let Some(line) = access.evicted {
                trace!("L2 evicted line {line:#x}, back-invalidating L1");
                let _ = self.icache.invalidate(line);
                let _ = self.dcache.invalidate(line);
            }
        }
        self.record(access.cycles)
    }

    fn l1_access(&mut self, side: Side, addr: u64) -> u64 {
        let (requester, sibling) = match side {
            Side::Instruction => (&mut self.icache, &mut self.dcache),
            Side::Data => (&mut self.dcache, &mut self.icache),
        };
        let mut port = L2Port {
            l2: &mut self.l2,
            memory: &mut self.memory,
            inclusive: self.inclusive,
            back_invalidated: None,
        };
        let access = requester.access(addr, &mut port);
        if let Some(line) = port.back_invalidated {
            let _ = sibling.invalidate(line);
        }
        self.record(access.cycles)
    }

    fn record(&mut self, cycles: u64) -> u64 {
        self.references += 1;
        self.total_cycles = self.total_cycles.saturating_add(cycles);
        cycles
    }

    /// L1 instruction cache.
    #[inline]
    pub const fn icache(&self) -> &CacheLevel {
        &self.icache
    }

    /// L1 data cache.
    #[inline]
    pub const fn dcache(&self) -> &CacheLevel {
        &self.dcache
    }

    /// Unified L2 cache.
    #[inline]
    pub const fn l2(&self) -> &CacheLevel {
        &self.l2
    }

    /// All three levels, L1-I first.
    pub const fn levels(&self) -> [&CacheLevel; 3] {
        [&self.icache, &self.dcache, &self.l2]
    }

    /// Line size shared by every level.
    #[inline]
    pub const fn line_bytes(&self) -> u64 {
        self.line_bytes
    }

    /// Main memory latency in cycles.
    #[inline]
    pub const fn memory_latency(&self) -> u64 {
        self.memory.latency()
    }

    /// Whether L2 evictions back-invalidate the L1 caches.
    #[inline]
    pub const fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    /// Snapshot of every level's counters and the top-level totals.
    pub fn stats(&self) -> HierarchyStats {
        HierarchyStats {
            icache: *self.icache.stats(),
            dcache: *self.dcache.stats(),
            l2: *self.l2.stats(),
            references: self.references,
            total_cycles: self.total_cycles,
        }
    }

    /// Zeroes all counters, keeping cached lines (end of a warm-up phase).
    pub fn reset_stats(&mut self) {
        self.icache.reset_stats();
        self.dcache.reset_stats();
        self.l2.reset_stats();
        self.references = 0;
        self.total_cycles = 0;
    }
}
