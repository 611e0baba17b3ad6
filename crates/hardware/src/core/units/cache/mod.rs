//! Set-Associative Cache Level.
//!
//! This module implements one level of the hierarchy: an array of LRU sets with
//! a fixed hit time and a set of statistics counters. It provides:
//! 1. **Lookup:** Hits return the level's hit time and promote the line.
//! 2. **Escalation:** Misses query the next level through [`NextLevel`], charge the
//!    returned latency as miss penalty, and install the line.
//! 3. **Back-invalidation:** Lines dropped by a lower level can be removed here so
//!    an inclusive hierarchy never holds a line its L2 has lost.
//!
//! Levels never reference each other. The caller passes the next level in for
//! every access, which is how the hierarchy wires L1 -> L2 -> memory.

/// Cache replacement state (LRU sets).
pub mod policies;

use self::policies::LruSet;
use crate::common::ConfigError;
use crate::common::addr::AddressDecoder;
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// Result of servicing one reference at some level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Access {
    /// Latency in cycles, including every lower level consulted.
    pub cycles: u64,
    /// Base address of a line the servicing level dropped while handling the
    /// reference. A level that receives this from below drops the line too.
    pub evicted: Option<u64>,
}

impl Access {
    /// An access that cost `cycles` and dropped nothing.
    #[inline]
    pub const fn served(cycles: u64) -> Self {
        Self {
            cycles,
            evicted: None,
        }
    }
}

/// Anything a cache level can escalate a miss to.
pub trait NextLevel {
    /// Services a reference to `addr` and reports its latency.
    fn access(&mut self, addr: u64) -> Access;
}

/// One level of the hierarchy.
#[derive(Clone, Debug)]
pub struct CacheLevel {
    name: &'static str,
    decoder: AddressDecoder,
    sets: Vec<LruSet>,
    ways: usize,
    latency: u64,
    stats: CacheStats,
}

impl CacheLevel {
    /// Creates an empty level.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in logs and error messages (`"L1-I"`, `"L2"`, ...)
    /// * `config` - Set count, associativity, and hit time
    /// * `line_bytes` - Line size shared by the whole hierarchy
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `line_bytes` is not a power of two or
    /// `config.sets` is neither zero nor a power of two.
    pub fn new(
        name: &'static str,
        config: &CacheConfig,
        line_bytes: u64,
    ) -> Result<Self, ConfigError> {
        let decoder = AddressDecoder::new(name, line_bytes, config.sets)?;
        Ok(Self {
            name,
            decoder,
            sets: (0..config.sets).map(|_| LruSet::new(config.ways)).collect(),
            ways: config.ways,
            latency: config.latency,
            stats: CacheStats::default(),
        })
    }

    /// Label given at construction.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `false` for a level configured with zero sets.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        !self.sets.is_empty()
    }

    /// Number of sets.
    #[inline]
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Associativity.
    #[inline]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Hit time in cycles.
    #[inline]
    pub const fn latency(&self) -> u64 {
        self.latency
    }

    /// This level's address decoder.
    #[inline]
    pub const fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// Counters accumulated since construction or the last reset.
    #[inline]
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zeroes the counters without touching cached lines.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// The set at `index`, for inspection.
    pub fn set(&self, index: usize) -> Option<&LruSet> {
        self.sets.get(index)
    }

    /// Returns `true` if the line holding `addr` is cached here.
    ///
    /// Side-effect free: no counters move and recency order is unchanged.
    pub fn contains(&self, addr: u64) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let line = self.decoder.decode(addr);
        self.sets[line.index].contains(line.tag)
    }

    /// Services a reference to `addr`, escalating to `next` on a miss.
    ///
    /// A disabled level forwards the reference untouched and returns the next
    /// level's latency unchanged. Otherwise a hit costs the hit time; a miss
    /// costs the hit time plus whatever `next` charges, and installs the line as
    /// most recently used. Latencies saturate at `u64::MAX`. The returned
    /// [`Access::evicted`] is the line this level dropped to make room, if any.
    ///
    /// If `next` reports the requested line itself as evicted, the line is not
    /// installed here either.
    pub fn access<N: NextLevel + ?Sized>(&mut self, addr: u64, next: &mut N) -> Access {
        if !self.is_enabled() {
            return Access::served(next.access(addr).cycles);
        }

        self.stats.references += 1;
        let line = self.decoder.decode(addr);
        if self.sets[line.index].lookup_and_promote(line.tag) {
            return Access::served(self.latency);
        }

        self.stats.misses += 1;
        let below = next.access(addr);
        self.stats.penalty_cycles = self.stats.penalty_cycles.saturating_add(below.cycles);
        let cycles = self.latency.saturating_add(below.cycles);

        // The level below could not keep the line (zero ways).
        if below.evicted == Some(self.decoder.line_base(addr)) {
            return Access::served(cycles);
        }
        if let Some(dropped) = below.evicted {
            let _ = self.invalidate(dropped);
        }

        let evicted = self.sets[line.index]
            .insert(line.tag)
            .map(|victim| self.decoder.compose(victim, line.index, 0));

        Access { cycles, evicted }
    }

    /// Drops the line holding `addr`, returning whether it was present.
    ///
    /// The address is decoded with this level's own geometry, so any address
    /// within the line works.
    pub fn invalidate(&mut self, addr: u64) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let line = self.decoder.decode(addr);
        self.sets[line.index].evict(line.tag)
    }
}
