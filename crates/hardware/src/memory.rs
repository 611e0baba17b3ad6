//! Main memory timing model.
//!
//! Memory terminates the hierarchy: it never misses and never evicts, so every
//! reference that reaches it costs the same fixed latency.

use crate::config::MemoryConfig;
use crate::core::units::cache::{Access, NextLevel};

/// Fixed-latency main memory; every access takes the same number of cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimpleController {
    latency: u64,
}

impl SimpleController {
    /// Creates a controller with the given fixed latency in cycles.
    pub const fn new(latency: u64) -> Self {
        Self { latency }
    }

    /// Creates a controller from the memory section of the configuration.
    pub const fn from_config(config: &MemoryConfig) -> Self {
        Self::new(config.latency)
    }

    /// Cycles charged for every access.
    #[inline]
    pub const fn latency(&self) -> u64 {
        self.latency
    }
}

impl NextLevel for SimpleController {
    fn access(&mut self, _addr: u64) -> Access {
        Access::served(self.latency)
    }
}
