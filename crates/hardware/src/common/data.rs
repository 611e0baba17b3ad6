//! Memory Access Types.
//!
//! Every reference in a trace carries one of these kinds. The hierarchy uses it
//! only for routing: fetches go to the instruction cache, loads and stores go to
//! the data cache. Reads and writes are timed identically since no write policy
//! is modeled.

use serde::Deserialize;

/// Type of memory reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Instruction fetch; served by the L1 instruction cache.
    #[serde(alias = "i", alias = "ifetch")]
    Fetch,

    /// Data load; served by the L1 data cache.
    #[serde(alias = "r", alias = "load")]
    Read,

    /// Data store; served by the L1 data cache with the same timing as a load.
    #[serde(alias = "w", alias = "store")]
    Write,
}

impl AccessType {
    /// Returns `true` for references that are routed to the instruction cache.
    #[inline]
    pub const fn is_instruction(self) -> bool {
        matches!(self, Self::Fetch)
    }
}
