//! Cache Replacement Policies.
//!
//! Each cache set owns its own replacement state. The hierarchy models true
//! LRU: a set is an ordered list of tags and the victim is always the tag that
//! has gone longest without a hit or an insert.

/// Least Recently Used set.
pub mod lru;

pub use lru::LruSet;
