//! Functional units of the memory hierarchy.

/// Set-associative cache level with LRU replacement.
pub mod cache;
