//! Hierarchy tests.


/// Randomized invariants over reference streams.
pub mod properties;
