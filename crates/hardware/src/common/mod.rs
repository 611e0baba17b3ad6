//! Common types shared by every cache level.
//!
//! This module provides:
//! 1. **Address Decoding:** Splitting an address into tag, set index, and line offset.
//! 2. **Access Kinds:** Classifying references as instruction fetches, loads, or stores.
//! 3. **Error Handling:** Configuration errors raised while building a hierarchy.

/// Address decomposition (tag / index / offset).
pub mod addr;

/// Memory reference classification.
pub mod data;

/// Configuration error type.
pub mod error;

pub use addr::{AddressDecoder, Decoded};
pub use data::AccessType;
pub use error::ConfigError;
