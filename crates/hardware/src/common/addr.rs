//! Address decomposition for set-associative lookup.
//!
//! A cache level sees an address as three fields:
//! 1. **Offset:** the low `log2(line_bytes)` bits, the byte within a line.
//! 2. **Index:** the next `log2(sets)` bits, selecting the set.
//! 3. **Tag:** everything above, identifying the line within its set.
//!
//! Both geometry values must be powers of two so the split is a pair of shifts
//! and masks. A set count of zero is accepted and means the level is disabled;
//! such a level never decodes an address.

use super::error::ConfigError;

/// An address split into the fields a cache level uses to locate a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decoded {
    /// Line identity within its set.
    pub tag: u64,
    /// Set number, always `< sets`.
    pub index: usize,
    /// Byte offset within the line, always `< line_bytes`.
    pub offset: u64,
}

/// Shift/mask decoder for one level's geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    offset_bits: u32,
    index_bits: u32,
}

impl AddressDecoder {
    /// Creates a decoder for a level with `sets` sets of `line_bytes`-byte lines.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LineSizeNotPowerOfTwo`] if `line_bytes` is zero or
    /// not a power of two, and [`ConfigError::SetCountNotPowerOfTwo`] if `sets`
    /// is non-zero and not a power of two.
    pub fn new(level: &'static str, line_bytes: u64, sets: u64) -> Result<Self, ConfigError> {
        if !line_bytes.is_power_of_two() {
            return Err(ConfigError::LineSizeNotPowerOfTwo(line_bytes));
        }
        if sets != 0 && !sets.is_power_of_two() {
            return Err(ConfigError::SetCountNotPowerOfTwo { level, sets });
        }
        Ok(Self {
            offset_bits: line_bytes.trailing_zeros(),
            // `0.trailing_zeros()` is 64; a disabled level has no index field.
            index_bits: if sets == 0 { 0 } else { sets.trailing_zeros() },
        })
    }

    /// Number of low address bits that select a byte within a line.
    #[inline]
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Number of address bits that select a set.
    #[inline]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Splits `addr` into tag, index, and offset.
    #[inline]
    pub const fn decode(&self, addr: u64) -> Decoded {
        let offset = addr & mask(self.offset_bits);
        let index = (addr >> self.offset_bits) & mask(self.index_bits);
        let tag = if self.line_index_bits() < u64::BITS {
            addr >> self.line_index_bits()
        } else {
            0
        };
        Decoded {
            tag,
            index: index as usize,
            offset,
        }
    }

    /// Rebuilds the address that decodes to (`tag`, `index`, `offset`).
    ///
    /// Inverse of [`decode`](Self::decode): `compose(decode(a)) == a` for every `a`.
    #[inline]
    pub const fn compose(&self, tag: u64, index: usize, offset: u64) -> u64 {
        let high = if self.line_index_bits() < u64::BITS {
            tag << self.line_index_bits()
        } else {
            0
        };
        high | (((index as u64) & mask(self.index_bits)) << self.offset_bits)
            | (offset & mask(self.offset_bits))
    }

    /// Bits below the tag; 64 or more when the geometry leaves no tag.
    #[inline]
    const fn line_index_bits(&self) -> u32 {
        self.offset_bits + self.index_bits
    }

    /// Address of the first byte of the line containing `addr`.
    #[inline]
    pub const fn line_base(&self, addr: u64) -> u64 {
        addr & !mask(self.offset_bits)
    }
}

/// Low `bits` bits set. `bits` never exceeds 63 for a valid geometry.
#[inline]
const fn mask(bits: u32) -> u64 {
    (1u64 << bits) - 1
}
