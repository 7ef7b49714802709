//! Address Decomposition.
//!
//! A 64-bit address is split into three fields for a cache with `2^s` sets
//! and `2^b`-byte blocks:
//!
//! ```text
//!  63                     s+b  s+b-1         b  b-1          0
//! +-------------------------+------------------+-------------+
//! |           tag           |    set index     | block offset|
//! +-------------------------+------------------+-------------+
//! ```

use super::error::ConfigError;

/// Width of a trace address in bits.
pub const ADDRESS_BITS: u32 = 64;

/// An address split into its cache-relevant fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddr {
    /// All bits above position `s + b`.
    pub tag: u64,
    /// The `s` bits immediately above the block offset.
    pub set_index: u64,
    /// The low `b` bits. Not used by the hit/miss model.
    pub block_offset: u64,
}

/// Splits addresses for one fixed cache geometry.
///
/// Construction validates the bit widths once, so decoding itself cannot fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    set_bits: u32,
    block_bits: u32,
}

impl AddressDecoder {
    /// Creates a decoder for `s` set-index bits and `b` block-offset bits.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AddressWidth` if `s + b` exceeds the address width.
    pub fn new(set_bits: u32, block_bits: u32) -> Result<Self, ConfigError> {
        match set_bits.checked_add(block_bits) {
            Some(bits) if bits <= ADDRESS_BITS => Ok(Self {
                set_bits,
                block_bits,
            }),
            _ => Err(ConfigError::AddressWidth {
                set_bits,
                block_bits,
            }),
        }
    }

    /// Decomposes `address` into tag, set index, and block offset.
    pub fn decode(&self, address: u64) -> DecodedAddr {
        DecodedAddr {
            tag: shr(address, self.set_bits + self.block_bits),
            set_index: shr(address, self.block_bits) & low_mask(self.set_bits),
            block_offset: address & low_mask(self.block_bits),
        }
    }
}

/// Splits `address` into tag, set index, and block offset.
///
/// # Arguments
///
/// * `address` - The 64-bit address to decompose.
/// * `set_bits` - Number of set-index bits (`s`).
/// * `block_bits` - Number of block-offset bits (`b`).
///
/// # Errors
///
/// Returns `ConfigError::AddressWidth` if `s + b` exceeds the address width.
pub fn decode(address: u64, set_bits: u32, block_bits: u32) -> Result<DecodedAddr, ConfigError> {
    Ok(AddressDecoder::new(set_bits, block_bits)?.decode(address))
}

/// Logical right shift that yields 0 for a full-width shift.
fn shr(value: u64, bits: u32) -> u64 {
    value.checked_shr(bits).unwrap_or(0)
}

/// Mask covering the low `bits` bits.
fn low_mask(bits: u32) -> u64 {
    if bits >= ADDRESS_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}
