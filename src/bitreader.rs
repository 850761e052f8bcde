//! Sequential field reader over a [`BitSequence`].
//!
//! Acu-Rite fields are transmitted least significant bit first, so a
//! multi-bit read places the first bit it consumes at bit 0 of the result.

use crate::bitstream::BitSequence;
use crate::error::DecodeError;

/// Sequential LSB-first reader.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    /// Source bits.
    bits: &'a BitSequence,
    /// Current bit position.
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bits: &'a BitSequence) -> Self {
        Self { bits, bit_pos: 0 }
    }

    /// Current bit position.
    #[inline]
    pub fn position(&self) -> usize {
        self.bit_pos
    }

    /// Number of unread bits.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.bit_pos)
    }

    fn underflow(&self, wanted: usize) -> DecodeError {
        DecodeError::TruncatedBitstream {
            got: self.bits.len(),
            required: self.bit_pos + wanted,
        }
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<u8, DecodeError> {
        let bit = self.bits.get(self.bit_pos).ok_or_else(|| self.underflow(1))?;
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Read a single bit as a flag.
    #[inline]
    pub fn read_flag(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_bit()? == 1)
    }

    /// Read `num_bits` (1-32) LSB-first into a right-justified `u32`.
    pub fn read_bits(&mut self, num_bits: usize) -> Result<u32, DecodeError> {
        if num_bits == 0 || num_bits > 32 {
            return Err(DecodeError::InvalidBitPattern(format!(
                "cannot read {num_bits} bits into u32"
            )));
        }
        if self.remaining() < num_bits {
            return Err(self.underflow(num_bits));
        }

        let mut value = 0u32;
        for shift in 0..num_bits {
            value |= u32::from(self.read_bit()?) << shift;
        }

        Ok(value)
    }

    /// Skip `count` bits.
    pub fn skip(&mut self, count: usize) -> Result<(), DecodeError> {
        if self.remaining() < count {
            return Err(self.underflow(count));
        }

        self.bit_pos += count;
        Ok(())
    }
}
