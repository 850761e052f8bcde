//! Demodulated bit sequences.
//!
//! A [`BitSequence`] holds at most [`MAX_BITS`] bits in fixed storage, in
//! the order they were received. [`BitstreamDecoder`] fills one from the
//! payload region of a pulse train.
//!
//! ## Bit Numbering
//! - Bit 0 is the first bit received
//! - [`BitSequence::to_bytes`] packs bit 0 into the MSB of byte 0, matching
//!   the way frames are written out (`TTTT TTTT IIII ...`)

#![allow(clippy::cast_possible_truncation)]

use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;
use crate::pulse::PulseClassifier;

/// Largest frame the protocol transmits: 5 bytes.
pub const MAX_BITS: usize = 40;

/// Fixed-capacity ordered bit sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BitSequence {
    /// Bit i of the sequence lives at bit i of the word.
    bits: u64,
    /// Number of valid bits.
    length: usize,
}

impl BitSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one bit.
    ///
    /// # Returns
    /// `false` (and nothing appended) once [`MAX_BITS`] bits are held.
    pub fn push(&mut self, bit: u8) -> bool {
        if self.length >= MAX_BITS {
            return false;
        }
        if bit != 0 {
            self.bits |= 1 << self.length;
        }
        self.length += 1;
        true
    }

    /// Number of bits held.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// True when all [`MAX_BITS`] bits were received.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.length == MAX_BITS
    }

    /// Bit at `pos`, or `None` past the end.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<u8> {
        (pos < self.length).then(|| ((self.bits >> pos) & 1) as u8)
    }

    /// Iterate bits in received order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.length).map(move |pos| ((self.bits >> pos) & 1) as u8)
    }

    /// Pack bits into bytes, first bit into the MSB of byte 0.
    ///
    /// A trailing partial byte is zero-filled.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; (self.length + 7) / 8];
        for (pos, bit) in self.iter().enumerate() {
            bytes[pos / 8] |= bit << (7 - pos % 8);
        }
        bytes
    }
}

impl FromStr for BitSequence {
    type Err = DecodeError;

    /// Parse `0`/`1` characters; whitespace and `_` are ignored as grouping.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut seq = Self::new();
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != '_') {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                other => {
                    return Err(DecodeError::InvalidBitPattern(format!(
                        "unexpected character {other:?}"
                    )))
                }
            };
            if !seq.push(bit) {
                return Err(DecodeError::InvalidBitPattern(format!(
                    "more than {MAX_BITS} bits"
                )));
            }
        }
        Ok(seq)
    }
}

impl fmt::Display for BitSequence {
    /// Bits in nibble groups, e.g. `0011 0010 0000 1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, bit) in self.iter().enumerate() {
            if pos > 0 && pos % 4 == 0 {
                f.write_str(" ")?;
            }
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

/// Turns the payload region of a pulse train into a [`BitSequence`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BitstreamDecoder {
    classifier: PulseClassifier,
}

impl BitstreamDecoder {
    pub fn new(classifier: PulseClassifier) -> Self {
        Self { classifier }
    }

    /// Decode bits from `raw` starting one sample past `start`.
    ///
    /// Every second sample is classified; the ones in between are skipped.
    /// Decoding stops at the first frame-end symbol, at the final sample,
    /// or once [`MAX_BITS`] bits are collected.
    pub fn decode(&self, raw: &[u32], start: usize) -> BitSequence {
        let end = raw.len().saturating_sub(1);
        let mut seq = BitSequence::new();

        for &duration in raw.iter().take(end).skip(start.saturating_add(1)).step_by(2) {
            let Some(bit) = self.classifier.classify(duration).bit() else {
                break;
            };
            if !seq.push(bit) {
                break;
            }
        }

        seq
    }

    /// Classifier used for each sample.
    pub fn classifier(&self) -> &PulseClassifier {
        &self.classifier
    }
}
