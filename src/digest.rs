//! LFSR-keyed digests, parity and simple sums.
//!
//! The keyed digests XOR a rolling key into the sum for every set data bit.
//! After each bit the key advances one LFSR step: the bit shifted out
//! decides whether `generator` is applied.

#![allow(clippy::cast_possible_truncation)]

/// Keyed 8-bit digest, bytes in order, bits MSB-first.
///
/// The key rolls right; `generator` must carry the dropped LSB as its MSB.
pub fn lfsr_digest8(message: &[u8], generator: u8, key: u8) -> u8 {
    let mut key = key;
    let mut sum = 0u8;

    for &data in message {
        for i in (0..8).rev() {
            if (data >> i) & 1 != 0 {
                sum ^= key;
            }
            key = if key & 1 != 0 { (key >> 1) ^ generator } else { key >> 1 };
        }
    }

    sum
}

/// Keyed 8-bit digest, bytes last to first, bits LSB-first.
///
/// Mirror of [`lfsr_digest8`]: the key rolls left and `generator` must carry the
/// dropped MSB as its LSB.
pub fn lfsr_digest8_reflect(message: &[u8], generator: u8, key: u8) -> u8 {
    let mut key = key;
    let mut sum = 0u8;

    for &data in message.iter().rev() {
        for i in 0..8 {
            if (data >> i) & 1 != 0 {
                sum ^= key;
            }
            key = if key & 0x80 != 0 { (key << 1) ^ generator } else { key << 1 };
        }
    }

    sum
}

/// Keyed 16-bit digest over the low `bits` bits of `data`, MSB-first.
///
/// `bits` is clamped to 32.
pub fn lfsr_digest16(data: u32, bits: u32, generator: u16, key: u16) -> u16 {
    let mut key = key;
    let mut sum = 0u16;

    for bit in (0..bits.min(32)).rev() {
        if (data >> bit) & 1 != 0 {
            sum ^= key;
        }
        key = if key & 1 != 0 { (key >> 1) ^ generator } else { key >> 1 };
    }

    sum
}

/// Parity of a byte: 1 for an odd number of set bits.
///
/// Folds the high nibble into the low one and looks the result up in the
/// 16-entry table packed into `0x6996`.
#[inline]
pub fn parity8(byte: u8) -> u8 {
    let folded = (byte ^ (byte >> 4)) & 0x0F;
    ((0x6996u16 >> folded) & 1) as u8
}

/// Parity across a whole buffer.
pub fn parity_bytes(message: &[u8]) -> u8 {
    message.iter().fold(0, |acc, &b| acc ^ parity8(b))
}

/// Byte-wise XOR of a buffer.
pub fn xor_bytes(message: &[u8]) -> u8 {
    message.iter().fold(0, |acc, &b| acc ^ b)
}

/// Byte-wise sum of a buffer into a `u64`, without truncation.
///
/// A `u64` cannot overflow for any buffer that fits in memory.
pub fn add_bytes(message: &[u8]) -> u64 {
    message.iter().map(|&b| u64::from(b)).sum()
}

/// Nibble-wise sum into a `u64`: each byte contributes its high and low
/// nibble.
pub fn add_nibbles(message: &[u8]) -> u64 {
    message
        .iter()
        .map(|&b| u64::from(b >> 4) + u64::from(b & 0x0F))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECK: &[u8] = b"123456789";

    #[test]
    fn test_lfsr_digest8() {
        assert_eq!(lfsr_digest8(CHECK, 0x98, 0xF1), 0x54);
        // MSB of the first byte picks up the initial key
        assert_eq!(lfsr_digest8(&[0x80], 0x98, 0xF1), 0xF1);
        assert_eq!(lfsr_digest8(&[0x40], 0x98, 0xF1), 0xE0);
        assert_eq!(lfsr_digest8(&[0x01], 0x98, 0xF1), 0x9B);
        assert_eq!(lfsr_digest8(&[], 0x98, 0xF1), 0x00);
    }

    #[test]
    fn test_lfsr_digest8_reflect() {
        assert_eq!(lfsr_digest8_reflect(CHECK, 0x31, 0xF4), 0x9E);
        // LSB of the last byte picks up the initial key
        assert_eq!(lfsr_digest8_reflect(&[0x01], 0x31, 0xF4), 0xF4);
        assert_eq!(lfsr_digest8_reflect(&[0x00, 0x01], 0x31, 0xF4), 0xF4);
        assert_eq!(lfsr_digest8_reflect(&[0x02, 0x00], 0x31, 0xF4), 0x8C);
    }

    #[test]
    fn test_lfsr_digest16() {
        assert_eq!(lfsr_digest16(0x12_3456, 24, 0x8810, 0xBA95), 0xE9AF);
        assert_eq!(lfsr_digest16(1, 1, 0x8810, 0xBA95), 0xBA95);
        // Leading zero bits only advance the key
        assert_eq!(lfsr_digest16(2, 2, 0x8810, 0xBA95), 0xBA95);
        assert_eq!(lfsr_digest16(0xFFFF, 0, 0x8810, 0xBA95), 0);
    }

    #[test]
    fn test_parity8() {
        assert_eq!(parity8(0x00), 0);
        assert_eq!(parity8(0x01), 1);
        assert_eq!(parity8(0x03), 0);
        assert_eq!(parity8(0x80), 1);
        assert_eq!(parity8(0xFF), 0);
        assert_eq!(parity8(0xFE), 1);
        for x in 0..=u8::MAX {
            assert_eq!(u32::from(parity8(x)), x.count_ones() % 2);
        }
    }

    #[test]
    fn test_parity_bytes() {
        assert_eq!(parity_bytes(&[0x01, 0x01]), 0);
        assert_eq!(parity_bytes(&[0x01, 0x03]), 1);
        assert_eq!(parity_bytes(&[]), 0);
    }

    #[test]
    fn test_sums() {
        assert_eq!(xor_bytes(&[0x12, 0xFF, 0x0A]), 0xE7);
        assert_eq!(add_bytes(&[0x12, 0xFF, 0x0A]), 0x11B);
        assert_eq!(add_nibbles(&[0x12, 0xFF, 0x0A]), 43);
        assert_eq!(add_bytes(&[]), 0);
    }

    #[test]
    fn test_sums_past_u32() {
        // 0xFF * 17M exceeds u32::MAX
        let message = vec![0xFFu8; 17_000_000];
        assert_eq!(add_bytes(&message), 255 * 17_000_000);
        assert_eq!(add_nibbles(&message), 30 * 17_000_000);
    }
}
