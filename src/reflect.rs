//! Bit reflection and stuffed-nibble extraction.
//!
//! Transmitters that serialize LSB-first produce bytes whose bit order is
//! mirrored relative to the order they appear in a demodulated bitstream.
//! These helpers flip that order per byte or per nibble.

/// Reverse the bit order of a byte (bit 7 <-> bit 0).
#[inline]
pub fn reverse8(x: u8) -> u8 {
    let x = (x & 0xF0) >> 4 | (x & 0x0F) << 4;
    let x = (x & 0xCC) >> 2 | (x & 0x33) << 2;
    (x & 0xAA) >> 1 | (x & 0x55) << 1
}

/// Reverse the bit order of every byte in place.
pub fn reflect_bytes(message: &mut [u8]) {
    for byte in message.iter_mut() {
        *byte = reverse8(*byte);
    }
}

/// Reverse the bit order inside each nibble of a byte, keeping nibble
/// positions.
#[inline]
pub fn reflect4(x: u8) -> u8 {
    let x = (x & 0xCC) >> 2 | (x & 0x33) << 2;
    (x & 0xAA) >> 1 | (x & 0x55) << 1
}

/// Apply [`reflect4`] to every byte in place.
pub fn reflect_nibbles(message: &mut [u8]) {
    for byte in message.iter_mut() {
        *byte = reflect4(*byte);
    }
}

/// Extract 4-bit groups each followed by a stuff bit that must be `1`.
///
/// Bits are addressed MSB-first starting at `offset_bits`. Extraction stops
/// at the first stuff bit that reads `0`, or once fewer than 5 of
/// `num_bits` remain. The number of nibbles returned is the count that
/// passed the stuff-bit check.
///
/// # Arguments
/// * `message` - Source bytes
/// * `offset_bits` - Bit offset of the first nibble
/// * `num_bits` - Bits available from the offset
pub fn extract_nibbles_4b1s(message: &[u8], offset_bits: usize, num_bits: usize) -> Vec<u8> {
    let mut nibbles = Vec::with_capacity(num_bits / 5);
    let mut offset = offset_bits;
    let mut remaining = num_bits;

    while remaining >= 5 {
        let index = offset / 8;
        let Some(&high) = message.get(index) else {
            break;
        };
        let low = message.get(index + 1).copied().unwrap_or(0);

        // 16-bit window, 5 wanted bits aligned to the LSB
        let bits = (u16::from(high) << 8 | u16::from(low)) >> (11 - offset % 8);
        if bits & 1 != 1 {
            break;
        }

        nibbles.push(((bits >> 1) & 0x0F) as u8);
        offset += 5;
        remaining -= 5;
    }

    nibbles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse8() {
        assert_eq!(reverse8(0x00), 0x00);
        assert_eq!(reverse8(0x01), 0x80);
        assert_eq!(reverse8(0x32), 0x4C);
        assert_eq!(reverse8(0xC3), 0xC3);
        assert_eq!(reverse8(0xF0), 0x0F);
    }

    #[test]
    fn test_reverse8_involution() {
        for x in 0..=u8::MAX {
            assert_eq!(reverse8(reverse8(x)), x);
        }
    }

    #[test]
    fn test_reflect_bytes() {
        let mut msg = [0x32, 0x0A, 0xEA, 0x00, 0xC3];
        reflect_bytes(&mut msg);
        assert_eq!(msg, [0x4C, 0x50, 0x57, 0x00, 0xC3]);
    }

    #[test]
    fn test_reflect4() {
        assert_eq!(reflect4(0x12), 0x84);
        assert_eq!(reflect4(0x1E), 0x87);
        assert_eq!(reflect4(0xFF), 0xFF);

        let mut msg = [0x12, 0x80];
        reflect_nibbles(&mut msg);
        assert_eq!(msg, [0x84, 0x10]);
    }

    #[test]
    fn test_extract_nibbles_stops_on_stuff_error() {
        // 10101 00111 11110 1...
        let msg = [0xA9, 0xFD, 0x00];
        assert_eq!(extract_nibbles_4b1s(&msg, 0, 24), vec![0x0A, 0x03]);
    }

    #[test]
    fn test_extract_nibbles_respects_bit_count() {
        let msg = [0xA9, 0xFD, 0x00];
        assert_eq!(extract_nibbles_4b1s(&msg, 0, 9), vec![0x0A]);
        assert!(extract_nibbles_4b1s(&msg, 0, 4).is_empty());
    }

    #[test]
    fn test_extract_nibbles_unaligned_offset() {
        // Same groups shifted right by 3 bits: 000 10101 00111 ...
        let msg = [0x15, 0x3F, 0xA0];
        assert_eq!(extract_nibbles_4b1s(&msg, 3, 10), vec![0x0A, 0x03]);
    }

    #[test]
    fn test_extract_nibbles_past_end() {
        assert!(extract_nibbles_4b1s(&[], 0, 10).is_empty());
        // Last byte holds a full group, the missing next byte reads as zero
        assert_eq!(extract_nibbles_4b1s(&[0xA8], 0, 5), vec![0x0A]);
    }
}
