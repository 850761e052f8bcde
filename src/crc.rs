//! Bit-serial CRC primitives.
//!
//! Each function XORs a message byte into the remainder and then runs the
//! 8-round shift-and-conditional-XOR loop. None of them apply a final XOR;
//! callers that need one apply it to the result.
//!
//! ## Bit Ordering
//! - MSB-first variants test the top bit of the working word and shift left
//! - LSB-first variants test bit 0 and shift right
//!
//! CRC-4 and CRC-7 keep the polynomial aligned at the top of an 8-bit
//! working register; the unused low bits are dropped on return.

#![allow(clippy::cast_possible_truncation)]

use crate::reflect::reverse8;

/// CRC-4, MSB-first.
///
/// # Arguments
/// * `message` - Input bytes
/// * `polynomial` - 4-bit generator without the implicit top bit
/// * `init` - 4-bit initial remainder
pub fn crc4(message: &[u8], polynomial: u8, init: u8) -> u8 {
    let poly = u32::from(polynomial) << 4;
    let mut remainder = u32::from(init) << 4;

    for &byte in message {
        remainder ^= u32::from(byte);
        for _ in 0..8 {
            remainder = if remainder & 0x80 != 0 {
                (remainder << 1) ^ poly
            } else {
                remainder << 1
            };
        }
    }

    (remainder >> 4 & 0x0F) as u8
}

/// CRC-7, MSB-first.
///
/// # Arguments
/// * `message` - Input bytes
/// * `polynomial` - 7-bit generator without the implicit top bit
/// * `init` - 7-bit initial remainder
pub fn crc7(message: &[u8], polynomial: u8, init: u8) -> u8 {
    let poly = u32::from(polynomial) << 1;
    let mut remainder = u32::from(init) << 1;

    for &byte in message {
        remainder ^= u32::from(byte);
        for _ in 0..8 {
            remainder = if remainder & 0x80 != 0 {
                (remainder << 1) ^ poly
            } else {
                remainder << 1
            };
        }
    }

    (remainder >> 1 & 0x7F) as u8
}

/// CRC-8, MSB-first.
pub fn crc8(message: &[u8], polynomial: u8, init: u8) -> u8 {
    let mut remainder = init;

    for &byte in message {
        remainder ^= byte;
        for _ in 0..8 {
            remainder = if remainder & 0x80 != 0 {
                (remainder << 1) ^ polynomial
            } else {
                remainder << 1
            };
        }
    }

    remainder
}

/// CRC-8, LSB-first ("little-endian").
///
/// `polynomial` and `init` are given in normal (MSB-first) notation and
/// reflected before use, so `crc8le(m, 0x07, 0xFF)` is CRC-8/ROHC.
pub fn crc8le(message: &[u8], polynomial: u8, init: u8) -> u8 {
    let poly = reverse8(polynomial);
    let mut remainder = reverse8(init);

    for &byte in message {
        remainder ^= byte;
        for _ in 0..8 {
            remainder = if remainder & 1 != 0 {
                (remainder >> 1) ^ poly
            } else {
                remainder >> 1
            };
        }
    }

    remainder
}

/// CRC-16, MSB-first. Each byte enters at bit 15.
pub fn crc16(message: &[u8], polynomial: u16, init: u16) -> u16 {
    let mut remainder = init;

    for &byte in message {
        remainder ^= u16::from(byte) << 8;
        for _ in 0..8 {
            remainder = if remainder & 0x8000 != 0 {
                (remainder << 1) ^ polynomial
            } else {
                remainder << 1
            };
        }
    }

    remainder
}

/// CRC-16, LSB-first.
///
/// Unlike [`crc8le`], `polynomial` and `init` are taken as already
/// reflected (e.g. `0xA001` for CRC-16/ARC).
pub fn crc16lsb(message: &[u8], polynomial: u16, init: u16) -> u16 {
    let mut remainder = init;

    for &byte in message {
        remainder ^= u16::from(byte);
        for _ in 0..8 {
            remainder = if remainder & 1 != 0 {
                (remainder >> 1) ^ polynomial
            } else {
                remainder >> 1
            };
        }
    }

    remainder
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECK: &[u8] = b"123456789";

    #[test]
    fn test_crc8_parity_vectors() {
        let msg = [0x08, 0x0A, 0xE8, 0x80];
        assert_eq!(crc8(&msg[..3], 0x80, 0x00), 0x80);
        assert_eq!(crc8(&msg, 0x80, 0x00), 0x00);
    }

    #[test]
    fn test_crc8_check_values() {
        assert_eq!(crc8(CHECK, 0x07, 0x00), 0xF4);
        assert_eq!(crc8(CHECK, 0x31, 0xFF), 0xF7);
        assert_eq!(crc8(&[], 0x07, 0x5A), 0x5A);
    }

    #[test]
    fn test_crc8le_check_values() {
        // CRC-8/ROHC
        assert_eq!(crc8le(CHECK, 0x07, 0xFF), 0xD0);
        // CRC-8/MAXIM-DOW
        assert_eq!(crc8le(CHECK, 0x31, 0x00), 0xA1);
        assert_eq!(crc8le(CHECK, 0x07, 0x00), 0x20);
    }

    #[test]
    fn test_crc8le_acurite_frame() {
        // Reflected payload bytes of a captured 38 F frame
        let frame = [0x4C, 0x50, 0x57, 0x00, 0xC3];
        assert_eq!(crc8le(&frame[..4], 0x07, 0x00), frame[4]);
    }

    #[test]
    fn test_crc7() {
        // CRC-7/MMC
        assert_eq!(crc7(CHECK, 0x09, 0x00), 0x75);
        assert!(crc7(&[0xFF, 0x00], 0x09, 0x7F) <= 0x7F);
    }

    #[test]
    fn test_crc4() {
        assert_eq!(crc4(CHECK, 0x03, 0x00), 0x0E);
        assert_eq!(crc4(&[0x0A, 0x51, 0x32], 0x03, 0x00), 0x05);
        assert_eq!(crc4(&[], 0x03, 0x09), 0x09);
    }

    #[test]
    fn test_crc16() {
        // CRC-16/IBM-3740 and CRC-16/XMODEM
        assert_eq!(crc16(CHECK, 0x1021, 0xFFFF), 0x29B1);
        assert_eq!(crc16(CHECK, 0x1021, 0x0000), 0x31C3);
    }

    #[test]
    fn test_crc16lsb() {
        // CRC-16/ARC
        assert_eq!(crc16lsb(CHECK, 0xA001, 0x0000), 0xBB3D);
        assert_eq!(crc16lsb(CHECK, 0x8408, 0xFFFF), 0x6F91);
    }
}
