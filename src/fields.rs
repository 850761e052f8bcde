//! Field layout of an Acu-Rite 986 frame.
//!
//! ```text
//!   0123 4567 8901 2345 6789 0123 4567 8901 2345 6789
//!   TTTT TTTT IIII IIII IIII IIII SSSS SSSS CCCC CCCC
//! ```
//!
//! - `T`: temperature in Fahrenheit, sign-magnitude, sign first, then the
//!   7-bit magnitude LSB-first
//! - `I`: 16-bit identity, LSB-first, changes at every power-up
//! - `S`: status; bit 24 is the channel (sensor 2), bit 25 low battery
//! - `C`: CRC-8 (poly 0x07) over the first four bytes, LSB-first
//!
//! The last bit is often lost in the gap that follows the frame, so only
//! the first 32 bits are required.

#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use std::fmt;

use tracing::debug;

use crate::bitreader::BitReader;
use crate::bitstream::{BitSequence, MAX_BITS};
use crate::calibration::CalibrationStore;
use crate::config::{
    ChecksumMode, DecoderConfig, FieldProfile, TemperatureArithmetic, TemperatureUnit,
};
use crate::crc::crc8le;
use crate::error::DecodeError;
use crate::reflect::reflect_bytes;

/// Bits needed for temperature, identity and status.
pub const MIN_FIELD_BITS: usize = 32;
/// CRC-8 generator used by the frame checksum.
pub const CHECKSUM_POLY: u8 = 0x07;
/// CRC-8 initial remainder used by the frame checksum.
pub const CHECKSUM_INIT: u8 = 0x00;

/// Fields as transmitted, before unit conversion and calibration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawFields {
    /// Signed temperature in whole degrees Fahrenheit.
    pub fahrenheit: i32,
    pub identity_raw: u16,
    /// 0 or 1.
    pub channel: u8,
    pub battery_low: bool,
}

impl RawFields {
    /// Identity with the channel bit as a tenth: `raw + channel / 10`.
    pub fn identity(&self) -> f64 {
        device_identity(self.identity_raw, self.channel)
    }
}

/// Combine the 16-bit id and channel bit into the numeric device identity.
pub fn device_identity(identity_raw: u16, channel: u8) -> f64 {
    f64::from(identity_raw) + f64::from(channel) / 10.0
}

/// Transmitted and recomputed frame checksum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChecksumCheck {
    pub transmitted: u8,
    pub computed: u8,
}

impl ChecksumCheck {
    pub fn is_valid(&self) -> bool {
        self.transmitted == self.computed
    }
}

/// Recompute the frame CRC.
///
/// The transmitter sends each byte LSB-first, so the received bytes are
/// reflected before the little-endian CRC-8 runs over the first four.
///
/// # Returns
/// `None` when the sequence is shorter than the full 40-bit frame.
pub fn frame_checksum(bits: &BitSequence) -> Option<ChecksumCheck> {
    if bits.len() < MAX_BITS {
        return None;
    }

    let mut bytes = bits.to_bytes();
    reflect_bytes(&mut bytes);

    Some(ChecksumCheck {
        transmitted: bytes[4],
        computed: crc8le(&bytes[..4], CHECKSUM_POLY, CHECKSUM_INIT),
    })
}

/// A decoded sensor reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorReading {
    /// 16-bit id plus channel / 10.
    pub identity: f64,
    /// Calibrated temperature in the configured unit.
    pub temperature: Option<f64>,
    pub battery_low: Option<bool>,
    /// `None` unless the checksum was computed.
    pub checksum_valid: Option<bool>,
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id {:.1}", self.identity)?;
        if let Some(temperature) = self.temperature {
            write!(f, " temperature {temperature:.1}")?;
        }
        if let Some(low) = self.battery_low {
            write!(f, " battery {}", if low { "low" } else { "ok" })?;
        }
        match self.checksum_valid {
            Some(true) => write!(f, " crc ok"),
            Some(false) => write!(f, " crc bad"),
            None => Ok(()),
        }
    }
}

/// Interprets a bit sequence as typed fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldExtractor {
    fields: FieldProfile,
    unit: TemperatureUnit,
    arithmetic: TemperatureArithmetic,
    checksum: ChecksumMode,
}

impl FieldExtractor {
    pub fn new(config: &DecoderConfig) -> Self {
        Self {
            fields: config.fields,
            unit: config.unit,
            arithmetic: config.arithmetic,
            checksum: config.checksum,
        }
    }

    /// Read temperature, identity and status bits.
    pub fn extract(&self, bits: &BitSequence) -> Result<RawFields, DecodeError> {
        if bits.len() < MIN_FIELD_BITS {
            return Err(DecodeError::TruncatedBitstream {
                got: bits.len(),
                required: MIN_FIELD_BITS,
            });
        }

        let mut reader = BitReader::new(bits);
        let negative = reader.read_flag()?;
        let magnitude = reader.read_bits(7)? as i32;
        let identity_raw = reader.read_bits(16)? as u16;
        let channel = reader.read_bit()?;
        let battery_low = reader.read_flag()?;

        Ok(RawFields {
            fahrenheit: if negative { -magnitude } else { magnitude },
            identity_raw,
            channel,
            battery_low,
        })
    }

    /// Convert whole degrees Fahrenheit to the configured unit.
    pub fn convert(&self, fahrenheit: i32) -> f64 {
        match (self.unit, self.arithmetic) {
            (TemperatureUnit::Fahrenheit, _) => f64::from(fahrenheit),
            (TemperatureUnit::Celsius, TemperatureArithmetic::Float) => {
                (f64::from(fahrenheit) - 32.0) * 5.0 / 9.0
            }
            (TemperatureUnit::Celsius, TemperatureArithmetic::Truncating) => {
                f64::from((fahrenheit - 32) * 5 / 9)
            }
        }
    }

    fn checksum_status(&self, bits: &BitSequence) -> Result<Option<bool>, DecodeError> {
        if self.checksum == ChecksumMode::Ignore {
            return Ok(None);
        }

        let Some(check) = frame_checksum(bits) else {
            debug!(bits = bits.len(), "frame too short for checksum");
            return match self.checksum {
                ChecksumMode::Enforce => Err(DecodeError::TruncatedBitstream {
                    got: bits.len(),
                    required: MAX_BITS,
                }),
                _ => Ok(None),
            };
        };

        debug!(
            transmitted = check.transmitted,
            computed = check.computed,
            "frame checksum"
        );
        if self.checksum == ChecksumMode::Enforce && !check.is_valid() {
            return Err(DecodeError::ChecksumMismatch {
                transmitted: check.transmitted,
                computed: check.computed,
            });
        }

        Ok(Some(check.is_valid()))
    }

    /// Build the final reading, applying the calibration offset.
    pub fn reading(
        &self,
        bits: &BitSequence,
        calibration: &CalibrationStore,
    ) -> Result<SensorReading, DecodeError> {
        let raw = self.extract(bits)?;
        let checksum_valid = self.checksum_status(bits)?;
        let identity = raw.identity();

        let temperature = self.fields.temperature.then(|| {
            let offset = calibration.offset_for(identity).unwrap_or(0.0);
            self.convert(raw.fahrenheit) + offset
        });

        Ok(SensorReading {
            identity,
            temperature,
            battery_low: self.fields.battery.then_some(raw.battery_low),
            checksum_valid,
        })
    }
}
