//! Decoder configuration.
//!
//! Defaults reproduce the Acu-Rite 986 timing: 150/750/1100 us pulse
//! thresholds, 170-200 samples per train and a 90-110 ms frame envelope.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Shortest pulse the protocol produces, in microseconds.
pub const MIN_PULSE_LENGTH: u32 = 150;
/// Gaps longer than this encode a `1`.
pub const AVG_PULSE_LENGTH: u32 = 750;
/// Pulses longer than this belong to the preamble or end a frame.
pub const MAX_PULSE_LENGTH: u32 = 1100;
/// Fewest samples in an accepted train.
pub const MIN_RAW_LENGTH: usize = 170;
/// Most samples in an accepted train.
pub const MAX_RAW_LENGTH: usize = 200;
/// Lower bound of the paired-sum frame time, in microseconds.
pub const MIN_FRAME_TIME: u64 = 90_000;
/// Upper bound of the paired-sum frame time, in microseconds.
pub const MAX_FRAME_TIME: u64 = 110_000;

/// Pulse classification thresholds, in microseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseThresholds {
    pub min_pulse: u32,
    pub avg_pulse: u32,
    pub max_pulse: u32,
}

impl Default for PulseThresholds {
    fn default() -> Self {
        Self {
            min_pulse: MIN_PULSE_LENGTH,
            avg_pulse: AVG_PULSE_LENGTH,
            max_pulse: MAX_PULSE_LENGTH,
        }
    }
}

/// Timing constants of one protocol profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolTiming {
    pub pulses: PulseThresholds,
    pub min_raw_len: usize,
    pub max_raw_len: usize,
    pub min_frame_time: u64,
    pub max_frame_time: u64,
}

impl Default for ProtocolTiming {
    fn default() -> Self {
        Self {
            pulses: PulseThresholds::default(),
            min_raw_len: MIN_RAW_LENGTH,
            max_raw_len: MAX_RAW_LENGTH,
            min_frame_time: MIN_FRAME_TIME,
            max_frame_time: MAX_FRAME_TIME,
        }
    }
}

/// Which optional fields a profile decodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldProfile {
    pub temperature: bool,
    pub battery: bool,
}

impl Default for FieldProfile {
    fn default() -> Self {
        Self {
            temperature: true,
            battery: true,
        }
    }
}

/// Unit of the reported temperature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// How Fahrenheit is converted to Celsius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureArithmetic {
    /// `(f - 32) * 5 / 9` in `f64`.
    #[default]
    Float,
    /// Same formula in integers, truncated toward zero.
    Truncating,
}

/// Behaviour when no preamble/payload boundary is found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPolicy {
    /// Decode from index 0.
    #[default]
    Fallback,
    /// Fail with [`DecodeError::SyncNotFound`].
    Strict,
}

/// Frame checksum handling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumMode {
    /// Do not compute the checksum.
    #[default]
    Ignore,
    /// Compute it and record the outcome on the reading.
    Report,
    /// Fail the decode on mismatch.
    Enforce,
}

/// Complete decoder configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub timing: ProtocolTiming,
    pub fields: FieldProfile,
    pub unit: TemperatureUnit,
    pub arithmetic: TemperatureArithmetic,
    pub sync: SyncPolicy,
    pub checksum: ChecksumMode,
}

impl DecoderConfig {
    /// Check that thresholds and bounds are ordered.
    pub fn validate(&self) -> Result<(), DecodeError> {
        let t = &self.timing;
        let p = &t.pulses;

        if !(p.min_pulse < p.avg_pulse && p.avg_pulse < p.max_pulse) {
            return Err(DecodeError::InvalidConfig(format!(
                "pulse thresholds must satisfy min < avg < max (got {}/{}/{})",
                p.min_pulse, p.avg_pulse, p.max_pulse
            )));
        }
        if t.min_raw_len < 3 || t.min_raw_len > t.max_raw_len {
            return Err(DecodeError::InvalidConfig(format!(
                "raw length range {}..={} is empty or below 3",
                t.min_raw_len, t.max_raw_len
            )));
        }
        if t.min_frame_time > t.max_frame_time {
            return Err(DecodeError::InvalidConfig(format!(
                "frame time range {}..={} is empty",
                t.min_frame_time, t.max_frame_time
            )));
        }

        Ok(())
    }
}
