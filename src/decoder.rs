//! Acu-Rite 986 frame decoder.
//!
//! Ties the pipeline together:
//! - Length and frame-time gate ([`FrameValidator`])
//! - Preamble search ([`FrameSync`])
//! - Pulse demodulation ([`BitstreamDecoder`])
//! - Field extraction, unit conversion and calibration ([`FieldExtractor`])
//!
//! A decoder holds no per-frame state, so one instance can be shared
//! between threads and fed captures concurrently.

use tracing::{debug, trace};

use crate::bitstream::{BitSequence, BitstreamDecoder};
use crate::calibration::CalibrationStore;
use crate::config::DecoderConfig;
use crate::error::{DecodeError, Rejection};
use crate::fields::{FieldExtractor, SensorReading};
use crate::pulse::PulseClassifier;
use crate::sync::FrameSync;
use crate::validate::FrameValidator;

/// Protocol identifier reported alongside readings.
pub const PROTOCOL_ID: &str = "acurite";

/// Human-readable device description.
pub const DEVICE_DESCRIPTION: &str = "Acu-Rite 986 Temperature Sensor";

/// Acu-Rite 986 decoder.
#[derive(Clone, Debug)]
pub struct AcuriteDecoder {
    config: DecoderConfig,
    validator: FrameValidator,
    sync: FrameSync,
    bitstream: BitstreamDecoder,
    fields: FieldExtractor,
    calibration: CalibrationStore,
}

impl AcuriteDecoder {
    /// Create a decoder.
    ///
    /// # Arguments
    /// * `config` - Timing, field profile and decoding policies
    /// * `calibration` - Shared offset table; clones of the handle observe
    ///   the same entries
    ///
    /// # Returns
    /// `DecodeError::InvalidConfig` if the thresholds or bounds are not
    /// ordered.
    pub fn new(config: DecoderConfig, calibration: CalibrationStore) -> Result<Self, DecodeError> {
        config.validate()?;
        Ok(Self::assemble(config, calibration))
    }

    fn assemble(config: DecoderConfig, calibration: CalibrationStore) -> Self {
        let pulses = config.timing.pulses;
        Self {
            config,
            validator: FrameValidator::new(&config.timing),
            sync: FrameSync::new(pulses.max_pulse, config.sync),
            bitstream: BitstreamDecoder::new(PulseClassifier::new(pulses)),
            fields: FieldExtractor::new(&config),
            calibration,
        }
    }

    /// Decoder configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Calibration table used for readings.
    pub fn calibration(&self) -> &CalibrationStore {
        &self.calibration
    }

    /// Check whether `raw` could be an Acu-Rite frame.
    pub fn validate(&self, raw: &[u32]) -> Result<(), Rejection> {
        self.validator.check(raw)
    }

    /// Demodulate the payload of an accepted train without interpreting it.
    pub fn demodulate(&self, raw: &[u32]) -> Result<BitSequence, DecodeError> {
        self.validate(raw).map_err(|rejection| {
            debug!(len = raw.len(), %rejection, "train rejected");
            DecodeError::from(rejection)
        })?;

        let sync = self.sync.locate(raw).map_err(|e| {
            debug!(len = raw.len(), "preamble not found");
            e
        })?;
        if !sync.aligned {
            debug!(len = raw.len(), "preamble not found, decoding from sample 0");
        }

        let bits = self.bitstream.decode(raw, sync.start);
        trace!(start = sync.start, count = bits.len(), %bits, "demodulated");
        Ok(bits)
    }

    /// Decode a pulse train into a sensor reading.
    ///
    /// # Arguments
    /// * `raw` - Alternating mark/gap durations in microseconds
    ///
    /// # Returns
    /// - `DecodeError::Rejected` when the train is not an Acu-Rite frame
    /// - `DecodeError::SyncNotFound` under strict sync without a preamble
    /// - `DecodeError::TruncatedBitstream` when fewer than 32 bits decode
    /// - `DecodeError::ChecksumMismatch` when the checksum is enforced
    pub fn decode(&self, raw: &[u32]) -> Result<SensorReading, DecodeError> {
        let bits = self.demodulate(raw)?;
        self.decode_bits(&bits)
    }

    /// Interpret an already demodulated bit sequence.
    pub fn decode_bits(&self, bits: &BitSequence) -> Result<SensorReading, DecodeError> {
        let reading = self.fields.reading(bits, &self.calibration)?;
        debug!(protocol = PROTOCOL_ID, %reading, "decoded");
        Ok(reading)
    }
}

impl Default for AcuriteDecoder {
    fn default() -> Self {
        Self::assemble(DecoderConfig::default(), CalibrationStore::new())
    }
}

/// Decode a pulse train with the default configuration and no calibration.
///
/// # Example
///
/// ```rust,ignore
/// let raw = acurite::parse_pulse_list(capture)?;
/// let reading = acurite::decode(&raw)?;
/// println!("{reading}");
/// ```
pub fn decode(raw: &[u32]) -> Result<SensorReading, DecodeError> {
    AcuriteDecoder::default().decode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChecksumMode, SyncPolicy, TemperatureUnit};
    use approx::assert_relative_eq;

    const SHORT: u32 = 224;
    const ZERO: u32 = 480;
    const ONE: u32 = 832;
    const LONG: u32 = 1632;

    /// Build a 181-sample train around `bits`, padded to roughly 100 ms.
    fn frame_train(bits: &str) -> Vec<u32> {
        let mut raw = vec![SHORT, ZERO, LONG, 1504];
        for c in bits.chars().filter(|c| *c == '0' || *c == '1') {
            raw.push(SHORT);
            raw.push(if c == '1' { ONE } else { ZERO });
        }
        raw.push(SHORT);
        raw.push(LONG);

        let used: u32 = raw.iter().sum();
        let pairs = (181 - 1 - raw.len()) / 2;
        let gap = (100_000 - used) / u32::try_from(pairs).unwrap() - SHORT;
        for _ in 0..pairs {
            raw.push(SHORT);
            raw.push(gap);
        }
        raw.push(9_000);
        assert_eq!(raw.len(), 181);
        raw
    }

    /// Train with no preamble: every pair is short mark + "one" gap.
    fn unsynced_train() -> Vec<u32> {
        let mut raw: Vec<u32> = std::iter::repeat([SHORT, 887]).take(90).flatten().collect();
        raw.push(9_000);
        raw
    }

    const FRAME_NEGATIVE: &str = "1110 0100 0100 0111 1001 0100 0000 0001 0111 1100";
    const FRAME_FRIDGE: &str = "0011 0010 0000 1010 1110 1010 0000 0000 1100 0011";

    #[test]
    fn test_decode_synthetic_frame() {
        let raw = frame_train(FRAME_NEGATIVE);
        let decoder = AcuriteDecoder::default();

        assert!(decoder.validate(&raw).is_ok());
        assert_eq!(decoder.demodulate(&raw).unwrap().to_string(), FRAME_NEGATIVE);

        let reading = decoder.decode(&raw).unwrap();
        assert_relative_eq!(reading.identity, 10722.0);
        assert_relative_eq!(reading.temperature.unwrap(), -28.333_333, epsilon = 1e-5);
        assert_eq!(reading.battery_low, Some(false));
        assert_eq!(reading.checksum_valid, None);
    }

    #[test]
    fn test_decode_matches_free_function() {
        let raw = frame_train(FRAME_FRIDGE);
        assert_eq!(decode(&raw), AcuriteDecoder::default().decode(&raw));
    }

    #[test]
    fn test_rejections() {
        let decoder = AcuriteDecoder::default();

        let err = decoder.decode(&[SHORT; 12]).unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(
            err,
            DecodeError::Rejected(Rejection::Length {
                len: 12,
                min: 170,
                max: 200
            })
        );

        let mut raw = frame_train(FRAME_FRIDGE);
        raw[100] += 20_000;
        assert!(matches!(
            decoder.decode(&raw),
            Err(DecodeError::Rejected(Rejection::FrameTime { .. }))
        ));
    }

    #[test]
    fn test_sync_policy() {
        let raw = unsynced_train();

        let fallback = AcuriteDecoder::default();
        let reading = fallback.decode(&raw).unwrap();
        // All ones: sign set, magnitude 127, id 0xFFFF, channel 1
        assert_relative_eq!(reading.identity, 65535.1, epsilon = 1e-9);
        assert_eq!(reading.battery_low, Some(true));

        let strict = AcuriteDecoder::new(
            DecoderConfig {
                sync: SyncPolicy::Strict,
                ..DecoderConfig::default()
            },
            CalibrationStore::new(),
        )
        .unwrap();
        assert_eq!(strict.decode(&raw), Err(DecodeError::SyncNotFound));
    }

    #[test]
    fn test_truncated_payload() {
        // 20 bits, then the frame-end pulse
        let raw = frame_train("0011 0010 0000 1010 1110");
        assert_eq!(
            AcuriteDecoder::default().decode(&raw),
            Err(DecodeError::TruncatedBitstream {
                got: 20,
                required: 32
            })
        );
    }

    #[test]
    fn test_calibration_is_shared() {
        let store = CalibrationStore::new();
        let decoder = AcuriteDecoder::new(
            DecoderConfig {
                unit: TemperatureUnit::Fahrenheit,
                ..DecoderConfig::default()
            },
            store.clone(),
        )
        .unwrap();
        let raw = frame_train(FRAME_FRIDGE);

        assert_relative_eq!(decoder.decode(&raw).unwrap().temperature.unwrap(), 38.0);
        store.register(22352.0, -1.5);
        assert_relative_eq!(decoder.decode(&raw).unwrap().temperature.unwrap(), 36.5);
        assert_eq!(decoder.calibration().len(), 1);
    }

    #[test]
    fn test_checksum_enforced() {
        let decoder = AcuriteDecoder::new(
            DecoderConfig {
                checksum: ChecksumMode::Enforce,
                ..DecoderConfig::default()
            },
            CalibrationStore::new(),
        )
        .unwrap();

        assert_eq!(
            decoder.decode(&frame_train(FRAME_FRIDGE)).unwrap().checksum_valid,
            Some(true)
        );
        assert!(matches!(
            decoder.decode(&frame_train(FRAME_NEGATIVE)),
            Err(DecodeError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_config() {
        let mut config = DecoderConfig::default();
        config.timing.pulses.avg_pulse = 2000;
        assert!(matches!(
            AcuriteDecoder::new(config, CalibrationStore::new()),
            Err(DecodeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_decoder_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AcuriteDecoder>();
    }
}
