//! # Acu-Rite 986 Decoder
//!
//! Decodes the 433.92 MHz pulse trains sent by Acu-Rite 986
//! refrigerator/freezer thermometers into typed sensor readings, and ships
//! the CRC/digest toolkit used to verify frames of this and related
//! on-off-keyed sensors.
//!
//! ## Design
//!
//! - **Stateless decoding** - One [`AcuriteDecoder`] can serve many threads
//! - **Safe Rust** - `#![forbid(unsafe_code)]`
//! - **Shared calibration** - [`CalibrationStore`] handles see each other's
//!   updates without blocking decoders
//! - **Serde configuration** - Every threshold and policy lives in
//!   [`DecoderConfig`]
//!
//! ## API Overview
//!
//! ### High-Level Functions
//!
//! - [`decode()`] - Decode one pulse train with default settings
//! - [`parse_pulse_list()`] - Read durations from a debug capture line
//!
//! ### Pipeline Components
//!
//! - [`FrameValidator`] - Length and frame-time gate
//! - [`FrameSync`] - Preamble/payload boundary search
//! - [`PulseClassifier`] / [`BitstreamDecoder`] - Pulse to bit demodulation
//! - [`BitSequence`] / [`BitReader`] - Bit storage and LSB-first field reads
//! - [`FieldExtractor`] - Temperature, identity, battery and checksum
//!
//! ### Checksum Toolkit
//!
//! - [`crc4`], [`crc7`], [`crc8`], [`crc8le`], [`crc16`], [`crc16lsb`] - CRCs
//! - [`lfsr_digest8`], [`lfsr_digest8_reflect`], [`lfsr_digest16`] - LFSR
//!   keyed digests
//! - [`parity8`], [`parity_bytes`], [`xor_bytes`], [`add_bytes`],
//!   [`add_nibbles`] - Parity and sums
//! - [`reverse8`], [`reflect_bytes`], [`reflect4`], [`reflect_nibbles`],
//!   [`extract_nibbles_4b1s`] - Bit and nibble reflection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use acurite::{parse_pulse_list, AcuriteDecoder, CalibrationStore, DecoderConfig};
//!
//! let calibration = CalibrationStore::new();
//! calibration.register(22352.0, -0.5);
//!
//! let decoder = AcuriteDecoder::new(DecoderConfig::default(), calibration)?;
//! let raw = parse_pulse_list("20;XX;DEBUG;Pulses=192;Pulses(uSec)=584,479,...;")?;
//!
//! let reading = decoder.decode(&raw)?;
//! println!("{reading}");
//! ```
//!
//! ## References
//!
//! - [rtl_433 Acu-Rite decoders](https://github.com/merbanan/rtl_433/blob/master/src/devices/acurite.c)
//! - [pilight protocol documentation](https://manual.pilight.org/protocols/433.92/weather/acurite.html)

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

mod bitreader;
mod bitstream;
mod calibration;
mod config;
mod crc;
mod decoder;
mod digest;
mod error;
mod fields;
mod pulse;
mod reflect;
mod sync;
mod validate;

pub use bitreader::BitReader;
pub use bitstream::{BitSequence, BitstreamDecoder, MAX_BITS};
pub use calibration::{CalibrationEntry, CalibrationStore, DEFAULT_EPSILON};
pub use config::{
    ChecksumMode, DecoderConfig, FieldProfile, ProtocolTiming, PulseThresholds, SyncPolicy,
    TemperatureArithmetic, TemperatureUnit, AVG_PULSE_LENGTH, MAX_FRAME_TIME, MAX_PULSE_LENGTH,
    MAX_RAW_LENGTH, MIN_FRAME_TIME, MIN_PULSE_LENGTH, MIN_RAW_LENGTH,
};
pub use crc::{crc16, crc16lsb, crc4, crc7, crc8, crc8le};
pub use decoder::{decode, AcuriteDecoder, DEVICE_DESCRIPTION, PROTOCOL_ID};
pub use digest::{
    add_bytes, add_nibbles, lfsr_digest16, lfsr_digest8, lfsr_digest8_reflect, parity8,
    parity_bytes, xor_bytes,
};
pub use error::{DecodeError, Rejection};
pub use fields::{
    device_identity, frame_checksum, ChecksumCheck, FieldExtractor, RawFields, SensorReading,
    CHECKSUM_INIT, CHECKSUM_POLY, MIN_FIELD_BITS,
};
pub use pulse::{parse_pulse_list, PulseClassifier, Symbol};
pub use reflect::{extract_nibbles_4b1s, reflect4, reflect_bytes, reflect_nibbles, reverse8};
pub use sync::{FrameSync, SyncPoint};
pub use validate::FrameValidator;
