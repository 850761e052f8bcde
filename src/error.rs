//! Error types for pulse-train decoding.

use thiserror::Error;

/// Why a pulse train was judged not to be an Acu-Rite frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Sample count outside the accepted range.
    #[error("train length {len} outside {min}..={max}")]
    Length { len: usize, min: usize, max: usize },

    /// Paired mark+gap total outside the frame-time envelope.
    #[error("frame time {total} us outside {min}..={max} us")]
    FrameTime { total: u64, min: u64, max: u64 },
}

/// Errors that can occur while decoding a pulse train.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The train is not a frame of this protocol. Callers should try
    /// another decoder or drop the capture.
    #[error("frame rejected: {0}")]
    Rejected(Rejection),

    /// No preamble/payload boundary found while sync is strict.
    #[error("preamble not found")]
    SyncNotFound,

    /// Fewer bits were decoded than the field layout needs.
    #[error("truncated bitstream: got {got} bits, need {required}")]
    TruncatedBitstream { got: usize, required: usize },

    /// Transmitted and computed frame checksum disagree.
    #[error("checksum mismatch: transmitted {transmitted:#04x}, computed {computed:#04x}")]
    ChecksumMismatch { transmitted: u8, computed: u8 },

    /// Text could not be parsed as bits or pulse durations.
    #[error("invalid bit pattern: {0}")]
    InvalidBitPattern(String),

    /// Decoder configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DecodeError {
    /// True for filtering outcomes that only mean "not this protocol".
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

impl From<Rejection> for DecodeError {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DecodeError::from(Rejection::Length {
            len: 12,
            min: 170,
            max: 200,
        });
        assert!(err.to_string().contains("train length 12"));
        assert!(err.is_rejection());

        let err = DecodeError::from(Rejection::FrameTime {
            total: 86_944,
            min: 90_000,
            max: 110_000,
        });
        assert!(err.to_string().contains("86944 us"));

        let err = DecodeError::SyncNotFound;
        assert!(err.to_string().contains("preamble"));
        assert!(!err.is_rejection());

        let err = DecodeError::TruncatedBitstream {
            got: 20,
            required: 32,
        };
        assert!(err.to_string().contains("got 20 bits, need 32"));

        let err = DecodeError::ChecksumMismatch {
            transmitted: 0x3e,
            computed: 0x78,
        };
        assert_eq!(
            err.to_string(),
            "checksum mismatch: transmitted 0x3e, computed 0x78"
        );

        let err = DecodeError::InvalidConfig("avg_pulse".into());
        assert!(err.to_string().contains("invalid configuration"));
    }
}
