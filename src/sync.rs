//! Preamble/payload boundary search.
//!
//! The preamble ends with long (> `max_pulse`) pulses. The payload starts
//! at the first short sample that follows two long ones.

use crate::config::SyncPolicy;
use crate::error::DecodeError;

/// Located payload start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncPoint {
    /// Index of the first payload sample.
    pub start: usize,
    /// False when the preamble was not seen and `start` is the fallback 0.
    pub aligned: bool,
}

/// Scans a pulse train for the preamble/payload boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSync {
    max_pulse: u32,
    policy: SyncPolicy,
}

impl FrameSync {
    pub fn new(max_pulse: u32, policy: SyncPolicy) -> Self {
        Self { max_pulse, policy }
    }

    /// First index `x >= 2` with `raw[x] < max` and both `raw[x-1]` and
    /// `raw[x-2]` above `max`. The final sample is never considered.
    pub fn find(&self, raw: &[u32]) -> Option<usize> {
        let end = raw.len().saturating_sub(1);
        (2..end).find(|&x| {
            raw[x] < self.max_pulse && raw[x - 1] > self.max_pulse && raw[x - 2] > self.max_pulse
        })
    }

    /// Locate the payload start, applying the sync policy when the
    /// preamble is missing.
    pub fn locate(&self, raw: &[u32]) -> Result<SyncPoint, DecodeError> {
        match (self.find(raw), self.policy) {
            (Some(start), _) => Ok(SyncPoint {
                start,
                aligned: true,
            }),
            (None, SyncPolicy::Fallback) => Ok(SyncPoint {
                start: 0,
                aligned: false,
            }),
            (None, SyncPolicy::Strict) => Err(DecodeError::SyncNotFound),
        }
    }
}
