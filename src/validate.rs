//! Length and frame-time gate.
//!
//! Runs before any bit is decoded. It does not look at bit content, only
//! at how many samples the train has and how long it lasts.

use crate::config::ProtocolTiming;
use crate::error::Rejection;

/// Cheap existence check for an Acu-Rite frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameValidator {
    min_raw_len: usize,
    max_raw_len: usize,
    min_frame_time: u64,
    max_frame_time: u64,
}

impl FrameValidator {
    pub fn new(timing: &ProtocolTiming) -> Self {
        Self {
            min_raw_len: timing.min_raw_len,
            max_raw_len: timing.max_raw_len,
            min_frame_time: timing.min_frame_time,
            max_frame_time: timing.max_frame_time,
        }
    }

    /// Total duration of the mark+gap pairs, in microseconds.
    ///
    /// Pairs are `(raw[0], raw[1])`, `(raw[2], raw[3])`, ... up to but not
    /// including the final sample.
    pub fn frame_time(raw: &[u32]) -> u64 {
        let body = &raw[..raw.len().saturating_sub(1)];
        body.chunks_exact(2)
            .map(|pair| u64::from(pair[0]) + u64::from(pair[1]))
            .sum()
    }

    /// Accept or reject a train. Both ranges are inclusive.
    pub fn check(&self, raw: &[u32]) -> Result<(), Rejection> {
        let len = raw.len();
        if len < self.min_raw_len || len > self.max_raw_len {
            return Err(Rejection::Length {
                len,
                min: self.min_raw_len,
                max: self.max_raw_len,
            });
        }

        let total = Self::frame_time(raw);
        if total < self.min_frame_time || total > self.max_frame_time {
            return Err(Rejection::FrameTime {
                total,
                min: self.min_frame_time,
                max: self.max_frame_time,
            });
        }

        Ok(())
    }

    pub fn accepts(&self, raw: &[u32]) -> bool {
        self.check(raw).is_ok()
    }
}

impl Default for FrameValidator {
    fn default() -> Self {
        Self::new(&ProtocolTiming::default())
    }
}
