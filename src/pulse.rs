//! Pulse classification and pulse-dump parsing.

use crate::config::PulseThresholds;
use crate::error::DecodeError;

/// Result of classifying one duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    Zero,
    One,
    /// Longer than `max_pulse`: not data, the payload run is over.
    FrameEnd,
}

impl Symbol {
    /// Data bit value, `None` for [`Symbol::FrameEnd`].
    #[inline]
    pub fn bit(self) -> Option<u8> {
        match self {
            Self::Zero => Some(0),
            Self::One => Some(1),
            Self::FrameEnd => None,
        }
    }
}

/// Maps a single duration to a [`Symbol`] using fixed thresholds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PulseClassifier {
    thresholds: PulseThresholds,
}

impl PulseClassifier {
    pub fn new(thresholds: PulseThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &PulseThresholds {
        &self.thresholds
    }

    /// Classify one duration in microseconds.
    ///
    /// `> max_pulse` is [`Symbol::FrameEnd`], `> avg_pulse` is
    /// [`Symbol::One`], anything else [`Symbol::Zero`].
    #[inline]
    pub fn classify(&self, duration: u32) -> Symbol {
        if duration > self.thresholds.max_pulse {
            Symbol::FrameEnd
        } else if duration > self.thresholds.avg_pulse {
            Symbol::One
        } else {
            Symbol::Zero
        }
    }
}

/// Parse a textual pulse dump into durations.
///
/// Two input forms are accepted:
/// - A bare list separated by commas and/or whitespace, without any `;`
///   or `=`
/// - An RFLink/pilight line of `;`-separated fields such as
///   `20;XX;DEBUG;Pulses=176;Pulses(uSec)=1696,1472,...;`. The durations
///   are the value of the `Pulses(uSec)` field, or of the last `Pulses`
///   field when there is none. Anything after a further `=` inside that
///   value (a ` = total` annotation) is dropped.
///
/// # Returns
/// An empty list for field-formatted lines that carry no pulse field,
/// e.g. decoded sensor lines or gateway banners.
pub fn parse_pulse_list(text: &str) -> Result<Vec<u32>, DecodeError> {
    if !text.contains(['=', ';']) {
        return parse_durations(text);
    }

    match pulse_field(text) {
        Some(list) => parse_durations(list),
        None => Ok(Vec::new()),
    }
}

/// Value of the pulse field of a `;`-separated line.
fn pulse_field(line: &str) -> Option<&str> {
    let mut pulses = None;
    for (key, value) in line.split(';').filter_map(|field| field.split_once('=')) {
        let key = key.trim();
        if key.eq_ignore_ascii_case("Pulses(uSec)") {
            pulses = Some(value);
            break;
        }
        if key.eq_ignore_ascii_case("Pulses") {
            pulses = Some(value);
        }
    }

    pulses.map(|value| value.split('=').next().unwrap_or_default())
}

fn parse_durations(list: &str) -> Result<Vec<u32>, DecodeError> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map_err(|_| DecodeError::InvalidBitPattern(format!("bad duration {s:?}")))
        })
        .collect()
}
