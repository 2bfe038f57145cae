//! Frame-based `HH:MM:SS:FF` time codes
//!
//! Conversion uses a fixed nominal frame rate. Frame counts round to the nearest
//! frame, so `decode(encode(d))` lands within one frame duration of `d`.

use crate::constants::DEFAULT_FRAME_RATE;
use crate::error::MccError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Latest instant a time code can express
const MAX_TIMECODE: Duration = Duration::from_millis(99 * 3_600_000 + 59 * 60_000 + 59_999);

/// Separators accepted between time code fields
pub const TIMECODE_SEPARATORS: [char; 3] = [':', ';', ','];

/// Nominal frames per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FrameRate(f64);

impl FrameRate {
    /// 24 fps
    pub const FPS_24: FrameRate = FrameRate(24.0);
    /// 25 fps
    pub const FPS_25: FrameRate = FrameRate(25.0);
    /// 30 fps (nominal rate for 29.97 NTSC material)
    pub const FPS_30: FrameRate = FrameRate(30.0);
    /// 50 fps
    pub const FPS_50: FrameRate = FrameRate(50.0);
    /// 60 fps
    pub const FPS_60: FrameRate = FrameRate(60.0);

    /// Create a frame rate; must be finite and at least 1
    pub fn new(fps: f64) -> Result<Self, MccError> {
        if fps.is_finite() && fps >= 1.0 {
            Ok(Self(fps))
        } else {
            Err(MccError::Serialization(format!("Invalid frame rate: {fps}")))
        }
    }

    /// Frames per second
    pub const fn fps(&self) -> f64 {
        self.0
    }

    /// Duration of a single frame in milliseconds
    pub fn frame_millis(&self) -> f64 {
        1000.0 / self.0
    }

    /// Highest frame number a time code may carry
    pub fn max_frame(&self) -> u64 {
        (self.0 - 0.01) as u64
    }

    /// Convert a frame count to milliseconds, capped at 999
    pub fn frames_to_millis(&self, frames: u64) -> u64 {
        let ms = (frames as f64 * self.frame_millis()).round() as u64;
        ms.min(999)
    }

    /// Convert a sub-second millisecond remainder to a frame count
    pub fn millis_to_frames(&self, millis: u64) -> u64 {
        let frames = (millis as f64 / self.frame_millis()).round() as u64;
        frames.min(self.max_frame())
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate(DEFAULT_FRAME_RATE)
    }
}

impl TryFrom<f64> for FrameRate {
    type Error = MccError;

    fn try_from(fps: f64) -> Result<Self, Self::Error> {
        FrameRate::new(fps)
    }
}

impl From<FrameRate> for f64 {
    fn from(rate: FrameRate) -> Self {
        rate.0
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse `HH:MM:SS:FF` (any of `:`, `;`, `,` between fields) into a duration
pub fn decode_timecode(text: &str, rate: FrameRate) -> Result<Duration, MccError> {
    let invalid = || MccError::InvalidTimecode(text.to_string());

    let mut fields = [0u64; 4];
    let mut parts = text.trim().split(TIMECODE_SEPARATORS);
    for field in fields.iter_mut() {
        let part = parts.next().ok_or_else(invalid)?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *field = part.parse().map_err(|_| invalid())?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }

    let [hours, minutes, seconds, frames] = fields;
    let millis = hours
        .checked_mul(3600)
        .and_then(|s| s.checked_add(minutes.checked_mul(60)?))
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(1000))
        .and_then(|ms| ms.checked_add(rate.frames_to_millis(frames)))
        .ok_or_else(invalid)?;
    Ok(Duration::from_millis(millis))
}

/// Format a duration as `HH:MM:SS:FF`
///
/// Time codes carry two hour digits; anything past the last frame of
/// `99:59:59` is written as that frame.
pub fn encode_timecode(time: Duration, rate: FrameRate) -> String {
    let ms = time.min(MAX_TIMECODE).as_millis() as u64;
    let hours = ms / 3_600_000;
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1000) % 60;
    let frames = rate.millis_to_frames(ms % 1000);
    format!("{hours:02}:{minutes:02}:{seconds:02}:{frames:02}")
}
