//! Codec configuration

use crate::constants::{DEFAULT_CREATION_PROGRAM, DEFAULT_END_GAP_MS};
use crate::timecode::FrameRate;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Settings shared by the reader and the writer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MccOptions {
    /// Nominal frame rate for time code arithmetic
    pub frame_rate: FrameRate,

    /// Gap between a paragraph's end and the next start above which an explicit
    /// end event is written
    #[serde(with = "gap_millis")]
    pub end_gap_threshold: Duration,

    /// Value of the `Creation Program=` header field
    pub creation_program: String,

    /// Fixed file identifier; a random v4 UUID is generated when unset
    pub uuid: Option<Uuid>,

    /// Fixed creation timestamp; local time is used when unset
    pub created_at: Option<NaiveDateTime>,
}

impl Default for MccOptions {
    fn default() -> Self {
        Self {
            frame_rate: FrameRate::default(),
            end_gap_threshold: Duration::from_millis(DEFAULT_END_GAP_MS),
            creation_program: DEFAULT_CREATION_PROGRAM.to_string(),
            uuid: None,
            created_at: None,
        }
    }
}

impl MccOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nominal frame rate
    pub fn frame_rate(mut self, rate: FrameRate) -> Self {
        self.frame_rate = rate;
        self
    }

    /// Set the end-event gap threshold
    pub fn end_gap_threshold(mut self, threshold: Duration) -> Self {
        self.end_gap_threshold = threshold;
        self
    }

    /// Set the creation program name
    pub fn creation_program(mut self, program: impl Into<String>) -> Self {
        self.creation_program = program.into();
        self
    }

    /// Pin the file UUID
    pub fn uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = Some(uuid);
        self
    }

    /// Pin the creation timestamp
    pub fn created_at(mut self, at: NaiveDateTime) -> Self {
        self.created_at = Some(at);
        self
    }
}

mod gap_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
