//! MCC file writing
//!
//! Each paragraph becomes a pop-on caption split over as many CDP packets as
//! its byte pairs need, all stamped with the paragraph's start time code. An
//! erase packet at the end time code follows when the next paragraph does not
//! start right away.

use crate::cdp::{build_packet, CdpCadence};
use crate::cea608::{encode_caption, encode_clear};
use crate::constants::{BANNER, FILE_FORMAT_LINE, LINE_ENDING};
use crate::error::MccError;
use crate::options::MccOptions;
use crate::shorthand::compress;
use crate::timecode::encode_timecode;
use crate::types::{Paragraph, Subtitle};
use chrono::{Local, NaiveDateTime};
use std::io::Write;
use std::time::Duration;
use uuid::Uuid;

#[cfg(feature = "logging")]
use tracing::debug;

/// Render the header block, including the trailing blank line
pub fn write_header(options: &MccOptions) -> String {
    let uuid = options.uuid.unwrap_or_else(Uuid::new_v4);
    let created: NaiveDateTime = options
        .created_at
        .unwrap_or_else(|| Local::now().naive_local());

    let lines = [
        FILE_FORMAT_LINE.to_string(),
        BANNER.to_string(),
        String::new(),
        format!("UUID={}", uuid.to_string().to_uppercase()),
        format!("Creation Program={}", options.creation_program),
        format!("Creation Date={}", created.format("%A, %B %-d, %Y")),
        format!("Creation Time={}", created.format("%-I:%M %p")),
        String::new(),
    ];

    let mut out = String::new();
    for line in lines {
        // the banner is multi-line; normalize its terminators too
        for part in line.split('\n') {
            out.push_str(part);
            out.push_str(LINE_ENDING);
        }
    }
    out
}

/// Packs byte pairs into packets and renders event lines
struct EventWriter {
    cadence: CdpCadence,
    sequence: u16,
    out: String,
}

impl EventWriter {
    fn event(
        &mut self,
        at: Duration,
        pairs: &[[u8; 2]],
        options: &MccOptions,
    ) -> Result<(), MccError> {
        let timecode = encode_timecode(at, options.frame_rate);
        for chunk in pairs.chunks(self.cadence.max_field1_pairs()) {
            let packet = build_packet(chunk, self.sequence, self.cadence)?;
            self.sequence = self.sequence.wrapping_add(1);
            self.out.push_str(&timecode);
            self.out.push('\t');
            self.out.push_str(&compress(&packet));
            self.out.push_str(LINE_ENDING);
            self.out.push_str(LINE_ENDING);
        }
        Ok(())
    }
}

fn needs_end_event(paragraph: &Paragraph, next: Option<&Paragraph>, threshold: Duration) -> bool {
    match next {
        None => true,
        Some(next) => {
            let gap = if next.start > paragraph.end {
                next.start - paragraph.end
            } else {
                paragraph.end - next.start
            };
            gap > threshold
        }
    }
}

/// Render a subtitle as MCC text
pub fn write_subtitle(subtitle: &Subtitle, options: &MccOptions) -> Result<String, MccError> {
    let mut writer = EventWriter {
        cadence: CdpCadence::for_rate(options.frame_rate),
        sequence: 0,
        out: write_header(options),
    };
    let clear = encode_clear();
    let paragraphs = subtitle.paragraphs();

    for (i, paragraph) in paragraphs.iter().enumerate() {
        writer.event(paragraph.start, &encode_caption(&paragraph.text), options)?;

        if needs_end_event(paragraph, paragraphs.get(i + 1), options.end_gap_threshold) {
            writer.event(paragraph.end, &clear, options)?;
        }
    }

    #[cfg(feature = "logging")]
    debug!(
        "Wrote {} paragraphs in {} packets",
        paragraphs.len(),
        writer.sequence
    );

    Ok(writer.out)
}

/// Write a subtitle as MCC text to `sink`
pub fn write_to<W: Write>(
    subtitle: &Subtitle,
    options: &MccOptions,
    mut sink: W,
) -> Result<(), MccError> {
    let text = write_subtitle(subtitle, options)?;
    sink.write_all(text.as_bytes())?;
    sink.flush()?;
    Ok(())
}
