//! MCC file reading
//!
//! Decoding never fails: noise lines are skipped, undecodable payloads count as
//! "no caption on this line", and missing end events are inferred by the
//! repair pass. [`ReadStats`] records what was skipped.

use crate::caption::{CaptionDecoder, DisplayUpdate};
use crate::cea608::Cea608Decoder;
use crate::constants::MIN_PACKET_LEN;
use crate::line::{classify, LineKind};
use crate::options::MccOptions;
use crate::reconstruct::Reconstructor;
use crate::shorthand;
use crate::timecode::{decode_timecode, FrameRate};
use crate::types::Subtitle;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// One event line, alive only during a parse pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEvent<'a> {
    /// 0-based index of the source line
    pub line_index: usize,
    /// Decoded time code
    pub timecode: Duration,
    /// Payload text (hex and shorthand symbols)
    pub payload: &'a str,
}

/// An event together with what it did to the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    /// 0-based index of the source line
    pub line_index: usize,
    /// Decoded time code
    pub timecode: Duration,
    /// Decoder result
    pub update: DisplayUpdate,
}

/// Counters collected while reading
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadStats {
    /// Lines in the input
    pub lines_total: usize,
    /// Blank, comment and header field lines
    pub header_lines: usize,
    /// Lines matching the event pattern
    pub event_lines: usize,
    /// Lines that were neither header nor event
    pub noise_lines: usize,
    /// Event payloads with bad hex or fewer than the minimum packet bytes
    pub undecodable_payloads: usize,
    /// Paragraphs after reconstruction
    pub paragraphs: usize,
}

/// Result of reading a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MccFile {
    /// Header lines, verbatim
    pub header: Vec<String>,
    /// Reconstructed paragraphs
    pub subtitle: Subtitle,
    /// Read counters
    pub stats: ReadStats,
}

/// Separate header lines from timed events
pub fn split_lines<S: AsRef<str>>(
    lines: &[S],
    rate: FrameRate,
) -> (Vec<String>, Vec<TimedEvent<'_>>, ReadStats) {
    let mut header = Vec::new();
    let mut events = Vec::new();
    let mut stats = ReadStats {
        lines_total: lines.len(),
        ..ReadStats::default()
    };

    for (line_index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        match classify(line) {
            LineKind::Header => {
                stats.header_lines += 1;
                header.push(line.to_string());
            }
            LineKind::Event { timecode, payload } => match decode_timecode(timecode, rate) {
                Ok(timecode) => {
                    stats.event_lines += 1;
                    events.push(TimedEvent {
                        line_index,
                        timecode,
                        payload,
                    });
                }
                Err(_e) => {
                    #[cfg(feature = "logging")]
                    warn!("Line {}: {}", line_index + 1, _e);
                    stats.noise_lines += 1;
                }
            },
            LineKind::Noise => {
                #[cfg(feature = "logging")]
                debug!("Line {}: skipped unrecognized line", line_index + 1);
                stats.noise_lines += 1;
            }
        }
    }

    (header, events, stats)
}

/// Reads one MCC file with a caption decoder
///
/// The decoder is consumed with the reader: its accumulation state belongs to
/// exactly one file.
#[derive(Debug)]
pub struct MccReader<D: CaptionDecoder = Cea608Decoder> {
    options: MccOptions,
    decoder: D,
}

impl MccReader<Cea608Decoder> {
    /// Reader using the built-in CEA-608 decoder
    pub fn new(options: MccOptions) -> Self {
        Self::with_decoder(options, Cea608Decoder::new())
    }
}

impl<D: CaptionDecoder> MccReader<D> {
    /// Reader using a caller-supplied decoder
    pub fn with_decoder(options: MccOptions, decoder: D) -> Self {
        Self { options, decoder }
    }

    /// Decode every event and reconstruct paragraphs
    pub fn read_lines<S: AsRef<str>>(mut self, lines: &[S]) -> MccFile {
        let (header, events, mut stats) = split_lines(lines, self.options.frame_rate);

        #[cfg(feature = "logging")]
        debug!(
            "Reading {} lines: {} header, {} events",
            stats.lines_total, stats.header_lines, stats.event_lines
        );

        let mut rebuilder = Reconstructor::new();
        let last = events.len().saturating_sub(1);
        for (i, event) in events.iter().enumerate() {
            let update = self.decode_event(event, i == last, &mut stats);
            rebuilder.push(event.timecode, update);
        }

        let subtitle = rebuilder.finish();
        stats.paragraphs = subtitle.len();

        #[cfg(feature = "logging")]
        debug!(
            "Read complete: {} paragraphs, {} undecodable payloads, {} noise lines",
            stats.paragraphs, stats.undecodable_payloads, stats.noise_lines
        );

        MccFile {
            header,
            subtitle,
            stats,
        }
    }

    /// Decode every event without reconstructing paragraphs
    pub fn decode_events<S: AsRef<str>>(mut self, lines: &[S]) -> (Vec<DecodedEvent>, ReadStats) {
        let (_, events, mut stats) = split_lines(lines, self.options.frame_rate);
        let last = events.len().saturating_sub(1);
        let decoded = events
            .iter()
            .enumerate()
            .map(|(i, event)| DecodedEvent {
                line_index: event.line_index,
                timecode: event.timecode,
                update: self.decode_event(event, i == last, &mut stats),
            })
            .collect();
        (decoded, stats)
    }

    fn decode_event(
        &mut self,
        event: &TimedEvent<'_>,
        flush: bool,
        stats: &mut ReadStats,
    ) -> DisplayUpdate {
        let hex = shorthand::expand(event.payload);
        let bytes = match shorthand::hex_to_bytes(&hex) {
            Ok(bytes) => bytes,
            Err(_e) => {
                #[cfg(feature = "logging")]
                warn!("Line {}: undecodable payload ({})", event.line_index + 1, _e);
                stats.undecodable_payloads += 1;
                return DisplayUpdate::Unchanged;
            }
        };

        if bytes.len() < MIN_PACKET_LEN {
            #[cfg(feature = "logging")]
            debug!(
                "Line {}: {} byte payload carries no caption",
                event.line_index + 1,
                bytes.len()
            );
            stats.undecodable_payloads += 1;
            return DisplayUpdate::Unchanged;
        }

        self.decoder.decode(&bytes, event.line_index, flush)
    }
}

/// Read already-split lines with the built-in decoder
pub fn read_lines<S: AsRef<str>>(lines: &[S], options: &MccOptions) -> MccFile {
    MccReader::new(options.clone()).read_lines(lines)
}

/// Read a whole file's text with the built-in decoder
pub fn read_str(text: &str, options: &MccOptions) -> MccFile {
    let lines: Vec<&str> = text.lines().collect();
    read_lines(&lines, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records what it was called with and replays scripted updates
    struct ScriptedDecoder {
        script: Vec<DisplayUpdate>,
        calls: Vec<(usize, usize, bool)>,
    }

    impl CaptionDecoder for ScriptedDecoder {
        fn decode(&mut self, packet: &[u8], line_index: usize, flush: bool) -> DisplayUpdate {
            self.calls.push((packet.len(), line_index, flush));
            if self.script.is_empty() {
                DisplayUpdate::Unchanged
            } else {
                self.script.remove(0)
            }
        }
    }

    // ten bytes of padding words, enough to reach the decoder
    const TEN_BYTES: &str = "61010AGGZ";

    #[test]
    fn test_split_lines() {
        let lines = [
            "File Format=MacCaption_MCC V1.0",
            "",
            "garbage",
            "00:00:01:00\tT",
            "",
        ];
        let (header, events, stats) = split_lines(&lines, FrameRate::FPS_30);

        assert_eq!(header.len(), 3);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].line_index, 3);
        assert_eq!(events[0].timecode, Duration::from_secs(1));
        assert_eq!(events[0].payload, "T");
        assert_eq!(stats.noise_lines, 1);
        assert_eq!(stats.lines_total, 5);
    }

    #[test]
    fn test_flush_only_on_last_event_line() {
        let mut decoder = ScriptedDecoder {
            script: Vec::new(),
            calls: Vec::new(),
        };
        let lines = [
            format!("00:00:01:00\t{TEN_BYTES}"),
            String::new(),
            format!("00:00:02:00\t{TEN_BYTES}"),
            String::new(),
            String::new(),
        ];
        MccReader::with_decoder(MccOptions::default(), &mut decoder).read_lines(&lines);

        assert_eq!(decoder.calls, vec![(10, 0, false), (10, 2, true)]);
    }

    #[test]
    fn test_short_payload_never_reaches_decoder() {
        let mut decoder = ScriptedDecoder {
            script: vec![DisplayUpdate::Shown("A".into())],
            calls: Vec::new(),
        };
        let lines = [
            format!("00:00:01:00\t{TEN_BYTES}"),
            "00:00:02:00\tT5".to_string(),
        ];
        let file = MccReader::with_decoder(MccOptions::default(), &mut decoder).read_lines(&lines);

        assert_eq!(decoder.calls.len(), 1);
        assert_eq!(file.stats.undecodable_payloads, 1);
        // the short line neither closed nor opened anything
        let p = file.subtitle.get(0).unwrap();
        assert!(p.is_open());
    }

    #[test]
    fn test_bad_hex_is_counted() {
        let file = read_lines(&["00:00:01:00\tT0AXXGGZ"], &MccOptions::default());
        assert_eq!(file.stats.undecodable_payloads, 1);
        assert!(file.subtitle.is_empty());
    }

    #[test]
    fn test_header_only_input() {
        let text = "File Format=MacCaption_MCC V1.0\n// banner\nUUID=1234\n\nTime Code Rate=30\n";
        let file = read_str(text, &MccOptions::default());

        assert!(file.subtitle.is_empty());
        assert_eq!(file.header.len(), 5);
        assert_eq!(file.header[4], "Time Code Rate=30");
        assert_eq!(file.stats.event_lines, 0);
    }

    #[test]
    fn test_scripted_events_reconstruct() {
        let mut decoder = ScriptedDecoder {
            script: vec![
                DisplayUpdate::Shown("HELLO".into()),
                DisplayUpdate::Cleared,
            ],
            calls: Vec::new(),
        };
        let lines = [
            format!("00:00:01:00\t{TEN_BYTES}"),
            format!("00:00:03:15\t{TEN_BYTES}"),
        ];
        let file = MccReader::with_decoder(MccOptions::default(), &mut decoder).read_lines(&lines);

        assert_eq!(file.subtitle.len(), 1);
        let p = file.subtitle.get(0).unwrap();
        assert_eq!(p.start, Duration::from_millis(1000));
        assert_eq!(p.end, Duration::from_millis(3500));
        assert_eq!(p.text, "HELLO");
        assert_eq!(file.stats.paragraphs, 1);
    }
}
