//! Integration tests for the complete write → read flow

use chrono::NaiveDate;
use mcc_core::{
    decoder::read_str, encoder::write_subtitle, FrameRate, MccOptions, MccReader, Paragraph,
    Subtitle,
};
use std::time::Duration;
use uuid::Uuid;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn options() -> MccOptions {
    let at = NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    MccOptions::default().uuid(Uuid::new_v4()).created_at(at)
}

fn within_one_frame(a: Duration, b: Duration, rate: FrameRate) -> bool {
    let diff = if a > b { a - b } else { b - a };
    diff.as_secs_f64() * 1000.0 <= rate.frame_millis() + 0.5
}

#[test]
fn test_full_workflow_with_gaps() {
    let original = Subtitle::from(vec![
        Paragraph::new(ms(1000), ms(2500), "Hello"),
        Paragraph::new(ms(4000), ms(6000), "Two rows\nof text"),
        Paragraph::new(ms(61_200), ms(63_000), "A minute later"),
    ]);

    // Step 1: Write
    let text = write_subtitle(&original, &options()).unwrap();

    // Step 2: Read back
    let file = read_str(&text, &options());

    assert_eq!(file.subtitle.len(), 3);
    for (written, read) in original.iter().zip(file.subtitle.iter()) {
        assert_eq!(read.text, written.text);
        assert!(within_one_frame(read.start, written.start, FrameRate::FPS_30));
        assert!(within_one_frame(read.end, written.end, FrameRate::FPS_30));
    }

    // Numbering is 1-based and contiguous
    let numbers: Vec<usize> = file.subtitle.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(file.stats.undecodable_payloads, 0);
    assert_eq!(file.stats.noise_lines, 0);
}

#[test]
fn test_adjacent_paragraphs_share_boundary() {
    let original = Subtitle::from(vec![
        Paragraph::new(ms(1000), ms(2000), "First"),
        Paragraph::new(ms(2000), ms(3000), "Second"),
    ]);
    let text = write_subtitle(&original, &options()).unwrap();
    let file = read_str(&text, &options());

    assert_eq!(file.subtitle.len(), 2);
    let first = file.subtitle.get(0).unwrap();
    let second = file.subtitle.get(1).unwrap();
    assert_eq!(first.end, second.start);
    assert_eq!(second.end, ms(3000));
}

#[test]
fn test_round_trip_at_25_fps() {
    let opts = options().frame_rate(FrameRate::FPS_25);
    let original = Subtitle::from(vec![Paragraph::new(ms(10_040), ms(12_520), "PAL")]);

    let text = write_subtitle(&original, &opts).unwrap();
    assert!(text.contains("00:00:10:01\t"));
    assert!(text.contains("00:00:12:13\t"));

    let file = read_str(&text, &opts);
    let p = file.subtitle.get(0).unwrap();
    assert_eq!(p.start, ms(10_040));
    assert_eq!(p.end, ms(12_520));
}

#[test]
fn test_header_is_captured_on_read() {
    let original = Subtitle::from(vec![Paragraph::new(ms(1000), ms(2000), "X")]);
    let opts = options().creation_program("Round Trip");
    let text = write_subtitle(&original, &opts).unwrap();
    let file = read_str(&text, &opts);

    assert_eq!(file.header[0], "File Format=MacCaption_MCC V1.0");
    assert!(file
        .header
        .iter()
        .any(|line| line == "Creation Program=Round Trip"));
    assert!(file
        .header
        .iter()
        .any(|line| line == "Creation Date=Monday, October 19, 2026"));
}

#[test]
fn test_mixed_separators_on_read() {
    let original = Subtitle::from(vec![Paragraph::new(ms(1000), ms(3000), "Sep")]);
    let text = write_subtitle(&original, &options()).unwrap();

    // Swap the separators of every event line
    let mangled: String = text
        .split("\r\n")
        .map(|line| {
            if line.len() > 11 && line.as_bytes()[11] == b'\t' {
                format!("{};{},{}", &line[..2], &line[3..5], &line[6..])
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let file = read_str(&mangled, &options());
    assert_eq!(file.subtitle.len(), 1);
    let p = file.subtitle.get(0).unwrap();
    assert_eq!((p.start, p.end), (ms(1000), ms(3000)));
}

#[test]
fn test_noise_lines_are_skipped() {
    let original = Subtitle::from(vec![Paragraph::new(ms(1000), ms(3000), "Noise")]);
    let text = write_subtitle(&original, &options()).unwrap();
    let noisy = format!("{text}this is not an event\r\n12:34\tT\r\n");

    let file = read_str(&noisy, &options());
    assert_eq!(file.subtitle.len(), 1);
    assert_eq!(file.stats.noise_lines, 2);
}

#[test]
fn test_missing_end_event_leaves_last_open() {
    let original = Subtitle::from(vec![Paragraph::new(ms(1000), ms(3000), "Open")]);
    let text = write_subtitle(&original, &options()).unwrap();

    // Drop the erase event at 00:00:03:00
    let truncated: Vec<&str> = text
        .split("\r\n")
        .filter(|line| !line.starts_with("00:00:03:00"))
        .collect();

    let file = MccReader::new(options()).read_lines(&truncated);
    let p = file.subtitle.get(0).unwrap();
    assert_eq!(p.text, "Open");
    assert!(p.is_open());
}

#[test]
fn test_empty_input() {
    let file = read_str("", &MccOptions::default());
    assert!(file.subtitle.is_empty());
    assert!(file.header.is_empty());
    assert_eq!(file.stats.lines_total, 0);
}
