//! Header/event/noise discrimination for MCC text lines

use crate::constants::HEADER_PREFIXES;
use once_cell::sync::Lazy;
use regex::Regex;

/// `HH?MM?SS?FF<TAB>` where `?` is any accepted separator
static EVENT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}[:;,][0-9]{2}[:;,][0-9]{2}[:;,][0-9]{2}\t")
        .expect("event prefix pattern is valid")
});

/// What a single input line is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Blank line, comment, or a recognized header field
    Header,
    /// Timed event line
    Event {
        /// The `HH:MM:SS:FF` text, separators as found
        timecode: &'a str,
        /// Payload after the tab, trimmed
        payload: &'a str,
    },
    /// Anything else
    Noise,
}

/// True when the trimmed line is blank, a comment, or a known header field
pub fn is_header(line: &str) -> bool {
    let s = line.trim();
    s.is_empty() || HEADER_PREFIXES.iter().any(|prefix| s.starts_with(prefix))
}

/// Classify a raw line
pub fn classify(line: &str) -> LineKind<'_> {
    if is_header(line) {
        return LineKind::Header;
    }

    let s = line.trim();
    match EVENT_PREFIX.find(s) {
        Some(m) => LineKind::Event {
            timecode: &s[..m.end() - 1],
            payload: s[m.end()..].trim(),
        },
        None => LineKind::Noise,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lines() {
        assert_eq!(classify(""), LineKind::Header);
        assert_eq!(classify("   "), LineKind::Header);
        assert_eq!(classify("// comment"), LineKind::Header);
        assert_eq!(classify("File Format=MacCaption_MCC V1.0"), LineKind::Header);
        assert_eq!(classify("UUID=ABC"), LineKind::Header);
        assert_eq!(classify("Creation Program=Foo"), LineKind::Header);
        assert_eq!(classify("Creation Date=Monday"), LineKind::Header);
        assert_eq!(classify("Creation Time=10:00"), LineKind::Header);
        assert_eq!(classify("Code Rate=30"), LineKind::Header);
        assert_eq!(classify("Time Code Rate=30DF"), LineKind::Header);
    }

    #[test]
    fn test_event_line() {
        assert_eq!(
            classify("00:00:01:02\tT52S "),
            LineKind::Event {
                timecode: "00:00:01:02",
                payload: "T52S"
            }
        );
    }

    #[test]
    fn test_event_line_mixed_separators() {
        assert_eq!(
            classify("00:00,05;10\tG"),
            LineKind::Event {
                timecode: "00:00,05;10",
                payload: "G"
            }
        );
    }

    #[test]
    fn test_noise() {
        assert_eq!(classify("hello"), LineKind::Noise);
        assert_eq!(classify("00:00:01:02 T52S"), LineKind::Noise);
        assert_eq!(classify("0:00:01:02\tT52S"), LineKind::Noise);
        // trailing tab is trimmed away, leaving no event prefix
        assert_eq!(classify("00:00:01:02\t"), LineKind::Noise);
    }
}
