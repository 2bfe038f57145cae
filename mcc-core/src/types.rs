//! Core types: paragraphs and the subtitle container

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single caption with its on-screen interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// 1-based position in the container, assigned by [`Subtitle::renumber`]
    #[serde(default)]
    pub number: usize,

    /// Time the caption appears
    #[serde(rename = "start_ms", with = "millis")]
    pub start: Duration,

    /// Time the caption disappears
    #[serde(rename = "end_ms", with = "millis")]
    pub end: Duration,

    /// Caption text, rows separated by `\n`
    pub text: String,
}

impl Paragraph {
    /// Create a new paragraph
    pub fn new(start: Duration, end: Duration, text: impl Into<String>) -> Self {
        Self {
            number: 0,
            start,
            end,
            text: text.into(),
        }
    }

    /// Create a paragraph whose end is not known yet (`end == start`)
    pub fn open(start: Duration, text: impl Into<String>) -> Self {
        Self::new(start, start, text)
    }

    /// Length of the on-screen interval, zero when `end < start`
    pub fn duration(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }

    /// True while the paragraph has not been given an end time
    pub fn is_open(&self) -> bool {
        self.end == self.start
    }
}

/// Ordered sequence of paragraphs; order is chronological order of events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subtitle {
    paragraphs: Vec<Paragraph>,
}

impl Subtitle {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph
    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Paragraph at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    /// Number of paragraphs
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// True when there are no paragraphs
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Iterate paragraphs in order
    pub fn iter(&self) -> std::slice::Iter<'_, Paragraph> {
        self.paragraphs.iter()
    }

    /// Borrow the paragraphs as a slice
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Take ownership of the paragraphs
    pub fn into_paragraphs(self) -> Vec<Paragraph> {
        self.paragraphs
    }

    /// Assign 1-based numbers by position
    pub fn renumber(&mut self) {
        for (i, p) in self.paragraphs.iter_mut().enumerate() {
            p.number = i + 1;
        }
    }
}

impl From<Vec<Paragraph>> for Subtitle {
    fn from(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }
}

impl FromIterator<Paragraph> for Subtitle {
    fn from_iter<I: IntoIterator<Item = Paragraph>>(iter: I) -> Self {
        Self {
            paragraphs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Subtitle {
    type Item = &'a Paragraph;
    type IntoIter = std::slice::Iter<'a, Paragraph>;

    fn into_iter(self) -> Self::IntoIter {
        self.paragraphs.iter()
    }
}

/// Serialize a `Duration` as whole milliseconds
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renumber_is_one_based() {
        let mut sub: Subtitle = vec![
            Paragraph::open(Duration::from_secs(1), "a"),
            Paragraph::open(Duration::from_secs(2), "b"),
        ]
        .into();
        sub.renumber();

        assert_eq!(sub.get(0).unwrap().number, 1);
        assert_eq!(sub.get(1).unwrap().number, 2);
    }

    #[test]
    fn test_paragraph_serializes_as_millis() {
        let p = Paragraph::new(Duration::from_millis(1500), Duration::from_millis(3250), "Hi");
        let json = serde_json::to_string(&p).unwrap();

        assert_eq!(json, r#"{"number":0,"start_ms":1500,"end_ms":3250,"text":"Hi"}"#);

        let back: Paragraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_open_paragraph() {
        let p = Paragraph::open(Duration::from_secs(4), "x");
        assert!(p.is_open());
        assert_eq!(p.duration(), Duration::ZERO);
    }
}
