//! Paragraph reconstruction from caption-on/caption-off events
//!
//! MCC files are event streams: a line either shows new text or clears the
//! screen. Reconstruction runs in two passes:
//! 1. Forward: each shown caption opens a paragraph; a clear closes the open one.
//! 2. Backward repair: paragraphs never closed end where their successor starts,
//!    and empty placeholder paragraphs are dropped.

use crate::caption::DisplayUpdate;
use crate::types::{Paragraph, Subtitle};
use std::time::Duration;

#[cfg(feature = "logging")]
use tracing::debug;

/// Forward pass state
#[derive(Debug, Default)]
pub struct Reconstructor {
    paragraphs: Vec<Paragraph>,
    /// Index of the paragraph the next clear will close
    current: Option<usize>,
}

impl Reconstructor {
    /// Create an empty reconstructor
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event in file order
    pub fn push(&mut self, timecode: Duration, update: DisplayUpdate) {
        match update {
            DisplayUpdate::Unchanged => {}
            DisplayUpdate::Shown(text) if !text.is_empty() => {
                self.paragraphs.push(Paragraph::open(timecode, text));
                self.current = Some(self.paragraphs.len() - 1);
            }
            DisplayUpdate::Shown(_) | DisplayUpdate::Cleared => {
                if let Some(index) = self.current {
                    self.paragraphs[index].end = timecode;
                }
            }
        }
    }

    /// Paragraphs produced so far
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Run the repair pass and renumber
    pub fn finish(self) -> Subtitle {
        let mut subtitle: Subtitle = repair(self.paragraphs).into();
        subtitle.renumber();
        subtitle
    }
}

/// Backward repair pass
///
/// From the second-to-last paragraph down to the first: an unterminated
/// paragraph (`end == start`) ends where its successor starts, and an
/// empty-text successor is dropped. The first paragraph is dropped last if its
/// text is empty.
pub fn repair(mut paragraphs: Vec<Paragraph>) -> Vec<Paragraph> {
    let n = paragraphs.len();
    let mut keep = vec![true; n];

    for i in (0..n.saturating_sub(1)).rev() {
        let next_start = paragraphs[i + 1].start;
        let p = &mut paragraphs[i];
        if p.end == p.start {
            p.end = next_start;
        }
        if paragraphs[i + 1].text.is_empty() {
            keep[i + 1] = false;
        }
    }
    if n > 0 && paragraphs[0].text.is_empty() {
        keep[0] = false;
    }

    #[cfg(feature = "logging")]
    debug!(
        "Repair pass kept {} of {} paragraphs",
        keep.iter().filter(|k| **k).count(),
        n
    );

    paragraphs
        .into_iter()
        .zip(keep)
        .filter_map(|(p, keep)| keep.then_some(p))
        .collect()
}

/// Reconstruct paragraphs from an ordered event stream
pub fn reconstruct<I>(events: I) -> Subtitle
where
    I: IntoIterator<Item = (Duration, DisplayUpdate)>,
{
    let mut rebuilder = Reconstructor::new();
    for (timecode, update) in events {
        rebuilder.push(timecode, update);
    }
    rebuilder.finish()
}
