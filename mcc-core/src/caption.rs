//! Caption bitstream decoder interface

/// What one event line did to the caption display
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayUpdate {
    /// No decodable unit, or nothing visible changed
    #[default]
    Unchanged,
    /// Display erased; closes the open caption
    Cleared,
    /// New caption text is on screen
    Shown(String),
}

impl DisplayUpdate {
    /// `Shown` for non-empty text, `Cleared` otherwise
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            DisplayUpdate::Cleared
        } else {
            DisplayUpdate::Shown(text)
        }
    }

    /// True for `Unchanged`
    pub fn is_unchanged(&self) -> bool {
        matches!(self, DisplayUpdate::Unchanged)
    }

    /// Caption text, if any was shown
    pub fn text(&self) -> Option<&str> {
        match self {
            DisplayUpdate::Shown(text) => Some(text),
            _ => None,
        }
    }
}

/// Turns ANC packet bytes into caption display updates
///
/// Implementations keep state across calls: a caption may be assembled from
/// several packets on successive lines before it is displayed. One decoder
/// value serves exactly one file.
pub trait CaptionDecoder {
    /// Decode one packet
    ///
    /// `line_index` is the 0-based source line, for diagnostics. `flush` is set
    /// on the last event line of the input and asks the decoder to deliver any
    /// text it is still holding back.
    fn decode(&mut self, packet: &[u8], line_index: usize, flush: bool) -> DisplayUpdate;
}

impl<D: CaptionDecoder + ?Sized> CaptionDecoder for &mut D {
    fn decode(&mut self, packet: &[u8], line_index: usize, flush: bool) -> DisplayUpdate {
        (**self).decode(packet, line_index, flush)
    }
}

impl<D: CaptionDecoder + ?Sized> CaptionDecoder for Box<D> {
    fn decode(&mut self, packet: &[u8], line_index: usize, flush: bool) -> DisplayUpdate {
        (**self).decode(packet, line_index, flush)
    }
}
