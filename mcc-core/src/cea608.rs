//! CEA-608 line 21 captions carried as field 1 `cc_data`
//!
//! [`Cea608Decoder`] implements [`CaptionDecoder`] for data channel 1 and
//! tracks both caption memories across packets. [`encode_caption`] and
//! [`encode_clear`] produce the byte pairs the writer packs into CDPs.
//!
//! Supported: pop-on (RCL/EOC), roll-up (RU2-4/CR), paint-on (RDC), preamble
//! address codes, tab offsets, mid-row codes, backspace, delete to end of row,
//! basic, special and extended character sets. Text mode and attributes are
//! ignored.

use crate::caption::{CaptionDecoder, DisplayUpdate};
use crate::cdp;
use crate::constants::{MIN_PACKET_LEN, SCREEN_COLUMNS, SCREEN_ROWS};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Basic set positions that differ from ASCII
const BASIC_OVERRIDES: [(u8, char); 10] = [
    (0x2A, 'á'),
    (0x5C, 'é'),
    (0x5E, 'í'),
    (0x5F, 'ó'),
    (0x60, 'ú'),
    (0x7B, 'ç'),
    (0x7C, '÷'),
    (0x7D, 'Ñ'),
    (0x7E, 'ñ'),
    (0x7F, '█'),
];

/// `0x11 0x30..=0x3F`; index 9 is the transparent space
const SPECIAL_CHARS: [char; 16] = [
    '®', '°', '½', '¿', '™', '¢', '£', '♪', 'à', ' ', 'è', 'â', 'ê', 'î', 'ô', 'û',
];

const TRANSPARENT_SPACE: usize = 9;

/// `0x12 0x20..=0x3F`: Spanish, French, miscellaneous
const EXTENDED_SPANISH_FRENCH: [char; 32] = [
    'Á', 'É', 'Ó', 'Ú', 'Ü', 'ü', '‘', '¡', '*', '’', '—', '©', '℠', '•', '“', '”', //
    'À', 'Â', 'Ç', 'È', 'Ê', 'Ë', 'ë', 'Î', 'Ï', 'ï', 'Ô', 'Ù', 'ù', 'Û', '«', '»',
];

/// `0x13 0x20..=0x3F`: Portuguese, German, Danish
const EXTENDED_PORTUGUESE_GERMAN: [char; 32] = [
    'Ã', 'ã', 'Í', 'Ì', 'ì', 'Ò', 'ò', 'Õ', 'õ', '{', '}', '\\', '^', '_', '|', '~', //
    'Ä', 'ä', 'Ö', 'ö', 'ß', '¥', '¤', '│', 'Å', 'å', 'Ø', 'ø', '┌', '┐', '└', '┘',
];

/// Basic-set characters sent ahead of each extended character for decoders
/// that lack the extended sets
const FALLBACK_SPANISH_FRENCH: &[u8; 32] = b"AEOUUu'!.'-cs.\"\"AACEEEeIIiOUuU\"\"";
const FALLBACK_PORTUGUESE_GERMAN: &[u8; 32] = b"AaIIiOoOo[]/'-!-AaOosY$!AaOo++++";

/// First/second byte of the indent-0 white preamble for rows 1..=15
const PREAMBLE_CODES: [[u8; 2]; SCREEN_ROWS] = [
    [0x11, 0x40],
    [0x11, 0x60],
    [0x12, 0x40],
    [0x12, 0x60],
    [0x15, 0x40],
    [0x15, 0x60],
    [0x16, 0x40],
    [0x16, 0x60],
    [0x17, 0x40],
    [0x17, 0x60],
    [0x10, 0x40],
    [0x13, 0x40],
    [0x13, 0x60],
    [0x14, 0x40],
    [0x14, 0x60],
];

/// Miscellaneous control codes, second byte after `0x14`
mod command {
    pub const RCL: u8 = 0x20;
    pub const BS: u8 = 0x21;
    pub const DER: u8 = 0x24;
    pub const RU2: u8 = 0x25;
    pub const RU4: u8 = 0x27;
    pub const RDC: u8 = 0x29;
    pub const EDM: u8 = 0x2C;
    pub const CR: u8 = 0x2D;
    pub const ENM: u8 = 0x2E;
    pub const EOC: u8 = 0x2F;

    /// Full control pair on data channel 1
    pub const fn pair(code: u8) -> [u8; 2] {
        [0x14, code]
    }
}

/// Translate a basic-set code to a character
fn basic_char(code: u8) -> char {
    BASIC_OVERRIDES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(code as char, |(_, ch)| *ch)
}

/// Add the odd parity bit
fn with_parity(byte: u8) -> u8 {
    let b = byte & 0x7F;
    if b.count_ones() % 2 == 0 {
        b | 0x80
    } else {
        b
    }
}

/// One caption memory
#[derive(Debug, Clone, PartialEq, Eq)]
struct Screen {
    cells: [[char; SCREEN_COLUMNS]; SCREEN_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            cells: [[' '; SCREEN_COLUMNS]; SCREEN_ROWS],
        }
    }
}

impl Screen {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn is_blank(&self) -> bool {
        self.cells.iter().flatten().all(|c| *c == ' ')
    }

    fn put(&mut self, row: usize, col: usize, ch: char) {
        self.cells[row][col.min(SCREEN_COLUMNS - 1)] = ch;
    }

    fn clear_from(&mut self, row: usize, col: usize) {
        for cell in self.cells[row].iter_mut().skip(col) {
            *cell = ' ';
        }
    }

    fn row_text(&self, row: usize) -> String {
        self.cells[row].iter().collect::<String>().trim().to_string()
    }

    /// Non-blank rows, trimmed, joined with `\n`
    fn text(&self) -> String {
        (0..SCREEN_ROWS)
            .map(|row| self.row_text(row))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Move the roll-up window ending at `base` up one row
    fn roll_up(&mut self, base: usize, depth: usize) {
        let top = (base + 1).saturating_sub(depth);
        for row in 0..top {
            self.cells[row] = [' '; SCREEN_COLUMNS];
        }
        for row in top..base {
            self.cells[row] = self.cells[row + 1];
        }
        self.cells[base] = [' '; SCREEN_COLUMNS];
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptionMode {
    PopOn,
    PaintOn,
    RollUp(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataChannel {
    One,
    Two,
}

/// Stateful CEA-608 decoder for field 1, data channel 1
#[derive(Debug, Clone)]
pub struct Cea608Decoder {
    mode: CaptionMode,
    displayed: Screen,
    non_displayed: Screen,
    row: usize,
    col: usize,
    last_control: Option<[u8; 2]>,
    channel: DataChannel,
    /// Text loaded into non-displayed memory since the last EOC/ENM
    pending_load: bool,
}

impl Default for Cea608Decoder {
    fn default() -> Self {
        Self {
            mode: CaptionMode::PopOn,
            displayed: Screen::default(),
            non_displayed: Screen::default(),
            row: SCREEN_ROWS - 1,
            col: 0,
            last_control: None,
            channel: DataChannel::One,
            pending_load: false,
        }
    }
}

impl Cea608Decoder {
    /// Create a decoder with empty memories in pop-on mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently on screen
    pub fn displayed_text(&self) -> String {
        self.displayed.text()
    }

    /// Feed one byte pair (parity bits included)
    pub fn process_pair(&mut self, raw: [u8; 2]) -> Option<DisplayUpdate> {
        let b1 = raw[0] & 0x7F;
        let b2 = raw[1] & 0x7F;

        if b1 == 0 && b2 == 0 {
            return None;
        }

        if (0x10..=0x1F).contains(&b1) {
            let pair = [b1, b2];
            if self.last_control == Some(pair) {
                self.last_control = None;
                return None;
            }
            self.last_control = Some(pair);
            self.channel = if b1 & 0x08 != 0 {
                DataChannel::Two
            } else {
                DataChannel::One
            };
            if self.channel == DataChannel::Two {
                return None;
            }
            return self.control(b1, b2);
        }

        self.last_control = None;
        if self.channel == DataChannel::Two || (0x01..0x10).contains(&b1) {
            return None;
        }

        let mut wrote = false;
        for code in [b1, b2] {
            if code >= 0x20 {
                self.write_char(basic_char(code));
                wrote = true;
            }
        }
        if wrote {
            self.paint_update()
        } else {
            None
        }
    }

    fn control(&mut self, b1: u8, b2: u8) -> Option<DisplayUpdate> {
        match (b1, b2) {
            (0x14 | 0x15, 0x20..=0x2F) => self.misc_command(b2),
            (0x17, 0x21..=0x23) => {
                self.col = (self.col + (b2 - 0x20) as usize).min(SCREEN_COLUMNS - 1);
                None
            }
            (0x11, 0x30..=0x3F) => {
                self.write_char(SPECIAL_CHARS[(b2 - 0x30) as usize]);
                self.paint_update()
            }
            // mid-row style change occupies one column
            (0x11, 0x20..=0x2F) => {
                self.write_char(' ');
                self.paint_update()
            }
            (0x12, 0x20..=0x3F) => {
                self.col = self.col.saturating_sub(1);
                self.write_char(EXTENDED_SPANISH_FRENCH[(b2 - 0x20) as usize]);
                self.paint_update()
            }
            (0x13, 0x20..=0x3F) => {
                self.col = self.col.saturating_sub(1);
                self.write_char(EXTENDED_PORTUGUESE_GERMAN[(b2 - 0x20) as usize]);
                self.paint_update()
            }
            (0x10..=0x17, 0x40..=0x7F) => {
                self.preamble(b1, b2);
                None
            }
            _ => None,
        }
    }

    fn misc_command(&mut self, code: u8) -> Option<DisplayUpdate> {
        match code {
            command::RCL => {
                self.mode = CaptionMode::PopOn;
                None
            }
            command::BS => {
                self.col = self.col.saturating_sub(1);
                let (row, col) = (self.row, self.col);
                self.target().put(row, col, ' ');
                self.paint_update()
            }
            command::DER => {
                let (row, col) = (self.row, self.col);
                self.target().clear_from(row, col);
                self.paint_update()
            }
            command::RU2..=command::RU4 => {
                let depth = (code - command::RU2) as usize + 2;
                let mut update = None;
                if !matches!(self.mode, CaptionMode::RollUp(_)) {
                    if !self.displayed.is_blank() {
                        update = Some(DisplayUpdate::Cleared);
                    }
                    self.displayed.clear();
                    self.non_displayed.clear();
                    self.pending_load = false;
                    self.row = SCREEN_ROWS - 1;
                }
                self.mode = CaptionMode::RollUp(depth);
                self.col = 0;
                update
            }
            command::RDC => {
                self.mode = CaptionMode::PaintOn;
                None
            }
            command::EDM => {
                self.displayed.clear();
                Some(DisplayUpdate::Cleared)
            }
            command::CR => match self.mode {
                CaptionMode::RollUp(depth) => {
                    let line = self.displayed.row_text(self.row);
                    self.displayed.roll_up(self.row, depth);
                    self.col = 0;
                    (!line.is_empty()).then_some(DisplayUpdate::Shown(line))
                }
                _ => None,
            },
            command::ENM => {
                self.non_displayed.clear();
                self.pending_load = false;
                None
            }
            command::EOC => {
                std::mem::swap(&mut self.displayed, &mut self.non_displayed);
                self.mode = CaptionMode::PopOn;
                self.pending_load = false;
                Some(DisplayUpdate::from_text(self.displayed.text()))
            }
            _ => None,
        }
    }

    fn preamble(&mut self, b1: u8, b2: u8) {
        let second_row = usize::from(b2 & 0x20 != 0);
        let row = match b1 & 0x07 {
            0 => 11,
            1 => 1 + second_row,
            2 => 3 + second_row,
            3 => 12 + second_row,
            4 => 14 + second_row,
            5 => 5 + second_row,
            6 => 7 + second_row,
            _ => 9 + second_row,
        };
        self.row = row - 1;
        self.col = if b2 & 0x10 != 0 {
            ((b2 & 0x0E) >> 1) as usize * 4
        } else {
            0
        };
    }

    fn target(&mut self) -> &mut Screen {
        match self.mode {
            CaptionMode::PopOn => &mut self.non_displayed,
            CaptionMode::PaintOn | CaptionMode::RollUp(_) => &mut self.displayed,
        }
    }

    fn write_char(&mut self, ch: char) {
        let (row, col) = (self.row, self.col);
        self.target().put(row, col, ch);
        if self.col < SCREEN_COLUMNS - 1 {
            self.col += 1;
        }
        if self.mode == CaptionMode::PopOn {
            self.pending_load = true;
        }
    }

    fn paint_update(&self) -> Option<DisplayUpdate> {
        (self.mode == CaptionMode::PaintOn).then(|| DisplayUpdate::from_text(self.displayed.text()))
    }

    /// Text received but not yet put on screen
    fn take_pending(&mut self) -> DisplayUpdate {
        match self.mode {
            CaptionMode::PopOn if self.pending_load => {
                self.pending_load = false;
                let text = self.non_displayed.text();
                if text.is_empty() {
                    DisplayUpdate::Unchanged
                } else {
                    DisplayUpdate::Shown(text)
                }
            }
            CaptionMode::RollUp(_) => {
                let line = self.displayed.row_text(self.row);
                if line.is_empty() {
                    DisplayUpdate::Unchanged
                } else {
                    DisplayUpdate::Shown(line)
                }
            }
            _ => DisplayUpdate::Unchanged,
        }
    }
}

impl CaptionDecoder for Cea608Decoder {
    fn decode(&mut self, packet: &[u8], _line_index: usize, flush: bool) -> DisplayUpdate {
        if packet.len() < MIN_PACKET_LEN {
            return DisplayUpdate::Unchanged;
        }

        let mut update = DisplayUpdate::Unchanged;
        match cdp::parse_packet(packet) {
            Ok(parsed) => {
                for pair in parsed.field1_pairs() {
                    if let Some(next) = self.process_pair(pair) {
                        update = next;
                    }
                }
            }
            Err(_e) => {
                #[cfg(feature = "logging")]
                debug!("Line {}: no caption data ({})", _line_index + 1, _e);
            }
        }

        if flush && update.is_unchanged() {
            update = self.take_pending();
        }
        update
    }
}

/// How a character is sent on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharCode {
    Basic(u8),
    Special(u8),
    Extended { fallback: u8, code: [u8; 2] },
}

fn char_code(ch: char) -> Option<CharCode> {
    if let Some((code, _)) = BASIC_OVERRIDES.iter().find(|(_, c)| *c == ch) {
        return Some(CharCode::Basic(*code));
    }
    if (' '..='~').contains(&ch) && !BASIC_OVERRIDES.iter().any(|(code, _)| *code == ch as u8) {
        return Some(CharCode::Basic(ch as u8));
    }
    if let Some(i) = SPECIAL_CHARS
        .iter()
        .enumerate()
        .find_map(|(i, c)| (*c == ch && i != TRANSPARENT_SPACE).then_some(i))
    {
        return Some(CharCode::Special(0x30 + i as u8));
    }
    if let Some(i) = EXTENDED_SPANISH_FRENCH.iter().position(|c| *c == ch) {
        return Some(CharCode::Extended {
            fallback: FALLBACK_SPANISH_FRENCH[i],
            code: [0x12, 0x20 + i as u8],
        });
    }
    if let Some(i) = EXTENDED_PORTUGUESE_GERMAN.iter().position(|c| *c == ch) {
        return Some(CharCode::Extended {
            fallback: FALLBACK_PORTUGUESE_GERMAN[i],
            code: [0x13, 0x20 + i as u8],
        });
    }
    None
}

/// Accumulates byte pairs, packing basic characters two per pair
#[derive(Debug, Default)]
struct PairWriter {
    pairs: Vec<[u8; 2]>,
    pending: Option<u8>,
}

impl PairWriter {
    /// Control codes are always sent twice
    fn control(&mut self, code: [u8; 2]) {
        self.flush_char();
        let pair = [with_parity(code[0]), with_parity(code[1])];
        self.pairs.push(pair);
        self.pairs.push(pair);
    }

    fn basic(&mut self, code: u8) {
        match self.pending.take() {
            Some(first) => self.pairs.push([with_parity(first), with_parity(code)]),
            None => self.pending = Some(code),
        }
    }

    fn flush_char(&mut self) {
        if let Some(code) = self.pending.take() {
            self.pairs.push([with_parity(code), with_parity(0)]);
        }
    }

    fn char(&mut self, ch: char) {
        match char_code(ch) {
            Some(CharCode::Basic(code)) => self.basic(code),
            Some(CharCode::Special(code)) => self.control([0x11, code]),
            Some(CharCode::Extended { fallback, code }) => {
                self.basic(fallback);
                self.control(code);
            }
            None => {
                #[cfg(feature = "logging")]
                warn!("Character {:?} has no CEA-608 code, writing '?'", ch);
                self.basic(b'?');
            }
        }
    }

    fn finish(mut self) -> Vec<[u8; 2]> {
        self.flush_char();
        self.pairs
    }
}

/// Encode caption text as a pop-on caption
///
/// Rows are bottom-aligned and end on row 15. Text beyond 15 rows or 32
/// columns is dropped. No erase precedes the EOC: the memory swap replaces
/// whatever was displayed, so no packet of the caption reads as a clear.
pub fn encode_caption(text: &str) -> Vec<[u8; 2]> {
    let mut writer = PairWriter::default();
    writer.control(command::pair(command::RCL));
    writer.control(command::pair(command::ENM));

    let mut rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if rows.len() > SCREEN_ROWS {
        #[cfg(feature = "logging")]
        warn!("Caption has {} rows, keeping the first {}", rows.len(), SCREEN_ROWS);
        rows.truncate(SCREEN_ROWS);
    }

    let first_row = SCREEN_ROWS - rows.len();
    for (i, row) in rows.iter().enumerate() {
        writer.control(PREAMBLE_CODES[first_row + i]);
        let len = row.chars().count();
        if len > SCREEN_COLUMNS {
            #[cfg(feature = "logging")]
            warn!("Caption row {:?} exceeds {} columns, truncating", row, SCREEN_COLUMNS);
        }
        for ch in row.chars().take(SCREEN_COLUMNS) {
            writer.char(ch);
        }
    }

    writer.control(command::pair(command::EOC));
    writer.finish()
}

/// Encode an erase-displayed-memory command, used as an end event
pub fn encode_clear() -> Vec<[u8; 2]> {
    let mut writer = PairWriter::default();
    writer.control(command::pair(command::EDM));
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdp::{build_packet, CdpCadence};
    use crate::timecode::FrameRate;

    fn feed(decoder: &mut Cea608Decoder, pairs: &[[u8; 2]]) -> DisplayUpdate {
        let mut update = DisplayUpdate::Unchanged;
        for pair in pairs {
            if let Some(u) = decoder.process_pair(*pair) {
                update = u;
            }
        }
        update
    }

    #[test]
    fn test_parity() {
        assert_eq!(with_parity(0x14), 0x94);
        assert_eq!(with_parity(0x20), 0x20);
        assert_eq!(with_parity(0x2F), 0x2F);
        assert_eq!(with_parity(0x00), 0x80);
        assert_eq!(with_parity(0x48), 0xC8);
    }

    #[test]
    fn test_encode_caption_layout() {
        let pairs = encode_caption("HI");
        assert_eq!(
            pairs,
            vec![
                [0x94, 0x20],
                [0x94, 0x20],
                [0x94, 0xAE],
                [0x94, 0xAE],
                [0x94, 0xE0],
                [0x94, 0xE0],
                [0xC8, 0x49],
                [0x94, 0x2F],
                [0x94, 0x2F],
            ]
        );
    }

    #[test]
    fn test_pop_on_round_trip() {
        let mut decoder = Cea608Decoder::new();
        let update = feed(&mut decoder, &encode_caption("Hello, world!\nSecond line"));
        assert_eq!(
            update,
            DisplayUpdate::Shown("Hello, world!\nSecond line".to_string())
        );
        assert_eq!(decoder.displayed_text(), "Hello, world!\nSecond line");
    }

    #[test]
    fn test_special_and_extended_round_trip() {
        let text = "♪ Señor * café ü ß {x} ½";
        let mut decoder = Cea608Decoder::new();
        let update = feed(&mut decoder, &encode_caption(text));
        assert_eq!(update, DisplayUpdate::Shown(text.to_string()));
    }

    #[test]
    fn test_repeated_special_chars_survive_doubling() {
        let mut decoder = Cea608Decoder::new();
        let update = feed(&mut decoder, &encode_caption("♪♪"));
        assert_eq!(update, DisplayUpdate::Shown("♪♪".to_string()));
    }

    #[test]
    fn test_unknown_char_becomes_question_mark() {
        let mut decoder = Cea608Decoder::new();
        let update = feed(&mut decoder, &encode_caption("a`b"));
        assert_eq!(update, DisplayUpdate::Shown("a?b".to_string()));
    }

    #[test]
    fn test_clear_closes() {
        let mut decoder = Cea608Decoder::new();
        feed(&mut decoder, &encode_caption("HI"));
        assert_eq!(feed(&mut decoder, &encode_clear()), DisplayUpdate::Cleared);
        assert_eq!(decoder.displayed_text(), "");
    }

    #[test]
    fn test_long_row_truncated() {
        let text = "x".repeat(40);
        let mut decoder = Cea608Decoder::new();
        let update = feed(&mut decoder, &encode_caption(&text));
        assert_eq!(update, DisplayUpdate::Shown("x".repeat(32)));
    }

    #[test]
    fn test_channel_two_ignored() {
        let mut decoder = Cea608Decoder::new();
        // RCL, PAC, "HI", EOC on data channel 2
        let update = feed(
            &mut decoder,
            &[[0x1C, 0x20], [0x9C, 0xE0], [0xC8, 0x49], [0x1C, 0x2F]],
        );
        assert_eq!(update, DisplayUpdate::Unchanged);
    }

    #[test]
    fn test_roll_up_emits_on_carriage_return() {
        let mut decoder = Cea608Decoder::new();
        // RU2, "HI", CR
        let update = feed(
            &mut decoder,
            &[[0x94, 0x25], [0xC8, 0x49], [0x94, 0xAD]],
        );
        assert_eq!(update, DisplayUpdate::Shown("HI".to_string()));
    }

    #[test]
    fn test_paint_on_shows_immediately() {
        let mut decoder = Cea608Decoder::new();
        // RDC, PAC row 15, "HI"
        let update = feed(&mut decoder, &[[0x94, 0x29], [0x94, 0xE0], [0xC8, 0x49]]);
        assert_eq!(update, DisplayUpdate::Shown("HI".to_string()));
    }

    #[test]
    fn test_backspace_overwrites_previous_char() {
        let mut decoder = Cea608Decoder::new();
        // RCL, PAC, "HI", BS, "O", EOC
        let update = feed(
            &mut decoder,
            &[
                [0x94, 0x20],
                [0x94, 0xE0],
                [0xC8, 0x49],
                [0x94, 0xA1],
                [0x4F, 0x80],
                [0x94, 0x2F],
            ],
        );
        assert_eq!(update, DisplayUpdate::Shown("HO".to_string()));
    }

    #[test]
    fn test_short_packet_is_ignored() {
        let mut decoder = Cea608Decoder::new();
        let update = decoder.decode(&[0x61, 0x01, 0x00], 0, true);
        assert_eq!(update, DisplayUpdate::Unchanged);
    }

    #[test]
    fn test_caption_split_across_packets() {
        let cadence = CdpCadence::for_rate(FrameRate::FPS_30);
        let pairs = encode_caption("Two packets are needed here");
        let mut decoder = Cea608Decoder::new();

        let chunks: Vec<_> = pairs.chunks(cadence.max_field1_pairs()).collect();
        assert!(chunks.len() > 1);

        let mut updates = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let packet = build_packet(chunk, i as u16, cadence).unwrap();
            updates.push(decoder.decode(&packet, i, false));
        }

        let (last, earlier) = updates.split_last().unwrap();
        assert!(earlier.iter().all(DisplayUpdate::is_unchanged));
        assert_eq!(
            last,
            &DisplayUpdate::Shown("Two packets are needed here".to_string())
        );
    }

    #[test]
    fn test_flush_delivers_loaded_text() {
        let cadence = CdpCadence::for_rate(FrameRate::FPS_30);
        let mut pairs = encode_caption("Pending");
        // drop the EOC so the caption is loaded but never shown
        pairs.truncate(pairs.len() - 2);
        let packet = build_packet(&pairs, 0, cadence).unwrap();

        let mut decoder = Cea608Decoder::new();
        assert_eq!(
            decoder.decode(&packet, 0, true),
            DisplayUpdate::Shown("Pending".to_string())
        );
    }

    #[test]
    fn test_flush_of_blank_memory_changes_nothing() {
        let cadence = CdpCadence::for_rate(FrameRate::FPS_30);
        let mut decoder = Cea608Decoder::new();
        let shown = build_packet(&encode_caption("Old"), 0, cadence).unwrap();
        assert_eq!(
            decoder.decode(&shown, 0, false),
            DisplayUpdate::Shown("Old".to_string())
        );

        // RCL, row 15 PAC, then only spaces and no EOC
        let blank = build_packet(&[[0x94, 0x20], [0x94, 0xE0], [0x20, 0x20]], 1, cadence).unwrap();
        assert_eq!(decoder.decode(&blank, 1, true), DisplayUpdate::Unchanged);
    }

    #[test]
    fn test_flush_after_mid_row_code_changes_nothing() {
        let cadence = CdpCadence::for_rate(FrameRate::FPS_30);
        let mut decoder = Cea608Decoder::new();
        let packet = build_packet(&[[0x94, 0x20], [0x94, 0xE0], [0x91, 0x20]], 0, cadence).unwrap();
        assert_eq!(decoder.decode(&packet, 0, true), DisplayUpdate::Unchanged);
    }

    #[test]
    fn test_flush_does_not_repeat_swapped_caption() {
        let cadence = CdpCadence::for_rate(FrameRate::FPS_30);
        let mut decoder = Cea608Decoder::new();
        let shown = build_packet(&encode_caption("Old"), 0, cadence).unwrap();
        decoder.decode(&shown, 0, false);

        let idle = build_packet(&[], 1, cadence).unwrap();
        assert_eq!(decoder.decode(&idle, 1, true), DisplayUpdate::Unchanged);
    }
}
