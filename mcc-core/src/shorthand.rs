//! Shorthand substitution layer over hexadecimal ANC data
//!
//! MCC payloads mix literal hex digit pairs with single-character symbols that
//! stand for common byte runs (see [`SHORTHAND_TABLE`]). This module expands
//! symbols back to hex, converts hex to bytes, and compresses bytes into the
//! shortest symbol form for writing.

use crate::constants::SHORTHAND_TABLE;
use crate::error::MccError;
use once_cell::sync::Lazy;

#[cfg(feature = "logging")]
use tracing::warn;

/// Shorthand expansions as raw bytes, longest first
static EXPANSIONS_BY_LENGTH: Lazy<Vec<(char, Vec<u8>)>> = Lazy::new(|| {
    let mut table: Vec<(char, Vec<u8>)> = SHORTHAND_TABLE
        .iter()
        .map(|(symbol, digits)| (*symbol, hex::decode(digits).unwrap_or_default()))
        .collect();
    table.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    table
});

/// Hex expansion for a shorthand symbol
pub fn lookup(symbol: char) -> Option<&'static str> {
    SHORTHAND_TABLE
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, digits)| *digits)
}

/// Replace every shorthand symbol in `input` with its hex expansion
///
/// Characters that are not symbols are copied through unchanged. Anything that
/// is neither a symbol nor a hex digit is still copied, but reported, since it
/// shifts every following byte boundary.
pub fn expand(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 2);
    for (_pos, ch) in input.char_indices() {
        match lookup(ch) {
            Some(digits) => out.push_str(digits),
            None => {
                if !ch.is_ascii_hexdigit() {
                    #[cfg(feature = "logging")]
                    warn!(
                        "Unknown shorthand character {:?} at offset {} passed through",
                        ch, _pos
                    );
                }
                out.push(ch);
            }
        }
    }
    out
}

/// Convert hex text to bytes, two characters per byte
///
/// A trailing unpaired character is dropped. Non-hex pairs are an error.
pub fn hex_to_bytes(text: &str) -> Result<Vec<u8>, MccError> {
    let raw = text.as_bytes();
    let even = raw.len() - raw.len() % 2;
    Ok(hex::decode(&raw[..even])?)
}

/// Encode bytes as payload text, using shorthand symbols wherever they fit
///
/// At each offset the longest matching symbol wins; bytes that start no symbol
/// are written as upper-case hex.
pub fn compress(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    let mut literal_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        let rest = &bytes[pos..];
        let symbol = EXPANSIONS_BY_LENGTH
            .iter()
            .find(|(_, expansion)| !expansion.is_empty() && rest.starts_with(expansion));

        match symbol {
            Some((ch, expansion)) => {
                out.push_str(&hex::encode_upper(&bytes[literal_start..pos]));
                out.push(*ch);
                pos += expansion.len();
                literal_start = pos;
            }
            None => pos += 1,
        }
    }
    out.push_str(&hex::encode_upper(&bytes[literal_start..]));
    out
}
