//! Fuzzing entry points for mcc-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_read

use mcc_core::{CaptionDecoder, Cea608Decoder, MccOptions};

pub fn fuzz_read(data: &[u8]) {
    use mcc_core::decoder::read_str;

    // Arbitrary text - should never panic
    let text = String::from_utf8_lossy(data);
    let _ = read_str(&text, &MccOptions::default());
}

pub fn fuzz_parse_packet(data: &[u8]) {
    use mcc_core::cdp::parse_packet;

    // Try to parse - should never panic
    let _ = parse_packet(data);
}

pub fn fuzz_caption_decoder(data: &[u8]) {
    // Every chunk is one packet; the last one flushes
    let mut decoder = Cea608Decoder::new();
    let chunks: Vec<&[u8]> = data.chunks(77).collect();
    for (i, chunk) in chunks.iter().enumerate() {
        let _ = decoder.decode(chunk, i, i + 1 == chunks.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_read_empty() {
        fuzz_read(&[]);
    }

    #[test]
    fn test_fuzz_read_event_lines() {
        fuzz_read(b"00:00:01:00\tT49S495F43ZZ72F4\n00;00;02;00\tOOOOZ\n99:99:99:99\tXYZ\n");
    }

    #[test]
    fn test_fuzz_parse_packet_random() {
        fuzz_parse_packet(&[0x61, 0x01, 0xFF, 0x96, 0x69]);
        fuzz_parse_packet(&[0xFF; 256]);
    }

    #[test]
    fn test_fuzz_caption_decoder_all_pairs() {
        // cc_data section of every field 1 pair value
        let mut data = Vec::new();
        for b1 in 0..=0xFFu8 {
            data.extend_from_slice(&[0x61, 0x01, 0x49, 0x96, 0x69, 0x49, 0x5F, 0x43, 0x00, 0x00]);
            data.extend_from_slice(&[0x72, 0xE0 | 20]);
            for b2 in (0..=0xFFu8).step_by(13).take(20) {
                data.extend_from_slice(&[0xFC, b1, b2]);
            }
            data.extend_from_slice(&[0x74, 0x00, 0x00, 0x00, 0x00]);
        }
        fuzz_caption_decoder(&data);
    }
}
