//! Subcommand implementations

pub mod decode;
pub mod encode;
pub mod inspect;

use anyhow::{Context, Result};
use mcc_core::{FrameRate, MccOptions};
use std::fs;
use std::io::{self, Read};

/// Read a text file, or stdin when `input` is `-`
///
/// Invalid UTF-8 is replaced rather than rejected; such bytes can only sit in
/// noise lines.
pub fn read_input(input: &str) -> Result<String> {
    let data = if input == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input))?
    };
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Options for a given nominal frame rate
pub fn options_for(frame_rate: f64) -> Result<MccOptions> {
    let rate = FrameRate::new(frame_rate)
        .with_context(|| format!("Unsupported frame rate: {}", frame_rate))?;
    Ok(MccOptions::default().frame_rate(rate))
}
