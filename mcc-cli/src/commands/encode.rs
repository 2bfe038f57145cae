use super::{options_for, read_input};
use anyhow::{Context, Result};
use mcc_core::{encoder::write_subtitle, Subtitle};
use std::fs;
use tracing::info;

pub fn execute(input: &str, output: &str, frame_rate: f64, program: Option<&str>) -> Result<()> {
    info!("Encoding paragraphs from: {}", input);

    let json = read_input(input)?;
    let mut subtitle: Subtitle = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse paragraphs from: {}", input))?;
    subtitle.renumber();

    let mut options = options_for(frame_rate)?;
    if let Some(program) = program {
        options = options.creation_program(program);
    }

    let text = write_subtitle(&subtitle, &options)
        .with_context(|| "Failed to encode caption packets")?;

    fs::write(output, text)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    info!(
        "Wrote {} paragraphs at {} fps to: {}",
        subtitle.len(),
        options.frame_rate,
        output
    );
    Ok(())
}
