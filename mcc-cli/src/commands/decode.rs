use super::{options_for, read_input};
use anyhow::{Context, Result};
use mcc_core::decoder::read_str;
use std::fs;
use tracing::{info, warn};

pub fn execute(input: &str, output: Option<&str>, frame_rate: f64) -> Result<()> {
    info!("Decoding file: {}", input);

    let options = options_for(frame_rate)?;
    let text = read_input(input)?;
    let file = read_str(&text, &options);

    info!(
        "Decoded {} paragraphs from {} event lines",
        file.stats.paragraphs, file.stats.event_lines
    );
    if file.stats.undecodable_payloads > 0 {
        warn!(
            "{} event lines carried no decodable caption packet",
            file.stats.undecodable_payloads
        );
    }

    let json = serde_json::to_string_pretty(&file.subtitle)
        .with_context(|| "Failed to serialize paragraphs")?;

    match output {
        Some(output_path) => {
            fs::write(output_path, json)
                .with_context(|| format!("Failed to write output file: {}", output_path))?;
            info!("Paragraphs written to: {}", output_path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
