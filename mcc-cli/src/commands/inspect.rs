use super::{options_for, read_input};
use anyhow::Result;
use colored::*;
use mcc_core::{timecode::encode_timecode, DisplayUpdate, MccReader};
use tracing::info;

pub fn execute(input: &str, show_events: bool, frame_rate: f64) -> Result<()> {
    info!("Inspecting file: {}", input);

    let options = options_for(frame_rate)?;
    let text = read_input(input)?;
    let lines: Vec<&str> = text.lines().collect();

    let file = MccReader::new(options.clone()).read_lines(&lines);
    let stats = &file.stats;

    println!("\n=== File Summary ===");
    match file.header.first() {
        Some(first) if first.starts_with("File Format=MacCaption_MCC") => {
            println!("{} {}", "✓".green(), first.trim())
        }
        _ => println!("{} Missing MacCaption file format line", "✗".red()),
    }
    for field in file.header.iter().map(|line| line.trim()).filter(|line| {
        !line.is_empty() && !line.starts_with("//") && !line.starts_with("File Format=")
    }) {
        println!("  {}", field);
    }

    println!("\n=== Line Statistics ===");
    println!("Total lines:          {}", stats.lines_total);
    println!("Header lines:         {}", stats.header_lines);
    println!("Event lines:          {}", stats.event_lines);
    if stats.noise_lines > 0 {
        println!("Noise lines:          {}", stats.noise_lines.to_string().yellow());
    } else {
        println!("Noise lines:          {}", stats.noise_lines);
    }
    if stats.undecodable_payloads > 0 {
        println!(
            "Undecodable payloads: {}",
            stats.undecodable_payloads.to_string().yellow()
        );
    } else {
        println!("Undecodable payloads: {}", stats.undecodable_payloads);
    }
    println!("Paragraphs:           {}", stats.paragraphs.to_string().green());

    let open = file.subtitle.iter().filter(|p| p.is_open()).count();
    if open > 0 {
        println!("{} {} paragraph(s) without an end time", "!".yellow(), open);
    }

    if show_events {
        println!("\n=== Events ===");
        let (events, _) = MccReader::new(options.clone()).decode_events(&lines);
        for event in events {
            let timecode = encode_timecode(event.timecode, options.frame_rate);
            match event.update {
                DisplayUpdate::Unchanged => {
                    println!("{:>6}  {}  {}", event.line_index + 1, timecode, "-".dimmed())
                }
                DisplayUpdate::Cleared => {
                    println!("{:>6}  {}  {}", event.line_index + 1, timecode, "CLEAR".red())
                }
                DisplayUpdate::Shown(text) => println!(
                    "{:>6}  {}  {}",
                    event.line_index + 1,
                    timecode,
                    text.replace('\n', " | ").green()
                ),
            }
        }
    }

    Ok(())
}
