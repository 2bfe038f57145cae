mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "mcc")]
#[command(about = "mcc - Read and write MacCaption (MCC) caption files", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an MCC file into JSON paragraphs
    Decode {
        /// Input MCC file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Output JSON file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Nominal frame rate for time codes
        #[arg(long, default_value = "30")]
        frame_rate: f64,
    },

    /// Encode JSON paragraphs into an MCC file
    Encode {
        /// Input JSON file (array of paragraphs)
        #[arg(short, long)]
        input: String,

        /// Output MCC file
        #[arg(short, long)]
        output: String,

        /// Nominal frame rate for time codes
        #[arg(long, default_value = "30")]
        frame_rate: f64,

        /// Value for the Creation Program header field
        #[arg(long)]
        program: Option<String>,
    },

    /// Show header fields, line statistics and decoded events
    Inspect {
        /// Input MCC file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// List every event line with its decoded update
        #[arg(long)]
        events: bool,

        /// Nominal frame rate for time codes
        #[arg(long, default_value = "30")]
        frame_rate: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Decode {
            input,
            output,
            frame_rate,
        } => commands::decode::execute(&input, output.as_deref(), frame_rate),

        Commands::Encode {
            input,
            output,
            frame_rate,
            program,
        } => commands::encode::execute(&input, &output, frame_rate, program.as_deref()),

        Commands::Inspect {
            input,
            events,
            frame_rate,
        } => commands::inspect::execute(&input, events, frame_rate),
    }
}
