//! # MCC Core
//!
//! Reader and writer for MacCaption (MCC V1.0) closed caption files.
//!
//! ## Modules
//!
//! - `constants`: File format constants, shorthand table and packet identifiers
//! - `types`: Core types (Paragraph, Subtitle)
//! - `options`: Codec configuration (MccOptions)
//! - `timecode`: Frame-based time code conversion
//! - `shorthand`: Payload shorthand expansion and compression
//! - `line`: Header/event/noise line classification
//! - `cdp`: ANC/CDP packet parsing and construction
//! - `caption`: Caption decoder interface (CaptionDecoder, DisplayUpdate)
//! - `cea608`: CEA-608 field 1 decoder and pop-on encoder
//! - `reconstruct`: Paragraph reconstruction from display events
//! - `decoder`: MCC file reading
//! - `encoder`: MCC file writing

#![warn(missing_docs)]

pub mod caption;
pub mod cdp;
pub mod cea608;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod line;
pub mod options;
pub mod reconstruct;
pub mod shorthand;
pub mod timecode;
pub mod types;

// Re-export commonly used types
pub use caption::{CaptionDecoder, DisplayUpdate};
pub use cea608::Cea608Decoder;
pub use decoder::{read_lines, read_str, MccFile, MccReader, ReadStats};
pub use encoder::{write_subtitle, write_to};
pub use error::MccError;
pub use options::MccOptions;
pub use timecode::FrameRate;
pub use types::{Paragraph, Subtitle};

/// Result type alias for MCC operations
pub type Result<T> = core::result::Result<T, MccError>;
