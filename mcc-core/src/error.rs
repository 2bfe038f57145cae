//! Error types for MCC codec operations

/// Errors that can occur while reading or writing MCC data
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MccError {
    /// Time code text could not be parsed
    #[error("Invalid time code: {0:?}")]
    InvalidTimecode(String),

    /// A character pair in a payload is not hexadecimal
    #[error("Invalid hex character {character:?} at position {position}")]
    InvalidHex {
        /// Offset of the offending character in the expanded payload.
        position: usize,
        /// The offending character.
        character: char,
    },

    /// ANC packet carries something other than CEA-708 caption data
    #[error("Not a caption packet: DID {did:#04x}, SDID {sdid:#04x}")]
    NotCaptionPacket {
        /// Data identifier found in the packet.
        did: u8,
        /// Secondary data identifier found in the packet.
        sdid: u8,
    },

    /// Packet structure is truncated or inconsistent
    #[error("Malformed packet: {0}")]
    MalformedPacket(String),

    /// IO error during read/write
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for MccError {
    fn from(err: std::io::Error) -> Self {
        MccError::Io(err.to_string())
    }
}

impl From<hex::FromHexError> for MccError {
    fn from(err: hex::FromHexError) -> Self {
        match err {
            hex::FromHexError::InvalidHexCharacter { c, index } => MccError::InvalidHex {
                position: index,
                character: c,
            },
            other => MccError::Serialization(other.to_string()),
        }
    }
}
