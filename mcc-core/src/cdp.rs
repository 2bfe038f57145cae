//! ANC packets carrying caption distribution packets (CDP)
//!
//! Packet layout as stored on an MCC line:
//! 1. ANC header: DID `0x61`, SDID `0x01`, data count
//! 2. CDP header: `96 69`, CDP length, frame rate nibble + `0xF`, flags,
//!    sequence counter (2 bytes, big-endian)
//! 3. Optional time code section (`0x71`)
//! 4. `cc_data` section: `0x72`, `0xE0 | cc_count`, `cc_count` triplets
//! 5. Optional service info section (`0x73`)
//! 6. Footer: `0x74`, sequence counter, packet checksum
//! 7. ANC checksum

use crate::constants::{
    ANC_DID_CAPTION, ANC_SDID_CDP, CDP_FLAG_CC_DATA, CDP_FLAG_RESERVED, CDP_FLAG_SERVICE_ACTIVE,
    CDP_IDENTIFIER, CDP_SECTION_CC_DATA, CDP_SECTION_FOOTER, CDP_SECTION_SVC_INFO,
    CDP_SECTION_TIME_CODE,
};
use crate::error::MccError;
use crate::timecode::FrameRate;
use bytes::{BufMut, Bytes, BytesMut};

#[cfg(feature = "logging")]
use tracing::debug;

/// CDP header length: identifier, length, rate, flags, sequence
const CDP_HEADER_LEN: usize = 7;

/// CDP footer length: section id, sequence, checksum
const CDP_FOOTER_LEN: usize = 4;

/// One `cc_data` construct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CcTriplet {
    /// `cc_valid` bit
    pub valid: bool,
    /// `cc_type`: 0/1 = CEA-608 field 1/2, 2/3 = DTVCC data/start
    pub cc_type: u8,
    /// The two data bytes
    pub data: [u8; 2],
}

impl CcTriplet {
    /// CEA-608 field 1
    pub const NTSC_FIELD_1: u8 = 0;
    /// CEA-608 field 2
    pub const NTSC_FIELD_2: u8 = 1;
    /// DTVCC channel packet data
    pub const DTVCC_DATA: u8 = 2;
    /// DTVCC channel packet start
    pub const DTVCC_START: u8 = 3;

    /// Decode a triplet from its wire bytes
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self {
            valid: bytes[0] & 0x04 != 0,
            cc_type: bytes[0] & 0x03,
            data: [bytes[1], bytes[2]],
        }
    }

    /// Encode to wire bytes (marker bits set)
    pub const fn to_bytes(&self) -> [u8; 3] {
        let valid = if self.valid { 0x04 } else { 0x00 };
        [0xF8 | valid | (self.cc_type & 0x03), self.data[0], self.data[1]]
    }

    /// Valid field 1 data
    pub const fn field1(data: [u8; 2]) -> Self {
        Self {
            valid: true,
            cc_type: Self::NTSC_FIELD_1,
            data,
        }
    }

    /// Valid field 2 null pair
    pub const fn field2_null() -> Self {
        Self {
            valid: true,
            cc_type: Self::NTSC_FIELD_2,
            data: [0x80, 0x80],
        }
    }

    /// Invalid DTVCC padding
    pub const fn padding() -> Self {
        Self {
            valid: false,
            cc_type: Self::DTVCC_DATA,
            data: [0x00, 0x00],
        }
    }

    /// True for valid CEA-608 field 1 data
    pub const fn is_field1(&self) -> bool {
        self.valid && self.cc_type == Self::NTSC_FIELD_1
    }
}

/// Decoded view of a caption packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionPacket {
    /// `cdp_frame_rate` code
    pub frame_rate_code: u8,
    /// CDP flags byte
    pub flags: u8,
    /// `cdp_hdr_sequence_cntr`
    pub sequence: u16,
    /// All `cc_data` triplets in order
    pub triplets: Vec<CcTriplet>,
}

impl CaptionPacket {
    /// Field 1 byte pairs carried by this packet
    pub fn field1_pairs(&self) -> impl Iterator<Item = [u8; 2]> + '_ {
        self.triplets
            .iter()
            .filter(|t| t.is_field1())
            .map(|t| t.data)
    }
}

/// CDP frame rate code and the number of `cc_data` triplets per packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CdpCadence {
    /// `cdp_frame_rate` code
    pub frame_rate_code: u8,
    /// Triplets per packet
    pub cc_count: u8,
}

impl CdpCadence {
    /// Cadence for a nominal frame rate
    pub fn for_rate(rate: FrameRate) -> Self {
        let fps = rate.fps();
        let (frame_rate_code, cc_count) = if (fps - 23.976).abs() < 0.01 {
            (1, 25)
        } else if fps < 24.5 {
            (2, 25)
        } else if fps < 27.5 {
            (3, 24)
        } else if (fps - 29.97).abs() < 0.01 {
            (4, 20)
        } else if fps < 40.0 {
            (5, 20)
        } else if fps < 55.0 {
            (6, 12)
        } else if (fps - 59.94).abs() < 0.01 {
            (7, 10)
        } else {
            (8, 10)
        };
        Self {
            frame_rate_code,
            cc_count,
        }
    }

    /// Field 1 pairs that fit in one packet (one slot is kept for field 2)
    pub const fn max_field1_pairs(&self) -> usize {
        self.cc_count as usize - 1
    }

    /// Total CDP length in bytes
    pub const fn cdp_len(&self) -> usize {
        CDP_HEADER_LEN + 2 + 3 * self.cc_count as usize + CDP_FOOTER_LEN
    }
}

/// Parse an ANC packet and extract its `cc_data` triplets
///
/// Checksums and sequence counters are not verified. A truncated `cc_data`
/// section yields the triplets that are complete.
pub fn parse_packet(packet: &[u8]) -> Result<CaptionPacket, MccError> {
    if packet.len() < 3 {
        return Err(MccError::MalformedPacket(format!(
            "ANC header needs 3 bytes, got {}",
            packet.len()
        )));
    }

    let (did, sdid) = (packet[0], packet[1]);
    if did != ANC_DID_CAPTION || sdid != ANC_SDID_CDP {
        return Err(MccError::NotCaptionPacket { did, sdid });
    }

    let data_count = packet[2] as usize;
    let udw = &packet[3..packet.len().min(3 + data_count)];

    if udw.len() < CDP_HEADER_LEN {
        return Err(MccError::MalformedPacket(format!(
            "CDP header needs {} bytes, got {}",
            CDP_HEADER_LEN,
            udw.len()
        )));
    }
    if udw[0..2] != CDP_IDENTIFIER {
        return Err(MccError::MalformedPacket(format!(
            "bad CDP identifier {:02X}{:02X}",
            udw[0], udw[1]
        )));
    }

    let frame_rate_code = udw[3] >> 4;
    let flags = udw[4];
    let sequence = u16::from_be_bytes([udw[5], udw[6]]);
    let mut triplets = Vec::new();

    let mut pos = CDP_HEADER_LEN;
    while pos < udw.len() {
        match udw[pos] {
            CDP_SECTION_TIME_CODE => pos += 5,
            CDP_SECTION_CC_DATA => {
                let count = udw.get(pos + 1).map_or(0, |b| (b & 0x1F) as usize);
                pos += 2;
                for _ in 0..count {
                    let Some(chunk) = udw.get(pos..pos + 3) else {
                        #[cfg(feature = "logging")]
                        debug!("cc_data section truncated after {} triplets", triplets.len());
                        break;
                    };
                    triplets.push(CcTriplet::from_bytes([chunk[0], chunk[1], chunk[2]]));
                    pos += 3;
                }
            }
            CDP_SECTION_SVC_INFO => {
                let count = udw.get(pos + 1).map_or(0, |b| (b & 0x0F) as usize);
                pos += 2 + 7 * count;
            }
            CDP_SECTION_FOOTER => break,
            _other => {
                #[cfg(feature = "logging")]
                debug!("Unknown CDP section {:#04x} at offset {}, stopping", _other, pos);
                break;
            }
        }
    }

    Ok(CaptionPacket {
        frame_rate_code,
        flags,
        sequence,
        triplets,
    })
}

/// Build an ANC packet carrying `pairs` as field 1 data
///
/// Slots after the pairs hold one field 2 null triplet, then DTVCC padding.
pub fn build_packet(
    pairs: &[[u8; 2]],
    sequence: u16,
    cadence: CdpCadence,
) -> Result<Bytes, MccError> {
    if pairs.len() > cadence.max_field1_pairs() {
        return Err(MccError::MalformedPacket(format!(
            "{} caption pairs exceed {} slots per packet",
            pairs.len(),
            cadence.max_field1_pairs()
        )));
    }

    let cdp_len = cadence.cdp_len();
    let mut buf = BytesMut::with_capacity(3 + cdp_len + 1);

    // ANC header
    buf.put_u8(ANC_DID_CAPTION);
    buf.put_u8(ANC_SDID_CDP);
    buf.put_u8(cdp_len as u8);

    // CDP header
    let cdp_start = buf.len();
    buf.put_slice(&CDP_IDENTIFIER);
    buf.put_u8(cdp_len as u8);
    buf.put_u8((cadence.frame_rate_code << 4) | 0x0F);
    buf.put_u8(CDP_FLAG_CC_DATA | CDP_FLAG_SERVICE_ACTIVE | CDP_FLAG_RESERVED);
    buf.put_u16(sequence);

    // cc_data
    buf.put_u8(CDP_SECTION_CC_DATA);
    buf.put_u8(0xE0 | cadence.cc_count);
    for pair in pairs {
        buf.put_slice(&CcTriplet::field1(*pair).to_bytes());
    }
    buf.put_slice(&CcTriplet::field2_null().to_bytes());
    for _ in pairs.len() + 1..cadence.cc_count as usize {
        buf.put_slice(&CcTriplet::padding().to_bytes());
    }

    // Footer: checksum makes the CDP byte sum zero
    buf.put_u8(CDP_SECTION_FOOTER);
    buf.put_u16(sequence);
    let cdp_sum = byte_sum(&buf[cdp_start..]);
    buf.put_u8(0u8.wrapping_sub(cdp_sum));

    // ANC checksum
    let anc_sum = byte_sum(&buf);
    buf.put_u8(anc_sum);

    Ok(buf.freeze())
}

fn byte_sum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}
