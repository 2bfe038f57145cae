//! Constants for the MCC transfer format and the caption packets it carries

/// First line of every MCC V1.0 file
pub const FILE_FORMAT_LINE: &str = "File Format=MacCaption_MCC V1.0";

/// Descriptive banner that must accompany every generated file, reproduced verbatim
pub const BANNER: &str = r"///////////////////////////////////////////////////////////////////////////////////
// Computer Prompting and Captioning Company
// Ancillary Data Packet Transfer File
//
// Permission to generate this format is granted provided that
// 1. This ANC Transfer file format is used on an as-is basis and no warranty is given, and
// 2. This entire descriptive information text is included in a generated .mcc file.
//
// General file format:
// HH:MM:SS:FF(tab)[Hexadecimal ANC data in groups of 2 characters]
// Hexadecimal data starts with the Ancillary Data Packet DID (Data ID defined in S291M)
// and concludes with the Check Sum following the User Data Words.
// Each time code line must contain at most one complete ancillary data packet.
// To transfer additional ANC Data successive lines may contain identical time code.
// Time Code Rate=[24, 25, 30, 30DF, 50, 60]
//
// ANC data bytes may be represented by one ASCII character according to the following schema:
// G FAh 00h 00h
// H 2 x (FAh 00h 00h)
// I 3 x (FAh 00h 00h)
// J 4 x (FAh 00h 00h)
// K 5 x (FAh 00h 00h)
// L 6 x (FAh 00h 00h)
// M 7 x (FAh 00h 00h)
// N 8 x (FAh 00h 00h)
// O 9 x (FAh 00h 00h)
// P FBh 80h 80h
// Q FCh 80h 80h
// R FDh 80h 80h
// S 96h 69h
// T 61h 01h
// U E1h 00h 00h
// Z 00h
//
///////////////////////////////////////////////////////////////////////////////////";

/// Line terminator used by the writer
pub const LINE_ENDING: &str = "\r\n";

/// Prefixes (after trimming) that mark a header line
pub const HEADER_PREFIXES: &[&str] = &[
    "//",
    "File Format=MacCaption_MCC",
    "UUID=",
    "Creation Program=",
    "Creation Date=",
    "Creation Time=",
    "Code Rate=",
    "Time Code Rate=",
];

/// Shorthand symbols and the hexadecimal runs they stand for
pub const SHORTHAND_TABLE: &[(char, &str)] = &[
    ('G', "FA0000"),
    ('H', "FA0000FA0000"),
    ('I', "FA0000FA0000FA0000"),
    ('J', "FA0000FA0000FA0000FA0000"),
    ('K', "FA0000FA0000FA0000FA0000FA0000"),
    ('L', "FA0000FA0000FA0000FA0000FA0000FA0000"),
    ('M', "FA0000FA0000FA0000FA0000FA0000FA0000FA0000"),
    ('N', "FA0000FA0000FA0000FA0000FA0000FA0000FA0000FA0000"),
    ('O', "FA0000FA0000FA0000FA0000FA0000FA0000FA0000FA0000FA0000"),
    ('P', "FB8080"),
    ('Q', "FC8080"),
    ('R', "FD8080"),
    ('S', "9669"),
    ('T', "6101"),
    ('U', "E1000000"),
    ('Z', "00"),
];

/// Packets shorter than this carry no decodable caption data
pub const MIN_PACKET_LEN: usize = 10;

/// Gap (in milliseconds) above which the writer emits an explicit end event
pub const DEFAULT_END_GAP_MS: u64 = 100;

/// Nominal frame rate used for time code arithmetic
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// Program name written to the `Creation Program=` header field
pub const DEFAULT_CREATION_PROGRAM: &str = "mcc-codec";

/// ANC data identifier for CEA-708 caption distribution packets (SMPTE 334)
pub const ANC_DID_CAPTION: u8 = 0x61;

/// ANC secondary data identifier for CEA-708 caption distribution packets
pub const ANC_SDID_CDP: u8 = 0x01;

/// CDP identifier (first two user data words)
pub const CDP_IDENTIFIER: [u8; 2] = [0x96, 0x69];

/// CDP section identifiers
pub const CDP_SECTION_TIME_CODE: u8 = 0x71;
/// `cc_data` section identifier
pub const CDP_SECTION_CC_DATA: u8 = 0x72;
/// Service information section identifier
pub const CDP_SECTION_SVC_INFO: u8 = 0x73;
/// Footer section identifier
pub const CDP_SECTION_FOOTER: u8 = 0x74;

/// CDP flag: time code section present
pub const CDP_FLAG_TIME_CODE: u8 = 0b1000_0000;
/// CDP flag: `cc_data` section present
pub const CDP_FLAG_CC_DATA: u8 = 0b0100_0000;
/// CDP flag: service info section present
pub const CDP_FLAG_SVC_INFO: u8 = 0b0010_0000;
/// CDP flag: caption service active
pub const CDP_FLAG_SERVICE_ACTIVE: u8 = 0b0000_0010;
/// CDP flag: reserved bit, always set
pub const CDP_FLAG_RESERVED: u8 = 0b0000_0001;

/// Screen geometry of a CEA-608 caption display
pub const SCREEN_ROWS: usize = 15;
/// Columns per caption row
pub const SCREEN_COLUMNS: usize = 32;
