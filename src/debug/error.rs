use crate::debug::FormEncoding;
use crate::elf::OutOfBounds;
use thiserror::Error;

/// Why a table or unit couldn't be decoded.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Malformed {
    #[error("truncated: {0}")]
    Truncated(#[from] OutOfBounds),

    #[error("LEB128 value at 0x{0:x} overflows 64 bits")]
    Leb128Overflow(usize),

    #[error("missing terminating entry")]
    MissingTerminator,

    #[error("unknown abbreviation code {code} at 0x{offset:x}")]
    UnknownAbbreviation { code: u64, offset: usize },

    #[error("abbreviation offset 0x{offset:x} is past the end of .debug_abbrev (0x{len:x})")]
    AbbrevOffsetOutOfRange { offset: u64, len: usize },

    #[error("unit length 0x{length:x} runs past the end of .debug_info")]
    UnitLengthOutOfRange { length: u64 },

    #[error("64-bit DWARF is not supported")]
    Dwarf64,

    #[error("unsupported DWARF version {0}")]
    UnsupportedVersion(u16),

    #[error("bad address size {0}")]
    BadAddressSize(u8),

    #[error("unimplemented form {0}")]
    UnimplementedForm(FormEncoding),

    #[error(".debug_str offset 0x{offset:x} is out of range (0x{len:x})")]
    StringOffsetOutOfRange { offset: u64, len: usize },

    #[error(".debug_str string at 0x{0:x} isn't terminated")]
    UnterminatedString(usize),

    /// The table a unit refers to is itself malformed.
    #[error("abbreviation table at 0x{offset:x}: {reason}")]
    BadAbbreviationTable { offset: usize, reason: Box<Malformed> },
}

/// Offsets are relative to the start of the section being decoded.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum DwarfError {
    #[error("malformed abbreviation table at 0x{offset:x}: {reason}")]
    MalformedAbbreviation { offset: usize, reason: Malformed },

    #[error("malformed compilation unit at 0x{offset:x}: {reason}")]
    MalformedUnit { offset: usize, reason: Malformed },
}
