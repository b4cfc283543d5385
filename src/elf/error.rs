use super::OutOfBounds;
use thiserror::Error;

/// Problems with the ELF structure itself. Apart from NotElf and SectionNotFound these
/// mean the header or section table can't be trusted and nothing further should be
/// read from the file.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ElfError {
    /// Bad magic or a header size too small for an ELF header. Callers skip these
    /// files without a diagnostic.
    #[error("not an ELF file")]
    NotElf,

    #[error("file too small to be ELF")]
    TooSmall,

    #[error("unexpected word size {0}")]
    BadClass(u8),

    #[error("unexpected version {0}")]
    BadVersion(u8),

    #[error("unexpected data format {0}")]
    BadDataEncoding(u8),

    #[error("bogus section table offset 0x{0:x}")]
    BadSectionOffset(u64),

    #[error("bogus section header size {0}")]
    BadSectionEntrySize(u16),

    #[error("bogus section header count {0}")]
    BadSectionCount(u16),

    #[error("bogus string table index {0}")]
    BadStringTableIndex(u16),

    #[error("unexpected string table type")]
    BadStringTableType,

    #[error("bogus string table offset 0x{0:x}")]
    BadStringTableOffset(u64),

    #[error("bogus string table size 0x{0:x}")]
    BadStringTableSize(u64),

    #[error("{name} section has bogus offset 0x{offset:x} or size 0x{size:x}")]
    BadSectionBounds { name: String, offset: u64, size: u64 },

    #[error("{0} section not found")]
    SectionNotFound(&'static str),

    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),
}
