//! Section headers, i.e. Elf32_Shdr and Elf64_Shdr. Sections are what the linker and
//! debugger care about. The DWARF data lives in sections named .debug_*.
use super::{Bytes, OutOfBounds, Reader, StringIndex, Stream};

const WRITE_FLAG: u64 = 1 << 0; // Writable
const ALLOC_FLAG: u64 = 1 << 1; // Occupies memory during execution
const EXECINSTR_FLAG: u64 = 1 << 2; // Executable
const MERGE_FLAG: u64 = 1 << 4; // Might be merged
const STRINGS_FLAG: u64 = 1 << 5; // Contains nul-terminated strings
const INFO_LINK_FLAG: u64 = 1 << 6; // `sh_info' contains SHT index
const LINK_ORDER_FLAG: u64 = 1 << 7; // Preserve order after combining
const GROUP_FLAG: u64 = 1 << 9; // Section is member of a group.
const TLS_FLAG: u64 = 1 << 10; // Section hold thread-local data.
const COMPRESSED_FLAG: u64 = 1 << 11; // Section with compressed data.

/// Describes a section.
#[derive(Clone, Debug)]
pub struct SectionHeader {
    /// Index into the section name string table. Zero means no name.
    pub name: StringIndex,

    /// Type of the section.
    pub stype: SectionType,

    /// Write, alloc, and/or exec.
    pub flags: u64,

    /// Load address, zero for sections like .debug_info that aren't loaded.
    pub addr: u64,

    /// Offset and size of the section's bytes within the ELF file. Not validated.
    pub obytes: Bytes,

    /// Link to another section with related information, usually a string
    /// or symbol table.
    pub link: u32,

    /// Additional section info.
    pub info: u32,

    /// Section alignment.
    pub align: u64,

    /// Set if the section holds a table of entries.
    pub entry_size: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SectionType {
    /// Dynamic linking information.
    Dynamic,

    // Dynamic linker symbol table.
    DynamicSymbolTable,

    /// Array of pointers to termination functions.
    FiniArray,

    /// GNU style hash table.
    Hash,

    /// Array of pointers to initialization functions.
    InitArray,

    /// Uninitialized data.
    NoBits,

    /// Arbitrary metadata.
    Note,

    /// Not to be used.
    Null,

    /// CPU instructions, constant data, and debug info.
    ProgBits,

    /// Relocation entries with addends.
    RelocationsWith,

    /// Relocation entries without addends.
    RelocationsWithout,

    /// Strings for use by the linker and debugger.
    StringTable,

    /// Symbol hash table.
    SymbolHashTable,

    SymbolTable,

    /// Anything else, e.g. OS or processor specific types.
    Other(u32),
}

impl SectionType {
    pub fn from_u32(value: u32) -> Self {
        match value {
            0x0 => SectionType::Null,
            0x1 => SectionType::ProgBits,
            0x2 => SectionType::SymbolTable,
            0x3 => SectionType::StringTable,
            0x4 => SectionType::RelocationsWith,
            0x5 => SectionType::SymbolHashTable,
            0x6 => SectionType::Dynamic,
            0x7 => SectionType::Note,
            0x8 => SectionType::NoBits,
            0x9 => SectionType::RelocationsWithout,
            0xb => SectionType::DynamicSymbolTable,
            0xe => SectionType::InitArray,
            0xf => SectionType::FiniArray,
            0x6ffffff6 => SectionType::Hash,
            _ => SectionType::Other(value),
        }
    }
}

impl SectionHeader {
    pub fn flags(flags: u64) -> String {
        let names = [
            (WRITE_FLAG, "WRITE"),
            (ALLOC_FLAG, "ALLOC"),
            (EXECINSTR_FLAG, "EXEC"),
            (MERGE_FLAG, "MERGE"),
            (STRINGS_FLAG, "STRINGS"),
            (INFO_LINK_FLAG, "INFO"),
            (LINK_ORDER_FLAG, "LINK"),
            (GROUP_FLAG, "GROUP"),
            (TLS_FLAG, "TLS"),
            (COMPRESSED_FLAG, "COMPRESSED"),
        ];
        let result: Vec<_> = names
            .iter()
            .filter(|(flag, _)| flags & flag != 0)
            .map(|(_, name)| *name)
            .collect();
        if result.is_empty() {
            "none".to_string()
        } else {
            result.join(" ")
        }
    }

    /// Reads the header at offset. Only the header bytes themselves are checked,
    /// the offset and size it describes are not.
    pub fn new(reader: &Reader, offset: usize) -> Result<Self, OutOfBounds> {
        let mut s = Stream::new(*reader, offset);
        let name = StringIndex(s.read_word()?);
        let stype = SectionType::from_u32(s.read_word()?);
        let flags = s.read_wide_word()?;
        let addr = s.read_addr()?;
        let offset = s.read_addr()?;
        let size = s.read_wide_word()?;
        let link = s.read_word()?;
        let info = s.read_word()?;
        let align = s.read_wide_word()?;
        let entry_size = s.read_wide_word()?;
        Ok(SectionHeader {
            name,
            stype,
            flags,
            addr,
            obytes: Bytes::from_raw(offset, size),
            link,
            info,
            align,
            entry_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_32_bit_headers() {
        let mut bytes = Vec::new();
        for word in [7u32, 1, 0x6, 0x1000, 0x40, 0x20, 3, 0, 4, 0] {
            bytes.extend_from_slice(&word.to_be_bytes());
        }
        let reader = Reader::new(&bytes, false, false);
        let section = SectionHeader::new(&reader, 0).unwrap();
        assert_eq!(section.name, StringIndex(7));
        assert_eq!(section.stype, SectionType::ProgBits);
        assert_eq!(SectionHeader::flags(section.flags), "ALLOC EXEC");
        assert_eq!(section.addr, 0x1000);
        assert_eq!(section.obytes, Bytes::from_raw(0x40, 0x20));
        assert_eq!(section.link, 3);
        assert_eq!(section.align, 4);

        assert!(SectionHeader::new(&reader, 4).is_err());
    }

    #[test]
    fn unknown_types_are_kept() {
        assert_eq!(SectionType::from_u32(0x7000_0001), SectionType::Other(0x7000_0001));
        assert_eq!(SectionHeader::flags(0), "none");
    }
}
