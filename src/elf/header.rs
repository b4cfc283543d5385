//! The ELF header, i.e. Elf32_Ehdr or Elf64_Ehdr. This is where everything starts so
//! it is validated against the file size before anything else is looked at.
use super::{ElfError, Reader, Stream};
use tracing::trace;

const ELFCLASS32: u8 = 1;
const ELFCLASS64: u8 = 2;
const ELFDATA2LSB: u8 = 1;
const ELFDATA2MSB: u8 = 2;
const EV_CURRENT: u8 = 1;

const EI_CLASS: usize = 4;
const EI_DATA: usize = 5;
const EI_VERSION: usize = 6;
const EI_NIDENT: usize = 16;

pub struct ElfHeader {
    /// Executable, shared library, core file, relocatable object, etc.
    pub etype: u16,

    /// CPU architecture.
    pub machine: u16,

    /// Offset in the ELF file to the section header table.
    pub section_offset: u64,

    /// Size of this header.
    pub header_size: u16,

    /// Size of one entry in the section header table, at least the size of a
    /// Elf32_Shdr or Elf64_Shdr.
    pub section_entry_size: u16,

    pub num_section_entries: u16,

    /// Section index of the section name string table.
    pub string_table_index: u16,
}

impl ElfHeader {
    /// Size of the header for the given class.
    pub fn min_size(sixty_four_bit: bool) -> usize {
        if sixty_four_bit { 64 } else { 52 }
    }

    /// Size of a section header for the given class.
    pub fn min_section_entry_size(sixty_four_bit: bool) -> u16 {
        if sixty_four_bit { 64 } else { 40 }
    }

    /// Checks the identification bytes and returns a reader that uses the file's class
    /// and byte order.
    pub fn identify(bytes: &[u8]) -> Result<Reader<'_>, ElfError> {
        // see https://en.wikipedia.org/wiki/Executable_and_Linkable_Format
        if bytes.len() < EI_NIDENT {
            return Err(ElfError::TooSmall);
        }
        if bytes[0..4] != [0x7f, b'E', b'L', b'F'] {
            return Err(ElfError::NotElf);
        }

        let sixty_four_bit = match bytes[EI_CLASS] {
            ELFCLASS32 => false,
            ELFCLASS64 => true,
            class => return Err(ElfError::BadClass(class)),
        };
        if bytes.len() < ElfHeader::min_size(sixty_four_bit) {
            return Err(ElfError::TooSmall);
        }
        if bytes[EI_VERSION] != EV_CURRENT {
            return Err(ElfError::BadVersion(bytes[EI_VERSION]));
        }
        let little_endian = match bytes[EI_DATA] {
            ELFDATA2LSB => true,
            ELFDATA2MSB => false,
            data => return Err(ElfError::BadDataEncoding(data)),
        };
        Ok(Reader::new(bytes, little_endian, sixty_four_bit))
    }

    /// Parses the header and checks the section header table against the file size.
    pub fn new(reader: &Reader) -> Result<Self, ElfError> {
        let mut s = Stream::new(*reader, EI_NIDENT);
        let etype = s.read_half()?;
        let machine = s.read_half()?;
        let _version = s.read_word()?;
        let _entry = s.read_addr()?;
        let _ph_offset = s.read_addr()?;
        let section_offset = s.read_addr()?;
        let _flags = s.read_word()?;
        let header_size = s.read_half()?;
        let _ph_entry_size = s.read_half()?;
        let _num_ph_entries = s.read_half()?;
        let header = ElfHeader {
            etype,
            machine,
            section_offset,
            header_size,
            section_entry_size: s.read_half()?,
            num_section_entries: s.read_half()?,
            string_table_index: s.read_half()?,
        };
        header.validate(reader)?;
        trace!(
            "{} section headers at 0x{:x}",
            header.num_section_entries, header.section_offset
        );
        Ok(header)
    }

    fn validate(&self, reader: &Reader) -> Result<(), ElfError> {
        let file_size = reader.len() as u64;
        let sixty_four_bit = reader.sixty_four_bit;
        if (self.header_size as usize) < ElfHeader::min_size(sixty_four_bit) {
            return Err(ElfError::NotElf);
        }
        if self.section_offset > file_size {
            return Err(ElfError::BadSectionOffset(self.section_offset));
        }
        if self.section_entry_size < ElfHeader::min_section_entry_size(sixty_four_bit) {
            return Err(ElfError::BadSectionEntrySize(self.section_entry_size));
        }
        let room = (file_size - self.section_offset) / self.section_entry_size as u64;
        if self.num_section_entries as u64 > room {
            return Err(ElfError::BadSectionCount(self.num_section_entries));
        }
        if self.string_table_index >= self.num_section_entries {
            return Err(ElfError::BadStringTableIndex(self.string_table_index));
        }
        Ok(())
    }
}

/// Returns true if bytes hold an ELF header whose section table fits in the file.
pub fn validate(bytes: &[u8]) -> bool {
    ElfHeader::identify(bytes).is_ok_and(|reader| ElfHeader::new(&reader).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::ElfBuilder;

    fn check(bytes: &[u8]) -> Result<ElfHeader, ElfError> {
        let reader = ElfHeader::identify(bytes)?;
        ElfHeader::new(&reader)
    }

    #[test]
    fn accepts_built_image() {
        let bytes = ElfBuilder::new().section(".text", 1, vec![0x90; 4]).build();
        assert!(validate(&bytes));
        let header = check(&bytes).unwrap();
        assert_eq!(header.num_section_entries, 3); // null, .text, .shstrtab
        assert_eq!(header.string_table_index, 2);
        assert_eq!(header.section_entry_size, 64);
    }

    #[test]
    fn section_offset_past_end() {
        let mut bytes = ElfBuilder::new().build();
        let past = bytes.len() as u64 + 1;
        ElfBuilder::patch_section_offset(&mut bytes, past);
        assert!(!validate(&bytes));
        assert_eq!(check(&bytes).err(), Some(ElfError::BadSectionOffset(past)));
    }

    #[test]
    fn section_count_past_end() {
        let mut bytes = ElfBuilder::new().build();
        ElfBuilder::patch_section_count(&mut bytes, 100);
        assert_eq!(check(&bytes).err(), Some(ElfError::BadSectionCount(100)));
    }

    #[test]
    fn string_table_index_out_of_range() {
        let mut bytes = ElfBuilder::new().build();
        ElfBuilder::patch_string_table_index(&mut bytes, 3);
        assert_eq!(check(&bytes).err(), Some(ElfError::BadStringTableIndex(3)));
    }

    #[test]
    fn identification_failures() {
        assert_eq!(check(b"\x7fELF").err(), Some(ElfError::TooSmall));

        let good = ElfBuilder::new().build();

        let mut bytes = good.clone();
        bytes[0] = b'M';
        assert_eq!(check(&bytes).err(), Some(ElfError::NotElf));

        let mut bytes = good.clone();
        bytes[EI_CLASS] = 3;
        assert_eq!(check(&bytes).err(), Some(ElfError::BadClass(3)));

        let mut bytes = good.clone();
        bytes[EI_VERSION] = 0;
        assert_eq!(check(&bytes).err(), Some(ElfError::BadVersion(0)));

        let mut bytes = good.clone();
        bytes[EI_DATA] = 3;
        assert_eq!(check(&bytes).err(), Some(ElfError::BadDataEncoding(3)));

        // e_ehsize
        let mut bytes = good.clone();
        bytes[52] = 10;
        assert_eq!(check(&bytes).err(), Some(ElfError::NotElf));

        // e_shentsize
        let mut bytes = good;
        bytes[58] = 32;
        assert_eq!(check(&bytes).err(), Some(ElfError::BadSectionEntrySize(32)));
    }
}
