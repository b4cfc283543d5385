//! An ELF file whose header and section table have been validated.
use super::{ElfError, ElfHeader, Reader, SectionHeader, SectionType, StringTable};
use tracing::{debug, trace};

pub struct ElfFile<'a> {
    pub header: ElfHeader,
    pub reader: Reader<'a>,
    pub sections: Vec<SectionHeader>,
}

impl<'a> ElfFile<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Self, ElfError> {
        let reader = ElfHeader::identify(bytes)?;
        let header = ElfHeader::new(&reader)?;
        let sections = ElfFile::load_sections(&reader, &header)?;
        debug!(
            "{}-bit {} endian ELF (type {}, machine {}) with {} sections",
            if reader.sixty_four_bit { 64 } else { 32 },
            if reader.little_endian { "little" } else { "big" },
            header.etype,
            header.machine,
            sections.len()
        );
        Ok(ElfFile {
            header,
            reader,
            sections,
        })
    }

    /// The section holding section names (e_shstrndx).
    pub fn section_name_string_table(&self) -> Result<StringTable<'a>, ElfError> {
        let index = self.header.string_table_index;
        let section = self
            .sections
            .get(index as usize)
            .ok_or(ElfError::BadStringTableIndex(index))?;
        if section.stype != SectionType::StringTable {
            return Err(ElfError::BadStringTableType);
        }

        let file_size = self.reader.len() as u64;
        let bytes = section.obytes;
        if bytes.start.0 > file_size {
            return Err(ElfError::BadStringTableOffset(bytes.start.0));
        }
        if !bytes.within(file_size) {
            return Err(ElfError::BadStringTableSize(bytes.size));
        }
        let names = self.reader.slice(bytes.start.0 as usize, bytes.size as usize)?;
        Ok(StringTable::new(names))
    }

    /// Returns the first section, in file order, named exactly name. Sections with a
    /// bogus link or name index are ignored. A match whose bytes don't fit in the file
    /// is an error.
    pub fn find_section(
        &self,
        name: &str,
        names: &StringTable,
    ) -> Result<Option<&SectionHeader>, ElfError> {
        let num_sections = self.header.num_section_entries as u32;
        for (index, section) in self.sections.iter().enumerate() {
            if section.link >= num_sections || section.name.0 as usize >= names.len() {
                trace!("skipping section {index}");
                continue;
            }
            if names.matches(section.name, name) {
                if !section.obytes.within(self.reader.len() as u64) {
                    return Err(ElfError::BadSectionBounds {
                        name: name.to_string(),
                        offset: section.obytes.start.0,
                        size: section.obytes.size,
                    });
                }
                trace!(
                    "found {name} at 0x{:x} (0x{:x} bytes)",
                    section.obytes.start.0, section.obytes.size
                );
                return Ok(Some(section));
            }
        }
        Ok(None)
    }

    /// Like find_section but returns the section's bytes.
    pub fn find_section_bytes(
        &self,
        name: &str,
        names: &StringTable,
    ) -> Result<Option<&'a [u8]>, ElfError> {
        match self.find_section(name, names)? {
            Some(section) => Ok(Some(self.section_bytes(section, names)?)),
            None => Ok(None),
        }
    }

    pub fn section_bytes(
        &self,
        section: &SectionHeader,
        names: &StringTable,
    ) -> Result<&'a [u8], ElfError> {
        let bytes = section.obytes;
        if !bytes.within(self.reader.len() as u64) {
            return Err(ElfError::BadSectionBounds {
                name: self.section_name(section, names),
                offset: bytes.start.0,
                size: bytes.size,
            });
        }
        Ok(self.reader.slice(bytes.start.0 as usize, bytes.size as usize)?)
    }

    pub fn section_name(&self, section: &SectionHeader, names: &StringTable) -> String {
        match names.get(section.name) {
            Some(name) => String::from_utf8_lossy(name).into_owned(),
            None => format!("<bad name 0x{:x}>", section.name.0),
        }
    }

    fn load_sections(reader: &Reader, header: &ElfHeader) -> Result<Vec<SectionHeader>, ElfError> {
        let mut sections = Vec::with_capacity(header.num_section_entries as usize);
        let mut offset = header.section_offset as usize;

        // ElfHeader::new has already checked that the table fits in the file.
        for _ in 0..header.num_section_entries {
            sections.push(SectionHeader::new(reader, offset)?);
            offset += header.section_entry_size as usize;
        }
        Ok(sections)
    }
}
