//! Builders for the synthetic ELF and DWARF images used by the tests. Everything is
//! little endian and ELF64.
use crate::debug::{AttributeName, FormEncoding, Tag};

pub const SHT_PROGBITS: u32 = 1;
pub const SHT_STRTAB: u32 = 3;

const EHDR_SIZE: usize = 64;
const SHDR_SIZE: usize = 64;

// Offsets within Elf64_Ehdr.
const E_SHOFF: usize = 40;
const E_SHNUM: usize = 60;
const E_SHSTRNDX: usize = 62;

pub fn uleb(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
}

pub fn sleb(out: &mut Vec<u8>, mut value: i64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        let done = (value == 0 && byte & 0x40 == 0) || (value == -1 && byte & 0x40 != 0);
        if done {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
}

struct Section {
    name: String,
    stype: u32,
    data: Vec<u8>,
}

/// Produces an ELF image with a null section, the added sections in order, and then
/// .shstrtab (which is also e_shstrndx).
pub struct ElfBuilder {
    sections: Vec<Section>,
}

impl ElfBuilder {
    pub fn new() -> Self {
        ElfBuilder {
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, name: &str, stype: u32, data: Vec<u8>) -> Self {
        self.sections.push(Section {
            name: name.to_string(),
            stype,
            data,
        });
        self
    }

    /// Convenience for images holding the three debug sections.
    pub fn debug(abbrev: Vec<u8>, info: Vec<u8>, strings: Option<Vec<u8>>) -> Self {
        let builder = ElfBuilder::new()
            .section(".debug_abbrev", SHT_PROGBITS, abbrev)
            .section(".debug_info", SHT_PROGBITS, info);
        match strings {
            Some(strings) => builder.section(".debug_str", SHT_PROGBITS, strings),
            None => builder,
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let mut bytes = vec![0; EHDR_SIZE];

        // (name, type, offset, size)
        let mut headers = vec![(0, 0, 0, 0)];
        let mut names = vec![0u8];
        for section in self.sections.iter() {
            let name = names.len();
            names.extend_from_slice(section.name.as_bytes());
            names.push(0);
            headers.push((name, section.stype, bytes.len(), section.data.len()));
            bytes.extend_from_slice(&section.data);
        }
        let name = names.len();
        names.extend_from_slice(b".shstrtab\0");
        headers.push((name, SHT_STRTAB, bytes.len(), names.len()));
        bytes.extend_from_slice(&names);

        while bytes.len() % 8 != 0 {
            bytes.push(0);
        }
        let section_offset = bytes.len();
        for (name, stype, offset, size) in headers.iter() {
            let mut shdr = Vec::with_capacity(SHDR_SIZE);
            shdr.extend((*name as u32).to_le_bytes());
            shdr.extend(stype.to_le_bytes());
            shdr.extend(0u64.to_le_bytes()); // flags
            shdr.extend(0u64.to_le_bytes()); // addr
            shdr.extend((*offset as u64).to_le_bytes());
            shdr.extend((*size as u64).to_le_bytes());
            shdr.extend(0u32.to_le_bytes()); // link
            shdr.extend(0u32.to_le_bytes()); // info
            shdr.extend(1u64.to_le_bytes()); // align
            shdr.extend(0u64.to_le_bytes()); // entry size
            bytes.extend(shdr);
        }

        bytes[0..4].copy_from_slice(b"\x7fELF");
        bytes[4] = 2; // ELFCLASS64
        bytes[5] = 1; // ELFDATA2LSB
        bytes[6] = 1; // EV_CURRENT
        bytes[16..18].copy_from_slice(&1u16.to_le_bytes()); // ET_REL
        bytes[18..20].copy_from_slice(&62u16.to_le_bytes()); // EM_X86_64
        bytes[20..24].copy_from_slice(&1u32.to_le_bytes());
        bytes[E_SHOFF..E_SHOFF + 8].copy_from_slice(&(section_offset as u64).to_le_bytes());
        bytes[52..54].copy_from_slice(&(EHDR_SIZE as u16).to_le_bytes());
        bytes[58..60].copy_from_slice(&(SHDR_SIZE as u16).to_le_bytes());
        bytes[E_SHNUM..E_SHNUM + 2].copy_from_slice(&(headers.len() as u16).to_le_bytes());
        let strndx = headers.len() as u16 - 1;
        bytes[E_SHSTRNDX..E_SHSTRNDX + 2].copy_from_slice(&strndx.to_le_bytes());
        bytes
    }

    pub fn patch_section_offset(bytes: &mut [u8], offset: u64) {
        bytes[E_SHOFF..E_SHOFF + 8].copy_from_slice(&offset.to_le_bytes());
    }

    pub fn patch_section_count(bytes: &mut [u8], count: u16) {
        bytes[E_SHNUM..E_SHNUM + 2].copy_from_slice(&count.to_le_bytes());
    }

    pub fn patch_string_table_index(bytes: &mut [u8], index: u16) {
        bytes[E_SHSTRNDX..E_SHSTRNDX + 2].copy_from_slice(&index.to_le_bytes());
    }

    /// Overwrites a u32 field of the index'th section header.
    pub fn patch_section_u32(bytes: &mut [u8], index: usize, field: usize, value: u32) {
        let at = ElfBuilder::section_header(bytes, index) + field;
        bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Overwrites a u64 field of the index'th section header.
    pub fn patch_section_u64(bytes: &mut [u8], index: usize, field: usize, value: u64) {
        let at = ElfBuilder::section_header(bytes, index) + field;
        bytes[at..at + 8].copy_from_slice(&value.to_le_bytes());
    }

    fn section_header(bytes: &[u8], index: usize) -> usize {
        let mut offset = [0; 8];
        offset.copy_from_slice(&bytes[E_SHOFF..E_SHOFF + 8]);
        u64::from_le_bytes(offset) as usize + index * SHDR_SIZE
    }
}

/// Builds one .debug_abbrev table.
pub struct AbbrevBuilder {
    bytes: Vec<u8>,
}

impl AbbrevBuilder {
    pub fn new() -> Self {
        AbbrevBuilder { bytes: Vec::new() }
    }

    pub fn decl(
        mut self,
        code: u64,
        tag: Tag,
        has_children: bool,
        attrs: &[(AttributeName, FormEncoding)],
    ) -> Self {
        uleb(&mut self.bytes, code);
        uleb(&mut self.bytes, tag.value());
        self.bytes.push(has_children as u8);
        for (name, form) in attrs.iter() {
            uleb(&mut self.bytes, name.value());
            uleb(&mut self.bytes, form.value());
        }
        self.bytes.extend([0, 0]);
        self
    }

    /// Adds the terminating zero code.
    pub fn build(mut self) -> Vec<u8> {
        self.bytes.push(0);
        self.bytes
    }
}

/// Builds one 32-bit DWARF compilation unit. The body is whatever has been added,
/// the length is filled in by build.
pub struct UnitBuilder {
    version: u16,
    abbrev_offset: u32,
    address_size: u8,
    body: Vec<u8>,
}

impl UnitBuilder {
    /// Version 4 with 8 byte addresses.
    pub fn new(abbrev_offset: u32) -> Self {
        UnitBuilder {
            version: 4,
            abbrev_offset,
            address_size: 8,
            body: Vec::new(),
        }
    }

    pub fn version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    pub fn address_size(mut self, size: u8) -> Self {
        self.address_size = size;
        self
    }

    pub fn uleb(mut self, value: u64) -> Self {
        uleb(&mut self.body, value);
        self
    }

    pub fn sleb(mut self, value: i64) -> Self {
        sleb(&mut self.body, value);
        self
    }

    pub fn byte(mut self, value: u8) -> Self {
        self.body.push(value);
        self
    }

    pub fn half(mut self, value: u16) -> Self {
        self.body.extend(value.to_le_bytes());
        self
    }

    pub fn word(mut self, value: u32) -> Self {
        self.body.extend(value.to_le_bytes());
        self
    }

    pub fn xword(mut self, value: u64) -> Self {
        self.body.extend(value.to_le_bytes());
        self
    }

    pub fn bytes(mut self, value: &[u8]) -> Self {
        self.body.extend_from_slice(value);
        self
    }

    /// Adds a null terminated string.
    pub fn string(mut self, value: &str) -> Self {
        self.body.extend_from_slice(value.as_bytes());
        self.body.push(0);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let length = 2 + 4 + 1 + self.body.len() as u32;
        let mut bytes = Vec::new();
        bytes.extend(length.to_le_bytes());
        bytes.extend(self.version.to_le_bytes());
        bytes.extend(self.abbrev_offset.to_le_bytes());
        bytes.push(self.address_size);
        bytes.extend(self.body);
        bytes
    }
}
