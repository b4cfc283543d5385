use crate::{
    debug::{AbbreviationTables, Units},
    elf::{Reader, StringTable, Stream},
};

/// The debug sections of one file along with the file's byte order. Everything that
/// decodes .debug_abbrev or .debug_info borrows from this.
#[derive(Clone, Copy)]
pub struct Session<'a> {
    reader: Reader<'a>,
    pub debug_abbrev: &'a [u8],
    pub debug_info: &'a [u8],

    /// None if the file has no .debug_str section.
    pub debug_str: Option<StringTable<'a>>,
}

impl<'a> Session<'a> {
    /// reader supplies the byte order, its bytes aren't used.
    pub fn new(
        reader: Reader<'a>,
        debug_abbrev: &'a [u8],
        debug_info: &'a [u8],
        debug_str: Option<&'a [u8]>,
    ) -> Self {
        Session {
            reader,
            debug_abbrev,
            debug_info,
            debug_str: debug_str.map(StringTable::new),
        }
    }

    pub fn abbrev_stream(&self, offset: usize) -> Stream<'a> {
        Stream::new(self.reader.with_bytes(self.debug_abbrev), offset)
    }

    /// A stream over the first end bytes of .debug_info. end must be in range.
    pub fn info_stream(&self, offset: usize, end: usize) -> Stream<'a> {
        let bytes = self.debug_info.get(..end).unwrap_or(self.debug_info);
        Stream::new(self.reader.with_bytes(bytes), offset)
    }

    pub fn abbreviation_tables(&self) -> AbbreviationTables<'a> {
        AbbreviationTables::new(self.abbrev_stream(0))
    }

    pub fn units(&self) -> Units<'a> {
        Units::new(*self)
    }
}
