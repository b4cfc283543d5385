//! The .debug_info section. This is a sequence of compilation units each of which
//! starts with a header and is followed by a tree of debugging information entries
//! (DIEs). The tree is flattened: an entry whose declaration has children is followed
//! by its children and then a null entry.
use crate::{
    debug::{
        AbbreviationDecl, AbbreviationTable, AttributeValue, DwarfError, Malformed, Session,
        decode_u64,
    },
    elf::Stream,
};
use tracing::{debug, trace};

const DWARF64_LENGTH: u32 = 0xffff_ffff;
const RESERVED_LENGTHS: u32 = 0xffff_fff0;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnitHeader {
    /// Offset of the header within .debug_info.
    pub offset: usize,

    /// Size of the unit, not counting the length field itself.
    pub length: u32,
    pub version: u16,

    /// Offset of the unit's table within .debug_abbrev.
    pub abbrev_offset: u32,

    /// Size of a target address, 4 or 8.
    pub address_size: u8,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Die<'a> {
    /// Zero for top level entries.
    pub depth: usize,

    /// Offset within .debug_info. References point at these.
    pub offset: usize,

    /// Index of the entry's declaration within the unit's abbreviation table.
    pub abbrev: usize,

    /// In declaration order.
    pub attrs: Vec<AttributeValue<'a>>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompilationUnit<'a> {
    pub header: UnitHeader,
    pub abbrevs: AbbreviationTable,

    /// Depth first order.
    pub dies: Vec<Die<'a>>,
}

impl<'a> CompilationUnit<'a> {
    pub fn decl(&self, die: &Die) -> &AbbreviationDecl {
        &self.abbrevs.decls[die.abbrev]
    }

    /// Index of the entry that owns the entry at index, None for top level entries.
    #[cfg(test)]
    pub fn parent_of(&self, index: usize) -> Option<usize> {
        let depth = self.dies.get(index)?.depth;
        if depth == 0 {
            return None;
        }
        self.dies[..index].iter().rposition(|d| d.depth == depth - 1)
    }

    /// Decodes everything after the length field. The stream is bounded by the end
    /// of the unit.
    fn decode(
        session: &Session<'a>,
        stream: &mut Stream<'a>,
        offset: usize,
        length: u32,
    ) -> Result<Self, DwarfError> {
        let err = |reason| DwarfError::MalformedUnit { offset, reason };
        let header = CompilationUnit::decode_header(session, stream, offset, length).map_err(err)?;

        let mut table_stream = session.abbrev_stream(header.abbrev_offset as usize);
        let abbrevs = AbbreviationTable::decode(&mut table_stream)
            .map_err(|table_err| match table_err {
                DwarfError::MalformedAbbreviation { offset, reason } => {
                    err(Malformed::BadAbbreviationTable {
                        offset,
                        reason: Box::new(reason),
                    })
                }
                other => other,
            })?
            .ok_or_else(|| {
                err(Malformed::AbbrevOffsetOutOfRange {
                    offset: header.abbrev_offset as u64,
                    len: session.debug_abbrev.len(),
                })
            })?;

        let dies = CompilationUnit::decode_dies(session, stream, &header, &abbrevs).map_err(err)?;
        debug!(
            "unit at 0x{offset:x}: version {}, {} entries",
            header.version,
            dies.len()
        );
        Ok(CompilationUnit {
            header,
            abbrevs,
            dies,
        })
    }

    fn decode_header(
        session: &Session,
        stream: &mut Stream,
        offset: usize,
        length: u32,
    ) -> Result<UnitHeader, Malformed> {
        let version = stream.read_half()?;
        if !(2..=4).contains(&version) {
            return Err(Malformed::UnsupportedVersion(version));
        }
        let abbrev_offset = stream.read_word()?;
        let address_size = stream.read_byte()?;
        if address_size != 4 && address_size != 8 {
            return Err(Malformed::BadAddressSize(address_size));
        }
        if abbrev_offset as usize >= session.debug_abbrev.len() {
            return Err(Malformed::AbbrevOffsetOutOfRange {
                offset: abbrev_offset as u64,
                len: session.debug_abbrev.len(),
            });
        }
        Ok(UnitHeader {
            offset,
            length,
            version,
            abbrev_offset,
            address_size,
        })
    }

    fn decode_dies(
        session: &Session<'a>,
        stream: &mut Stream<'a>,
        header: &UnitHeader,
        abbrevs: &AbbreviationTable,
    ) -> Result<Vec<Die<'a>>, Malformed> {
        let mut dies = Vec::new();
        let mut depth: usize = 0;
        while !stream.is_at_end() {
            let offset = stream.offset;
            let (code, _) = decode_u64(stream)?;
            if code == 0 {
                // Ends a list of children. At the top level this is padding.
                depth = depth.saturating_sub(1);
                continue;
            }

            let abbrev = abbrevs
                .find(code)
                .ok_or(Malformed::UnknownAbbreviation { code, offset })?;
            let decl = &abbrevs.decls[abbrev];
            trace!("<{depth}><{offset:x}> {}", decl.tag);

            let mut attrs = Vec::with_capacity(decl.attrs.len());
            for spec in decl.attrs.iter() {
                let value = AttributeValue::decode(
                    stream,
                    *spec,
                    header.address_size,
                    session.debug_str.as_ref(),
                )?;
                attrs.push(value);
            }
            dies.push(Die {
                depth,
                offset,
                abbrev,
                attrs,
            });
            if decl.has_children {
                depth += 1;
            }
        }
        Ok(dies)
    }
}

/// Iterates over the units in .debug_info. A unit that fails to decode is reported
/// and the next unit is still decoded. Iteration stops if the failing unit's length
/// couldn't be determined.
pub struct Units<'a> {
    session: Session<'a>,
    offset: usize,
    done: bool,
}

impl<'a> Units<'a> {
    pub fn new(session: Session<'a>) -> Self {
        Units {
            session,
            offset: 0,
            done: false,
        }
    }

    /// Reads the length field and returns the offset just past the unit.
    fn unit_end(&self, stream: &mut Stream) -> Result<(u32, usize), Malformed> {
        let length = stream.read_word()?;
        if length == DWARF64_LENGTH {
            return Err(Malformed::Dwarf64);
        }
        if length >= RESERVED_LENGTHS {
            return Err(Malformed::UnitLengthOutOfRange {
                length: length as u64,
            });
        }
        let end = self.offset + 4 + length as usize;
        if end > self.session.debug_info.len() {
            return Err(Malformed::UnitLengthOutOfRange {
                length: length as u64,
            });
        }
        Ok((length, end))
    }
}

impl<'a> Iterator for Units<'a> {
    type Item = Result<CompilationUnit<'a>, DwarfError>;

    fn next(&mut self) -> Option<Self::Item> {
        let info_len = self.session.debug_info.len();
        if self.done || self.offset >= info_len {
            return None;
        }

        let offset = self.offset;
        let mut stream = self.session.info_stream(offset, info_len);
        let (length, end) = match self.unit_end(&mut stream) {
            Ok(result) => result,
            Err(reason) => {
                self.done = true;
                return Some(Err(DwarfError::MalformedUnit { offset, reason }));
            }
        };

        // Whatever happens to this unit the next one starts at end.
        self.offset = end;
        let mut stream = self.session.info_stream(offset + 4, end);
        Some(CompilationUnit::decode(
            &self.session,
            &mut stream,
            offset,
            length,
        ))
    }
}
