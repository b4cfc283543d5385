//! The .debug_abbrev section. Entries in .debug_info start with an abbreviation code
//! which selects a declaration from the unit's abbreviation table. The declaration
//! says what the entry is (its tag), whether it has children, and which attributes
//! follow along with how each one is encoded.
use crate::{
    debug::{AttributeName, DwarfError, FormEncoding, Malformed, Tag, decode_u64},
    elf::Stream,
};
use tracing::{debug, trace};

const DW_CHILDREN_NO: u8 = 0;

/// The type of an attribute in a .debug_info entry along with how the associated
/// value is encoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AttributeSpec {
    pub name: AttributeName,
    pub form: FormEncoding,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AbbreviationDecl {
    /// Never zero, zero terminates the table.
    pub code: u64,

    /// DW_TAG_compile_unit, DW_TAG_typedef, DW_TAG_base_type, etc
    pub tag: Tag,

    /// If true then subsequent entries are children (until a NULL entry). Otherwise
    /// they are siblings.
    pub has_children: bool,

    pub attrs: Vec<AttributeSpec>,
}

/// All the declarations for one or more compilation units.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AbbreviationTable {
    /// Offset of the table within .debug_abbrev.
    pub offset: usize,
    pub decls: Vec<AbbreviationDecl>,
}

impl AbbreviationDecl {
    /// Returns a declaration or None if we've reached the end of the table.
    fn decode(stream: &mut Stream) -> Result<Option<Self>, Malformed> {
        let (code, _) = decode_u64(stream)?;
        if code == 0 {
            return Ok(None);
        }

        let (tag, _) = decode_u64(stream)?;
        let tag = Tag::from_u64(tag);
        let has_children = stream.read_byte()? != DW_CHILDREN_NO;

        let mut attrs = Vec::new();
        loop {
            let (name, _) = decode_u64(stream)?;
            let (form, _) = decode_u64(stream)?;
            if name == 0 && form == 0 {
                break;
            }

            let name = AttributeName::from_u64(name);
            let form = FormEncoding::from_u64(form);
            attrs.push(AttributeSpec { name, form })
        }
        Ok(Some(AbbreviationDecl {
            code,
            tag,
            has_children,
            attrs,
        }))
    }
}

impl AbbreviationTable {
    /// Decodes the table at the stream's offset and leaves the stream just past it.
    /// Returns None if the stream has nothing left. Nothing is returned for a table
    /// that is only partially decoded.
    pub fn decode(stream: &mut Stream) -> Result<Option<Self>, DwarfError> {
        let offset = stream.offset;
        if stream.is_at_end() {
            return Ok(None);
        }

        let err = |reason| DwarfError::MalformedAbbreviation { offset, reason };
        let mut decls = Vec::new();
        loop {
            if stream.is_at_end() {
                return Err(err(Malformed::MissingTerminator));
            }
            match AbbreviationDecl::decode(stream).map_err(err)? {
                Some(decl) => {
                    trace!("abbreviation {} is {}", decl.code, decl.tag);
                    decls.push(decl);
                }
                None => break,
            }
        }
        debug!(
            "abbreviation table at 0x{offset:x} has {} declarations",
            decls.len()
        );
        Ok(Some(AbbreviationTable { offset, decls }))
    }

    /// Index of the declaration with the given code. Codes are normally dense and
    /// 1-based but we don't rely on that.
    pub fn find(&self, code: u64) -> Option<usize> {
        self.decls.iter().position(|d| d.code == code)
    }
}

/// Iterates over every table in .debug_abbrev. Stops after the first error.
pub struct AbbreviationTables<'a> {
    stream: Stream<'a>,
    failed: bool,
}

impl<'a> AbbreviationTables<'a> {
    pub fn new(stream: Stream<'a>) -> Self {
        AbbreviationTables {
            stream,
            failed: false,
        }
    }
}

impl Iterator for AbbreviationTables<'_> {
    type Item = Result<AbbreviationTable, DwarfError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match AbbreviationTable::decode(&mut self.stream) {
            Ok(Some(table)) => Some(Ok(table)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elf::Reader;
    use crate::test_util::AbbrevBuilder;
    use AttributeName::*;
    use FormEncoding::*;

    fn tables(bytes: &[u8]) -> Vec<Result<AbbreviationTable, DwarfError>> {
        AbbreviationTables::new(Stream::new(Reader::new(bytes, true, true), 0)).collect()
    }

    #[test]
    fn round_trip() {
        let bytes = AbbrevBuilder::new()
            .decl(
                1,
                Tag::DW_TAG_compile_unit,
                true,
                &[(DW_AT_producer, DW_FORM_strp), (DW_AT_language, DW_FORM_data1)],
            )
            .decl(2, Tag::DW_TAG_base_type, false, &[(DW_AT_byte_size, DW_FORM_data1)])
            .decl(0x300, Tag::Unknown(0x5000), false, &[])
            .build();

        let mut stream = Stream::new(Reader::new(&bytes, true, true), 0);
        let table = AbbreviationTable::decode(&mut stream).unwrap().unwrap();
        assert_eq!(stream.offset, bytes.len());
        assert_eq!(table.offset, 0);
        assert_eq!(
            table.decls,
            vec![
                AbbreviationDecl {
                    code: 1,
                    tag: Tag::DW_TAG_compile_unit,
                    has_children: true,
                    attrs: vec![
                        AttributeSpec {
                            name: DW_AT_producer,
                            form: DW_FORM_strp
                        },
                        AttributeSpec {
                            name: DW_AT_language,
                            form: DW_FORM_data1
                        },
                    ],
                },
                AbbreviationDecl {
                    code: 2,
                    tag: Tag::DW_TAG_base_type,
                    has_children: false,
                    attrs: vec![AttributeSpec {
                        name: DW_AT_byte_size,
                        form: DW_FORM_data1
                    }],
                },
                AbbreviationDecl {
                    code: 0x300,
                    tag: Tag::Unknown(0x5000),
                    has_children: false,
                    attrs: vec![],
                },
            ]
        );
        assert_eq!(table.find(2), Some(1));
        assert_eq!(table.find(3), None);
        assert!(AbbreviationTable::decode(&mut stream).unwrap().is_none());
    }

    #[test]
    fn successive_tables() {
        let mut bytes = AbbrevBuilder::new()
            .decl(1, Tag::DW_TAG_compile_unit, false, &[])
            .build();
        let second = bytes.len();
        bytes.extend(
            AbbrevBuilder::new()
                .decl(1, Tag::DW_TAG_partial_unit, false, &[(DW_AT_name, DW_FORM_string)])
                .build(),
        );

        let tables = tables(&bytes);
        assert_eq!(tables.len(), 2);
        let second_table = tables[1].as_ref().unwrap();
        assert_eq!(second_table.offset, second);
        assert_eq!(second_table.decls[0].tag, Tag::DW_TAG_partial_unit);
    }

    #[test]
    fn missing_terminator() {
        let mut bytes = AbbrevBuilder::new()
            .decl(1, Tag::DW_TAG_compile_unit, true, &[(DW_AT_name, DW_FORM_string)])
            .build();
        bytes.pop();

        let tables = tables(&bytes);
        assert_eq!(
            tables,
            vec![Err(DwarfError::MalformedAbbreviation {
                offset: 0,
                reason: Malformed::MissingTerminator
            })]
        );
    }

    #[test]
    fn truncated_declaration() {
        // code 1, DW_TAG_compile_unit, no children byte
        let tables = tables(&[0x01, 0x11]);
        assert!(matches!(
            tables[..],
            [Err(DwarfError::MalformedAbbreviation {
                offset: 0,
                reason: Malformed::Truncated(_)
            })]
        ));
    }

    #[test]
    fn empty_section() {
        assert!(tables(&[]).is_empty());
    }
}
