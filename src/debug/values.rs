//! Decoding of attribute values. How many bytes a value occupies depends only on its
//! form, never on the attribute. Making sense of the value is left to interpret.
use crate::{
    debug::{AttributeSpec, FormEncoding, Malformed, decode_i64, decode_u64},
    elf::{StringIndex, StringTable, Stream},
};

/// The payload of one attribute, shaped by its form.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormValue<'a> {
    /// Fixed width or ULEB128 integers (including addresses, flags, and references).
    /// Width is the number of bytes the value occupied, zero for DW_FORM_flag_present.
    Unsigned { value: u64, width: usize },

    /// DW_FORM_sdata
    Signed(i64),

    /// DW_FORM_block* and DW_FORM_exprloc, without the length prefix.
    Block(&'a [u8]),

    /// DW_FORM_string, without the terminator.
    String(&'a [u8]),

    /// DW_FORM_strp. string is None when there is no .debug_str section.
    StrOffset {
        offset: u32,
        string: Option<&'a [u8]>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AttributeValue<'a> {
    pub spec: AttributeSpec,

    /// Same as spec.form except for DW_FORM_indirect where this is the form that
    /// was actually used.
    pub form: FormEncoding,

    pub value: FormValue<'a>,
}

impl<'a> AttributeValue<'a> {
    pub fn decode(
        stream: &mut Stream<'a>,
        spec: AttributeSpec,
        address_size: u8,
        debug_str: Option<&StringTable<'a>>,
    ) -> Result<Self, Malformed> {
        let mut form = spec.form;
        while form == FormEncoding::DW_FORM_indirect {
            let (code, _) = decode_u64(stream)?;
            form = FormEncoding::from_u64(code);
        }
        let value = decode_form(stream, form, address_size, debug_str)?;
        Ok(AttributeValue { spec, form, value })
    }
}

fn decode_form<'a>(
    stream: &mut Stream<'a>,
    form: FormEncoding,
    address_size: u8,
    debug_str: Option<&StringTable<'a>>,
) -> Result<FormValue<'a>, Malformed> {
    use FormEncoding::*;
    let unsigned = |value, width| FormValue::Unsigned { value, width };
    let value = match form {
        DW_FORM_addr | DW_FORM_ref_addr => {
            if address_size == 4 {
                unsigned(stream.read_word()? as u64, 4)
            } else {
                unsigned(stream.read_xword()?, 8)
            }
        }
        DW_FORM_flag | DW_FORM_data1 | DW_FORM_ref1 => unsigned(stream.read_byte()? as u64, 1),
        DW_FORM_data2 | DW_FORM_ref2 => unsigned(stream.read_half()? as u64, 2),
        DW_FORM_data4 | DW_FORM_ref4 | DW_FORM_sec_offset => {
            unsigned(stream.read_word()? as u64, 4)
        }
        DW_FORM_data8 | DW_FORM_ref8 | DW_FORM_ref_sig8 => unsigned(stream.read_xword()?, 8),
        DW_FORM_udata | DW_FORM_ref_udata => {
            let (value, width) = decode_u64(stream)?;
            unsigned(value, width)
        }
        DW_FORM_flag_present => unsigned(1, 0),
        DW_FORM_sdata => FormValue::Signed(decode_i64(stream)?),
        DW_FORM_block1 => {
            let len = stream.read_byte()? as usize;
            FormValue::Block(stream.read_bytes(len)?)
        }
        DW_FORM_block2 => {
            let len = stream.read_half()? as usize;
            FormValue::Block(stream.read_bytes(len)?)
        }
        DW_FORM_block4 => {
            let len = stream.read_word()? as usize;
            FormValue::Block(stream.read_bytes(len)?)
        }
        DW_FORM_block | DW_FORM_exprloc => {
            let (len, _) = decode_u64(stream)?;
            let len = usize::try_from(len).unwrap_or(usize::MAX);
            FormValue::Block(stream.read_bytes(len)?)
        }
        DW_FORM_string => FormValue::String(stream.read_string()?),
        DW_FORM_strp => {
            let offset = stream.read_word()?;
            let string = match debug_str {
                Some(table) => Some(lookup_string(table, offset)?),
                None => None,
            };
            FormValue::StrOffset { offset, string }
        }
        // The width of anything else is unknown so nothing after it can be decoded.
        _ => return Err(Malformed::UnimplementedForm(form)),
    };
    Ok(value)
}

fn lookup_string<'a>(table: &StringTable<'a>, offset: u32) -> Result<&'a [u8], Malformed> {
    if offset as usize >= table.len() {
        return Err(Malformed::StringOffsetOutOfRange {
            offset: offset as u64,
            len: table.len(),
        });
    }
    table
        .get(StringIndex(offset))
        .ok_or(Malformed::UnterminatedString(offset as usize))
}
