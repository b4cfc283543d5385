//! What a decoded attribute value means. This depends on the attribute and sometimes
//! on the form, e.g. DW_AT_location is an expression when it's a block and an offset
//! into .debug_loc when it's a data4.
use crate::debug::{AttributeName, AttributeValue, FormEncoding, FormValue};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Interpretation<'a> {
    Str(&'a [u8]),

    /// None if there was no .debug_str to look in.
    IndirectStr {
        offset: u32,
        string: Option<&'a [u8]>,
    },

    Unsigned(u64),
    Signed(i64),
    Hex(u64),

    /// A named constant, e.g. DW_LANG_C99.
    Name(&'static str),

    /// A location expression. We only report the size.
    Block(usize),

    /// Offset into .debug_loc.
    LocList(u64),

    /// Offset of the referenced entry within .debug_info.
    Reference(u64),

    /// There's no interpretation for this attribute with this form.
    Unimplemented(FormEncoding),
}

#[derive(Clone, Copy)]
enum Class {
    String,
    Constant,
    Inline,
    Address,
    Language,
    Encoding,
    Location,
    Reference,
}

fn class(name: AttributeName) -> Option<Class> {
    use AttributeName::*;
    let class = match name {
        DW_AT_name | DW_AT_producer | DW_AT_comp_dir | DW_AT_linkage_name
        | DW_AT_MIPS_linkage_name => Class::String,

        DW_AT_byte_size | DW_AT_bit_offset | DW_AT_bit_size | DW_AT_bit_stride
        | DW_AT_byte_stride | DW_AT_data_bit_offset | DW_AT_decl_file | DW_AT_decl_line
        | DW_AT_decl_column | DW_AT_call_file | DW_AT_call_line | DW_AT_call_column
        | DW_AT_lower_bound | DW_AT_upper_bound | DW_AT_count | DW_AT_const_value
        | DW_AT_discr_value | DW_AT_accessibility | DW_AT_visibility | DW_AT_virtuality
        | DW_AT_calling_convention | DW_AT_identifier_case | DW_AT_ordering
        | DW_AT_address_class | DW_AT_endianity | DW_AT_decimal_scale | DW_AT_decimal_sign
        | DW_AT_digit_count | DW_AT_binary_scale | DW_AT_external | DW_AT_declaration
        | DW_AT_prototyped | DW_AT_artificial | DW_AT_is_optional | DW_AT_variable_parameter
        | DW_AT_mutable | DW_AT_explicit | DW_AT_elemental | DW_AT_pure | DW_AT_recursive
        | DW_AT_main_subprogram | DW_AT_const_expr | DW_AT_enum_class
        | DW_AT_threads_scaled | DW_AT_use_UTF8 | DW_AT_GNU_all_tail_call_sites
        | DW_AT_GNU_all_call_sites | DW_AT_GNU_tail_call | DW_AT_GNU_discriminator => {
            Class::Constant
        }

        DW_AT_inline => Class::Inline,

        DW_AT_low_pc | DW_AT_high_pc | DW_AT_entry_pc | DW_AT_ranges | DW_AT_stmt_list => {
            Class::Address
        }

        DW_AT_language => Class::Language,
        DW_AT_encoding => Class::Encoding,

        DW_AT_location | DW_AT_frame_base | DW_AT_data_member_location | DW_AT_string_length
        | DW_AT_return_addr | DW_AT_vtable_elem_location | DW_AT_segment
        | DW_AT_static_link | DW_AT_use_location | DW_AT_data_location => Class::Location,

        DW_AT_sibling | DW_AT_type | DW_AT_abstract_origin | DW_AT_specification
        | DW_AT_containing_type | DW_AT_import | DW_AT_object_pointer | DW_AT_base_types
        | DW_AT_common_reference | DW_AT_default_value | DW_AT_discr | DW_AT_friend
        | DW_AT_namelist_item | DW_AT_priority | DW_AT_small | DW_AT_extension => {
            Class::Reference
        }

        _ => return None,
    };
    Some(class)
}

/// unit_offset is the offset of the unit the value came from. Unit relative
/// references are converted to .debug_info offsets using it.
pub fn interpret<'a>(value: &AttributeValue<'a>, unit_offset: usize) -> Interpretation<'a> {
    use FormEncoding::*;
    use Interpretation as I;

    let form = value.form;
    let name = value.spec.name;
    let unimplemented = I::Unimplemented(form);
    let Some(class) = class(name) else {
        return unimplemented;
    };
    match (class, value.value) {
        (Class::String, FormValue::String(s)) => I::Str(s),
        (Class::String, FormValue::StrOffset { offset, string }) => I::IndirectStr { offset, string },

        (Class::Constant, FormValue::Unsigned { value, .. }) => I::Unsigned(value),
        (Class::Constant, FormValue::Signed(value)) => I::Signed(value),

        (Class::Inline, FormValue::Unsigned { value, .. }) => I::Name(inline_name(value)),
        (Class::Address, FormValue::Unsigned { value, .. }) => I::Hex(value),
        (Class::Language, FormValue::Unsigned { value, .. }) => I::Name(language_name(value)),
        (Class::Encoding, FormValue::Unsigned { value, .. }) => I::Name(encoding_name(value)),

        (Class::Location, FormValue::Block(block)) => I::Block(block.len()),
        (Class::Location, FormValue::Unsigned { value, .. }) => match form {
            DW_FORM_data4 | DW_FORM_data8 | DW_FORM_sec_offset => I::LocList(value),
            // DWARF 3 and later allow a plain byte offset.
            DW_FORM_data1 | DW_FORM_data2 | DW_FORM_udata
                if name == AttributeName::DW_AT_data_member_location =>
            {
                I::Unsigned(value)
            }
            _ => unimplemented,
        },

        (Class::Reference, FormValue::Unsigned { value, .. }) => match form {
            DW_FORM_ref1 | DW_FORM_ref2 | DW_FORM_ref4 | DW_FORM_ref8 | DW_FORM_ref_udata => {
                I::Reference(value.wrapping_add(unit_offset as u64))
            }
            DW_FORM_ref_addr => I::Reference(value),
            DW_FORM_ref_sig8 => I::Hex(value),
            _ => unimplemented,
        },

        _ => unimplemented,
    }
}

const INLINE_NAMES: [&str; 4] = [
    "DW_INL_not_inlined",
    "DW_INL_inlined",
    "DW_INL_declared_not_inlined",
    "DW_INL_declared_inlined",
];

const LANGUAGE_NAMES: [&str; 20] = [
    "DW_LANG_C89",
    "DW_LANG_C",
    "DW_LANG_Ada83",
    "DW_LANG_C_plus_plus",
    "DW_LANG_Cobol74",
    "DW_LANG_Cobol85",
    "DW_LANG_Fortran77",
    "DW_LANG_Fortran90",
    "DW_LANG_Pascal83",
    "DW_LANG_Modula2",
    "DW_LANG_Java",
    "DW_LANG_C99",
    "DW_LANG_Ada95",
    "DW_LANG_Fortran95",
    "DW_LANG_PLI",
    "DW_LANG_ObjC",
    "DW_LANG_ObjC_plus_plus",
    "DW_LANG_UPC",
    "DW_LANG_D",
    "DW_LANG_Python",
];

const ENCODING_NAMES: [&str; 16] = [
    "DW_ATE_address",
    "DW_ATE_boolean",
    "DW_ATE_complex_float",
    "DW_ATE_float",
    "DW_ATE_signed",
    "DW_ATE_signed_char",
    "DW_ATE_unsigned",
    "DW_ATE_unsigned_char",
    "DW_ATE_imaginary_float",
    "DW_ATE_packed_decimal",
    "DW_ATE_numeric_string",
    "DW_ATE_edited",
    "DW_ATE_signed_fixed",
    "DW_ATE_unsigned_fixed",
    "DW_ATE_decimal_float",
    "DW_ATE_UTF",
];

/// DW_INL codes start at zero.
pub fn inline_name(code: u64) -> &'static str {
    usize::try_from(code)
        .ok()
        .and_then(|i| INLINE_NAMES.get(i))
        .copied()
        .unwrap_or("invalid")
}

/// DW_LANG codes start at one.
pub fn language_name(code: u64) -> &'static str {
    one_based(&LANGUAGE_NAMES, code)
}

/// DW_ATE codes start at one.
pub fn encoding_name(code: u64) -> &'static str {
    one_based(&ENCODING_NAMES, code)
}

fn one_based(names: &[&'static str], code: u64) -> &'static str {
    if code == 0 || code > names.len() as u64 {
        return "invalid";
    }
    names[code as usize - 1]
}

impl fmt::Display for Interpretation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interpretation::Str(s) => write!(f, "{}", String::from_utf8_lossy(s)),
            Interpretation::IndirectStr { offset, string } => {
                write!(f, "(indirect string, offset: 0x{offset:x}): ")?;
                match string {
                    Some(s) => write!(f, "{}", String::from_utf8_lossy(s)),
                    None => write!(f, "<unresolved>"),
                }
            }
            Interpretation::Unsigned(value) => write!(f, "{value}"),
            Interpretation::Signed(value) => write!(f, "{value}"),
            Interpretation::Hex(value) => write!(f, "0x{value:x}"),
            Interpretation::Name(name) => write!(f, "{name}"),
            Interpretation::Block(len) => write!(f, "{len} byte block"),
            Interpretation::LocList(offset) => write!(f, "0x{offset:x} (location list)"),
            Interpretation::Reference(offset) => write!(f, "<0x{offset:x}>"),
            Interpretation::Unimplemented(form) => write!(f, "<unimplemented {form}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::AttributeSpec;
    use AttributeName::*;
    use FormEncoding::*;

    fn attr(name: AttributeName, form: FormEncoding, value: FormValue) -> AttributeValue {
        AttributeValue {
            spec: AttributeSpec { name, form },
            form,
            value,
        }
    }

    fn unsigned(value: u64) -> FormValue<'static> {
        FormValue::Unsigned { value, width: 4 }
    }

    fn show(value: AttributeValue, unit_offset: usize) -> String {
        interpret(&value, unit_offset).to_string()
    }

    #[test]
    fn lookup_tables_are_bounded() {
        assert_eq!(language_name(0), "invalid");
        assert_eq!(language_name(1), "DW_LANG_C89");
        assert_eq!(language_name(0x0c), "DW_LANG_C99");
        assert_eq!(language_name(0x14), "DW_LANG_Python");
        assert_eq!(language_name(0x15), "invalid");
        assert_eq!(language_name(u64::MAX), "invalid");

        assert_eq!(encoding_name(0), "invalid");
        assert_eq!(encoding_name(1), "DW_ATE_address");
        assert_eq!(encoding_name(0x10), "DW_ATE_UTF");
        assert_eq!(encoding_name(0x11), "invalid");

        assert_eq!(inline_name(0), "DW_INL_not_inlined");
        assert_eq!(inline_name(3), "DW_INL_declared_inlined");
        assert_eq!(inline_name(4), "invalid");
    }

    #[test]
    fn strings() {
        let value = attr(DW_AT_producer, DW_FORM_string, FormValue::String(b"cc"));
        assert_eq!(show(value, 0), "cc");

        let value = attr(
            DW_AT_name,
            DW_FORM_strp,
            FormValue::StrOffset {
                offset: 0x1f,
                string: Some(&b"main"[..]),
            },
        );
        assert_eq!(show(value, 0), "(indirect string, offset: 0x1f): main");

        let value = attr(
            DW_AT_comp_dir,
            DW_FORM_strp,
            FormValue::StrOffset {
                offset: 4,
                string: None,
            },
        );
        assert_eq!(show(value, 0), "(indirect string, offset: 0x4): <unresolved>");
    }

    #[test]
    fn numbers_and_names() {
        assert_eq!(show(attr(DW_AT_byte_size, DW_FORM_data1, unsigned(8)), 0), "8");
        assert_eq!(
            show(attr(DW_AT_const_value, DW_FORM_sdata, FormValue::Signed(-2)), 0),
            "-2"
        );
        assert_eq!(
            show(
                attr(DW_AT_external, DW_FORM_flag_present, FormValue::Unsigned { value: 1, width: 0 }),
                0
            ),
            "1"
        );
        assert_eq!(show(attr(DW_AT_low_pc, DW_FORM_addr, unsigned(0x401000)), 0), "0x401000");
        assert_eq!(show(attr(DW_AT_language, DW_FORM_data1, unsigned(0x0c)), 0), "DW_LANG_C99");
        assert_eq!(show(attr(DW_AT_encoding, DW_FORM_data1, unsigned(0)), 0), "invalid");
        assert_eq!(show(attr(DW_AT_inline, DW_FORM_data1, unsigned(1)), 0), "DW_INL_inlined");
    }

    #[test]
    fn locations() {
        let block = attr(DW_AT_location, DW_FORM_exprloc, FormValue::Block(&[0x91, 0x68]));
        assert_eq!(show(block, 0), "2 byte block");
        assert_eq!(
            show(attr(DW_AT_location, DW_FORM_sec_offset, unsigned(0x30)), 0),
            "0x30 (location list)"
        );
        assert_eq!(
            show(attr(DW_AT_frame_base, DW_FORM_data4, unsigned(0x30)), 0),
            "0x30 (location list)"
        );
        assert_eq!(
            show(attr(DW_AT_data_member_location, DW_FORM_data1, unsigned(8)), 0),
            "8"
        );
        assert_eq!(
            interpret(&attr(DW_AT_location, DW_FORM_data1, unsigned(8)), 0),
            Interpretation::Unimplemented(DW_FORM_data1)
        );
    }

    #[test]
    fn unit_relative_references() {
        let value = attr(DW_AT_type, DW_FORM_ref4, unsigned(0x2d));
        assert_eq!(interpret(&value, 0x100), Interpretation::Reference(0x12d));
        assert_eq!(show(value, 0x100), "<0x12d>");

        let value = attr(DW_AT_sibling, DW_FORM_ref_udata, unsigned(0x10));
        assert_eq!(interpret(&value, 0x100), Interpretation::Reference(0x110));
    }

    #[test]
    fn section_relative_references() {
        let value = attr(DW_AT_abstract_origin, DW_FORM_ref_addr, unsigned(0x2d));
        assert_eq!(interpret(&value, 0x100), Interpretation::Reference(0x2d));
    }

    #[test]
    fn everything_else_is_unimplemented() {
        let value = attr(DW_AT_macro_info, DW_FORM_sec_offset, unsigned(0));
        assert_eq!(interpret(&value, 0), Interpretation::Unimplemented(DW_FORM_sec_offset));
        assert_eq!(show(value, 0), "<unimplemented DW_FORM_sec_offset>");

        let value = attr(DW_AT_name, DW_FORM_data4, unsigned(0));
        assert_eq!(interpret(&value, 0), Interpretation::Unimplemented(DW_FORM_data4));

        let value = attr(DW_AT_type, DW_FORM_data4, unsigned(0));
        assert_eq!(interpret(&value, 0), Interpretation::Unimplemented(DW_FORM_data4));

        let value = attr(AttributeName::Unknown(0x2345), DW_FORM_data1, unsigned(0));
        assert_eq!(interpret(&value, 0), Interpretation::Unimplemented(DW_FORM_data1));
    }
}
