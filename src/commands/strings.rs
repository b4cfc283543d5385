use super::DumpOptions;
use super::tables::{TableBuilder, add_field};
use crate::elf::StringTable;
use crate::utils::Styling;
use std::io::{self, Write};

pub fn dump_strings(
    out: &mut impl Write,
    strings: &StringTable,
    options: &DumpOptions,
) -> io::Result<()> {
    writeln!(out, "{}", "The section .debug_str contains:".heading())?;
    writeln!(out)?;

    let mut builder = TableBuilder::new();
    builder.add_col_r(
        "offset",
        "offset of the string within .debug_str. DW_FORM_strp values are these offsets.",
    );
    builder.add_col_l("string", "the null terminated string.");
    for (offset, string) in strings.strings() {
        add_field!(builder, "offset", "0x{:x}", offset);
        add_field!(builder, "string", String::from_utf8_lossy(string));
    }
    builder.writeln(out, options.titles, options.explain)
}
