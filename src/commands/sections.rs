use super::DumpOptions;
use super::tables::{TableBuilder, add_field};
use crate::elf::{ElfFile, SectionHeader, StringTable};
use crate::utils::Styling;
use std::io::{self, Write};

pub fn dump_sections(
    out: &mut impl Write,
    file: &ElfFile,
    names: &StringTable,
    options: &DumpOptions,
) -> io::Result<()> {
    writeln!(out, "{}", "Section headers:".heading())?;
    writeln!(out)?;

    let mut builder = TableBuilder::new();
    builder.add_col_r("index", "index into sections.");
    builder.add_col_l("name", "the section name, empty for the null section.");
    builder.add_col_l("type", "type of the section.");
    builder.add_col_r("vaddr", "virtual address at execution.");
    builder.add_col_r(
        "offset",
        "offset into the ELF file for the start of the section.",
    );
    builder.add_col_r("size", "section size in bytes.");
    builder.add_col_r(
        "link",
        "link to another section with related information, usually a string or symbol table.",
    );
    builder.add_col_r("info", "additional section info.");
    builder.add_col_r("entry_size", "set if the section holds a table of entries.");
    builder.add_col_r("align", "section alignment.");
    builder.add_col_l("flags", "write, alloc, exec, etc.");

    for (i, section) in file.sections.iter().enumerate() {
        add_field!(builder, "index", i);
        add_field!(builder, "name", file.section_name(section, names));
        add_field!(builder, "type", "{:?}", section.stype);
        add_field!(builder, "vaddr", "{:x}", section.addr);
        add_field!(builder, "offset", "{:x}", section.obytes.start.0);
        add_field!(builder, "size", "{:x}", section.obytes.size);
        add_field!(builder, "link", section.link);
        add_field!(builder, "info", section.info);
        add_field!(builder, "entry_size", section.entry_size);
        add_field!(builder, "align", section.align);
        add_field!(builder, "flags", SectionHeader::flags(section.flags));
    }
    builder.writeln(&mut *out, options.titles, options.explain)?;
    if options.explain {
        writeln!(out)?;
        writeln!(out, "Addresses, offsets, and sizes are in hex.")?;
    }
    Ok(())
}
