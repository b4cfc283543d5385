use crate::debug::{CompilationUnit, Session, interpret};
use crate::utils::{Styling, explain, warn_to};
use std::io::{self, Write};

/// Prints every unit in .debug_info. Units that fail to decode are reported to
/// diagnostics and skipped. Returns false if any unit failed.
pub fn dump_info(
    out: &mut impl Write,
    diagnostics: &mut impl Write,
    session: &Session,
    explain: bool,
) -> io::Result<bool> {
    writeln!(out, "{}", "The section .debug_info contains:".heading())?;
    writeln!(out)?;

    let mut ok = true;
    for unit in session.units() {
        match unit {
            Ok(unit) => dump_unit(out, &unit)?,
            Err(err) => {
                warn_to(&mut *diagnostics, &err.to_string())?;
                ok = false;
            }
        }
    }

    if explain {
        explain_unit(out)?;
    }
    Ok(ok)
}

fn dump_unit(out: &mut impl Write, unit: &CompilationUnit) -> io::Result<()> {
    let header = &unit.header;
    writeln!(out, "  Compilation Unit @ offset 0x{:x}:", header.offset)?;
    writeln!(out, "   Length:        {}", header.length)?;
    writeln!(out, "   Version:       {}", header.version)?;
    writeln!(out, "   Abbrev Offset: {}", header.abbrev_offset)?;
    writeln!(out, "   Pointer Size:  {}", header.address_size)?;

    for die in unit.dies.iter() {
        let decl = unit.decl(die);
        writeln!(
            out,
            " <{}><{:x}>: Abbrev Number: {} ({})",
            die.depth, die.offset, decl.code, decl.tag
        )?;
        for value in die.attrs.iter() {
            let name = value.spec.name.to_string();
            writeln!(out, "     {name:<18}: {}", interpret(value, header.offset))?;
        }
    }
    Ok(())
}

fn explain_unit(mut out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    explain(
        &mut out,
        "Length",
        "size of the unit in bytes, not counting the length field.",
    )?;
    explain(&mut out, "Version", "DWARF version the unit was written with.")?;
    explain(
        &mut out,
        "Abbrev Offset",
        "offset of the unit's abbreviation table within .debug_abbrev.",
    )?;
    explain(&mut out, "Pointer Size", "size of a target address in bytes.")?;
    explain(
        &mut out,
        "<depth><offset>",
        "nesting level of the entry and its offset within .debug_info. References use these offsets.",
    )
}
