use crate::debug::Session;
use crate::utils::{Styling, warn_to};
use std::io::{self, Write};

/// Prints every table in .debug_abbrev. Returns false if a table couldn't be decoded,
/// the reason goes to diagnostics.
pub fn dump_abbrevs(
    out: &mut impl Write,
    diagnostics: &mut impl Write,
    session: &Session,
) -> io::Result<bool> {
    writeln!(out, "{}", "The section .debug_abbrev contains:".heading())?;

    let mut ok = true;
    for table in session.abbreviation_tables() {
        let table = match table {
            Ok(table) => table,
            Err(err) => {
                warn_to(&mut *diagnostics, &err.to_string())?;
                ok = false;
                continue;
            }
        };

        writeln!(out)?;
        writeln!(out, "Abbreviation table @ offset 0x{:x}:", table.offset)?;
        for decl in table.decls.iter() {
            let children = if decl.has_children { "has" } else { "no" };
            writeln!(out, "[{}] {}\t\t[{children} children]", decl.code, decl.tag)?;
            for spec in decl.attrs.iter() {
                writeln!(out, "      {}\t{}", spec.name, spec.form)?;
            }
        }
    }
    Ok(ok)
}
