//! The dumps that can be requested from the command line, e.g. `-i` for .debug_info.
pub mod abbrev;
pub mod info;
pub mod sections;
pub mod strings;
pub mod tables;

pub use abbrev::*;
pub use info::*;
pub use sections::*;
pub use strings::*;

use crate::debug::Session;
use crate::elf::{ElfError, ElfFile, StringTable, validate};
use crate::utils::warn_to;
use std::io::{self, Write};
use tracing::debug;

const DEBUG_ABBREV: &str = ".debug_abbrev";
const DEBUG_INFO: &str = ".debug_info";
const DEBUG_STR: &str = ".debug_str";

/// Which dumps to print and how tables are presented.
#[derive(Clone, Copy, Debug, Default)]
pub struct DumpOptions {
    pub abbrev: bool,
    pub info: bool,
    pub strings: bool,
    pub sections: bool,
    pub titles: bool,
    pub explain: bool,
}

impl DumpOptions {
    fn wants_debug(&self) -> bool {
        self.abbrev || self.info || self.strings
    }
}

/// Dumps one ELF image. Problems with the image are written to diagnostics and
/// result in false. Files that aren't ELF are skipped without a diagnostic.
pub fn dump_image(
    out: &mut impl Write,
    diagnostics: &mut impl Write,
    bytes: &[u8],
    options: &DumpOptions,
) -> io::Result<bool> {
    if !validate(bytes) {
        // Loading the file again gives the reason.
        let err = ElfFile::new(bytes).err().unwrap_or(ElfError::NotElf);
        if err == ElfError::NotElf {
            debug!("skipping file without an ELF header");
        } else {
            warn_to(&mut *diagnostics, &err.to_string())?;
        }
        return Ok(false);
    }
    let file = match ElfFile::new(bytes) {
        Ok(file) => file,
        Err(err) => {
            warn_to(&mut *diagnostics, &err.to_string())?;
            return Ok(false);
        }
    };
    let names = match file.section_name_string_table() {
        Ok(names) => names,
        Err(err) => {
            warn_to(&mut *diagnostics, &err.to_string())?;
            return Ok(false);
        }
    };

    let mut separate = false;
    if options.sections {
        dump_sections(out, &file, &names, options)?;
        separate = true;
    }
    if !options.wants_debug() {
        return Ok(true);
    }

    let (debug_abbrev, debug_info) = match required_sections(&file, &names) {
        Ok(sections) => sections,
        Err(err) => {
            warn_to(&mut *diagnostics, &err.to_string())?;
            return Ok(false);
        }
    };
    let mut ok = true;
    let debug_str = match file.find_section_bytes(DEBUG_STR, &names) {
        Ok(Some(bytes)) => Some(bytes),
        Ok(None) => {
            let err = ElfError::SectionNotFound(DEBUG_STR);
            warn_to(&mut *diagnostics, &err.to_string())?;
            None
        }
        Err(err) => {
            warn_to(&mut *diagnostics, &err.to_string())?;
            ok = false;
            None
        }
    };
    let session = Session::new(file.reader, debug_abbrev, debug_info, debug_str);

    if options.abbrev {
        if separate {
            writeln!(out)?;
        }
        ok &= dump_abbrevs(out, diagnostics, &session)?;
        separate = true;
    }
    if options.info {
        if separate {
            writeln!(out)?;
        }
        ok &= dump_info(out, diagnostics, &session, options.explain)?;
        separate = true;
    }
    if options.strings {
        if let Some(strings) = session.debug_str.as_ref() {
            if separate {
                writeln!(out)?;
            }
            dump_strings(out, strings, options)?;
        }
    }
    Ok(ok)
}

fn required_sections<'a>(
    file: &ElfFile<'a>,
    names: &StringTable,
) -> Result<(&'a [u8], &'a [u8]), ElfError> {
    let abbrev = file
        .find_section_bytes(DEBUG_ABBREV, names)?
        .ok_or(ElfError::SectionNotFound(DEBUG_ABBREV))?;
    let info = file
        .find_section_bytes(DEBUG_INFO, names)?
        .ok_or(ElfError::SectionNotFound(DEBUG_INFO))?;
    Ok((abbrev, info))
}
