//! This module contains support for the DWARF debugging info encoded into ELF files.
//! It's encoded into ".debug_FOO" sections. We handle ".debug_abbrev", ".debug_info",
//! and ".debug_str" which are documented here: https://dwarfstd.org/doc/DWARF4.pdf.
//! The readelf source code is also useful and can be found at
//! https://github.com/bminor/binutils-gdb/tree/master/binutils.
//!
//! Only 32-bit DWARF versions 2 through 4 are supported.
pub mod abbrev;
pub mod constants;
pub mod error;
pub mod info;
pub mod interpret;
pub mod session;
pub mod values;

pub use abbrev::*;
pub use constants::*;
pub use error::*;
pub use info::*;
pub use interpret::*;
pub use session::*;
pub use values::*;

use crate::elf::Stream;

/// Unsigned LEB128. Returns the value and the number of bytes it used.
pub fn decode_u64(stream: &mut Stream) -> Result<(u64, usize), Malformed> {
    let start = stream.offset;
    let mut result = 0;
    let mut shift = 0u32;
    loop {
        let byte = stream.read_byte()?;
        let bits = (byte & 0x7f) as u64;
        if shift >= 64 || (shift > 0 && bits > (u64::MAX >> shift)) {
            // Zero padding past 64 bits is legal, anything else isn't.
            if bits != 0 {
                return Err(Malformed::Leb128Overflow(start));
            }
        } else {
            result |= bits << shift;
        }
        if byte & 0x80 == 0 {
            break;
        }
        shift = (shift + 7).min(64);
    }
    Ok((result, stream.offset - start))
}

/// Signed LEB128.
pub fn decode_i64(stream: &mut Stream) -> Result<i64, Malformed> {
    let start = stream.offset;
    let mut result = 0i64;
    let mut shift = 0u32;
    loop {
        let byte = stream.read_byte()?;
        if shift >= 64 {
            // Past 64 bits only sign extension is allowed.
            let extension = if result < 0 { 0x7f } else { 0 };
            if byte & 0x7f != extension {
                return Err(Malformed::Leb128Overflow(start));
            }
        } else {
            result |= ((byte & 0x7f) as i64) << shift;
        }
        shift = (shift + 7).min(64);
        if byte & 0x80 == 0 {
            if shift < 64 && byte & 0x40 != 0 {
                result |= !0i64 << shift;
            }
            break;
        }
    }
    Ok(result)
}
