//! Generic ELF file support: just enough to validate a file and find the bytes of
//! its named sections. Nothing here knows about DWARF.
//! Quick ELF reference: https://gist.github.com/x0nu11byt3/bcb35c3de461e5fb66173071a2379779
//!
//! ELF files start with an ELF header which includes:
//! * A magic number to identify the file as an ELF file.
//! * The word size and byte order used by the rest of the file.
//! * The offset to and number of section headers.
//! * The index of the section whose bytes hold the section names.
//!
//! Section headers have name, type, offset, size, link, etc. Every offset and size
//! read from the file is checked against the file size before any bytes are touched.
pub mod elf_file;
pub mod error;
pub mod header;
pub mod io;
pub mod primitives;
pub mod sections;
pub mod strings;

pub use elf_file::*;
pub use error::*;
pub use header::*;
pub use io::*;
pub use primitives::*;
pub use sections::*;
pub use strings::*;
