/// Index into a string table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct StringIndex(pub u32);

/// An index into a byte within an ELF file.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Offset(pub u64);

/// A range of bytes within an ELF file. These come straight from headers so nothing
/// about them can be trusted until `within` has been checked.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Bytes {
    pub start: Offset,
    pub size: u64,
}

impl Bytes {
    pub fn from_raw(start: u64, size: u64) -> Self {
        Bytes {
            start: Offset(start),
            size,
        }
    }

    /// Returns true if every byte in the range is inside a file of `file_size` bytes.
    /// Written so that it cannot overflow for any start and size.
    pub fn within(&self, file_size: u64) -> bool {
        self.start.0 <= file_size && self.size <= file_size - self.start.0
    }
}
