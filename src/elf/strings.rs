use super::StringIndex;

/// A string table section: null terminated strings packed together. Used for section
/// names and for .debug_str. Indexes may point into the middle of a string.
#[derive(Clone, Copy, Debug)]
pub struct StringTable<'a> {
    bytes: &'a [u8],
}

impl<'a> StringTable<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        StringTable { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the string starting at index, without its terminator. None if index is
    /// outside the table or the string runs off the end of the table.
    pub fn get(&self, index: StringIndex) -> Option<&'a [u8]> {
        let rest = self.bytes.get(index.0 as usize..)?;
        let n = rest.iter().position(|&b| b == 0)?;
        Some(&rest[..n])
    }

    /// True if the string at index is exactly name. ".debug_str" does not match
    /// ".debug_str_offsets".
    pub fn matches(&self, index: StringIndex, name: &str) -> bool {
        self.get(index) == Some(name.as_bytes())
    }

    /// Every string in the table along with its offset. A trailing string without a
    /// terminator is included.
    pub fn strings(&self) -> Strings<'a> {
        Strings {
            bytes: self.bytes,
            offset: 0,
        }
    }
}

pub struct Strings<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Iterator for Strings<'a> {
    type Item = (usize, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.bytes.get(self.offset..).filter(|r| !r.is_empty())?;
        let start = self.offset;
        match rest.iter().position(|&b| b == 0) {
            Some(n) => {
                self.offset += n + 1;
                Some((start, &rest[..n]))
            }
            None => {
                self.offset = self.bytes.len();
                Some((start, rest))
            }
        }
    }
}
