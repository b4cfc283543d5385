use thiserror::Error;

/// A read that would go past the end of the bytes being read.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("{size} byte read at offset 0x{offset:x} runs past the end (0x{len:x})")]
pub struct OutOfBounds {
    pub offset: usize,
    pub size: usize,
    pub len: usize,
}

/// Read-only view of an ELF file (or one of its sections). All reads are bounds
/// checked: files are frequently truncated or otherwise damaged and we never want to
/// touch bytes past the end.
#[derive(Clone, Copy)]
pub struct Reader<'a> {
    pub little_endian: bool,
    pub sixty_four_bit: bool,
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8], little_endian: bool, sixty_four_bit: bool) -> Self {
        Reader {
            little_endian,
            sixty_four_bit,
            bytes,
        }
    }

    /// Returns a reader with the same encoding over different bytes, typically a
    /// section of the file this reader covers.
    pub fn with_bytes(&self, bytes: &'a [u8]) -> Self {
        Reader {
            bytes,
            ..*self
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn slice(&self, offset: usize, size: usize) -> Result<&'a [u8], OutOfBounds> {
        let err = OutOfBounds {
            offset,
            size,
            len: self.bytes.len(),
        };
        let end = offset.checked_add(size).ok_or(err)?;
        self.bytes.get(offset..end).ok_or(err)
    }

    pub fn read_byte(&self, offset: usize) -> Result<u8, OutOfBounds> {
        Ok(self.array::<1>(offset)?[0])
    }

    pub fn read_half(&self, offset: usize) -> Result<u16, OutOfBounds> {
        let bytes = self.array(offset)?;
        if self.little_endian {
            Ok(u16::from_le_bytes(bytes))
        } else {
            Ok(u16::from_be_bytes(bytes))
        }
    }

    pub fn read_word(&self, offset: usize) -> Result<u32, OutOfBounds> {
        let bytes = self.array(offset)?;
        if self.little_endian {
            Ok(u32::from_le_bytes(bytes))
        } else {
            Ok(u32::from_be_bytes(bytes))
        }
    }

    pub fn read_xword(&self, offset: usize) -> Result<u64, OutOfBounds> {
        let bytes = self.array(offset)?;
        if self.little_endian {
            Ok(u64::from_le_bytes(bytes))
        } else {
            Ok(u64::from_be_bytes(bytes))
        }
    }

    /// Read either a u32 or u64 word depending on whether the file is 64-bit.
    /// But, for sanity, always return the result as 64 bits.
    pub fn read_addr(&self, offset: usize) -> Result<u64, OutOfBounds> {
        if self.sixty_four_bit {
            self.read_xword(offset)
        } else {
            Ok(self.read_word(offset)? as u64)
        }
    }

    fn array<const N: usize>(&self, offset: usize) -> Result<[u8; N], OutOfBounds> {
        let mut result = [0; N];
        result.copy_from_slice(self.slice(offset, N)?);
        Ok(result)
    }
}

/// Cursor over a Reader. Offsets are relative to the start of the reader's bytes.
#[derive(Clone, Copy)]
pub struct Stream<'a> {
    pub reader: Reader<'a>,
    pub offset: usize,
}

impl<'a> Stream<'a> {
    pub fn new(reader: Reader<'a>, offset: usize) -> Self {
        Stream { reader, offset }
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.reader.len()
    }

    pub fn read_byte(&mut self) -> Result<u8, OutOfBounds> {
        let byte = self.reader.read_byte(self.offset)?;
        self.offset += 1;
        Ok(byte)
    }

    pub fn read_half(&mut self) -> Result<u16, OutOfBounds> {
        let half = self.reader.read_half(self.offset)?;
        self.offset += 2;
        Ok(half)
    }

    pub fn read_word(&mut self) -> Result<u32, OutOfBounds> {
        let word = self.reader.read_word(self.offset)?;
        self.offset += 4;
        Ok(word)
    }

    pub fn read_xword(&mut self) -> Result<u64, OutOfBounds> {
        let xword = self.reader.read_xword(self.offset)?;
        self.offset += 8;
        Ok(xword)
    }

    /// Elf32_Addr/Elf64_Addr and Elf32_Off/Elf64_Off.
    pub fn read_addr(&mut self) -> Result<u64, OutOfBounds> {
        let addr = self.reader.read_addr(self.offset)?;
        self.offset += if self.reader.sixty_four_bit { 8 } else { 4 };
        Ok(addr)
    }

    /// Elf32_Word/Elf64_Xword, i.e. a word that widens on 64-bit files.
    pub fn read_wide_word(&mut self) -> Result<u64, OutOfBounds> {
        self.read_addr()
    }

    pub fn read_bytes(&mut self, size: usize) -> Result<&'a [u8], OutOfBounds> {
        let bytes = self.reader.slice(self.offset, size)?;
        self.offset += size;
        Ok(bytes)
    }

    /// Read a null-terminated string, returning the bytes without the terminator.
    pub fn read_string(&mut self) -> Result<&'a [u8], OutOfBounds> {
        let rest = self.reader.bytes().get(self.offset..).unwrap_or_default();
        match rest.iter().position(|&b| b == 0) {
            Some(n) => {
                let s = &rest[..n];
                self.offset += n + 1;
                Ok(s)
            }
            None => Err(OutOfBounds {
                offset: self.offset,
                size: rest.len() + 1,
                len: self.reader.len(),
            }),
        }
    }
}
