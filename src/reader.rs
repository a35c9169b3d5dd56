use crate::error::{PpkError, Result};

/// Reads SSH wire-format values out of an immutable byte slice with a
/// mutable cursor. Every read is bounds-checked against the slice and
/// against a configured maximum field size.
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
    max_field_size: u32,
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8], max_field_size: u32) -> Self {
        WireReader {
            data,
            pos: 0,
            max_field_size,
        }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads a raw big-endian u32.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        let bytes = self.read_raw(4)?;
        Ok(u32::from_be_bytes(bytes.try_into().unwrap()))
    }

    /// Reads an SSH wire string: u32 length prefix then that many raw bytes.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u32_be()?;
        if len > self.max_field_size {
            return Err(PpkError::FieldTooLarge {
                limit: self.max_field_size,
                actual: len,
            });
        }
        Ok(self.read_raw(len as usize)?.to_vec())
    }

    /// Reads an SSH wire string and interprets it as UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|_| PpkError::BufferUnderrun)
    }

    /// Reads exactly `n` raw bytes without any length prefix.
    pub fn read_raw(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(PpkError::BufferUnderrun);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads an SSH mpint and returns its unsigned big-endian magnitude,
    /// with the sign-extension `0x00` byte (if any) stripped. Every mpint
    /// this crate ever decodes (RSA/DSA/ECDSA key material) is non-negative.
    pub fn read_mpint_unsigned(&mut self) -> Result<Vec<u8>> {
        let mut bytes = self.read_bytes()?;
        if bytes.first() == Some(&0) {
            bytes.remove(0);
        }
        Ok(bytes)
    }
}
