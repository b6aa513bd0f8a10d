// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sequential container reader.

use crate::config::{
    BOOL_FALSE, BOOL_TRUE, LENGTH_PREFIX_SIZE, PRESENCE_ABSENT, PRESENCE_PRESENT,
};
use crate::error::{CorruptData, Result};

/// Generate little-endian read methods for fixed-width primitives.
///
/// Each generated method checks bounds, reports `BufferUnderrun` with the
/// current offset on overflow, and advances the cursor.
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> Result<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_raw($size)?);
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Bounds-checked, zero-copy read cursor.
#[derive(Debug, Clone)]
pub struct ContainerReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> ContainerReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn has_remaining(&self) -> bool {
        self.offset < self.buffer.len()
    }

    /// Fails with `TrailingBytes` unless every byte was consumed.
    pub fn expect_end(&self) -> Result<()> {
        if self.has_remaining() {
            return Err(CorruptData::TrailingBytes {
                offset: self.offset,
                remaining: self.remaining(),
            }
            .into());
        }
        Ok(())
    }

    /// Next `len` bytes, unprefixed.
    pub fn read_raw(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(CorruptData::BufferUnderrun {
                offset: self.offset,
                need: len,
                have: self.remaining(),
            }
            .into());
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_raw(1)?[0])
    }

    impl_read_le!(read_u32, u32, 4);
    impl_read_le!(read_i32, i32, 4);
    impl_read_le!(read_i64, i64, 8);
    impl_read_le!(read_f64, f64, 8);

    pub fn read_bool(&mut self) -> Result<bool> {
        let offset = self.offset;
        match self.read_u8()? {
            BOOL_FALSE => Ok(false),
            BOOL_TRUE => Ok(true),
            byte => Err(CorruptData::InvalidBool { offset, byte }.into()),
        }
    }

    /// Presence flag preceding a nullable field.
    pub fn read_presence(&mut self) -> Result<bool> {
        let offset = self.offset;
        match self.read_u8()? {
            PRESENCE_ABSENT => Ok(false),
            PRESENCE_PRESENT => Ok(true),
            byte => Err(CorruptData::InvalidPresence { offset, byte }.into()),
        }
    }

    /// 4-byte length prefix or element count.
    pub fn read_len(&mut self) -> Result<usize> {
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        prefix.copy_from_slice(self.read_raw(LENGTH_PREFIX_SIZE)?);
        Ok(u32::from_le_bytes(prefix) as usize)
    }

    /// Length-prefixed byte array.
    pub fn read_blob(&mut self) -> Result<&'a [u8]> {
        let len = self.read_len()?;
        self.read_raw(len)
    }

    /// Length-prefixed UTF-8 string.
    pub fn read_str(&mut self) -> Result<&'a str> {
        let offset = self.offset;
        let bytes = self.read_blob()?;
        std::str::from_utf8(bytes).map_err(|_| CorruptData::InvalidUtf8 { offset }.into())
    }
}
