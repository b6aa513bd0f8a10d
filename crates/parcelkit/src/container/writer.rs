// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Append-only container writer.

use super::Container;
use crate::config::{
    BOOL_FALSE, BOOL_TRUE, LENGTH_PREFIX_SIZE, PRESENCE_ABSENT, PRESENCE_PRESENT,
};
use crate::error::{CorruptData, Result};

/// Generate little-endian append methods for fixed-width primitives.
macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) {
            self.buffer.extend_from_slice(&value.to_le_bytes());
        }
    };
}

/// Append-only byte buffer.
///
/// There is no seek or patch operation: nested structures are produced by
/// recursive composition only. Growth is delegated to `Vec`, which doubles
/// its capacity, so appends are amortized O(1).
#[derive(Debug, Default)]
pub struct ContainerWriter {
    buffer: Vec<u8>,
}

impl ContainerWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn finish(self) -> Container {
        Container::from_bytes(self.buffer)
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    impl_write_le!(write_u32, u32);
    impl_write_le!(write_i32, i32);
    impl_write_le!(write_i64, i64);
    impl_write_le!(write_f64, f64);

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(if value { BOOL_TRUE } else { BOOL_FALSE });
    }

    /// Presence flag preceding a nullable field.
    pub fn write_presence(&mut self, present: bool) {
        self.write_u8(if present {
            PRESENCE_PRESENT
        } else {
            PRESENCE_ABSENT
        });
    }

    /// 4-byte length prefix or element count.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        let prefix: [u8; LENGTH_PREFIX_SIZE] = u32::try_from(len)
            .map_err(|_| CorruptData::LengthOverflow { len })?
            .to_le_bytes();
        self.buffer.extend_from_slice(&prefix);
        Ok(())
    }

    /// Length-prefixed byte array.
    pub fn write_blob(&mut self, data: &[u8]) -> Result<()> {
        self.write_len(data.len())?;
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Length-prefixed UTF-8 string.
    pub fn write_str(&mut self, value: &str) -> Result<()> {
        self.write_blob(value.as_bytes())
    }

    /// Raw bytes with no prefix (converters that manage their own framing).
    pub fn write_raw(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }
}
