// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Append-only write buffer and sequential read cursor.
//!
//! A container holds fields in strict schema order with no embedded schema
//! or version. Bytes written by [`ContainerWriter`] must be consumed by a
//! [`ContainerReader`] in the same order.

mod reader;
mod writer;

pub use reader::ContainerReader;
pub use writer::ContainerWriter;

/// Encoded bytes produced by one encode call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    bytes: Vec<u8>,
}

impl Container {
    /// Wrap bytes received from elsewhere (transport, storage).
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Fresh read cursor positioned at the first byte.
    pub fn reader(&self) -> ContainerReader<'_> {
        ContainerReader::new(&self.bytes)
    }
}

impl AsRef<[u8]> for Container {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Container> for Vec<u8> {
    fn from(container: Container) -> Self {
        container.bytes
    }
}
