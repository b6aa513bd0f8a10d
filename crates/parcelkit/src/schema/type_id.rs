// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Stable record type identifiers.

use md5::{Digest, Md5};

/// Identifier shared by the schema, converter and factory registries.
///
/// Derived from the record's type name with MD5 (truncated to 14 bytes), so
/// two processes that agree on a name agree on the identifier without
/// exchanging anything else.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId([u8; 14]);

impl TypeId {
    /// Identifier for the record named `name`.
    pub fn from_type_name(name: &str) -> Self {
        let digest = Md5::digest(name.as_bytes());
        let mut id = [0u8; 14];
        id.copy_from_slice(&digest[..14]);
        Self(id)
    }

    /// Rebuild an identifier from the bytes returned by [`as_bytes`](Self::as_bytes).
    pub const fn from_bytes(id: [u8; 14]) -> Self {
        Self(id)
    }

    pub const fn as_bytes(&self) -> &[u8; 14] {
        &self.0
    }
}

/// Lowercase hex rendering of a byte slice.
struct Hex<'a>(&'a [u8]);

impl std::fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|byte| write!(f, "{:02x}", byte))
    }
}

// Debug keeps log lines short; Display is the full identifier.
impl std::fmt::Debug for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeId({}...)", Hex(&self.0[..4]))
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Hex(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id_from_name() {
        let id1 = TypeId::from_type_name("Point");
        let id2 = TypeId::from_type_name("Point");
        let id3 = TypeId::from_type_name("Node");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_type_id_bytes_roundtrip() {
        let id = TypeId::from_type_name("Point");
        assert_eq!(TypeId::from_bytes(*id.as_bytes()), id);
    }

    #[test]
    fn test_type_id_display_is_full_hex() {
        let id = TypeId::from_bytes([0xAB; 14]);
        assert_eq!(id.to_string(), "ab".repeat(14));
        assert_eq!(format!("{:?}", id), "TypeId(abababab...)");
    }
}
