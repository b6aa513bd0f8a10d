// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire constants and codec limits.
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: wire-format constants. Changing any of them breaks
//!   every container written before the change.
//! - **Level 2 (Per codec)**: [`CodecConfig`], resource limits applied while
//!   walking a schema. Limits are checked on encode and on decode, so any
//!   container a codec writes can be read back by a codec with the same limits.

/// Presence flag written before an absent nullable field.
pub const PRESENCE_ABSENT: u8 = 0;

/// Presence flag written before a present nullable field.
pub const PRESENCE_PRESENT: u8 = 1;

/// Encoded `false`.
pub const BOOL_FALSE: u8 = 0;

/// Encoded `true`.
pub const BOOL_TRUE: u8 = 1;

/// Size of the little-endian length prefix for strings, byte arrays and
/// collection element counts.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Default maximum record nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Default maximum element count of a single list, map or set.
pub const DEFAULT_MAX_COLLECTION_LEN: usize = 1 << 20;

/// Default maximum length of a single string or byte array (64 MiB).
pub const DEFAULT_MAX_BLOB_LEN: usize = 64 * 1024 * 1024;

/// Default initial capacity of a fresh container writer.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Resource limits for one [`Codec`](crate::Codec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Maximum record nesting depth (top-level record is depth 1).
    pub max_depth: usize,
    /// Maximum element count of a list, map or set.
    pub max_collection_len: usize,
    /// Maximum byte length of a string or byte array.
    pub max_blob_len: usize,
    /// Initial capacity of writers created by the codec.
    pub initial_capacity: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_collection_len: DEFAULT_MAX_COLLECTION_LEN,
            max_blob_len: DEFAULT_MAX_BLOB_LEN,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl CodecConfig {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_max_collection_len(mut self, max: usize) -> Self {
        self.max_collection_len = max;
        self
    }

    #[must_use]
    pub fn with_max_blob_len(mut self, max: usize) -> Self {
        self.max_blob_len = max;
        self
    }

    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.max_collection_len, 1 << 20);
        assert_eq!(config.max_blob_len, 64 * 1024 * 1024);
    }

    #[test]
    fn test_builder_setters() {
        let config = CodecConfig::default()
            .with_max_depth(8)
            .with_max_collection_len(16)
            .with_max_blob_len(32)
            .with_initial_capacity(0);
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.max_collection_len, 16);
        assert_eq!(config.max_blob_len, 32);
        assert_eq!(config.initial_capacity, 0);
    }
}
