// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy shared by the registries and the codec.
//!
//! Decode failures are permanent: a container that fails to decode once will
//! fail again, so nothing in this crate retries. Registration failures are
//! meant to surface at startup, before any container is produced.

use crate::schema::TypeId;
use std::fmt;

/// Malformed or truncated container content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorruptData {
    /// Read past the end of the container.
    BufferUnderrun {
        offset: usize,
        need: usize,
        have: usize,
    },
    /// Boolean byte other than 0 or 1.
    InvalidBool { offset: usize, byte: u8 },
    /// Presence flag other than 0 or 1.
    InvalidPresence { offset: usize, byte: u8 },
    /// String payload is not valid UTF-8.
    InvalidUtf8 { offset: usize },
    /// Length does not fit the 4-byte prefix.
    LengthOverflow { len: usize },
    /// Length or count above the configured limit.
    LimitExceeded {
        what: &'static str,
        len: usize,
        max: usize,
    },
    /// Record nesting deeper than the configured limit.
    DepthExceeded { max: usize },
    /// Value shape does not match the schema tag.
    TypeMismatch { expected: String, found: String },
    /// Bytes left over after a top-level record.
    TrailingBytes { offset: usize, remaining: usize },
}

impl fmt::Display for CorruptData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferUnderrun { offset, need, have } => write!(
                f,
                "buffer underrun at offset {}: need {} bytes, have {}",
                offset, need, have
            ),
            Self::InvalidBool { offset, byte } => {
                write!(f, "invalid boolean byte 0x{:02x} at offset {}", byte, offset)
            }
            Self::InvalidPresence { offset, byte } => {
                write!(f, "invalid presence flag 0x{:02x} at offset {}", byte, offset)
            }
            Self::InvalidUtf8 { offset } => {
                write!(f, "invalid UTF-8 in string at offset {}", offset)
            }
            Self::LengthOverflow { len } => {
                write!(f, "length {} does not fit a 4-byte prefix", len)
            }
            Self::LimitExceeded { what, len, max } => {
                write!(f, "{} length {} exceeds limit {}", what, len, max)
            }
            Self::DepthExceeded { max } => write!(f, "record nesting exceeds depth {}", max),
            Self::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {}, found {}", expected, found)
            }
            Self::TrailingBytes { offset, remaining } => write!(
                f,
                "{} trailing bytes after record at offset {}",
                remaining, offset
            ),
        }
    }
}

/// A custom converter broke its contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConverterError {
    /// Converter returned an error on a value it is bound to.
    Failed { reason: String },
    /// Decoding an encoded sample did not reproduce it.
    RoundTrip { sample: usize, reason: String },
    /// Decoding an encoded sample left bytes unread or read too far.
    PartialRead {
        sample: usize,
        written: usize,
        consumed: usize,
    },
}

impl fmt::Display for ConverterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { reason } => write!(f, "converter failed: {}", reason),
            Self::RoundTrip { sample, reason } => {
                write!(f, "round trip broken for sample {}: {}", sample, reason)
            }
            Self::PartialRead {
                sample,
                written,
                consumed,
            } => write!(
                f,
                "sample {} wrote {} bytes but decode consumed {}",
                sample, written, consumed
            ),
        }
    }
}

impl std::error::Error for ConverterError {}

/// Errors produced by parcelkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No schema, converter or factory is known for this type.
    UnknownType(TypeId),
    /// Record schema has no field with this name.
    UnknownField { type_name: String, field: String },
    /// Reference cycle with no nullable or collection edge to defer it.
    CyclicSchema { path: Vec<String> },
    /// Conflicting re-registration of a schema, converter or factory.
    DuplicateRegistration {
        type_id: TypeId,
        what: &'static str,
    },
    /// Definition rejected before compilation.
    InvalidSchema { type_name: String, reason: String },
    /// Malformed container or value/schema mismatch.
    CorruptData(CorruptData),
    /// Custom converter violated totality or the round-trip law.
    Converter {
        type_id: TypeId,
        source: ConverterError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType(id) => write!(f, "unknown type {}", id),
            Self::UnknownField { type_name, field } => {
                write!(f, "type {} has no field '{}'", type_name, field)
            }
            Self::CyclicSchema { path } => {
                write!(f, "cyclic schema without deferral: {}", path.join(" -> "))
            }
            Self::DuplicateRegistration { type_id, what } => {
                write!(f, "conflicting {} registration for type {}", what, type_id)
            }
            Self::InvalidSchema { type_name, reason } => {
                write!(f, "invalid schema '{}': {}", type_name, reason)
            }
            Self::CorruptData(e) => write!(f, "corrupt data: {}", e),
            Self::Converter { type_id, source } => {
                write!(f, "converter for type {}: {}", type_id, source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Converter { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CorruptData> for Error {
    fn from(e: CorruptData) -> Self {
        Self::CorruptData(e)
    }
}

impl Error {
    /// Shorthand for a value/schema shape mismatch.
    pub fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::CorruptData(CorruptData::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        })
    }

    /// Returns `true` for any `CorruptData` failure.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, Self::CorruptData(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
