// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scalar field encoding.
//!
//! | Tag       | Wire                                  |
//! |-----------|---------------------------------------|
//! | `int32`   | 4 bytes, little-endian                |
//! | `int64`   | 8 bytes, little-endian                |
//! | `float64` | 8 bytes, IEEE-754 little-endian       |
//! | `bool`    | 1 byte, `0` or `1`                    |
//! | `string`  | `u32` length + UTF-8 bytes            |
//! | `bytes`   | `u32` length + raw bytes              |

use crate::config::CodecConfig;
use crate::container::{ContainerReader, ContainerWriter};
use crate::error::{CorruptData, Error, Result};
use crate::schema::FieldType;
use crate::value::Value;

/// Append a scalar `value` of type `ty`.
pub fn encode_scalar(
    ty: &FieldType,
    value: &Value,
    config: &CodecConfig,
    out: &mut ContainerWriter,
) -> Result<()> {
    match (ty, value) {
        (FieldType::Int32, Value::Int32(v)) => out.write_i32(*v),
        (FieldType::Int64, Value::Int64(v)) => out.write_i64(*v),
        (FieldType::Float64, Value::Float64(v)) => out.write_f64(*v),
        (FieldType::Bool, Value::Bool(v)) => out.write_bool(*v),
        (FieldType::String, Value::String(s)) => {
            check_blob(s.len(), config)?;
            out.write_str(s)?;
        }
        (FieldType::Bytes, Value::Bytes(b)) => {
            check_blob(b.len(), config)?;
            out.write_blob(b)?;
        }
        _ => return Err(Error::mismatch(ty.to_string(), value.kind())),
    }
    Ok(())
}

/// Read a scalar of type `ty`.
pub fn decode_scalar(
    ty: &FieldType,
    config: &CodecConfig,
    input: &mut ContainerReader<'_>,
) -> Result<Value> {
    let value = match ty {
        FieldType::Int32 => Value::Int32(input.read_i32()?),
        FieldType::Int64 => Value::Int64(input.read_i64()?),
        FieldType::Float64 => Value::Float64(input.read_f64()?),
        FieldType::Bool => Value::Bool(input.read_bool()?),
        FieldType::String => {
            let offset = input.offset();
            let raw = read_blob(input, config)?;
            let s = std::str::from_utf8(raw).map_err(|_| CorruptData::InvalidUtf8 { offset })?;
            Value::String(s.to_owned())
        }
        FieldType::Bytes => Value::Bytes(read_blob(input, config)?.to_vec()),
        other => return Err(Error::mismatch("scalar", other.to_string())),
    };
    Ok(value)
}

// Limit checked before the payload is touched.
fn read_blob<'a>(input: &mut ContainerReader<'a>, config: &CodecConfig) -> Result<&'a [u8]> {
    let len = input.read_len()?;
    check_blob(len, config)?;
    input.read_raw(len)
}

fn check_blob(len: usize, config: &CodecConfig) -> Result<()> {
    if len > config.max_blob_len {
        return Err(CorruptData::LimitExceeded {
            what: "blob",
            len,
            max: config.max_blob_len,
        }
        .into());
    }
    Ok(())
}
