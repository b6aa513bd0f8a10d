// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursive record walk.
//!
//! For each record type the walk first asks the converter registry; a bound
//! converter handles the whole value. Otherwise fields are written in ordinal
//! order:
//!
//! ```text
//! nullable field   : presence (u8 0|1) [value]
//! nested           : fields of the nested record, recursively
//! list / set       : count (u32) element*
//! map              : count (u32) (key value)*
//! scalar           : see codec::field
//! ```
//!
//! Nothing is ever patched after it is written, so the writer stays
//! append-only. Decoding mirrors encoding step for step.

use super::field::{decode_scalar, encode_scalar};
use super::Codec;
use crate::config::CodecConfig;
use crate::container::{ContainerReader, ContainerWriter};
use crate::error::{ConverterError, CorruptData, Error, Result};
use crate::schema::{FieldType, TypeId, TypeSchema};
use crate::value::{Record, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Encode `value` as an instance of `type_id`.
pub(crate) fn encode_record(
    codec: &Codec,
    type_id: TypeId,
    value: &Value,
    out: &mut ContainerWriter,
    depth: usize,
) -> Result<()> {
    if let Some(converter) = codec.converters().get(type_id) {
        descend(codec.config(), depth)?;
        log::trace!("[Codec] encode {} via converter", type_id);
        return converter
            .encode(value, out)
            .map_err(|e| converter_failure(type_id, e));
    }
    match value {
        Value::Record(record) => encode_fields(codec, type_id, record, out, depth),
        other => Err(Error::mismatch(codec.schema(type_id)?.name(), other.kind())),
    }
}

/// Structural encoding of `record`, bypassing converter lookup.
pub(crate) fn encode_fields(
    codec: &Codec,
    type_id: TypeId,
    record: &Record,
    out: &mut ContainerWriter,
    depth: usize,
) -> Result<()> {
    let depth = descend(codec.config(), depth)?;
    let schema = codec.schema(type_id)?;
    check_shape(&schema, record)?;

    for (field, value) in schema.fields().iter().zip(record.values()) {
        if field.nullable {
            out.write_presence(!value.is_null());
            if value.is_null() {
                continue;
            }
        } else if value.is_null() {
            return Err(Error::mismatch(
                format!("{}.{}: {}", schema.name(), field.name, field.field_type),
                "null",
            ));
        }
        encode_field(codec, &field.field_type, value, out, depth)?;
    }
    Ok(())
}

fn encode_field(
    codec: &Codec,
    ty: &FieldType,
    value: &Value,
    out: &mut ContainerWriter,
    depth: usize,
) -> Result<()> {
    match (ty, value) {
        (FieldType::Nested(type_ref), _) => encode_record(codec, type_ref.id(), value, out, depth),
        (FieldType::List(element), Value::List(items)) => {
            write_count(codec.config(), items.len(), out)?;
            for item in items {
                encode_element(codec, element, item, out, depth)?;
            }
            Ok(())
        }
        (FieldType::Set(element), Value::Set(items)) => {
            write_count(codec.config(), items.len(), out)?;
            for item in items {
                encode_element(codec, element, item, out, depth)?;
            }
            Ok(())
        }
        (FieldType::Map(key_type, value_type), Value::Map(entries)) => {
            write_count(codec.config(), entries.len(), out)?;
            for (key, value) in entries {
                encode_element(codec, key_type, key, out, depth)?;
                encode_element(codec, value_type, value, out, depth)?;
            }
            Ok(())
        }
        (FieldType::List(_) | FieldType::Set(_) | FieldType::Map(_, _), _) => {
            Err(Error::mismatch(ty.to_string(), value.kind()))
        }
        _ => encode_scalar(ty, value, codec.config(), out),
    }
}

// Collection elements carry no presence byte.
fn encode_element(
    codec: &Codec,
    ty: &FieldType,
    value: &Value,
    out: &mut ContainerWriter,
    depth: usize,
) -> Result<()> {
    if value.is_null() {
        return Err(Error::mismatch(ty.to_string(), "null"));
    }
    encode_field(codec, ty, value, out, depth)
}

/// Decode one instance of `type_id`.
pub(crate) fn decode_record(
    codec: &Codec,
    type_id: TypeId,
    input: &mut ContainerReader<'_>,
    depth: usize,
) -> Result<Value> {
    let depth = descend(codec.config(), depth)?;
    if let Some(converter) = codec.converters().get(type_id) {
        log::trace!("[Codec] decode {} via converter", type_id);
        return converter
            .decode(input)
            .map_err(|e| converter_failure(type_id, e));
    }

    let schema = codec.schema(type_id)?;
    let mut values = Vec::with_capacity(schema.len());
    for field in schema.fields() {
        if field.nullable && !input.read_presence()? {
            values.push(Value::Null);
            continue;
        }
        values.push(decode_field(codec, &field.field_type, input, depth)?);
    }
    Ok(Value::Record(Record::new(type_id, values)))
}

fn decode_field(
    codec: &Codec,
    ty: &FieldType,
    input: &mut ContainerReader<'_>,
    depth: usize,
) -> Result<Value> {
    match ty {
        FieldType::Nested(type_ref) => decode_record(codec, type_ref.id(), input, depth),
        FieldType::List(element) => {
            let count = read_count(codec.config(), input)?;
            // A hostile count cannot reserve more than the bytes left.
            let mut items = Vec::with_capacity(count.min(input.remaining()));
            for _ in 0..count {
                items.push(decode_field(codec, element, input, depth)?);
            }
            Ok(Value::List(items))
        }
        FieldType::Set(element) => {
            let count = read_count(codec.config(), input)?;
            let mut items = BTreeSet::new();
            for _ in 0..count {
                items.insert(decode_field(codec, element, input, depth)?);
            }
            Ok(Value::Set(items))
        }
        FieldType::Map(key_type, value_type) => {
            let count = read_count(codec.config(), input)?;
            let mut entries = BTreeMap::new();
            for _ in 0..count {
                let key = decode_field(codec, key_type, input, depth)?;
                let value = decode_field(codec, value_type, input, depth)?;
                // Later duplicate wins.
                entries.insert(key, value);
            }
            Ok(Value::Map(entries))
        }
        _ => decode_scalar(ty, codec.config(), input),
    }
}

fn descend(config: &CodecConfig, depth: usize) -> Result<usize> {
    let depth = depth + 1;
    if depth > config.max_depth {
        return Err(CorruptData::DepthExceeded {
            max: config.max_depth,
        }
        .into());
    }
    Ok(depth)
}

fn check_shape(schema: &TypeSchema, record: &Record) -> Result<()> {
    if record.type_id() != schema.type_id() {
        return Err(Error::mismatch(
            schema.name(),
            format!("record {}", record.type_id()),
        ));
    }
    if record.len() != schema.len() {
        return Err(Error::mismatch(
            format!("{} with {} fields", schema.name(), schema.len()),
            format!("{} values", record.len()),
        ));
    }
    Ok(())
}

fn write_count(config: &CodecConfig, count: usize, out: &mut ContainerWriter) -> Result<()> {
    check_count(config, count)?;
    out.write_len(count)
}

fn read_count(config: &CodecConfig, input: &mut ContainerReader<'_>) -> Result<usize> {
    let count = input.read_len()?;
    check_count(config, count)?;
    Ok(count)
}

fn check_count(config: &CodecConfig, count: usize) -> Result<()> {
    if count > config.max_collection_len {
        return Err(CorruptData::LimitExceeded {
            what: "collection",
            len: count,
            max: config.max_collection_len,
        }
        .into());
    }
    Ok(())
}

fn converter_failure(type_id: TypeId, err: Error) -> Error {
    match err {
        Error::CorruptData(_) | Error::Converter { .. } => err,
        other => Error::Converter {
            type_id,
            source: ConverterError::Failed {
                reason: other.to_string(),
            },
        },
    }
}
