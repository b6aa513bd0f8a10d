// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-driven encode/decode.
//!
//! [`Codec`] ties a [`SchemaRegistry`], a [`ConverterRegistry`] and a
//! [`CodecConfig`] together. It holds no per-call state, so one codec can
//! serve any number of threads, each working on its own container.
//!
//! # Example
//!
//! ```rust
//! use parcelkit::schema::{FieldType, SchemaBuilder};
//! use parcelkit::value::RecordBuilder;
//! use parcelkit::Codec;
//!
//! let codec = Codec::new();
//! let schema = codec.schemas().compile_schema(
//!     SchemaBuilder::new("Point")
//!         .field("x", FieldType::Int32)
//!         .field("y", FieldType::Int32)
//!         .build(),
//! )?;
//! let point = RecordBuilder::new(&schema).set("x", 3)?.set("y", -4)?.build();
//!
//! let container = codec.encode_record(&point)?;
//! assert_eq!(container.as_bytes(), [0x03, 0, 0, 0, 0xFC, 0xFF, 0xFF, 0xFF]);
//! assert_eq!(codec.decode_record(schema.type_id(), container.as_bytes())?, point);
//! # Ok::<(), parcelkit::Error>(())
//! ```

mod composite;
pub mod field;

use crate::config::CodecConfig;
use crate::container::{Container, ContainerReader, ContainerWriter};
use crate::converter::ConverterRegistry;
use crate::error::{Error, Result};
use crate::parcelable::Parcelable;
use crate::schema::{SchemaRegistry, TypeId, TypeSchema};
use crate::value::{Record, Value};
use std::sync::{Arc, OnceLock};

/// Encoder/decoder over a pair of registries.
#[derive(Debug, Clone)]
pub struct Codec {
    schemas: Arc<SchemaRegistry>,
    converters: Arc<ConverterRegistry>,
    config: CodecConfig,
}

impl Codec {
    /// Codec over fresh, private registries.
    pub fn new() -> Self {
        Self::with_registries(
            Arc::new(SchemaRegistry::new()),
            Arc::new(ConverterRegistry::new()),
        )
    }

    pub fn with_registries(
        schemas: Arc<SchemaRegistry>,
        converters: Arc<ConverterRegistry>,
    ) -> Self {
        Self {
            schemas,
            converters,
            config: CodecConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// Codec over the process-wide registries.
    pub fn global() -> &'static Codec {
        static CODEC: OnceLock<Codec> = OnceLock::new();
        CODEC.get_or_init(|| {
            Codec::with_registries(
                Arc::clone(SchemaRegistry::global()),
                Arc::clone(ConverterRegistry::global()),
            )
        })
    }

    pub fn schemas(&self) -> &Arc<SchemaRegistry> {
        &self.schemas
    }

    pub fn converters(&self) -> &Arc<ConverterRegistry> {
        &self.converters
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// True when both codecs share their registries and limits.
    pub(crate) fn same_as(&self, other: &Codec) -> bool {
        Arc::ptr_eq(&self.schemas, &other.schemas)
            && Arc::ptr_eq(&self.converters, &other.converters)
            && self.config == other.config
    }

    /// Compile `T`'s schema (and everything it references) eagerly.
    pub fn register<T: Parcelable>(&self) -> Result<Arc<TypeSchema>> {
        self.schemas.compile_schema(T::definition())
    }

    pub fn encode<T: Parcelable>(&self, value: &T) -> Result<Container> {
        self.typed_schema::<T>()?;
        self.encode_record(&value.to_record())
    }

    /// Decode a `T` that must span all of `bytes`.
    pub fn decode<T: Parcelable>(&self, bytes: &[u8]) -> Result<T> {
        let mut input = ContainerReader::new(bytes);
        let value = self.read::<T>(&mut input)?;
        input.expect_end()?;
        Ok(value)
    }

    /// Decode a `T` from a shared reader, leaving the cursor after it.
    pub fn read<T: Parcelable>(&self, input: &mut ContainerReader<'_>) -> Result<T> {
        self.typed_schema::<T>()?;
        let record = self.read_record(T::type_id(), input)?;
        T::from_record(record)
    }

    pub fn encode_record(&self, record: &Record) -> Result<Container> {
        let mut out = ContainerWriter::with_capacity(self.config.initial_capacity);
        self.write_record(record, &mut out)?;
        Ok(out.finish())
    }

    /// Append `record` to an existing writer.
    pub fn write_record(&self, record: &Record, out: &mut ContainerWriter) -> Result<()> {
        let type_id = record.type_id();
        if self.converters.contains(type_id) {
            return composite::encode_record(self, type_id, &Value::Record(record.clone()), out, 0);
        }
        composite::encode_fields(self, type_id, record, out, 0)
    }

    /// Decode a record that must span all of `bytes`.
    pub fn decode_record(&self, type_id: TypeId, bytes: &[u8]) -> Result<Record> {
        let mut input = ContainerReader::new(bytes);
        let record = self.read_record(type_id, &mut input)?;
        input.expect_end()?;
        Ok(record)
    }

    pub fn read_record(&self, type_id: TypeId, input: &mut ContainerReader<'_>) -> Result<Record> {
        match self.decode_value(type_id, input)? {
            Value::Record(record) => Ok(record),
            other => Err(Error::mismatch(format!("record {}", type_id), other.kind())),
        }
    }

    /// Encode `value` as `type_id`, honoring converter bindings.
    pub fn encode_value(&self, type_id: TypeId, value: &Value) -> Result<Container> {
        let mut out = ContainerWriter::with_capacity(self.config.initial_capacity);
        composite::encode_record(self, type_id, value, &mut out, 0)?;
        Ok(out.finish())
    }

    /// Decode one `type_id` instance from a shared reader.
    pub fn decode_value(&self, type_id: TypeId, input: &mut ContainerReader<'_>) -> Result<Value> {
        composite::decode_record(self, type_id, input, 0)
    }

    /// Compiled schema, compiling a declared definition on first use.
    pub(crate) fn schema(&self, type_id: TypeId) -> Result<Arc<TypeSchema>> {
        match self.schemas.get(type_id) {
            Some(schema) => Ok(schema),
            None => self.schemas.compile_type(type_id),
        }
    }

    fn typed_schema<T: Parcelable>(&self) -> Result<Arc<TypeSchema>> {
        match self.schemas.get(T::type_id()) {
            Some(schema) => Ok(schema),
            None => self.schemas.compile_schema(T::definition()),
        }
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}
