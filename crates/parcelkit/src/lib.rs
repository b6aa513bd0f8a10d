// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # parcelkit - declarative record serialization
//!
//! Describe a record once as an ordered field list and get a compact binary
//! encoding for it: nested records, lists, maps, sets, nullable fields and
//! per-type custom converters, with no per-type codec code.
//!
//! ## Quick Start
//!
//! ```rust
//! use parcelkit::schema::{FieldType, SchemaBuilder};
//! use parcelkit::value::RecordBuilder;
//! use parcelkit::{Codec, Result};
//!
//! fn main() -> Result<()> {
//!     let codec = Codec::new();
//!     let schema = codec.schemas().compile_schema(
//!         SchemaBuilder::new("Node")
//!             .field("value", FieldType::Int32)
//!             .field("children", FieldType::list(FieldType::nested("Node")))
//!             .build(),
//!     )?;
//!
//!     let leaf = RecordBuilder::new(&schema)
//!         .set("value", 2)?
//!         .set("children", Vec::<parcelkit::value::Value>::new())?
//!         .build();
//!     let root = RecordBuilder::new(&schema)
//!         .set("value", 1)?
//!         .set("children", vec![leaf])?
//!         .build();
//!
//!     let container = codec.encode_record(&root)?;
//!     assert_eq!(codec.decode_record(schema.type_id(), container.as_bytes())?, root);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! caller
//!   |
//!   v
//! SchemaRegistry ---- compile / lookup ----+
//!   |                                      |
//!   v                                      |
//! Codec (composite walk) <-- ConverterRegistry
//!   |                                      |
//!   v                                      |
//! codec::field --> ContainerWriter / ContainerReader
//!                                          |
//! FactoryRegistry (TypeId + bytes -> instance)
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SchemaRegistry`] | Compiles and caches [`TypeSchema`]s, recursive types included |
//! | [`Codec`] | Encodes and decodes records against compiled schemas |
//! | [`ConverterRegistry`] | Per-type custom encodings that bypass the structural walk |
//! | [`FactoryRegistry`] | Rebuilds instances from a [`TypeId`] and raw bytes |
//! | [`Parcelable`] | Typed records with a declared schema |
//!
//! ## Wire format
//!
//! Fields are written in schema order with no tags, names or version.
//! Integers and floats are fixed-width little-endian, strings and byte arrays
//! carry a `u32` length prefix, collections a `u32` element count, and each
//! nullable field a one-byte presence flag.

pub mod codec;
/// Wire constants and codec limits.
pub mod config;
pub mod container;
pub mod converter;
/// Error types.
pub mod error;
pub mod factory;
pub mod parcelable;
pub mod schema;
pub mod value;

pub use codec::Codec;
pub use config::CodecConfig;
pub use container::{Container, ContainerReader, ContainerWriter};
pub use converter::{verify_round_trip, Converter, ConverterRegistry, FnConverter};
pub use error::{ConverterError, CorruptData, Error, Result};
pub use factory::{Factory, FactoryRegistry, Instance};
pub use parcelable::Parcelable;
pub use schema::{
    FieldDescriptor, FieldType, RecordDefinition, SchemaBuilder, SchemaRegistry, TypeId, TypeRef,
    TypeSchema,
};
pub use value::{FromValue, IntoValue, Record, RecordBuilder, Value};
