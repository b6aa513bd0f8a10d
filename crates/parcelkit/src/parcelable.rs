// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed records.
//!
//! A [`Parcelable`] type states its schema once, in [`Parcelable::definition`],
//! and converts to and from a [`Record`] whose values follow that field
//! order. The codec does the rest.
//!
//! ```rust
//! use parcelkit::schema::{FieldType, RecordDefinition, SchemaBuilder};
//! use parcelkit::value::{IntoValue, Record};
//! use parcelkit::{Codec, Parcelable, Result};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Parcelable for Point {
//!     const TYPE_NAME: &'static str = "Point";
//!
//!     fn definition() -> RecordDefinition {
//!         SchemaBuilder::new(Self::TYPE_NAME)
//!             .field("x", FieldType::Int32)
//!             .field("y", FieldType::Int32)
//!             .build()
//!     }
//!
//!     fn to_record(&self) -> Record {
//!         Record::new(Self::type_id(), vec![self.x.into_value(), self.y.into_value()])
//!     }
//!
//!     fn from_record(record: Record) -> Result<Self> {
//!         let mut fields = record.into_fields();
//!         let point = Point { x: fields.next()?, y: fields.next()? };
//!         fields.finish()?;
//!         Ok(point)
//!     }
//! }
//!
//! let codec = Codec::new();
//! let bytes = codec.encode(&Point { x: 3, y: -4 })?;
//! assert_eq!(codec.decode::<Point>(bytes.as_bytes())?, Point { x: 3, y: -4 });
//! # Ok::<(), parcelkit::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::schema::{RecordDefinition, TypeId};
use crate::value::{Record, Value};

/// A Rust type with a declared record schema.
pub trait Parcelable: Sized + Send + 'static {
    /// Type name; its MD5 digest is the [`TypeId`].
    const TYPE_NAME: &'static str;

    /// Fields in wire order.
    fn definition() -> RecordDefinition;

    fn to_record(&self) -> Record;

    fn from_record(record: Record) -> Result<Self>;

    fn type_id() -> TypeId {
        TypeId::from_type_name(Self::TYPE_NAME)
    }
}

/// Convert a record value back into `T`, checking the record type.
pub fn record_into<T: Parcelable>(value: Value) -> Result<T> {
    match value {
        Value::Record(record) if record.type_id() == T::type_id() => T::from_record(record),
        Value::Record(record) => Err(Error::mismatch(
            T::TYPE_NAME,
            format!("record {}", record.type_id()),
        )),
        other => Err(Error::mismatch(T::TYPE_NAME, other.kind())),
    }
}

/// Implement [`IntoValue`](crate::value::IntoValue) and
/// [`FromValue`](crate::value::FromValue) for [`Parcelable`] types so they can
/// be used as fields, elements, keys or values of other records.
#[macro_export]
macro_rules! parcelable_value {
    ($($type:ty),+ $(,)?) => {
        $(
            impl $crate::value::IntoValue for $type {
                fn into_value(self) -> $crate::value::Value {
                    $crate::value::Value::Record($crate::Parcelable::to_record(&self))
                }
            }

            impl $crate::value::FromValue for $type {
                fn from_value(value: $crate::value::Value) -> $crate::Result<Self> {
                    $crate::parcelable::record_into::<$type>(value)
                }
            }
        )+
    };
}
