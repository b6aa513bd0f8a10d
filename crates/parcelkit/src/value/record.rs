// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record values and helpers to build and take them apart.

use super::{FromValue, IntoValue, Value};
use crate::error::{Error, Result};
use crate::schema::{TypeId, TypeSchema};

/// Field values of one record, in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Record {
    type_id: TypeId,
    values: Vec<Value>,
}

impl Record {
    pub fn new(type_id: TypeId, values: Vec<Value>) -> Self {
        Self { type_id, values }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of field `name` as described by `schema`.
    pub fn get(&self, schema: &TypeSchema, name: &str) -> Result<&Value> {
        let index = field_index(schema, name)?;
        self.values.get(index).ok_or_else(|| {
            Error::mismatch(format!("{} fields", schema.len()), format!("{} values", self.len()))
        })
    }

    /// Replace the value of field `name`.
    pub fn set(&mut self, schema: &TypeSchema, name: &str, value: impl IntoValue) -> Result<()> {
        let index = field_index(schema, name)?;
        let len = self.values.len();
        let slot = self.values.get_mut(index).ok_or_else(|| {
            Error::mismatch(format!("{} fields", schema.len()), format!("{} values", len))
        })?;
        *slot = value.into_value();
        Ok(())
    }

    /// Sequential typed access for `Parcelable::from_record`.
    pub fn into_fields(self) -> FieldReader {
        FieldReader {
            type_id: self.type_id,
            values: self.values.into_iter(),
            index: 0,
        }
    }
}

fn field_index(schema: &TypeSchema, name: &str) -> Result<usize> {
    schema.field_index(name).ok_or_else(|| Error::UnknownField {
        type_name: schema.name().to_string(),
        field: name.to_string(),
    })
}

/// Builds a [`Record`] by field name. Unset fields are `Null`.
///
/// ```rust
/// use parcelkit::schema::{FieldType, SchemaBuilder, SchemaRegistry};
/// use parcelkit::value::{RecordBuilder, Value};
///
/// let registry = SchemaRegistry::new();
/// let schema = registry
///     .compile_schema(
///         SchemaBuilder::new("Point")
///             .field("x", FieldType::Int32)
///             .field("y", FieldType::Int32)
///             .build(),
///     )
///     .unwrap();
/// let point = RecordBuilder::new(&schema).set("y", -4)?.set("x", 3)?.build();
/// assert_eq!(point.values(), &[Value::Int32(3), Value::Int32(-4)]);
/// # Ok::<(), parcelkit::Error>(())
/// ```
#[derive(Debug)]
pub struct RecordBuilder<'s> {
    schema: &'s TypeSchema,
    values: Vec<Value>,
}

impl<'s> RecordBuilder<'s> {
    pub fn new(schema: &'s TypeSchema) -> Self {
        Self {
            schema,
            values: vec![Value::Null; schema.len()],
        }
    }

    pub fn set(mut self, name: &str, value: impl IntoValue) -> Result<Self> {
        let index = field_index(self.schema, name)?;
        self.values[index] = value.into_value();
        Ok(self)
    }

    pub fn build(self) -> Record {
        Record::new(self.schema.type_id(), self.values)
    }
}

/// Typed cursor over a record's values in ordinal order.
#[derive(Debug)]
pub struct FieldReader {
    type_id: TypeId,
    values: std::vec::IntoIter<Value>,
    index: usize,
}

impl FieldReader {
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Next field converted to `T`.
    #[allow(clippy::should_implement_trait)]
    pub fn next<T: FromValue>(&mut self) -> Result<T> {
        let value = self.values.next().ok_or_else(|| {
            Error::mismatch(format!("field {}", self.index), "end of record")
        })?;
        self.index += 1;
        T::from_value(value)
    }

    /// Fails if values are left over.
    pub fn finish(self) -> Result<()> {
        let left = self.values.len();
        if left == 0 {
            return Ok(());
        }
        Err(Error::mismatch(
            format!("{} fields", self.index),
            format!("{} values", self.index + left),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldType, SchemaBuilder, SchemaRegistry};
    use std::sync::Arc;

    fn person() -> Arc<TypeSchema> {
        SchemaRegistry::new()
            .compile_schema(
                SchemaBuilder::new("Person")
                    .field("name", FieldType::String)
                    .nullable_field("age", FieldType::Int32)
                    .build(),
            )
            .expect("compile")
    }

    #[test]
    fn test_builder_fills_by_name() {
        let schema = person();
        let record = RecordBuilder::new(&schema)
            .set("name", "Ada")
            .expect("name")
            .build();
        assert_eq!(record.type_id(), schema.type_id());
        assert_eq!(record.get(&schema, "name").expect("get"), &Value::String("Ada".into()));
        assert!(record.get(&schema, "age").expect("get").is_null());
    }

    #[test]
    fn test_unknown_field() {
        let schema = person();
        let err = RecordBuilder::new(&schema).set("email", "x").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownField {
                type_name: "Person".into(),
                field: "email".into(),
            }
        );
    }

    #[test]
    fn test_set_replaces_value() {
        let schema = person();
        let mut record = RecordBuilder::new(&schema).build();
        record.set(&schema, "age", Some(36)).expect("set");
        assert_eq!(record.values()[1], Value::Int32(36));
    }

    #[test]
    fn test_field_reader_in_order() {
        let record = Record::new(
            TypeId::from_type_name("Person"),
            vec![Value::String("Ada".into()), Value::Null],
        );
        let mut fields = record.into_fields();
        let name: String = fields.next().expect("name");
        let age: Option<i32> = fields.next().expect("age");
        assert_eq!(name, "Ada");
        assert_eq!(age, None);
        fields.finish().expect("no leftovers");
    }

    #[test]
    fn test_field_reader_detects_shape_errors() {
        let record = Record::new(TypeId::from_type_name("Pair"), vec![Value::Int32(1)]);
        let mut fields = record.clone().into_fields();
        assert!(fields.next::<String>().unwrap_err().is_corrupt_data());

        let mut fields = record.clone().into_fields();
        fields.next::<i32>().expect("first");
        assert!(fields.next::<i32>().is_err());

        let fields = record.into_fields();
        assert!(fields.finish().is_err());
    }
}
