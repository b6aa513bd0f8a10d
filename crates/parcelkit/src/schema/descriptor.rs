// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field type tags and compiled record schemas.

use super::builder::RecordDefinition;
use super::TypeId;
use crate::parcelable::Parcelable;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Reference from a field to another record type.
///
/// Equality and hashing use the [`TypeId`] only. The optional resolver lets
/// the registry compile the referenced type on first use; without one the
/// type must have been defined or compiled beforehand.
#[derive(Clone)]
pub struct TypeRef {
    id: TypeId,
    name: Arc<str>,
    resolver: Option<fn() -> RecordDefinition>,
}

impl TypeRef {
    /// Reference by name; the definition must be registered separately.
    pub fn named(name: &str) -> Self {
        Self {
            id: TypeId::from_type_name(name),
            name: name.into(),
            resolver: None,
        }
    }

    /// Reference that can produce its own definition.
    pub fn with_resolver(name: &str, resolver: fn() -> RecordDefinition) -> Self {
        Self {
            resolver: Some(resolver),
            ..Self::named(name)
        }
    }

    /// Reference to a typed record.
    pub fn of<T: Parcelable>() -> Self {
        Self::with_resolver(T::TYPE_NAME, T::definition)
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn resolve(&self) -> Option<RecordDefinition> {
        self.resolver.map(|resolve| resolve())
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.name)
    }
}

/// Wire type of a field or collection element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Int32,
    Int64,
    Float64,
    Bool,
    String,
    Bytes,
    /// Another record, walked through its own schema or converter.
    Nested(TypeRef),
    List(Box<FieldType>),
    Map(Box<FieldType>, Box<FieldType>),
    Set(Box<FieldType>),
}

impl FieldType {
    pub fn list(element: FieldType) -> Self {
        Self::List(Box::new(element))
    }

    pub fn set(element: FieldType) -> Self {
        Self::Set(Box::new(element))
    }

    pub fn map(key: FieldType, value: FieldType) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Nested record referenced by name.
    pub fn nested(name: &str) -> Self {
        Self::Nested(TypeRef::named(name))
    }

    /// Nested typed record; compiled on first use.
    pub fn record<T: Parcelable>() -> Self {
        Self::Nested(TypeRef::of::<T>())
    }

    /// Short tag used in diagnostics.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Nested(_) => "nested",
            Self::List(_) => "list",
            Self::Map(_, _) => "map",
            Self::Set(_) => "set",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nested(r) => write!(f, "nested:{}", r.name()),
            Self::List(e) => write!(f, "list<{}>", e),
            Self::Set(e) => write!(f, "set<{}>", e),
            Self::Map(k, v) => write!(f, "map<{},{}>", k, v),
            scalar => f.write_str(scalar.tag()),
        }
    }
}

/// One field of a compiled schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: Arc<str>,
    pub field_type: FieldType,
    /// Preceded on the wire by a 1-byte presence flag.
    pub nullable: bool,
    /// Position in the wire order, assigned in declaration order.
    pub ordinal: u32,
}

/// Ordered field list of one record type.
///
/// Field order is the wire contract: containers written with one order
/// cannot be read with another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSchema {
    type_id: TypeId,
    name: Arc<str>,
    fields: Vec<FieldDescriptor>,
    fingerprint: [u8; 16],
}

impl TypeSchema {
    pub(crate) fn new(
        type_id: TypeId,
        name: Arc<str>,
        fields: Vec<FieldDescriptor>,
        fingerprint: [u8; 16],
    ) -> Self {
        Self {
            type_id,
            name,
            fields,
            fingerprint,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in ordinal order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| &*f.name == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| &*f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// MD5 digest of the canonical field list.
    pub fn fingerprint(&self) -> &[u8; 16] {
        &self.fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_display() {
        let ty = FieldType::map(
            FieldType::String,
            FieldType::list(FieldType::nested("Point")),
        );
        assert_eq!(ty.to_string(), "map<string,list<nested:Point>>");
        assert_eq!(FieldType::set(FieldType::Bytes).to_string(), "set<bytes>");
    }

    #[test]
    fn test_type_ref_equality_ignores_resolver() {
        fn def() -> RecordDefinition {
            crate::schema::SchemaBuilder::new("Point").build()
        }
        let a = TypeRef::named("Point");
        let b = TypeRef::with_resolver("Point", def);
        assert_eq!(a, b);
        assert!(a.resolve().is_none());
        assert_eq!(b.resolve().map(|d| d.type_id()), Some(a.id()));
    }

    #[test]
    fn test_scalar_tags() {
        assert_eq!(FieldType::nested("X").tag(), "nested");
        assert_eq!(FieldType::Float64.tag(), "float64");
    }
}
