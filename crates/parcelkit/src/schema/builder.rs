// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder for record definitions.

use super::{FieldType, TypeId};
use md5::{Digest, Md5};
use std::collections::HashSet;
use std::sync::Arc;

/// Uncompiled field of a [`RecordDefinition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: Arc<str>,
    pub field_type: FieldType,
    pub nullable: bool,
}

/// Ordered field list supplied for one record type, before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDefinition {
    name: Arc<str>,
    fields: Vec<FieldSpec>,
}

impl RecordDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    pub fn type_id(&self) -> TypeId {
        TypeId::from_type_name(&self.name)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Rejects empty names and duplicate field names.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("type name is empty".into());
        }
        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if field.name.is_empty() {
                return Err("field name is empty".into());
            }
            if !seen.insert(&*field.name) {
                return Err(format!("duplicate field '{}'", field.name));
            }
        }
        Ok(())
    }

    /// MD5 over the type name and every field's name, tag and nullability,
    /// in declaration order.
    pub fn fingerprint(&self) -> [u8; 16] {
        let mut hasher = Md5::new();
        hasher.update(self.name.as_bytes());
        hasher.update(b"{");
        for field in &self.fields {
            hasher.update(field.name.as_bytes());
            hasher.update(b":");
            hasher.update(field.field_type.to_string().as_bytes());
            if field.nullable {
                hasher.update(b"?");
            }
            hasher.update(b";");
        }
        hasher.update(b"}");
        let mut digest = [0u8; 16];
        digest.copy_from_slice(&hasher.finalize());
        digest
    }
}

/// Builder for creating [`RecordDefinition`] instances.
///
/// Fields are numbered in the order they are added; that order is the wire
/// order.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: Arc<str>,
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a non-nullable field.
    pub fn field(mut self, name: impl Into<Arc<str>>, field_type: FieldType) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            field_type,
            nullable: false,
        });
        self
    }

    /// Add a field preceded by a presence flag.
    pub fn nullable_field(mut self, name: impl Into<Arc<str>>, field_type: FieldType) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            field_type,
            nullable: true,
        });
        self
    }

    pub fn build(self) -> RecordDefinition {
        RecordDefinition {
            name: self.name,
            fields: self.fields,
        }
    }
}
