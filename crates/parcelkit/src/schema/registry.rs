// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-wide cache of compiled record schemas.
//!
//! # Architecture
//!
//! ```text
//! SchemaRegistry
//! +-- published:   ArcSwap<HashMap<TypeId, Arc<TypeSchema>>>   (lock-free reads)
//! +-- definitions: DashMap<TypeId, RecordDefinition>           (declared, not yet compiled)
//! +-- compile_lock: Mutex<()>                                  (one compile session at a time)
//! ```
//!
//! # Compilation
//!
//! A compile session walks a definition and every record type it reaches.
//! Each type gets a `Pending` placeholder before its fields are resolved and
//! is patched to `Ready` once they are, so a reference back to a type still
//! being compiled (`Node { children: List<Node> }`) resolves against the
//! placeholder instead of recursing forever. A cycle is accepted only when at
//! least one of its edges goes through a nullable field or a collection
//! element; a cycle of plain nested fields describes an infinitely large
//! value and is rejected with [`Error::CyclicSchema`].
//!
//! When the session succeeds, every schema it built is published with a
//! single pointer swap, so concurrent readers see either none or all of them,
//! never a partially built entry.

use super::{FieldDescriptor, FieldType, RecordDefinition, TypeId, TypeRef, TypeSchema};
use crate::error::{Error, Result};
use arc_swap::ArcSwap;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

type SchemaMap = HashMap<TypeId, Arc<TypeSchema>>;

/// Registry of compiled schemas keyed by [`TypeId`].
pub struct SchemaRegistry {
    published: ArcSwap<SchemaMap>,
    definitions: DashMap<TypeId, RecordDefinition>,
    compile_lock: Mutex<()>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self {
            published: ArcSwap::from_pointee(SchemaMap::new()),
            definitions: DashMap::new(),
            compile_lock: Mutex::new(()),
        }
    }

    /// Get the process-wide registry instance
    pub fn global() -> &'static Arc<SchemaRegistry> {
        static REGISTRY: OnceLock<Arc<SchemaRegistry>> = OnceLock::new();
        REGISTRY.get_or_init(|| Arc::new(SchemaRegistry::new()))
    }

    /// Declare a definition without compiling it.
    ///
    /// The type is compiled on first use, either through [`compile_type`] or
    /// when another schema references it by name.
    ///
    /// [`compile_type`]: SchemaRegistry::compile_type
    pub fn define(&self, definition: RecordDefinition) -> Result<TypeId> {
        definition
            .validate()
            .map_err(|reason| Error::InvalidSchema {
                type_name: definition.name().to_string(),
                reason,
            })?;

        let type_id = definition.type_id();
        if let Some(existing) = self.get(type_id) {
            Self::ensure_same(&existing, &definition)?;
            return Ok(type_id);
        }

        match self.definitions.entry(type_id) {
            Entry::Occupied(entry) => {
                if entry.get().fingerprint() != definition.fingerprint() {
                    log::warn!(
                        "[SchemaRegistry] conflicting definition for '{}'",
                        definition.name()
                    );
                    return Err(Error::DuplicateRegistration {
                        type_id,
                        what: "schema",
                    });
                }
            }
            Entry::Vacant(entry) => {
                log::debug!("[SchemaRegistry] defined '{}'", definition.name());
                entry.insert(definition);
            }
        }
        Ok(type_id)
    }

    /// Compile a definition and every record type it references.
    ///
    /// Idempotent: compiling the same definition again returns the cached
    /// schema. A different definition under an already compiled name fails
    /// with [`Error::DuplicateRegistration`].
    pub fn compile_schema(&self, definition: RecordDefinition) -> Result<Arc<TypeSchema>> {
        let type_id = definition.type_id();
        if let Some(existing) = self.get(type_id) {
            return Self::ensure_same(&existing, &definition).map(|()| existing);
        }

        let _guard = self.compile_lock.lock();
        // Another session may have published it while we waited.
        if let Some(existing) = self.get(type_id) {
            return Self::ensure_same(&existing, &definition).map(|()| existing);
        }

        let mut session = CompileSession::new(self);
        session.enter(definition, false)?;
        session.publish(type_id)
    }

    /// Compile a previously declared definition (first use).
    pub fn compile_type(&self, type_id: TypeId) -> Result<Arc<TypeSchema>> {
        if let Some(schema) = self.get(type_id) {
            return Ok(schema);
        }
        let definition = self
            .definitions
            .get(&type_id)
            .map(|entry| entry.value().clone())
            .ok_or(Error::UnknownType(type_id))?;
        self.compile_schema(definition)
    }

    /// Compiled schema for `type_id`, or [`Error::UnknownType`].
    pub fn lookup(&self, type_id: TypeId) -> Result<Arc<TypeSchema>> {
        self.get(type_id).ok_or(Error::UnknownType(type_id))
    }

    pub fn get(&self, type_id: TypeId) -> Option<Arc<TypeSchema>> {
        self.published.load().get(&type_id).cloned()
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.published.load().contains_key(&type_id)
    }

    /// Number of compiled schemas.
    pub fn len(&self) -> usize {
        self.published.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.published.load().is_empty()
    }

    fn ensure_same(existing: &TypeSchema, definition: &RecordDefinition) -> Result<()> {
        if existing.fingerprint() == &definition.fingerprint() {
            return Ok(());
        }
        log::warn!(
            "[SchemaRegistry] '{}' already compiled with a different field list",
            definition.name()
        );
        Err(Error::DuplicateRegistration {
            type_id: existing.type_id(),
            what: "schema",
        })
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("compiled", &self.len())
            .field("declared", &self.definitions.len())
            .finish()
    }
}

enum Slot {
    Pending,
    Ready(Arc<TypeSchema>),
}

struct PathEntry {
    type_id: TypeId,
    name: Arc<str>,
    /// Reached through a non-nullable nested field.
    strict: bool,
}

/// One compile pass; runs under `compile_lock`.
struct CompileSession<'r> {
    registry: &'r SchemaRegistry,
    published: Arc<SchemaMap>,
    slots: HashMap<TypeId, Slot>,
    path: Vec<PathEntry>,
}

impl<'r> CompileSession<'r> {
    fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            published: registry.published.load_full(),
            slots: HashMap::new(),
            path: Vec::new(),
        }
    }

    fn enter(&mut self, definition: RecordDefinition, strict: bool) -> Result<()> {
        definition
            .validate()
            .map_err(|reason| Error::InvalidSchema {
                type_name: definition.name().to_string(),
                reason,
            })?;

        let type_id = definition.type_id();
        let name = definition.name_arc();
        self.slots.insert(type_id, Slot::Pending);
        self.path.push(PathEntry {
            type_id,
            name: Arc::clone(&name),
            strict,
        });

        let mut fields = Vec::with_capacity(definition.fields().len());
        for (ordinal, spec) in definition.fields().iter().enumerate() {
            self.resolve(&spec.field_type, !spec.nullable)?;
            fields.push(FieldDescriptor {
                name: Arc::clone(&spec.name),
                field_type: spec.field_type.clone(),
                nullable: spec.nullable,
                ordinal: ordinal as u32,
            });
        }

        self.path.pop();
        let schema = TypeSchema::new(type_id, name, fields, definition.fingerprint());
        self.slots.insert(type_id, Slot::Ready(Arc::new(schema)));
        Ok(())
    }

    fn resolve(&mut self, field_type: &FieldType, strict: bool) -> Result<()> {
        match field_type {
            FieldType::Nested(type_ref) => self.resolve_nested(type_ref, strict),
            // Collections can be empty, so they always break a cycle.
            FieldType::List(element) | FieldType::Set(element) => self.resolve(element, false),
            FieldType::Map(key, value) => {
                self.resolve(key, false)?;
                self.resolve(value, false)
            }
            _ => Ok(()),
        }
    }

    fn resolve_nested(&mut self, type_ref: &TypeRef, strict: bool) -> Result<()> {
        let type_id = type_ref.id();
        if self.published.contains_key(&type_id) {
            return Ok(());
        }
        match self.slots.get(&type_id) {
            Some(Slot::Ready(_)) => Ok(()),
            Some(Slot::Pending) => self.check_deferral(type_ref, strict),
            None => {
                let definition = type_ref
                    .resolve()
                    .or_else(|| {
                        self.registry
                            .definitions
                            .get(&type_id)
                            .map(|entry| entry.value().clone())
                    })
                    .ok_or(Error::UnknownType(type_id))?;
                if definition.type_id() != type_id {
                    return Err(Error::InvalidSchema {
                        type_name: type_ref.name().to_string(),
                        reason: format!("resolver returned definition of '{}'", definition.name()),
                    });
                }
                self.enter(definition, strict)
            }
        }
    }

    /// A back-reference to a pending type is fine unless every edge of the
    /// cycle it closes is a non-nullable nested field.
    fn check_deferral(&self, type_ref: &TypeRef, strict: bool) -> Result<()> {
        let Some(start) = self.path.iter().position(|e| e.type_id == type_ref.id()) else {
            return Ok(());
        };
        if !strict || !self.path[start + 1..].iter().all(|e| e.strict) {
            return Ok(());
        }

        let mut path: Vec<String> = self.path[start..]
            .iter()
            .map(|e| e.name.to_string())
            .collect();
        path.push(type_ref.name().to_string());
        log::warn!("[SchemaRegistry] cyclic schema: {}", path.join(" -> "));
        Err(Error::CyclicSchema { path })
    }

    fn publish(self, root: TypeId) -> Result<Arc<TypeSchema>> {
        let mut next = SchemaMap::clone(&self.published);
        let mut root_schema = None;
        for (type_id, slot) in self.slots {
            if let Slot::Ready(schema) = slot {
                log::debug!(
                    "[SchemaRegistry] compiled '{}' ({} fields)",
                    schema.name(),
                    schema.len()
                );
                if type_id == root {
                    root_schema = Some(Arc::clone(&schema));
                }
                next.insert(type_id, schema);
            }
        }
        self.registry.published.store(Arc::new(next));
        root_schema.ok_or(Error::UnknownType(root))
    }
}
