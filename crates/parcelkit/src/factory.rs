// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-wide reconstruction functions.
//!
//! Given only a [`TypeId`] and a container, [`FactoryRegistry::create`]
//! rebuilds an instance. Callers need no knowledge of the Rust type behind
//! the identifier; those that do can downcast with
//! [`FactoryRegistry::create_as`].
//!
//! Factories are registered during initialization and never replaced.
//! Registering the same factory again is a no-op; registering a different one
//! for the same type fails. See [`Factory`] for what counts as the same.

use crate::codec::Codec;
use crate::container::ContainerReader;
use crate::error::{Error, Result};
use crate::parcelable::Parcelable;
use crate::schema::TypeId;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::any::Any;
use std::sync::{Arc, OnceLock};

/// Instance produced by a factory.
pub type Instance = Box<dyn Any + Send>;

type CreateFn = dyn Fn(&mut ContainerReader<'_>) -> Result<Instance> + Send + Sync;

/// Reconstruction function for one type.
///
/// Two factories are the same when one is a clone of the other. A callable
/// that captures nothing (a function item or a non-capturing closure) is also
/// the same as any other factory built from that callable type. Factories made
/// by [`FactoryRegistry::register_parcelable`] and
/// [`FactoryRegistry::register_dynamic`] are the same when they decode the same
/// type through a codec sharing the same registries and limits.
#[derive(Clone)]
pub struct Factory {
    identity: Identity,
    create: Arc<CreateFn>,
}

#[derive(Clone, Debug)]
enum Identity {
    Stateless(std::any::TypeId),
    Instance,
    Bound {
        callable: std::any::TypeId,
        codec: Codec,
    },
}

impl Factory {
    pub fn new<F>(create: F) -> Self
    where
        F: Fn(&mut ContainerReader<'_>) -> Result<Instance> + Send + Sync + 'static,
    {
        let identity = if std::mem::size_of::<F>() == 0 {
            Identity::Stateless(std::any::TypeId::of::<F>())
        } else {
            Identity::Instance
        };
        Self {
            identity,
            create: Arc::new(create),
        }
    }

    /// Factory whose only captured state is `codec`.
    fn bound<F>(codec: &Codec, create: F) -> Self
    where
        F: Fn(&mut ContainerReader<'_>) -> Result<Instance> + Send + Sync + 'static,
    {
        Self {
            identity: Identity::Bound {
                callable: std::any::TypeId::of::<F>(),
                codec: codec.clone(),
            },
            create: Arc::new(create),
        }
    }

    pub fn create(&self, input: &mut ContainerReader<'_>) -> Result<Instance> {
        (self.create)(input)
    }

    pub fn same_as(&self, other: &Factory) -> bool {
        if Arc::ptr_eq(&self.create, &other.create) {
            return true;
        }
        match (&self.identity, &other.identity) {
            (Identity::Stateless(a), Identity::Stateless(b)) => a == b,
            (
                Identity::Bound { callable, codec },
                Identity::Bound {
                    callable: other_callable,
                    codec: other_codec,
                },
            ) => callable == other_callable && codec.same_as(other_codec),
            _ => false,
        }
    }
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Map from [`TypeId`] to [`Factory`].
#[derive(Debug, Default)]
pub struct FactoryRegistry {
    factories: DashMap<TypeId, Factory>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the process-wide registry instance
    pub fn global() -> &'static Arc<FactoryRegistry> {
        static REGISTRY: OnceLock<Arc<FactoryRegistry>> = OnceLock::new();
        REGISTRY.get_or_init(|| Arc::new(FactoryRegistry::new()))
    }

    pub fn register(&self, type_id: TypeId, factory: Factory) -> Result<()> {
        match self.factories.entry(type_id) {
            Entry::Occupied(entry) => {
                if entry.get().same_as(&factory) {
                    log::debug!("[FactoryRegistry] type {} re-registered, no-op", type_id);
                    return Ok(());
                }
                log::warn!(
                    "[FactoryRegistry] type {} already has a different factory",
                    type_id
                );
                Err(Error::DuplicateRegistration {
                    type_id,
                    what: "factory",
                })
            }
            Entry::Vacant(entry) => {
                entry.insert(factory);
                log::info!("[FactoryRegistry] registered factory for type {}", type_id);
                Ok(())
            }
        }
    }

    /// Register a factory that decodes `T` with `codec`.
    ///
    /// `T`'s schema is compiled here so a broken definition fails at
    /// registration, not on first decode.
    pub fn register_parcelable<T: Parcelable>(&self, codec: &Codec) -> Result<()> {
        codec.register::<T>()?;
        let reader = codec.clone();
        self.register(
            T::type_id(),
            Factory::bound(codec, move |input: &mut ContainerReader<'_>| {
                Ok(Box::new(reader.read::<T>(input)?) as Instance)
            }),
        )
    }

    /// Register a factory producing the decoded [`Value`](crate::value::Value)
    /// of a type known only by schema.
    pub fn register_dynamic(&self, codec: &Codec, type_id: TypeId) -> Result<()> {
        if !codec.converters().contains(type_id) {
            codec.schema(type_id)?;
        }
        let reader = codec.clone();
        self.register(
            type_id,
            Factory::bound(codec, move |input: &mut ContainerReader<'_>| {
                Ok(Box::new(reader.decode_value(type_id, input)?) as Instance)
            }),
        )
    }

    /// Rebuild an instance of `type_id` from `input`.
    pub fn create(&self, type_id: TypeId, input: &mut ContainerReader<'_>) -> Result<Instance> {
        // Clone out so no shard lock is held while the factory runs.
        let factory = self
            .factories
            .get(&type_id)
            .map(|entry| entry.value().clone())
            .ok_or(Error::UnknownType(type_id))?;
        factory.create(input)
    }

    /// [`create`](Self::create) and downcast to `T`.
    pub fn create_as<T: Any>(&self, type_id: TypeId, input: &mut ContainerReader<'_>) -> Result<T> {
        self.create(type_id, input)?
            .downcast::<T>()
            .map(|instance| *instance)
            .map_err(|_| {
                Error::mismatch(
                    std::any::type_name::<T>(),
                    format!("instance of type {}", type_id),
                )
            })
    }

    /// Rebuild from a byte slice that must hold exactly one instance.
    pub fn create_from_bytes(&self, type_id: TypeId, bytes: &[u8]) -> Result<Instance> {
        let mut input = ContainerReader::new(bytes);
        let instance = self.create(type_id, &mut input)?;
        input.expect_end()?;
        Ok(instance)
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.factories.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CorruptData;

    fn read_i32(input: &mut ContainerReader<'_>) -> Result<Instance> {
        Ok(Box::new(input.read_i32()?))
    }

    fn read_i64(input: &mut ContainerReader<'_>) -> Result<Instance> {
        Ok(Box::new(input.read_i64()?))
    }

    #[test]
    fn test_same_function_is_idempotent() {
        let registry = FactoryRegistry::new();
        let id = TypeId::from_type_name("Counter");
        registry.register(id, Factory::new(read_i32)).expect("register");
        registry
            .register(id, Factory::new(read_i32))
            .expect("same factory again");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_different_function_is_duplicate() {
        let registry = FactoryRegistry::new();
        let id = TypeId::from_type_name("Counter");
        registry.register(id, Factory::new(read_i32)).expect("register");
        let err = registry.register(id, Factory::new(read_i64)).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateRegistration {
                type_id: id,
                what: "factory",
            }
        );
    }

    fn constant(value: i32) -> Factory {
        Factory::new(move |_: &mut ContainerReader<'_>| Ok(Box::new(value) as Instance))
    }

    #[test]
    fn test_capturing_closures_with_different_state_conflict() {
        let registry = FactoryRegistry::new();
        let id = TypeId::from_type_name("Counter");
        registry.register(id, constant(1)).expect("register");
        let err = registry.register(id, constant(2)).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateRegistration {
                type_id: id,
                what: "factory",
            }
        );
        let value: i32 = registry
            .create_as(id, &mut ContainerReader::new(&[]))
            .expect("create");
        assert_eq!(value, 1);
    }

    #[test]
    fn test_clone_of_capturing_factory_is_idempotent() {
        let registry = FactoryRegistry::new();
        let id = TypeId::from_type_name("Counter");
        let factory = constant(7);
        registry.register(id, factory.clone()).expect("register");
        registry.register(id, factory).expect("clone again");
        assert!(registry.register(id, constant(7)).is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_type() {
        let registry = FactoryRegistry::new();
        let id = TypeId::from_type_name("Nobody");
        let err = registry.create_from_bytes(id, &[]).unwrap_err();
        assert_eq!(err, Error::UnknownType(id));
    }

    #[test]
    fn test_create_and_downcast() {
        let registry = FactoryRegistry::new();
        let id = TypeId::from_type_name("Counter");
        registry.register(id, Factory::new(read_i32)).expect("register");

        let bytes = 42i32.to_le_bytes();
        let value: i32 = registry
            .create_as(id, &mut ContainerReader::new(&bytes))
            .expect("create");
        assert_eq!(value, 42);

        let err = registry
            .create_as::<String>(id, &mut ContainerReader::new(&bytes))
            .unwrap_err();
        assert!(err.is_corrupt_data());
    }

    #[test]
    fn test_create_from_bytes_rejects_trailing() {
        let registry = FactoryRegistry::new();
        let id = TypeId::from_type_name("Counter");
        registry.register(id, Factory::new(read_i32)).expect("register");
        let err = registry.create_from_bytes(id, &[1, 0, 0, 0, 9]).unwrap_err();
        assert_eq!(
            err,
            Error::CorruptData(CorruptData::TrailingBytes {
                offset: 4,
                remaining: 1,
            })
        );
    }
}
