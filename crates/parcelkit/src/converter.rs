// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-type custom encode/decode overrides.
//!
//! A converter bound to a [`TypeId`] replaces structural traversal for that
//! type everywhere it appears: at top level, as a nested field and as a
//! collection element. The codec never looks at the type's schema fields
//! once a converter is bound.
//!
//! A converter must be total on well-formed values and must round-trip:
//! `decode(encode(v)) == v`, consuming exactly the bytes `encode` wrote.
//! [`verify_round_trip`] checks both on sample values, and
//! [`ConverterRegistry::bind_verified`] refuses a binding that fails.

use crate::container::{ContainerReader, ContainerWriter};
use crate::error::{ConverterError, Error, Result};
use crate::schema::TypeId;
use crate::value::Value;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Custom encoding for one record type.
pub trait Converter: Send + Sync + 'static {
    fn encode(&self, value: &Value, out: &mut ContainerWriter) -> Result<()>;

    fn decode(&self, input: &mut ContainerReader<'_>) -> Result<Value>;
}

/// [`Converter`] built from a pair of closures.
///
/// ```rust
/// use parcelkit::container::{ContainerReader, ContainerWriter};
/// use parcelkit::converter::FnConverter;
/// use parcelkit::value::Value;
/// use parcelkit::Error;
///
/// // Millisecond timestamp stored as a bare i64.
/// let millis = FnConverter::new(
///     |value: &Value, out: &mut ContainerWriter| {
///         let ms = value
///             .as_i64()
///             .ok_or_else(|| Error::mismatch("int64", value.kind()))?;
///         out.write_i64(ms);
///         Ok(())
///     },
///     |input: &mut ContainerReader<'_>| Ok(Value::Int64(input.read_i64()?)),
/// );
/// # let _ = millis;
/// ```
pub struct FnConverter<E, D> {
    encode: E,
    decode: D,
}

impl<E, D> FnConverter<E, D>
where
    E: Fn(&Value, &mut ContainerWriter) -> Result<()> + Send + Sync + 'static,
    D: Fn(&mut ContainerReader<'_>) -> Result<Value> + Send + Sync + 'static,
{
    pub fn new(encode: E, decode: D) -> Self {
        Self { encode, decode }
    }
}

impl<E, D> Converter for FnConverter<E, D>
where
    E: Fn(&Value, &mut ContainerWriter) -> Result<()> + Send + Sync + 'static,
    D: Fn(&mut ContainerReader<'_>) -> Result<Value> + Send + Sync + 'static,
{
    fn encode(&self, value: &Value, out: &mut ContainerWriter) -> Result<()> {
        (self.encode)(value, out)
    }

    fn decode(&self, input: &mut ContainerReader<'_>) -> Result<Value> {
        (self.decode)(input)
    }
}

impl<E, D> std::fmt::Debug for FnConverter<E, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnConverter")
    }
}

/// Check the round-trip law on `samples`.
///
/// Each sample is encoded into a fresh container and decoded back; the
/// decoded value must equal the sample and decode must consume exactly the
/// bytes encode produced.
pub fn verify_round_trip<C: Converter + ?Sized>(
    converter: &C,
    samples: &[Value],
) -> std::result::Result<(), ConverterError> {
    for (index, sample) in samples.iter().enumerate() {
        let mut out = ContainerWriter::new();
        converter
            .encode(sample, &mut out)
            .map_err(|e| ConverterError::RoundTrip {
                sample: index,
                reason: format!("encode failed: {}", e),
            })?;
        let container = out.finish();

        let mut input = container.reader();
        let decoded = converter
            .decode(&mut input)
            .map_err(|e| ConverterError::RoundTrip {
                sample: index,
                reason: format!("decode failed: {}", e),
            })?;

        if input.offset() != container.len() {
            return Err(ConverterError::PartialRead {
                sample: index,
                written: container.len(),
                consumed: input.offset(),
            });
        }
        if decoded != *sample {
            return Err(ConverterError::RoundTrip {
                sample: index,
                reason: format!("decoded {:?}, expected {:?}", decoded, sample),
            });
        }
    }
    Ok(())
}

type ConverterMap = HashMap<TypeId, Arc<dyn Converter>>;

/// Bindings from [`TypeId`] to [`Converter`].
///
/// Bindings are made during initialization and never removed; lookups are
/// lock-free.
pub struct ConverterRegistry {
    bindings: ArcSwap<ConverterMap>,
    write_lock: Mutex<()>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self {
            bindings: ArcSwap::from_pointee(ConverterMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the process-wide registry instance
    pub fn global() -> &'static Arc<ConverterRegistry> {
        static REGISTRY: OnceLock<Arc<ConverterRegistry>> = OnceLock::new();
        REGISTRY.get_or_init(|| Arc::new(ConverterRegistry::new()))
    }

    /// Bind `converter` to `type_id`.
    pub fn bind(&self, type_id: TypeId, converter: impl Converter) -> Result<()> {
        self.bind_shared(type_id, Arc::new(converter))
    }

    /// Bind a shared converter. Binding the same `Arc` twice is a no-op.
    pub fn bind_shared(&self, type_id: TypeId, converter: Arc<dyn Converter>) -> Result<()> {
        let _guard = self.write_lock.lock();
        let current = self.bindings.load_full();
        if let Some(existing) = current.get(&type_id) {
            if Arc::ptr_eq(existing, &converter) {
                return Ok(());
            }
            log::warn!("[ConverterRegistry] type {} already has a converter", type_id);
            return Err(Error::DuplicateRegistration {
                type_id,
                what: "converter",
            });
        }

        let mut next = ConverterMap::clone(&current);
        next.insert(type_id, converter);
        self.bindings.store(Arc::new(next));
        log::info!("[ConverterRegistry] bound converter for type {}", type_id);
        Ok(())
    }

    /// Run [`verify_round_trip`] on `samples`, then bind.
    pub fn bind_verified(
        &self,
        type_id: TypeId,
        converter: impl Converter,
        samples: &[Value],
    ) -> Result<()> {
        verify_round_trip(&converter, samples)
            .map_err(|source| Error::Converter { type_id, source })?;
        self.bind(type_id, converter)
    }

    pub fn get(&self, type_id: TypeId) -> Option<Arc<dyn Converter>> {
        self.bindings.load().get(&type_id).cloned()
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.bindings.load().contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.bindings.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.load().is_empty()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("bindings", &self.len())
            .finish()
    }
}
