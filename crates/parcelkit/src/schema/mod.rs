// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record schemas: type identifiers, field descriptors and the registry that
//! compiles and caches them.
//!
//! # Example
//!
//! ```rust
//! use parcelkit::schema::{FieldType, SchemaBuilder, SchemaRegistry};
//!
//! let registry = SchemaRegistry::new();
//! let schema = registry
//!     .compile_schema(
//!         SchemaBuilder::new("Node")
//!             .field("value", FieldType::Int32)
//!             .field("children", FieldType::list(FieldType::nested("Node")))
//!             .build(),
//!     )
//!     .unwrap();
//! assert_eq!(schema.fields()[1].ordinal, 1);
//! ```

mod builder;
mod descriptor;
mod registry;
mod type_id;

pub use builder::{FieldSpec, RecordDefinition, SchemaBuilder};
pub use descriptor::{FieldDescriptor, FieldType, TypeRef, TypeSchema};
pub use registry::SchemaRegistry;
pub use type_id::TypeId;
