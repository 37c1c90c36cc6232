//! Foundation types for comparing IEC 61850 SCL type templates.
//!
//! An SCL document keeps its data model in `DataTypeTemplates`: logical-node
//! types own data objects, data objects reference DO types, DO types own
//! sub-objects and data attributes, and so on. Members never embed their
//! substructure; they carry a `type` reference that must be resolved through
//! a registry. Every other crate in the workspace depends on `scl-types`.
//!
//! # Key Types
//!
//! - [`TypedMember`] -- a named `DO`/`SDO`/`DA`/`BDA` with an optional type reference
//! - [`TypeDefinition`] -- a shared type template owning child members
//! - [`TypeKey`] -- `(TemplateKind, id)` lookup key into a registry
//! - [`TypeCategory`] -- struct / enum / undefined classification of a member

pub mod error;
pub mod member;
pub mod template;

pub use error::TypeError;
pub use member::{MemberClass, TypeCategory, TypedMember};
pub use template::{TemplateKind, TypeDefinition, TypeKey};
