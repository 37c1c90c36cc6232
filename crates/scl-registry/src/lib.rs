//! Type registry and document loading for SCL type comparison.
//!
//! Members of an SCL type template reference their substructure by id. This
//! crate owns the lookup side of that indirection: a read-only registry keyed
//! by `(TemplateKind, id)` that is built once per document and then shared by
//! every resolution in a comparison session.
//!
//! # Registries
//!
//! All registries implement the [`TypeRegistry`] trait:
//!
//! - [`InMemoryTypeRegistry`] -- `HashMap`-based, built by the loader or by hand in tests
//!
//! # Documents
//!
//! [`load_scl`] / [`load_scl_file`] parse an SCL file into an [`SclDocument`]:
//! the type registry plus the substation `LNode`s and IED logical nodes needed
//! to pick which two logical-node types to compare.
//!
//! # Design Rules
//!
//! 1. Resolution is a pure read; unresolvable references yield `None`, never an error.
//! 2. The first definition registered for a key wins, like a document-order query.
//! 3. Registries are immutable once a comparison starts.

pub mod document;
pub mod error;
pub mod loader;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use document::{LNodeRef, LnInstance, SclDocument};
pub use error::{RegistryError, RegistryResult};
pub use loader::{load_scl, load_scl_file};
pub use memory::InMemoryTypeRegistry;
pub use traits::TypeRegistry;
