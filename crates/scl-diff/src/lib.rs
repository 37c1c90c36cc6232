//! Structural diff engine for SCL logical-node types.
//!
//! Compares a "specified" logical-node type (ours) against an "instantiated"
//! one (theirs), following every member's type reference through a
//! [`TypeRegistry`](scl_registry::TypeRegistry) and producing a diff tree that
//! mirrors the ours-side hierarchy.
//!
//! The comparison is directional: members present only on the theirs side are
//! never reported. It looks at structural presence only, never at values,
//! cardinalities, or ordering.
//!
//! # Key Types
//!
//! - [`TypeDiffer`] -- compares two roots, each resolved through its own registry
//! - [`DiffResult`] / [`DiffNode`] / [`DiffKind`] -- the diff tree
//! - [`DiffConfig`] -- recursion limits
//! - [`LNodeReport`] -- batch comparison of every linked `LNode` in a document

pub mod config;
pub mod error;
pub mod report;
pub mod type_diff;

pub use config::DiffConfig;
pub use error::{CompareResult, DiffError};
pub use report::{compare_lnodes, LNodeComparison, LNodeReport};
pub use type_diff::{compare_types, DiffKind, DiffNode, DiffResult, NodeStatus, Side, TypeDiffer};
