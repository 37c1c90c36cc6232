//! Error types for the diff crate.
//!
//! Unresolved types, missing counterparts and nested differences are data in
//! the diff tree, not errors. Only a malformed type graph aborts a comparison.

use scl_types::TypeKey;

use crate::type_diff::Side;

/// Errors that abort a type comparison.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// A type template was reached again while already on the current path.
    #[error("cyclic type graph: {key} revisited on the {side} side")]
    CyclicTypeGraph { side: Side, key: TypeKey },

    /// Type nesting exceeded the configured limit.
    #[error("type nesting exceeds {max_depth} levels at member `{member}`")]
    DepthExceeded { max_depth: usize, member: String },
}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, DiffError>;
