use thiserror::Error;

/// Errors produced by type model operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown member tag: {0}")]
    UnknownMemberTag(String),

    #[error("unknown template tag: {0}")]
    UnknownTemplateTag(String),
}
