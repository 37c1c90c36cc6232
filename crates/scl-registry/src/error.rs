use scl_types::TypeError;

/// Errors from loading an SCL document into a registry.
///
/// Resolution itself never fails; these only surface while building.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(String),

    /// A template or member element lacks a mandatory attribute.
    #[error("<{element}> is missing mandatory attribute `{attribute}`")]
    MissingAttribute { element: String, attribute: String },

    /// An element tag could not be mapped onto the type model.
    #[error("type model error: {0}")]
    Type(#[from] TypeError),

    /// I/O error while reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
