//! Error types for dashboard document handling

/// Errors while parsing a dashboard document
///
/// All variants are fatal to the whole parse: by the time a card could
/// be constructed from malformed input, nothing has been constructed.
/// Unknown card types and unknown fields are not errors.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Source text is not valid YAML
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// Source text is not valid JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Source parsed but does not have dashboard shape
    #[error("invalid document structure: {0}")]
    InvalidStructure(String),

    /// Container nesting exceeded the configured safety limit
    #[error("card nesting exceeds depth limit of {limit}")]
    DepthExceeded {
        /// The limit that was exceeded
        limit: usize,
    },
}

/// Errors while serializing a dashboard back to text
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// YAML emission failed
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON emission failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
