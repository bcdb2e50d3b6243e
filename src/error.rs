use thiserror::Error;

/// Errors that can occur while exporting a manifest.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ManifestError {
    #[error("Duplicate {kind} key '{key}': each {kind} must have a unique key")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("Failed to templatize inputs of step '{step_id}' in workflow '{workflow}': {message}")]
    Templatize {
        workflow: String,
        step_id: String,
        message: String,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialization(String),
}

/// Errors that can occur when converting a raw app description into typed definitions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("Failed to parse app description JSON: {0}")]
    JsonParseError(String),

    #[error("Type reference '{reference}' in '{owner}' does not match any declared custom type")]
    UnknownType { owner: String, reference: String },

    #[error("Custom type '{0}' references itself through its own definition")]
    CyclicType(String),

    #[error("Parameter '{parameter}' in '{owner}' has an invalid schema: {message}")]
    InvalidParameter {
        owner: String,
        parameter: String,
        message: String,
    },
}
