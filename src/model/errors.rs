//! # Model Loading Error Types
//!
//! Errors raised while reading an input document and running the
//! resolution pass over it. The document itself is assumed to come from a
//! validating parser, so these cover structural breakage only: unreadable
//! files, unknown super types, and cyclic inheritance or alias chains.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    #[error("Failed to read model file: {error}")]
    ConfigReadError { error: String },
    #[error("Failed to parse model document: {error}")]
    ConfigParseError { error: String },
    #[error("Model `{model}` extends unknown model `{super_type}`")]
    UnknownSuperType { model: String, super_type: String },
    #[error("Inheritance cycle detected at model `{model}`")]
    InheritanceCycle { model: String },
    #[error("Attribute `{attribute}` is an alias of unknown attribute `{alias_of}`")]
    UnknownAttributeAlias { attribute: String, alias_of: String },
    #[error("Attribute alias cycle detected at `{attribute}`")]
    AttributeAliasCycle { attribute: String },
    #[error("Invalid model document: {message}")]
    InvalidModel { message: String },
}

impl ModelError {
    /// Create an InvalidModel error with context information
    pub fn invalid_model_with_context(
        message: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        let msg = message.into();
        let ctx = context.into();
        ModelError::InvalidModel {
            message: format!("{}\n  Context: {}", msg, ctx),
        }
    }
}
