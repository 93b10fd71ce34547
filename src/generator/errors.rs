//! # Prisma Generation Error Types
//!
//! Every variant aborts the whole compile. They point at a defect in the
//! upstream validator or in the compiler itself, never at a transient
//! condition, so callers should not retry.

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PrismaGeneratorError {
    #[error("Output file is not specified")]
    MissingOutputPath,
    #[error("Field type is not resolved: {model}.{field}")]
    UnresolvedFieldType { model: String, field: String },
    #[error("Unsupported attribute argument expression type: {kind}")]
    UnsupportedAttributeArgExpression { kind: String },
    #[error("Unsupported field type with default value: {type_name}")]
    UnsupportedDefaultValueType { type_name: String },
    #[error("Invalid arguments for {attribute} attribute")]
    InvalidPassthroughArguments { attribute: String },
    #[error("Option \"previewFeatures\" of generator `{generator}` must be an array")]
    InvalidPreviewFeatures { generator: String },
    #[error("Failed to write {path}: {error}")]
    WriteFailed { path: String, error: String },
}

impl PrismaGeneratorError {
    pub fn write_failed(path: &Path, error: std::io::Error) -> Self {
        PrismaGeneratorError::WriteFailed {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    pub fn unsupported_expression(kind: &str) -> Self {
        PrismaGeneratorError::UnsupportedAttributeArgExpression {
            kind: kind.to_string(),
        }
    }
}
