//! Reading input documents from disk or memory.
//!
//! YAML and JSON share the same shape; the file extension picks the parser
//! (`.json` is JSON, everything else is YAML).

use super::ast::SchemaDocument;
use super::errors::ModelError;
use super::graph::Schema;
use super::resolve::resolve_document;
use std::fs;
use std::path::Path;

impl SchemaDocument {
    /// Load a document from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let contents = read(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Parse a document from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ModelError> {
        serde_yaml::from_str(yaml).map_err(|e| ModelError::ConfigParseError {
            error: e.to_string(),
        })
    }

    /// Parse a document from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json).map_err(|e| ModelError::ConfigParseError {
            error: e.to_string(),
        })
    }

    /// Load a document, choosing the parser by file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let contents = read(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        log::debug!(
            "Parsing {} as {}",
            path.display(),
            if is_json { "JSON" } else { "YAML" }
        );
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }
}

impl Schema {
    /// Load and resolve a schema from a YAML or JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        resolve_document(SchemaDocument::from_path(path)?)
    }
}

/// Parse and resolve a YAML document
pub fn schema_from_yaml_str(yaml: &str) -> Result<Schema, ModelError> {
    resolve_document(SchemaDocument::from_yaml_str(yaml)?)
}

/// Parse and resolve a JSON document
pub fn schema_from_json_str(json: &str) -> Result<Schema, ModelError> {
    resolve_document(SchemaDocument::from_json_str(json)?)
}

fn read(path: &Path) -> Result<String, ModelError> {
    fs::read_to_string(path).map_err(|e| ModelError::ConfigReadError {
        error: format!("{}: {}", path.display(), e),
    })
}
