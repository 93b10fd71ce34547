//! Input side of the compiler: the validated domain model, attribute
//! resolution and the inheritance/relation queries over it.

pub mod ast;
pub mod errors;
pub mod graph;
pub mod loader;
pub mod printer;
pub mod resolve;
pub mod stdlib;

pub use ast::{
    Attribute, AttributeArg, Declaration, Expression, Field, FieldType, Literal, Model,
    SchemaDocument,
};
pub use errors::ModelError;
pub use graph::Schema;
pub use loader::{schema_from_json_str, schema_from_yaml_str};
pub use resolve::resolve_document;
