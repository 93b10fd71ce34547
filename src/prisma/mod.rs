//! Output side of the compiler: the target schema structure, its textual
//! form and the file emitter.

pub mod builder;
pub mod emit;
pub mod render;

pub use builder::{
    Attribute, AttributeArg, AttributeArgValue, FieldReference, FieldReferenceArg, FunctionCall,
    ModelFieldType, PrismaSchema, SimpleField,
};
pub use emit::{emit, render_schema_file, BANNER};
