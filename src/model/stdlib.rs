//! Built-in attribute declarations.
//!
//! `prisma: true` marks declarations that belong to the target schema and are
//! translated; everything else (access policies, validation, delegate marker)
//! is kept only as documentation in the generated file.

use super::ast::AttributeDecl;

/// Model-level verbatim injection marker
pub const MODEL_PASSTHROUGH_ATTR: &str = "@@prisma.passthrough";

/// Field-level verbatim injection marker
pub const FIELD_PASSTHROUGH_ATTR: &str = "@prisma.passthrough";

pub fn builtin_attributes() -> Vec<AttributeDecl> {
    vec![
        // field level, target schema
        AttributeDecl::new("@id", true, &["map", "length", "sort", "clustered"]),
        AttributeDecl::new("@default", true, &["value", "map"]),
        AttributeDecl::new("@unique", true, &["map", "length", "sort", "clustered"]),
        AttributeDecl::new(
            "@relation",
            true,
            &["name", "fields", "references", "onDelete", "onUpdate", "map"],
        ),
        AttributeDecl::new("@map", true, &["name"]),
        AttributeDecl::new("@updatedAt", true, &[]),
        AttributeDecl::new("@ignore", true, &[]),
        AttributeDecl::new("@db.Text", true, &[]),
        AttributeDecl::new("@db.VarChar", true, &["x"]),
        AttributeDecl::new("@db.Uuid", true, &[]),
        // model level, target schema
        AttributeDecl::new(
            "@@id",
            true,
            &["fields", "name", "map", "length", "sort", "clustered"],
        ),
        AttributeDecl::new(
            "@@unique",
            true,
            &["fields", "name", "map", "length", "sort", "clustered"],
        ),
        AttributeDecl::new(
            "@@index",
            true,
            &["fields", "name", "map", "length", "sort", "clustered", "type"],
        ),
        AttributeDecl::new("@@fulltext", true, &["fields", "map"]),
        AttributeDecl::new("@@map", true, &["name"]),
        AttributeDecl::new("@@ignore", true, &[]),
        AttributeDecl::new("@@schema", true, &["name"]),
        // verbatim injection
        AttributeDecl::new(MODEL_PASSTHROUGH_ATTR, false, &["text"]),
        AttributeDecl::new(FIELD_PASSTHROUGH_ATTR, false, &["text"]),
        // access policies and validation
        AttributeDecl::new("@@allow", false, &["operation", "condition"]),
        AttributeDecl::new("@@deny", false, &["operation", "condition"]),
        AttributeDecl::new("@allow", false, &["operation", "condition", "override"]),
        AttributeDecl::new("@deny", false, &["operation", "condition"]),
        AttributeDecl::new("@@validate", false, &["value", "message", "path"]),
        AttributeDecl::new("@@auth", false, &[]),
        AttributeDecl::new("@@delegate", false, &["discriminator"]),
        AttributeDecl::new("@@meta", false, &["name", "value"]),
        AttributeDecl::new("@meta", false, &["name", "value"]),
        AttributeDecl::new("@password", false, &["saltLength", "salt"]),
        AttributeDecl::new("@omit", false, &[]),
        AttributeDecl::new("@email", false, &["message"]),
        AttributeDecl::new("@url", false, &["message"]),
        AttributeDecl::new("@length", false, &["min", "max", "message"]),
        AttributeDecl::new("@regex", false, &["regex", "message"]),
    ]
}
