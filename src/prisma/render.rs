//! Textual form of the target schema.
//!
//! Blocks are indented with four spaces and separated by one blank line.
//! Documentation lines are written right above the construct they belong to.

use super::builder::{
    Attribute, AttributeArg, AttributeArgValue, ConfigBlock, EnumBlock, EnumField, FieldReference,
    FieldReferenceArg, FunctionCall, ModelBlock, ModelField, ModelFieldType, NamedAttribute,
    PrismaDeclaration, PrismaSchema,
};
use std::fmt;

const INDENT: &str = "    ";

impl fmt::Display for PrismaSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, decl) in self.declarations().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            write!(f, "{}", decl)?;
        }
        Ok(())
    }
}

impl fmt::Display for PrismaDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrismaDeclaration::DataSource(block) => write_config_block(f, "datasource", block),
            PrismaDeclaration::Generator(block) => write_config_block(f, "generator", block),
            PrismaDeclaration::Model(model) => write!(f, "{}", model),
            PrismaDeclaration::Enum(e) => write!(f, "{}", e),
        }
    }
}

fn write_config_block(f: &mut fmt::Formatter<'_>, keyword: &str, block: &ConfigBlock) -> fmt::Result {
    writeln!(f, "{} {} {{", keyword, block.name)?;
    for field in &block.fields {
        writeln!(f, "{}{} = {}", INDENT, field.name, field.text)?;
    }
    write!(f, "}}")
}

fn write_docs(f: &mut fmt::Formatter<'_>, indent: &str, docs: &[String]) -> fmt::Result {
    for doc in docs {
        writeln!(f, "{}{}", indent, doc)?;
    }
    Ok(())
}

fn write_attribute_section(f: &mut fmt::Formatter<'_>, attributes: &[Attribute]) -> fmt::Result {
    if attributes.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    for attr in attributes {
        writeln!(f, "{}{}", INDENT, attr)?;
    }
    Ok(())
}

impl fmt::Display for ModelBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_docs(f, "", &self.documentations)?;
        let keyword = if self.is_view { "view" } else { "model" };
        writeln!(f, "{} {} {{", keyword, self.name)?;
        for field in &self.fields {
            write!(f, "{}", field)?;
        }
        write_attribute_section(f, &self.attributes)?;
        write!(f, "}}")
    }
}

/// Rendered with its own indentation and trailing newline
impl fmt::Display for ModelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_docs(f, INDENT, &self.documentations)?;
        write!(f, "{}{} {}", INDENT, self.name, self.ty)?;
        write_inline_attributes(f, &self.attributes)?;
        writeln!(f)
    }
}

fn write_inline_attributes(f: &mut fmt::Formatter<'_>, attributes: &[Attribute]) -> fmt::Result {
    for attr in attributes {
        write!(f, " {}", attr)?;
    }
    Ok(())
}

impl fmt::Display for ModelFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.array {
            write!(f, "[]")?;
        }
        if self.optional {
            write!(f, "?")?;
        }
        Ok(())
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Named(named) => write!(f, "{}", named),
            Attribute::PassThrough(text) => write!(f, "{}", text),
        }
    }
}

impl fmt::Display for NamedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "({})", join(&self.args))?;
        }
        Ok(())
    }
}

impl fmt::Display for AttributeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}: {}", name, self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

impl fmt::Display for AttributeArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeArgValue::String(s) => write!(f, "\"{}\"", escape(s)),
            AttributeArgValue::Number(n) => write!(f, "{}", n),
            AttributeArgValue::Boolean(b) => write!(f, "{}", b),
            AttributeArgValue::FieldReference(r) => write!(f, "{}", r),
            AttributeArgValue::FunctionCall(c) => write!(f, "{}", c),
            AttributeArgValue::Array(items) => write!(f, "[{}]", join(items)),
        }
    }
}

impl fmt::Display for FieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field)?;
        if !self.args.is_empty() {
            write!(f, "({})", join(&self.args))?;
        }
        Ok(())
    }
}

impl fmt::Display for FieldReferenceArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}: {}", name, self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.func, self.args.join(", "))
    }
}

impl fmt::Display for EnumBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_docs(f, "", &self.documentations)?;
        writeln!(f, "enum {} {{", self.name)?;
        for field in &self.fields {
            write!(f, "{}", field)?;
        }
        write_attribute_section(f, &self.attributes)?;
        write!(f, "}}")
    }
}

impl fmt::Display for EnumField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_docs(f, INDENT, &self.documentations)?;
        write!(f, "{}{}", INDENT, self.name)?;
        write_inline_attributes(f, &self.attributes)?;
        writeln!(f)
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
