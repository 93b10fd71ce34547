//! Datasource, generator and enum blocks.

use super::{PrismaGeneratorError, PrismaSchemaGenerator};
use crate::model::ast::{
    ConfigArrayItem, ConfigExpr, ConfigInvocation, DataSource, EnumDecl, GeneratorDecl, Literal,
};
use crate::prisma::builder::{PrismaSchema, SimpleField};

const CLIENT_GENERATOR_PROVIDER: &str = "prisma-client-js";

impl PrismaSchemaGenerator<'_> {
    pub(super) fn generate_data_source(
        &self,
        prisma: &mut PrismaSchema,
        ds: &DataSource,
    ) -> Result<(), PrismaGeneratorError> {
        let fields = self.config_fields(&ds.fields)?;
        prisma.add_data_source(&ds.name, fields);
        Ok(())
    }

    pub(super) fn generate_generator(
        &self,
        prisma: &mut PrismaSchema,
        decl: &GeneratorDecl,
    ) -> Result<(), PrismaGeneratorError> {
        let fields = self.config_fields(&decl.fields)?;
        let handle = prisma.add_generator(&decl.name, fields);
        let block = prisma.generator_mut(handle);

        let client_provider = literal_text(&Literal::String(CLIENT_GENERATOR_PROVIDER.to_string()));
        if block.field("provider").map(|f| f.text.as_str()) != Some(client_provider.as_str()) {
            return Ok(());
        }

        if self.tool_version().is_some() {
            let text = block
                .field("previewFeatures")
                .map(|f| f.text.as_str())
                .unwrap_or("[]");
            let features = match serde_json::from_str::<serde_json::Value>(text) {
                Ok(serde_json::Value::Array(features)) => features,
                _ => {
                    return Err(PrismaGeneratorError::InvalidPreviewFeatures {
                        generator: decl.name.clone(),
                    })
                }
            };
            if !features.is_empty() {
                block.set_field(
                    "previewFeatures",
                    serde_json::Value::Array(features).to_string(),
                );
            }
        }

        if let Some(output) = &self.config.override_client_output {
            block.set_field("output", literal_text(&Literal::String(output.clone())));
        }
        Ok(())
    }

    fn config_fields(
        &self,
        fields: &[crate::model::ast::ConfigField],
    ) -> Result<Vec<SimpleField>, PrismaGeneratorError> {
        fields
            .iter()
            .map(|f| Ok(SimpleField::new(&f.name, self.config_expr_text(&f.value)?)))
            .collect()
    }

    fn config_expr_text(&self, expr: &ConfigExpr) -> Result<String, PrismaGeneratorError> {
        match expr {
            ConfigExpr::Literal(lit) => Ok(literal_text(lit)),
            ConfigExpr::Invocation(inv) => Ok(self.make_function_call(inv)?.to_string()),
            ConfigExpr::Array(items) => {
                let items: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        ConfigArrayItem::Literal(lit) => literal_text(lit),
                        ConfigArrayItem::Invocation(inv) => config_invocation_text(inv),
                    })
                    .collect();
                Ok(format!("[{}]", items.join(", ")))
            }
        }
    }

    pub(super) fn generate_enum(
        &self,
        prisma: &mut PrismaSchema,
        decl: &EnumDecl,
    ) -> Result<(), PrismaGeneratorError> {
        let handle = prisma.add_enum(&decl.name);

        for field in &decl.fields {
            let attributes = self.translate_attributes(&field.attributes)?;
            let mut docs = self.attribute_docs(&field.attributes);
            docs.extend(field.comments.iter().cloned());
            prisma.enum_mut(handle).add_field(&field.name, attributes, docs);
        }

        let attributes = self.translate_attributes(&decl.attributes)?;
        let block = prisma.enum_mut(handle);
        for attr in attributes {
            block.add_attribute(attr);
        }
        for doc in self.attribute_docs(&decl.attributes) {
            block.add_comment(doc);
        }
        for comment in &decl.comments {
            block.add_comment(comment.clone());
        }
        Ok(())
    }
}

/// Literals are written as JSON
fn literal_text(lit: &Literal) -> String {
    match lit {
        Literal::String(s) => serde_json::Value::String(s.clone()).to_string(),
        Literal::Number(n) => n.to_string(),
        Literal::Boolean(b) => b.to_string(),
    }
}

/// `name(arg: literal, ...)`, or just `name` without arguments
fn config_invocation_text(inv: &ConfigInvocation) -> String {
    if inv.args.is_empty() {
        return inv.name.clone();
    }
    let args: Vec<String> = inv
        .args
        .iter()
        .map(|a| format!("{}: {}", a.name, literal_text(&a.value)))
        .collect();
    format!("{}({})", inv.name, args.join(", "))
}
