//! Field translation.

use super::attribute::{is_default_with_auth, is_prisma_attribute};
use super::{PrismaGeneratorError, PrismaSchemaGenerator};
use crate::config::GenerationMode;
use crate::model::ast::{Field, Model};
use crate::prisma::builder::{
    Attribute, AttributeArg, AttributeArgValue, FunctionCall, ModelField, ModelFieldType,
};

impl PrismaSchemaGenerator<'_> {
    /// Whether `field` of `model` appears in the output at all.
    ///
    /// Physical mode drops columns that live on a delegate base table, except
    /// for identifier fields, which every concrete table repeats.
    pub(super) fn should_emit_field(&self, model: &Model, field: &Field) -> bool {
        if field.inherited_from.is_none() || self.mode == GenerationMode::Logical {
            return true;
        }
        self.schema.inherited_from_delegate(model, field).is_none()
            || self.schema.is_id_field(model, field)
    }

    pub(super) fn make_model_field(
        &self,
        model: &Model,
        field: &Field,
    ) -> Result<ModelField, PrismaGeneratorError> {
        let ty = ModelFieldType::new(
            field_type_name(model, field)?,
            field.ty.array,
            field.ty.optional,
        );

        let drop_inherited_id_default = self.mode == GenerationMode::Physical
            && self.schema.is_id_field(model, field)
            && self.schema.inherited_from_delegate(model, field).is_some();

        let mut attributes = Vec::new();
        for attr in field.attributes.iter().filter(|a| is_prisma_attribute(a)) {
            if is_default_with_auth(attr) {
                continue;
            }
            if drop_inherited_id_default && attr.canonical_name() == Some("@default") {
                continue;
            }
            attributes.push(self.make_attribute(attr)?);
        }

        if self.mode == GenerationMode::Logical && field.attributes.iter().any(is_default_with_auth) {
            attributes.push(dummy_default(field)?);
        }

        let mut documentations = self.attribute_docs(&field.attributes);
        documentations.extend(field.comments.iter().cloned());

        Ok(ModelField {
            name: field.name.clone(),
            ty,
            attributes,
            documentations,
        })
    }
}

/// Scalar name, referenced model/enum name, or `Unsupported("...")`
fn field_type_name(model: &Model, field: &Field) -> Result<String, PrismaGeneratorError> {
    let ty = &field.ty;
    if let Some(scalar) = &ty.scalar {
        return Ok(scalar.clone());
    }
    if let Some(reference) = &ty.reference {
        return Ok(reference.clone());
    }
    match &ty.unsupported {
        Some(native) if !native.is_empty() => Ok(format!("Unsupported(\"{}\")", native)),
        _ => Err(PrismaGeneratorError::UnresolvedFieldType {
            model: model.name.clone(),
            field: field.name.clone(),
        }),
    }
}

/// Placeholder default for a field whose real default needs the current user
fn dummy_default(field: &Field) -> Result<Attribute, PrismaGeneratorError> {
    let value = match field.ty.scalar.as_deref() {
        Some("String") | Some("Bytes") => AttributeArgValue::string(""),
        Some("Int") | Some("BigInt") | Some("Float") | Some("Decimal") => {
            AttributeArgValue::Number("0".to_string())
        }
        Some("Boolean") => AttributeArgValue::Boolean(false),
        Some("DateTime") => AttributeArgValue::FunctionCall(FunctionCall::new("now", vec![])),
        Some("Json") => AttributeArgValue::string("{}"),
        other => {
            let type_name = other
                .or(field.ty.reference.as_deref())
                .unwrap_or("<unknown>");
            return Err(PrismaGeneratorError::UnsupportedDefaultValueType {
                type_name: type_name.to_string(),
            });
        }
    };
    Ok(Attribute::named(
        "@default",
        vec![AttributeArg::positional(value)],
    ))
}
