//! Attribute and attribute-argument translation.

use super::{PrismaGeneratorError, PrismaSchemaGenerator};
use crate::model::ast::{self, Expression, Invocation, Literal};
use crate::model::stdlib::{FIELD_PASSTHROUGH_ATTR, MODEL_PASSTHROUGH_ATTR};
use crate::prisma::builder::{
    Attribute, AttributeArg, AttributeArgValue, FieldReference, FieldReferenceArg, FunctionCall,
};

/// Belongs in the target schema: tagged as such, or one of the verbatim markers
pub(super) fn is_prisma_attribute(attr: &ast::Attribute) -> bool {
    attr.resolved.as_ref().is_some_and(|r| {
        r.prisma || r.name == MODEL_PASSTHROUGH_ATTR || r.name == FIELD_PASSTHROUGH_ATTR
    })
}

/// `@default(...)` whose value depends on the current user; handled above
/// the ORM, so never emitted as is
pub(super) fn is_default_with_auth(attr: &ast::Attribute) -> bool {
    attr.canonical_name() == Some("@default")
        && attr.arg("value").is_some_and(|v| v.invokes("auth"))
}

impl PrismaSchemaGenerator<'_> {
    /// Target attributes for every target-schema usage in `attrs`, in order
    pub(super) fn translate_attributes(
        &self,
        attrs: &[ast::Attribute],
    ) -> Result<Vec<Attribute>, PrismaGeneratorError> {
        attrs
            .iter()
            .filter(|a| is_prisma_attribute(a))
            .map(|a| self.make_attribute(a))
            .collect()
    }

    /// `/// <source>` lines for resolved attributes that stay out of the target schema
    pub(super) fn attribute_docs(&self, attrs: &[ast::Attribute]) -> Vec<String> {
        attrs
            .iter()
            .filter(|a| a.resolved.is_some() && !is_prisma_attribute(a))
            .map(|a| format!("/// {}", self.doc_printer.attribute(a)))
            .collect()
    }

    pub(super) fn make_attribute(
        &self,
        attr: &ast::Attribute,
    ) -> Result<Attribute, PrismaGeneratorError> {
        let name = attr.canonical_name().unwrap_or(&attr.name);

        if name == MODEL_PASSTHROUGH_ATTR || name == FIELD_PASSTHROUGH_ATTR {
            return match attr.args.first().and_then(|a| a.value.as_str()) {
                Some(text) if !text.is_empty() => Ok(Attribute::PassThrough(text.to_string())),
                _ => Err(PrismaGeneratorError::InvalidPassthroughArguments {
                    attribute: name.to_string(),
                }),
            };
        }

        let args = attr
            .args
            .iter()
            .map(|arg| {
                Ok(AttributeArg {
                    name: arg.name.clone(),
                    value: self.make_attribute_arg_value(&arg.value)?,
                })
            })
            .collect::<Result<Vec<_>, PrismaGeneratorError>>()?;
        Ok(Attribute::named(name, args))
    }

    pub(super) fn make_attribute_arg_value(
        &self,
        expr: &Expression,
    ) -> Result<AttributeArgValue, PrismaGeneratorError> {
        match expr {
            Expression::Literal(Literal::String(s)) => Ok(AttributeArgValue::String(s.clone())),
            Expression::Literal(Literal::Number(n)) => Ok(AttributeArgValue::Number(n.to_string())),
            Expression::Literal(Literal::Boolean(b)) => Ok(AttributeArgValue::Boolean(*b)),
            Expression::Array(items) => Ok(AttributeArgValue::Array(
                items
                    .iter()
                    .map(|i| self.make_attribute_arg_value(i))
                    .collect::<Result<_, _>>()?,
            )),
            Expression::Reference(r) => Ok(AttributeArgValue::FieldReference(FieldReference {
                field: r.target.clone(),
                args: r
                    .args
                    .iter()
                    .map(|a| FieldReferenceArg {
                        name: a.name.clone(),
                        value: self.arg_printer.expression(&a.value),
                    })
                    .collect(),
            })),
            Expression::Invocation(inv) => {
                Ok(AttributeArgValue::FunctionCall(self.make_function_call(inv)?))
            }
            Expression::Member(_)
            | Expression::Unary(_)
            | Expression::Binary(_)
            | Expression::This
            | Expression::Null => Err(PrismaGeneratorError::unsupported_expression(expr.kind())),
        }
    }

    /// Function calls only take literal or `null` arguments
    pub(super) fn make_function_call(
        &self,
        inv: &Invocation,
    ) -> Result<FunctionCall, PrismaGeneratorError> {
        let args = inv
            .args
            .iter()
            .map(|arg| match &arg.value {
                Expression::Literal(Literal::String(s)) => Ok(format!("\"{}\"", s)),
                Expression::Literal(lit) => Ok(lit.to_string()),
                Expression::Null => Ok("null".to_string()),
                other => Err(PrismaGeneratorError::unsupported_expression(other.kind())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FunctionCall::new(&inv.function, args))
    }
}
