//! Logical-mode widening of relations that point at a delegate model.
//!
//! For a field `owner.asset: Asset?` with concrete descendants `Video` and
//! `Image`, the owner gets `delegate_aux_Owner_asset_Video Video?` and
//! `delegate_aux_Owner_asset_Image Image?`. Foreign keys backing the
//! original relation are replicated per descendant along with any composite
//! unique constraint that includes them.

use super::{PrismaGeneratorError, PrismaSchemaGenerator};
use crate::config::GenerationMode;
use crate::model::ast::{Expression, Field, Model};
use crate::prisma::builder::{
    Attribute, AttributeArg, AttributeArgValue, ModelFieldType, ModelHandle, PrismaSchema,
};

impl PrismaSchemaGenerator<'_> {
    pub(super) fn expand_polymorphic_relations(
        &mut self,
        prisma: &mut PrismaSchema,
        handle: ModelHandle,
        decl: &Model,
    ) -> Result<(), PrismaGeneratorError> {
        if self.mode != GenerationMode::Logical {
            return Ok(());
        }

        let schema = self.schema;
        for field in &decl.fields {
            // widened once, on the delegate that declares it
            if schema.inherited_from_delegate(decl, field).is_some() {
                continue;
            }
            let Some(target) = schema.relation_target(field).filter(|m| m.is_delegate) else {
                continue;
            };

            for concrete in schema.descendants(target) {
                let aux_name = self
                    .names
                    .aux_name(&format!("{}_{}_{}", decl.name, field.name, concrete.name));
                prisma.model_mut(handle).add_field(
                    aux_name.clone(),
                    ModelFieldType::new(&concrete.name, field.ty.array, field.ty.optional),
                    vec![],
                    vec![],
                );

                let relation = self.widened_relation(prisma, handle, decl, field, concrete, &aux_name)?;
                if let Some(added) = prisma.model_mut(handle).field_mut(&aux_name) {
                    added.attributes.push(relation);
                }
            }
        }
        Ok(())
    }

    /// Relation attribute of one widened field
    fn widened_relation(
        &mut self,
        prisma: &mut PrismaSchema,
        handle: ModelHandle,
        decl: &Model,
        field: &Field,
        concrete: &Model,
        aux_name: &str,
    ) -> Result<Attribute, PrismaGeneratorError> {
        let Some(relation) = field.attribute("@relation") else {
            return Ok(Attribute::named(
                "@relation",
                vec![AttributeArg::positional(AttributeArgValue::string(aux_name))],
            ));
        };
        if relation.arg("fields").is_none() {
            return self.make_attribute(relation);
        }

        let schema = self.schema;
        let pairs = schema.relation_key_pairs(decl, field);
        let mut foreign_keys = Vec::with_capacity(pairs.len());
        for (foreign_key, _) in &pairs {
            foreign_keys.push(self.replicate_foreign_key(prisma, handle, decl, concrete, foreign_key)?);
        }

        let relation_name = relation
            .arg("name")
            .and_then(Expression::as_str)
            .unwrap_or(aux_name);
        let mut args = vec![
            AttributeArg::positional(AttributeArgValue::string(relation_name)),
            AttributeArg::named("fields", AttributeArgValue::field_refs(foreign_keys)),
            AttributeArg::named(
                "references",
                AttributeArgValue::field_refs(pairs.iter().map(|(_, id)| id.name.as_str())),
            ),
        ];
        if schema.supports_named_constraints() {
            args.push(AttributeArg::named(
                "map",
                AttributeArgValue::string(format!("{}_fk", aux_name)),
            ));
        }
        Ok(Attribute::named("@relation", args))
    }

    /// Copy a foreign key for one concrete descendant and return the copy's name
    fn replicate_foreign_key(
        &mut self,
        prisma: &mut PrismaSchema,
        handle: ModelHandle,
        decl: &Model,
        concrete: &Model,
        foreign_key: &Field,
    ) -> Result<String, PrismaGeneratorError> {
        let mut added = self.make_model_field(decl, foreign_key)?;
        added.name = self
            .names
            .aux_name(&format!("{}_{}_{}", decl.name, foreign_key.name, concrete.name));

        let constraint = format!("{}_unique", added.name);
        if let Some(unique) = added.attribute_mut("@unique") {
            match unique.arg_mut("map") {
                Some(map) => map.value = AttributeArgValue::string(constraint),
                None => unique
                    .args
                    .push(AttributeArg::named("map", AttributeArgValue::string(constraint))),
            }
        }

        let name = added.name.clone();
        let block = prisma.model_mut(handle);
        block.fields.push(added);

        for unique in decl.attributes_named("@@unique") {
            let Some(Expression::Array(items)) = unique.arg("fields") else {
                continue;
            };
            let references_key = items
                .iter()
                .any(|item| matches!(item, Expression::Reference(r) if r.target == foreign_key.name));
            if !references_key {
                continue;
            }

            let fields = items.iter().filter_map(|item| match item {
                Expression::Reference(r) if r.target == foreign_key.name => Some(name.as_str()),
                Expression::Reference(r) => Some(r.target.as_str()),
                _ => None,
            });
            block.add_attribute(Attribute::named(
                "@@unique",
                vec![AttributeArg::positional(AttributeArgValue::field_refs(fields))],
            ));
        }

        Ok(name)
    }
}
