//! Logical-mode relation names for relations inherited through delegates.
//!
//! Every concrete model repeats the relations of its delegate bases, so the
//! related model would see several unnamed relations back to the same
//! field. Each inherited copy gets a name built from the related model, the
//! opposite field and the inheriting model, the same name the polymorphic
//! widening gives the matching field on the other side.

use super::PrismaSchemaGenerator;
use crate::config::GenerationMode;
use crate::model::ast::Model;
use crate::prisma::builder::{
    Attribute, AttributeArg, AttributeArgValue, ModelHandle, PrismaSchema,
};

impl PrismaSchemaGenerator<'_> {
    pub(super) fn name_relations_inherited_from_delegate(
        &mut self,
        prisma: &mut PrismaSchema,
        handle: ModelHandle,
        decl: &Model,
    ) {
        if self.mode != GenerationMode::Logical {
            return;
        }

        let schema = self.schema;
        for field in &decl.fields {
            let Some(related) = schema.relation_target(field) else {
                continue;
            };
            if field.inherited_from.is_none() {
                continue;
            }

            // inherited_from may name an abstract model above the delegate
            let Some((base, base_field)) =
                schema.find_up_matching_field_from_delegate(decl, &field.name)
            else {
                continue;
            };
            if prisma.model(handle).field(&field.name).is_none() {
                continue;
            }
            let Some(opposite) = schema.opposite_relation_field(related, base, base_field) else {
                log::debug!(
                    "No opposite relation for {}.{} on {}",
                    decl.name,
                    field.name,
                    related.name
                );
                continue;
            };

            let relation_name = self
                .names
                .aux_name(&format!("{}_{}_{}", related.name, opposite.name, decl.name));
            let name_arg = AttributeArg::positional(AttributeArgValue::string(relation_name));

            let Some(target) = prisma.model_mut(handle).field_mut(&field.name) else {
                continue;
            };
            match field.attribute("@relation") {
                Some(relation) if relation.arg("name").is_some() => {}
                Some(_) => {
                    if let Some(translated) = target.attribute_mut("@relation") {
                        translated.args.insert(0, name_arg);
                    }
                }
                None => target
                    .attributes
                    .push(Attribute::named("@relation", vec![name_arg])),
            }
        }
    }
}
