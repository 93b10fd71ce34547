//! Physical-mode links between delegate bases and their concrete tables.
//!
//! A base gets one optional back relation per direct concrete subtype; each
//! concrete model gets one required relation per direct delegate base, keyed
//! on the base's identifier fields and cascading deletes and updates.

use super::PrismaSchemaGenerator;
use crate::config::GenerationMode;
use crate::model::ast::Model;
use crate::prisma::builder::{
    Attribute, AttributeArg, AttributeArgValue, ModelFieldType, ModelHandle, PrismaSchema,
};
use crate::utils::aux_naming::lower_case_first;

impl PrismaSchemaGenerator<'_> {
    pub(super) fn generate_delegate_relation_for_base(
        &mut self,
        prisma: &mut PrismaSchema,
        handle: ModelHandle,
        decl: &Model,
    ) {
        if self.mode != GenerationMode::Physical || !decl.is_delegate {
            return;
        }

        let schema = self.schema;
        for concrete in schema.direct_subtypes(decl) {
            let aux_name = self.names.aux_name(&lower_case_first(&concrete.name));
            prisma.model_mut(handle).add_field(
                aux_name,
                ModelFieldType::new(&concrete.name, false, true),
                vec![],
                vec![],
            );
        }
    }

    pub(super) fn generate_delegate_relation_for_concrete(
        &mut self,
        prisma: &mut PrismaSchema,
        handle: ModelHandle,
        decl: &Model,
    ) {
        if self.mode != GenerationMode::Physical {
            return;
        }

        let schema = self.schema;
        let bases = decl
            .super_types
            .iter()
            .filter_map(|name| schema.model(name))
            .filter(|base| base.is_delegate);

        for base in bases {
            let id_names: Vec<&str> = schema
                .id_fields(base)
                .iter()
                .map(|f| f.name.as_str())
                .collect();
            let aux_name = self.names.aux_name(&lower_case_first(&base.name));

            let mut args = vec![
                AttributeArg::named("fields", AttributeArgValue::field_refs(id_names.clone())),
                AttributeArg::named("references", AttributeArgValue::field_refs(id_names)),
                AttributeArg::named("onDelete", AttributeArgValue::field_ref("Cascade")),
                AttributeArg::named("onUpdate", AttributeArgValue::field_ref("Cascade")),
            ];
            if schema.supports_named_constraints() {
                // every concrete table carries a relation of the same name, so
                // the constraint name includes the owning model
                let constraint = self
                    .names
                    .aux_name(&format!("{}_{}", decl.name, lower_case_first(&base.name)));
                args.push(AttributeArg::named(
                    "map",
                    AttributeArgValue::string(format!("{}_fk", constraint)),
                ));
            }

            prisma.model_mut(handle).add_field(
                aux_name,
                ModelFieldType::new(&base.name, false, false),
                vec![Attribute::named("@relation", args)],
                vec![],
            );
        }
    }
}
