//! Model and view blocks.

use super::{PrismaGeneratorError, PrismaSchemaGenerator};
use crate::model::ast::Model;
use crate::prisma::builder::PrismaSchema;

impl PrismaSchemaGenerator<'_> {
    pub(super) fn generate_model(
        &mut self,
        prisma: &mut PrismaSchema,
        decl: &Model,
    ) -> Result<(), PrismaGeneratorError> {
        if decl.is_abstract {
            log::debug!("Skipping abstract model {}", decl.name);
            return Ok(());
        }

        let handle = if decl.is_view {
            prisma.add_view(&decl.name)
        } else {
            prisma.add_model(&decl.name)
        };

        for field in &decl.fields {
            if self.should_emit_field(decl, field) {
                let translated = self.make_model_field(decl, field)?;
                prisma.model_mut(handle).fields.push(translated);
            } else {
                log::debug!(
                    "Omitting {}.{} stored on delegate base",
                    decl.name,
                    field.name
                );
            }
        }

        let attributes = self.translate_attributes(&decl.attributes)?;
        let docs = self.attribute_docs(&decl.attributes);
        let block = prisma.model_mut(handle);
        for attr in attributes {
            block.add_attribute(attr);
        }
        for doc in docs {
            block.add_comment(doc);
        }
        for comment in &decl.comments {
            block.add_comment(comment.clone());
        }

        self.generate_delegate_relation_for_base(prisma, handle, decl);
        self.generate_delegate_relation_for_concrete(prisma, handle, decl);
        self.expand_polymorphic_relations(prisma, handle, decl)?;
        self.name_relations_inherited_from_delegate(prisma, handle, decl);

        Ok(())
    }
}
