//! Symbol resolution pass.
//!
//! Runs once over a freshly loaded [`SchemaDocument`] before any translation:
//!
//! 1. every attribute usage is bound to its canonical declaration (alias
//!    chains are followed) and every argument to the parameter it fills;
//! 2. unless the document is already flattened, fields and inheritable
//!    model attributes of super types are merged into their sub models.
//!
//! The result is an immutable [`Schema`].

use super::ast::{
    Attribute, AttributeDecl, Declaration, Field, Model, ResolvedAttribute, SchemaDocument,
};
use super::errors::ModelError;
use super::graph::Schema;
use super::stdlib::builtin_attributes;
use std::collections::{HashMap, HashSet};

/// Never inherited by sub models
const UNINHERITABLE_ATTRIBUTES: &[&str] = &["@@delegate", "@@map"];

/// Not inherited from delegate bases; the constraint lives on the base table
const UNINHERITABLE_FROM_DELEGATE_ATTRIBUTES: &[&str] = &["@@unique", "@@index", "@@fulltext"];

/// Attribute declarations by name
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    decls: HashMap<String, AttributeDecl>,
}

impl AttributeRegistry {
    pub fn with_builtins() -> Self {
        let mut registry = AttributeRegistry::default();
        for decl in builtin_attributes() {
            registry.register(decl);
        }
        registry
    }

    /// Add or replace a declaration
    pub fn register(&mut self, decl: AttributeDecl) {
        self.decls.insert(decl.name.clone(), decl);
    }

    /// Follow alias chains to the canonical declaration.
    ///
    /// Returns `Ok(None)` when `name` is not declared at all.
    pub fn canonical(&self, name: &str) -> Result<Option<&AttributeDecl>, ModelError> {
        let Some(mut decl) = self.decls.get(name) else {
            return Ok(None);
        };

        let mut visited = HashSet::new();
        while let Some(target) = &decl.alias_of {
            if !visited.insert(decl.name.as_str()) {
                return Err(ModelError::AttributeAliasCycle {
                    attribute: name.to_string(),
                });
            }
            decl = self
                .decls
                .get(target)
                .ok_or_else(|| ModelError::UnknownAttributeAlias {
                    attribute: decl.name.clone(),
                    alias_of: target.clone(),
                })?;
        }

        Ok(Some(decl))
    }

    /// Bind an attribute usage to its declaration and its arguments to parameters
    pub fn resolve_attribute(&self, attr: &mut Attribute) -> Result<(), ModelError> {
        let Some(decl) = self.canonical(&attr.name)? else {
            log::debug!("Attribute `{}` has no declaration, leaving unresolved", attr.name);
            return Ok(());
        };

        let mut positional = decl.params.iter();
        for arg in &mut attr.args {
            arg.param = match &arg.name {
                Some(name) => Some(name.clone()),
                None => positional.next().cloned(),
            };
        }

        attr.resolved = Some(ResolvedAttribute {
            name: decl.name.clone(),
            prisma: decl.prisma,
        });
        Ok(())
    }

    fn resolve_all(&self, attrs: &mut [Attribute]) -> Result<(), ModelError> {
        for attr in attrs {
            self.resolve_attribute(attr)?;
        }
        Ok(())
    }

    fn resolve_declaration(&self, decl: &mut Declaration) -> Result<(), ModelError> {
        match decl {
            Declaration::DataSource(_) | Declaration::Generator(_) => Ok(()),
            Declaration::Enum(e) => {
                self.resolve_all(&mut e.attributes)?;
                for field in &mut e.fields {
                    self.resolve_all(&mut field.attributes)?;
                }
                Ok(())
            }
            Declaration::Model(m) => {
                self.resolve_all(&mut m.attributes)?;
                for field in &mut m.fields {
                    self.resolve_all(&mut field.attributes)?;
                }
                Ok(())
            }
        }
    }
}

/// Resolve a loaded document into a [`Schema`]
pub fn resolve_document(doc: SchemaDocument) -> Result<Schema, ModelError> {
    let mut registry = AttributeRegistry::with_builtins();
    for decl in doc.attributes {
        registry.register(decl);
    }

    let mut declarations = doc.declarations;
    for decl in &mut declarations {
        registry.resolve_declaration(decl)?;
    }

    check_model_names(&declarations)?;

    if doc.flattened {
        check_super_types(&declarations)?;
    } else {
        merge_inheritance(&mut declarations)?;
    }

    Ok(Schema::new(declarations))
}

fn check_model_names(declarations: &[Declaration]) -> Result<(), ModelError> {
    let mut seen = HashSet::new();
    for decl in declarations {
        if let Declaration::Model(m) = decl {
            if !seen.insert(m.name.as_str()) {
                return Err(ModelError::invalid_model_with_context(
                    format!("Duplicate model name: {}", m.name),
                    "While resolving model declarations",
                ));
            }
        }
    }
    Ok(())
}

fn check_super_types(declarations: &[Declaration]) -> Result<(), ModelError> {
    let names: HashSet<&str> = models(declarations).map(|m| m.name.as_str()).collect();
    for model in models(declarations) {
        for super_type in &model.super_types {
            if !names.contains(super_type.as_str()) {
                return Err(ModelError::UnknownSuperType {
                    model: model.name.clone(),
                    super_type: super_type.clone(),
                });
            }
        }
    }
    Ok(())
}

fn models(declarations: &[Declaration]) -> impl Iterator<Item = &Model> {
    declarations.iter().filter_map(|d| match d {
        Declaration::Model(m) => Some(m),
        _ => None,
    })
}

/// Merge super type fields and attributes into every sub model
fn merge_inheritance(declarations: &mut [Declaration]) -> Result<(), ModelError> {
    let originals: HashMap<String, Model> = models(declarations)
        .map(|m| (m.name.clone(), m.clone()))
        .collect();

    let mut memo = HashMap::new();
    let mut visiting = HashSet::new();

    for decl in declarations.iter_mut() {
        if let Declaration::Model(model) = decl {
            if model.super_types.is_empty() {
                continue;
            }
            let name = model.name.clone();
            *model = merged_model(&name, &originals, &mut memo, &mut visiting)?;
        }
    }
    Ok(())
}

fn merged_model(
    name: &str,
    originals: &HashMap<String, Model>,
    memo: &mut HashMap<String, Model>,
    visiting: &mut HashSet<String>,
) -> Result<Model, ModelError> {
    if let Some(done) = memo.get(name) {
        return Ok(done.clone());
    }
    let Some(original) = originals.get(name) else {
        return Err(ModelError::invalid_model_with_context(
            format!("Unknown model: {}", name),
            "While merging inherited fields",
        ));
    };
    if !visiting.insert(name.to_string()) {
        return Err(ModelError::InheritanceCycle {
            model: name.to_string(),
        });
    }

    let mut inherited_fields = Vec::new();
    let mut inherited_attributes = Vec::new();

    for base_name in &original.super_types {
        if !originals.contains_key(base_name) {
            return Err(ModelError::UnknownSuperType {
                model: original.name.clone(),
                super_type: base_name.clone(),
            });
        }
        let base = merged_model(base_name, originals, memo, visiting)?;

        for field in &base.fields {
            let declared = original.field(&field.name).is_some()
                || inherited_fields.iter().any(|f: &Field| f.name == field.name);
            if declared {
                continue;
            }
            let mut field = field.clone();
            if field.inherited_from.is_none() {
                field.inherited_from = Some(base.name.clone());
            }
            inherited_fields.push(field);
        }

        for attr in &base.attributes {
            if is_inheritable(attr, &base) {
                inherited_attributes.push(attr.clone());
            }
        }
    }

    let mut merged = original.clone();
    inherited_fields.append(&mut merged.fields);
    merged.fields = inherited_fields;
    merged.attributes.append(&mut inherited_attributes);

    visiting.remove(name);
    memo.insert(name.to_string(), merged.clone());
    Ok(merged)
}

fn is_inheritable(attr: &Attribute, base: &Model) -> bool {
    let Some(name) = attr.canonical_name() else {
        return true;
    };
    if UNINHERITABLE_ATTRIBUTES.contains(&name) {
        return false;
    }
    !(base.is_delegate && UNINHERITABLE_FROM_DELEGATE_ATTRIBUTES.contains(&name))
}
