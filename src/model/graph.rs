//! Resolved schema and the inheritance/relation queries the generator needs.
//!
//! The super-type graph is a DAG when the upstream validator did its job.
//! Every upward walk still tracks visited models so a malformed document
//! terminates instead of recursing forever.

use super::ast::{Declaration, Expression, Field, Model};
use std::collections::{HashMap, HashSet};

/// Providers that accept explicit constraint names (`map:` arguments)
pub const PROVIDERS_SUPPORTING_NAMED_CONSTRAINTS: &[&str] = &["postgresql", "mysql", "cockroachdb"];

/// A resolved, read-only declaration graph
#[derive(Debug, Clone, Default)]
pub struct Schema {
    declarations: Vec<Declaration>,
    model_index: HashMap<String, usize>,
}

impl Schema {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        let model_index = declarations
            .iter()
            .enumerate()
            .filter_map(|(i, d)| match d {
                Declaration::Model(m) => Some((m.name.clone(), i)),
                _ => None,
            })
            .collect();
        Schema {
            declarations,
            model_index,
        }
    }

    /// Declarations in source order
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn model(&self, name: &str) -> Option<&Model> {
        match self.declarations.get(*self.model_index.get(name)?)? {
            Declaration::Model(m) => Some(m),
            _ => None,
        }
    }

    /// All models in source order, abstract ones included
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Model(m) => Some(m),
            _ => None,
        })
    }

    /// Provider of the first datasource block
    pub fn provider(&self) -> Option<&str> {
        self.declarations.iter().find_map(|d| match d {
            Declaration::DataSource(ds) => ds.field("provider")?.value.as_str(),
            _ => None,
        })
    }

    pub fn supports_named_constraints(&self) -> bool {
        self.provider()
            .is_some_and(|p| PROVIDERS_SUPPORTING_NAMED_CONSTRAINTS.contains(&p))
    }

    /// The model a relation field points to; `None` for scalar and enum fields
    pub fn relation_target(&self, field: &Field) -> Option<&Model> {
        self.model(field.ty.reference.as_deref()?)
    }

    /// Concrete models listing `base` as a direct super type
    pub fn direct_subtypes<'a>(&'a self, base: &'a Model) -> impl Iterator<Item = &'a Model> {
        self.models().filter(move |m| {
            !m.is_abstract && m.name != base.name && m.super_types.contains(&base.name)
        })
    }

    /// Concrete models inheriting `ancestor` directly or transitively, in source order
    pub fn descendants<'a>(&'a self, ancestor: &'a Model) -> impl Iterator<Item = &'a Model> {
        self.models()
            .filter(move |m| !m.is_abstract && self.is_descendant_of(m, &ancestor.name))
    }

    pub fn is_descendant_of(&self, model: &Model, ancestor: &str) -> bool {
        let mut visited = HashSet::new();
        let mut stack: Vec<&str> = model.super_types.iter().map(String::as_str).collect();
        while let Some(name) = stack.pop() {
            if name == ancestor {
                return true;
            }
            if !visited.insert(name) {
                continue;
            }
            if let Some(base) = self.model(name) {
                stack.extend(base.super_types.iter().map(String::as_str));
            }
        }
        false
    }

    /// All ancestors of `model`, nearest first, each listed once
    pub fn ancestors<'a>(&'a self, model: &'a Model) -> Vec<&'a Model> {
        let mut result: Vec<&Model> = Vec::new();
        let mut queue: Vec<&str> = model.super_types.iter().map(String::as_str).collect();
        let mut i = 0;
        while i < queue.len() {
            let name = queue[i];
            i += 1;
            if result.iter().any(|m| m.name == name) {
                continue;
            }
            if let Some(base) = self.model(name) {
                result.push(base);
                queue.extend(base.super_types.iter().map(String::as_str));
            }
        }
        result
    }

    /// The delegate ancestor a field is stored on, if it was inherited from one.
    ///
    /// The field's `inherited_from` may name an abstract model that sits above
    /// the delegate, so this looks for the furthest delegate ancestor that has a
    /// field of the same name.
    pub fn inherited_from_delegate<'a>(&'a self, model: &'a Model, field: &Field) -> Option<&'a Model> {
        field.inherited_from.as_ref()?;
        self.ancestors(model)
            .into_iter()
            .filter(|base| base.is_delegate && base.field(&field.name).is_some())
            .last()
    }

    /// Walk up from `start` to the closest delegate ancestor that declares
    /// `field_name` itself (rather than inheriting it from a higher delegate).
    pub fn find_up_matching_field_from_delegate<'a>(
        &'a self,
        start: &'a Model,
        field_name: &str,
    ) -> Option<(&'a Model, &'a Field)> {
        let mut visited = HashSet::new();
        self.find_up_matching_field(start, field_name, &mut visited)
    }

    fn find_up_matching_field<'a>(
        &'a self,
        start: &'a Model,
        field_name: &str,
        visited: &mut HashSet<&'a str>,
    ) -> Option<(&'a Model, &'a Field)> {
        for base_name in &start.super_types {
            let Some(base) = self.model(base_name) else {
                continue;
            };
            if !visited.insert(base.name.as_str()) {
                continue;
            }

            if base.is_delegate {
                if let Some(field) = base.field(field_name) {
                    let from_upper_delegate = field
                        .inherited_from
                        .as_deref()
                        .and_then(|n| self.model(n))
                        .is_some_and(|m| m.is_delegate);
                    if !from_upper_delegate {
                        return Some((base, field));
                    }
                }
            }

            if let Some(found) = self.find_up_matching_field(base, field_name, visited) {
                return Some(found);
            }
        }
        None
    }

    /// Relation field on `opposite_model` pointing back at `owner` with the
    /// same relation name as `relation_field`
    pub fn opposite_relation_field<'a>(
        &'a self,
        opposite_model: &'a Model,
        owner: &Model,
        relation_field: &Field,
    ) -> Option<&'a Field> {
        let relation_name = relation_field.relation_name();
        opposite_model.fields.iter().find(|f| {
            f.ty.reference.as_deref() == Some(owner.name.as_str())
                && f.relation_name() == relation_name
        })
    }

    /// Identifier fields: the `@id` field, else the fields of `@@id`
    pub fn id_fields<'a>(&'a self, model: &'a Model) -> Vec<&'a Field> {
        if let Some(field) = model.fields.iter().find(|f| f.has_attribute("@id")) {
            return vec![field];
        }
        model
            .attribute("@@id")
            .map(|attr| referenced_fields(model, attr.arg("fields")))
            .unwrap_or_default()
    }

    /// Whether `field` identifies rows of `model`, falling back to unique
    /// fields when no id is declared
    pub fn is_id_field(&self, model: &Model, field: &Field) -> bool {
        if field.has_attribute("@id") {
            return true;
        }

        let model_level_ids: Vec<&Field> = model
            .attribute("@@id")
            .map(|attr| referenced_fields(model, attr.arg("fields")))
            .unwrap_or_default();
        if model_level_ids.iter().any(|f| f.name == field.name) {
            return true;
        }

        let has_id = model.fields.iter().any(|f| f.has_attribute("@id")) || !model_level_ids.is_empty();
        if has_id {
            return false;
        }

        if let Some(first_unique) = model.fields.iter().find(|f| f.has_attribute("@unique")) {
            return first_unique.name == field.name;
        }

        model
            .attribute("@@unique")
            .map(|attr| referenced_fields(model, attr.arg("fields")))
            .unwrap_or_default()
            .iter()
            .any(|f| f.name == field.name)
    }

    /// `(foreign key, referenced id)` pairs of a relation field's `@relation(fields:, references:)`
    pub fn relation_key_pairs<'a>(&'a self, model: &'a Model, field: &Field) -> Vec<(&'a Field, &'a Field)> {
        let Some(rel) = field.attribute("@relation") else {
            return vec![];
        };
        let Some(target) = self.relation_target(field) else {
            return vec![];
        };

        let foreign_keys = referenced_fields(model, rel.arg("fields"));
        let references = referenced_fields(target, rel.arg("references"));
        foreign_keys.into_iter().zip(references).collect()
    }
}

/// Fields of `model` named by an array of references, in order
fn referenced_fields<'a>(model: &'a Model, arg: Option<&Expression>) -> Vec<&'a Field> {
    match arg {
        Some(Expression::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Expression::Reference(r) => model.field(&r.target),
                _ => None,
            })
            .collect(),
        _ => vec![],
    }
}
