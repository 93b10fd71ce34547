//! Naming of the auxiliary relation fields that simulate polymorphism.
//!
//! **Every** generated relation field, foreign key and relation name must
//! go through [`NameTruncator::aux_name`] so that two passes asking for the
//! same long name get the same identifier back.
//!
//! ## Naming Convention
//! Format: `delegate_aux_{name}`, where `{name}` is cut to the identifier
//! budget left after the prefix and suffixed with `_{n}`:
//! - names within budget are used as-is
//! - the first long name sharing a cut prefix gets `_0`
//! - each further distinct long name with that prefix gets the next index
//! - asking again for an already-seen long name returns its original index
//!
//! Examples (budget 50):
//! - `"dog"` → `"delegate_aux_dog"`
//! - `"User_ownedAnimalsWithAnExtremelyLongRelationName_Dog"` → `"delegate_aux_User_ownedAnimalsWithAnExtremelyLongRe_0"`

use std::collections::HashMap;

/// Prefix of every auxiliary relation field and relation name
pub const DELEGATE_AUX_RELATION_PREFIX: &str = "delegate_aux";

/// Conservative identifier maximum that works across providers
pub const DEFAULT_IDENTIFIER_MAX_LENGTH: usize = 50;

/// Lower-case the first character: `Dog` → `dog`
pub fn lower_case_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Deterministic truncation with collision suffixes.
///
/// One instance lives for one compilation; the collision map is what keeps
/// repeated requests stable.
#[derive(Debug, Clone)]
pub struct NameTruncator {
    max_len: usize,
    short_names: HashMap<String, Vec<String>>,
}

impl Default for NameTruncator {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTIFIER_MAX_LENGTH)
    }
}

impl NameTruncator {
    /// `identifier_max_length` is the full identifier budget, prefix included
    pub fn new(identifier_max_length: usize) -> Self {
        NameTruncator {
            max_len: identifier_max_length.saturating_sub(DELEGATE_AUX_RELATION_PREFIX.len()),
            short_names: HashMap::new(),
        }
    }

    /// Budget left for the name part after the prefix
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn truncate(&mut self, name: &str) -> String {
        if name.chars().count() <= self.max_len {
            return name.to_string();
        }

        let short: String = name.chars().take(self.max_len).collect();
        let originals = self.short_names.entry(short.clone()).or_default();
        let index = match originals.iter().position(|n| n == name) {
            Some(index) => index,
            None => {
                originals.push(name.to_string());
                originals.len() - 1
            }
        };
        format!("{}_{}", short, index)
    }

    /// `delegate_aux_{truncate(name)}`
    pub fn aux_name(&mut self, name: &str) -> String {
        format!("{}_{}", DELEGATE_AUX_RELATION_PREFIX, self.truncate(name))
    }
}
