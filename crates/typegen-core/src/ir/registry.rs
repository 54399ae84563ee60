use indexmap::{IndexMap, IndexSet};

use super::types::TypeDef;

/// Deduplicating, insertion-ordered store of Named Type Definitions for one
/// generation run. A name is never generated twice: callers that find a name
/// already present (reserved or complete) use the existing reference.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: IndexMap<String, TypeDef>,
    imports: IndexSet<String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Forward-declare `name` before descending into its definition, so
    /// cyclic references terminate. Returns false if the name was already
    /// present.
    pub fn reserve(&mut self, name: &str) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        self.entries.insert(name.to_string(), TypeDef::Pending);
        true
    }

    /// Complete a reservation (or insert a new entry). An existing complete
    /// definition is left untouched.
    pub fn insert(&mut self, name: impl Into<String>, def: TypeDef) {
        let name = name.into();
        match self.entries.get(&name) {
            Some(TypeDef::Pending) | None => {
                self.entries.insert(name, def);
            }
            Some(_) => {}
        }
    }

    /// Drop a reservation after a failed generation so no dangling forward
    /// declaration survives the error.
    pub fn cancel(&mut self, name: &str) {
        if matches!(self.entries.get(name), Some(TypeDef::Pending)) {
            self.entries.shift_remove(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TypeDef> {
        self.entries.get_mut(name)
    }

    /// Record that generated output structurally depends on an externally
    /// defined named construct (status-class markers, included records).
    pub fn require_import(&mut self, name: impl Into<String>) {
        self.imports.insert(name.into());
    }

    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeDef)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
