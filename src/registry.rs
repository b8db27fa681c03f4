//! Registry of configs loaded from the live environment.
//!
//! An explicit, owned object rather than a process global: the application's
//! startup path constructs one, threads it through its
//! [`load_env`](crate::EnvfigBuilder::load_env) calls, and hands it to
//! documentation tooling afterwards. Entries are keyed by config name,
//! overwritten on re-registration, and never evicted — the registry is
//! bounded by the number of distinct config types a program declares.
//!
//! Loading happens during startup, so no locking is built in. A program that
//! loads configs from concurrent startup paths should wrap the registry in a
//! `Mutex`.

use crate::docs::schema_to_markdown;
use crate::schema::Schema;

/// One live-registered config: its derived name, the prefix it was loaded
/// with, and the schema it validates against.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub name: String,
    pub prefix: String,
    pub schema: Schema,
}

/// Ordered collection of [`RegistryEntry`] values, insert-overwrite by name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a config under `name`, replacing any previous entry with the
    /// same name. Registration order is preserved for iteration.
    pub fn insert(&mut self, name: &str, prefix: String, schema: Schema) {
        let entry = RegistryEntry {
            name: name.to_string(),
            prefix,
            schema,
        };
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render one markdown reference section per registered config, in
    /// registration order, separated by blank lines.
    pub fn render_markdown(&self) -> String {
        self.entries
            .iter()
            .map(|e| schema_to_markdown(&e.name, &e.prefix, &e.schema))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a RegistryEntry;
    type IntoIter = std::slice::Iter<'a, RegistryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
