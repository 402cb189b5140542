use std::collections::HashMap;
use std::rc::Rc;

use crate::syntax::ast::Stmt;

// ─── Variables ────────────────────────────────────────────────────────────────

/// Case-sensitive name → integer. Entries are created by the first assignment.
#[derive(Debug, Clone, Default)]
pub struct Variables(HashMap<String, i32>);

impl Variables {
    pub fn get(&self, name: &str) -> Option<i32> {
        self.0.get(name).copied()
    }

    pub fn set(&mut self, name: &str, value: i32) {
        self.0.insert(name.to_string(), value);
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Entries sorted by name.
    pub fn sorted(&self) -> Vec<(&str, i32)> {
        let mut entries: Vec<_> = self.0.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

// ─── Methods ──────────────────────────────────────────────────────────────────

/// Case-insensitive name → body. A name can be defined once.
#[derive(Debug, Clone, Default)]
pub struct Methods(HashMap<String, Rc<Vec<Stmt>>>);

impl Methods {
    fn key(name: &str) -> String { name.to_lowercase() }

    pub fn get(&self, name: &str) -> Option<Rc<Vec<Stmt>>> {
        self.0.get(&Self::key(name)).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&Self::key(name))
    }

    /// Returns `false`, leaving the existing body in place, when `name` is taken.
    pub fn define(&mut self, name: &str, body: Rc<Vec<Stmt>>) -> bool {
        let key = Self::key(name);
        if self.0.contains_key(&key) {
            return false;
        }
        self.0.insert(key, body);
        true
    }

    /// Lower-cased names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.0.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

// ─── Context ──────────────────────────────────────────────────────────────────

/// Everything a session remembers between submissions.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub variables: Variables,
    pub methods: Methods,
}
