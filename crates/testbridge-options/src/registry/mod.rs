//! Category registry: the set of categories a test run may name.
//!
//! Declared in TOML, one `[[category]]` table per category:
//!
//! ```toml
//! [[category]]
//! name = "com.example.Slow"
//! extends = ["com.example.Tagged"]
//!
//! [[category]]
//! name = "com.example.Tagged"
//! ```

mod loader;

#[cfg(test)]
mod tests;

pub use loader::{from_toml_str, load_from_path};

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use testbridge_common::{ConfigError, ResolveError};

use crate::categories::{CategoryHandle, TypeResolver};

/// Raw registry file contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryFile {
    #[serde(default, rename = "category")]
    pub categories: Vec<CategoryDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryDecl {
    pub name: String,
    #[serde(default)]
    pub extends: Vec<String>,
}

/// Resolves category names declared in a [`RegistryFile`].
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    handles: HashMap<String, CategoryHandle>,
}

impl CategoryRegistry {
    /// A registry that resolves nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate declarations and precompute each category's ancestors.
    pub fn from_file(file: RegistryFile) -> Result<Self, ConfigError> {
        validate(&file)?;

        let parents: BTreeMap<&str, &[String]> = file
            .categories
            .iter()
            .map(|decl| (decl.name.as_str(), decl.extends.as_slice()))
            .collect();

        let handles = parents
            .keys()
            .map(|name| {
                let handle = CategoryHandle::with_supertypes(*name, ancestors(name, &parents));
                (name.to_string(), handle)
            })
            .collect();

        Ok(Self { handles })
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl TypeResolver for CategoryRegistry {
    fn resolve(&self, name: &str) -> Result<CategoryHandle, ResolveError> {
        self.handles
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(name.to_string()))
    }
}

/// Transitive parents of `name`. Assumes the graph is acyclic.
fn ancestors(name: &str, parents: &BTreeMap<&str, &[String]>) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack: Vec<&str> = vec![name];

    while let Some(current) = stack.pop() {
        for parent in parents.get(current).copied().unwrap_or_default() {
            if found.insert(parent.clone()) {
                stack.push(parent);
            }
        }
    }

    found
}

/// Check a registry file, collecting every problem found.
pub fn validate(file: &RegistryFile) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for decl in &file.categories {
        if decl.name.trim().is_empty() {
            errors.push("category name must not be empty".into());
            continue;
        }
        if decl.name.contains(',') {
            errors.push(format!("category '{}': name must not contain ','", decl.name));
        }
        if !seen.insert(&decl.name) {
            errors.push(format!("duplicate category '{}'", decl.name));
        }
    }

    for decl in &file.categories {
        for parent in &decl.extends {
            if !seen.contains(parent.as_str()) {
                errors.push(format!(
                    "category '{}' extends undeclared category '{parent}'",
                    decl.name
                ));
            }
        }
    }

    if let Some(name) = find_cycle(file) {
        errors.push(format!("category '{name}' is part of an inheritance cycle"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Name of some category that lies on an inheritance cycle, if any.
fn find_cycle(file: &RegistryFile) -> Option<&str> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Visiting,
        Done,
    }

    fn visit<'a>(
        name: &'a str,
        parents: &HashMap<&'a str, &'a [String]>,
        marks: &mut HashMap<&'a str, Mark>,
    ) -> Option<&'a str> {
        match marks.get(name) {
            Some(Mark::Done) => return None,
            Some(Mark::Visiting) => return Some(name),
            None => {}
        }
        marks.insert(name, Mark::Visiting);
        for parent in parents.get(name).copied().unwrap_or_default() {
            if let Some(hit) = visit(parent, parents, marks) {
                return Some(hit);
            }
        }
        marks.insert(name, Mark::Done);
        None
    }

    let parents: HashMap<&str, &[String]> = file
        .categories
        .iter()
        .map(|decl| (decl.name.as_str(), decl.extends.as_slice()))
        .collect();
    let mut marks = HashMap::new();

    file.categories
        .iter()
        .find_map(|decl| visit(&decl.name, &parents, &mut marks))
}
