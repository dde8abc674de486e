use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A resolved test category.
///
/// Carries the category's canonical name and the transitive set of
/// categories it extends. Two handles are equal when their names are equal.
#[derive(Debug, Clone)]
pub struct CategoryHandle {
    name: Arc<str>,
    supertypes: Arc<BTreeSet<String>>,
}

impl CategoryHandle {
    /// A category with no super-categories.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            supertypes: Arc::new(BTreeSet::new()),
        }
    }

    /// A category extending every name in `supertypes` (already transitive).
    pub fn with_supertypes<I, S>(name: impl Into<Arc<str>>, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            supertypes: Arc::new(supertypes.into_iter().map(Into::into).collect()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.supertypes.iter().map(String::as_str)
    }

    /// True when `other` is this category or one of its sub-categories.
    pub fn is_assignable_from(&self, other: &CategoryHandle) -> bool {
        self.name == other.name || other.supertypes.contains(&*self.name)
    }
}

impl PartialEq for CategoryHandle {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CategoryHandle {}

impl Hash for CategoryHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for CategoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for CategoryHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}
