use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use super::handle::CategoryHandle;

/// A test, or a suite of tests, as seen by a category predicate.
///
/// Children of a suite also carry the suite's categories when filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestDescription {
    pub name: String,
    pub categories: Vec<CategoryHandle>,
    pub children: Vec<TestDescription>,
}

impl TestDescription {
    pub fn test(name: impl Into<String>, categories: Vec<CategoryHandle>) -> Self {
        Self {
            name: name.into(),
            categories,
            children: Vec::new(),
        }
    }

    pub fn suite(
        name: impl Into<String>,
        categories: Vec<CategoryHandle>,
        children: Vec<TestDescription>,
    ) -> Self {
        Self {
            name: name.into(),
            categories,
            children,
        }
    }

    pub fn is_suite(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Decides whether a test should run based on its categories.
pub trait CategoryPredicate {
    fn accept(&self, description: &TestDescription) -> bool;

    /// Human-readable summary, used in logs and reports.
    fn describe(&self) -> String;
}

/// Combined category inclusion and exclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Accepts every test.
    #[default]
    All,
    /// Accepts a test that carries an included category (or any test when
    /// nothing is included) and carries no excluded category.
    Categories {
        #[serde(serialize_with = "sorted_names")]
        includes: HashSet<CategoryHandle>,
        #[serde(serialize_with = "sorted_names")]
        excludes: HashSet<CategoryHandle>,
    },
}

impl CategoryFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    fn matches_own_categories(
        includes: &HashSet<CategoryHandle>,
        excludes: &HashSet<CategoryHandle>,
        carried: &[CategoryHandle],
    ) -> bool {
        if !excludes.is_empty() && matches_any(excludes, carried) {
            return false;
        }
        includes.is_empty() || matches_any(includes, carried)
    }

    /// Like [`CategoryPredicate::accept`], for a description nested in
    /// suites carrying `enclosing` categories.
    pub fn accept_in(&self, description: &TestDescription, enclosing: &[CategoryHandle]) -> bool {
        let (includes, excludes) = match self {
            CategoryFilter::All => return true,
            CategoryFilter::Categories { includes, excludes } => (includes, excludes),
        };

        let carried: Vec<CategoryHandle> = enclosing
            .iter()
            .chain(&description.categories)
            .cloned()
            .collect();
        if Self::matches_own_categories(includes, excludes, &carried) {
            return true;
        }
        description
            .children
            .iter()
            .any(|child| self.accept_in(child, &carried))
    }
}

fn matches_any(wanted: &HashSet<CategoryHandle>, carried: &[CategoryHandle]) -> bool {
    wanted
        .iter()
        .any(|parent| carried.iter().any(|child| parent.is_assignable_from(child)))
}

fn sorted(set: &HashSet<CategoryHandle>) -> Vec<&str> {
    let mut names: Vec<&str> = set.iter().map(CategoryHandle::name).collect();
    names.sort_unstable();
    names
}

fn sorted_names<S: serde::Serializer>(
    set: &HashSet<CategoryHandle>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(sorted(set))
}

impl CategoryPredicate for CategoryFilter {
    fn accept(&self, description: &TestDescription) -> bool {
        self.accept_in(description, &[])
    }

    fn describe(&self) -> String {
        match self {
            CategoryFilter::All => "all tests".to_string(),
            CategoryFilter::Categories { includes, excludes } => {
                let mut out = format!("categories [{}]", sorted(includes).join(", "));
                if !excludes.is_empty() {
                    out.push_str(&format!(" - [{}]", sorted(excludes).join(", ")));
                }
                out
            }
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
