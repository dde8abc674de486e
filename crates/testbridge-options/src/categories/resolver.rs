use std::collections::HashSet;

use testbridge_common::{CategoryResolutionError, ResolveError};
use tracing::debug;

use super::handle::CategoryHandle;

/// Turns a category name into a resolved [`CategoryHandle`].
pub trait TypeResolver {
    fn resolve(&self, name: &str) -> Result<CategoryHandle, ResolveError>;
}

impl<F> TypeResolver for F
where
    F: Fn(&str) -> Result<CategoryHandle, ResolveError>,
{
    fn resolve(&self, name: &str) -> Result<CategoryHandle, ResolveError> {
        self(name)
    }
}

/// Resolve a comma-separated list of category names.
///
/// An absent or empty list yields an empty set. Every name is attempted;
/// if any fail, the error lists all of them in the order they appeared.
pub fn resolve_class_list<R>(
    resolver: &R,
    value: Option<&str>,
) -> Result<HashSet<CategoryHandle>, CategoryResolutionError>
where
    R: TypeResolver + ?Sized,
{
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(HashSet::new()),
    };

    let mut resolved = HashSet::new();
    let mut missing = Vec::new();

    for name in value.split(',') {
        match resolver.resolve(name) {
            Ok(handle) => {
                resolved.insert(handle);
            }
            Err(ResolveError::NotFound(_)) => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        debug!(missing = ?missing, "unresolved categories");
        return Err(CategoryResolutionError::new(missing));
    }

    Ok(resolved)
}
