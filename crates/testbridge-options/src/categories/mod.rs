//! Test categories: resolution of category names and the combined
//! include/exclude category filter.

mod filter;
mod handle;
mod resolver;


pub use filter::{CategoryFilter, CategoryPredicate, TestDescription};
pub use handle::CategoryHandle;
pub use resolver::{resolve_class_list, TypeResolver};

use testbridge_common::CategoryResolutionError;

/// Build the category filter from the raw `--test_categories` and
/// `--test_exclude_categories` values.
///
/// When neither list names anything the result is [`CategoryFilter::All`].
/// A name that fails to resolve in either list fails the whole build.
pub fn build_categories_filter<R>(
    resolver: &R,
    includes_value: Option<&str>,
    excludes_value: Option<&str>,
) -> Result<CategoryFilter, CategoryResolutionError>
where
    R: TypeResolver + ?Sized,
{
    let includes = resolve_class_list(resolver, includes_value)?;
    let excludes = resolve_class_list(resolver, excludes_value)?;

    if includes.is_empty() && excludes.is_empty() {
        return Ok(CategoryFilter::All);
    }

    Ok(CategoryFilter::Categories { includes, excludes })
}
