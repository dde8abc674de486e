//! Test runner option parsing.
//!
//! Builds the runner's [`Options`] from the command line and the
//! environment variables set by the build system. Category names given on
//! the command line are resolved through a [`TypeResolver`], usually a
//! [`CategoryRegistry`] loaded from TOML.
//!
//! # Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use testbridge_options::{CategoryRegistry, Options};
//!
//! let env = HashMap::new();
//! let args = ["--test_filter=MyTest", "--verbose"];
//! let options = Options::parse(&env, args, &CategoryRegistry::empty()).unwrap();
//! assert_eq!(options.include_filter(), Some("MyTest"));
//! assert_eq!(options.unparsed_args(), ["--verbose"]);
//! ```

pub mod args;
pub mod categories;
pub mod env;
pub mod options;
pub mod registry;

// Re-export core types for convenience
pub use args::{OptionKey, ScannedArgs};
pub use categories::{
    build_categories_filter, resolve_class_list, CategoryFilter, CategoryHandle,
    CategoryPredicate, TestDescription, TypeResolver,
};
pub use options::Options;
pub use registry::CategoryRegistry;

use std::collections::HashMap;
use std::path::Path;

use testbridge_common::ConfigError;

/// Finish parsing `scanned` with the category registry at `registry_path`,
/// or an empty registry when no path is given.
pub fn resolve_with_registry(
    env_vars: &HashMap<String, String>,
    scanned: ScannedArgs,
    registry_path: Option<&Path>,
) -> testbridge_common::Result<Options> {
    let registry = match registry_path {
        Some(path) => registry::load_from_path(path)?,
        None => CategoryRegistry::empty(),
    };
    Ok(Options::from_scanned(env_vars, scanned, &registry)?)
}

/// Serialize options to a pretty-printed JSON string.
pub fn options_to_json(options: &Options) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(options)
        .map_err(|e| ConfigError::ParseError(format!("failed to serialize options: {e}")))
}
