use std::path::Path;

use testbridge_common::ConfigError;
use tracing::info;

use super::{CategoryRegistry, RegistryFile};

/// Load and validate a category registry from a TOML file.
pub fn load_from_path(path: &Path) -> Result<CategoryRegistry, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;

    let registry = from_toml_str(&content)?;
    info!(
        "loaded {} categories from {}",
        registry.len(),
        path.display()
    );
    Ok(registry)
}

/// Parse and validate a category registry from TOML text.
pub fn from_toml_str(content: &str) -> Result<CategoryRegistry, ConfigError> {
    let file: RegistryFile = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;
    CategoryRegistry::from_file(file)
}
