use std::fmt;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// A single category name that the resolver does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("category not found: {0}")]
    NotFound(String),
}

/// Every category name in a list that failed to resolve, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryResolutionError {
    missing: Vec<String>,
}

impl CategoryResolutionError {
    pub fn new(missing: Vec<String>) -> Self {
        Self { missing }
    }

    pub fn missing(&self) -> &[String] {
        &self.missing
    }
}

impl fmt::Display for CategoryResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "the following category classes could not be found: {}",
            self.missing.join(",")
        )
    }
}

impl std::error::Error for CategoryResolutionError {}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("no argument given after {0}")]
    MissingArgument(String),

    #[error(transparent)]
    CategoryResolution(#[from] CategoryResolutionError),
}

#[derive(Debug, thiserror::Error)]
pub enum TestBridgeError {
    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid arguments: {0}")]
    Usage(String),

    #[error("{0}")]
    Other(String),
}
