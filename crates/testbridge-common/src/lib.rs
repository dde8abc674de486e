pub mod errors;

pub use errors::{
    CategoryResolutionError, ConfigError, OptionsError, ResolveError, TestBridgeError,
};

pub type Result<T> = std::result::Result<T, TestBridgeError>;
