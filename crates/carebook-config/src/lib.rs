//! Configuration models and file loading.
//!
//! This crate owns the Carebook config schema and the json5 loader used by
//! embedders and tests.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// File loader.
pub use loader::{DEFAULT_CONFIG_FILE, load};
/// Configuration schema models.
pub use model::*;
