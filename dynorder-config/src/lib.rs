//! Configuration loading for dynorder.
//!
//! Settings come from an optional `dynorder.toml`, environment variables
//! (optionally seeded from a `.env` file) and built-in defaults, in that
//! order of increasing precedence: env beats file, file beats defaults.

pub mod loader;
pub mod models;
pub mod util;

pub use loader::{ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError};
pub use models::{
    ConfigMetadata,
    sources::{EnvConfig, FileConfig, FileOrderingConfig},
};
