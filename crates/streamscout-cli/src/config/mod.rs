//! Application configuration module.
//!
//! Layers built-in defaults, an optional TOML file, `.env` and the process
//! environment into one `AppConfig` value.

#[allow(clippy::module_inception)]
mod config;
mod paths;
mod settings;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
pub use settings::{FilterSettings, region_language};
