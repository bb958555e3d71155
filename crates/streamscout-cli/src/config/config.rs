//! `AppConfig` struct, TOML loading and environment overlay.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::paths::resolve_config_path;

/// Default watch region.
pub const DEFAULT_REGION: &str = "DE";
/// Default provider list.
pub const DEFAULT_PROVIDERS: &str = "Netflix,DisneyPlus,Wow,RtlPlus,AmazonPrime";
/// Default minimum rating.
pub const DEFAULT_MIN_RATING: f64 = 7.5;
/// Default minimum vote count.
pub const DEFAULT_MIN_VOTES: u32 = 1000;
/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// TMDB credentials and HTTP settings.
    pub tmdb: TmdbConfig,
    /// Default filter values.
    pub filter: FilterConfig,
    /// Verbose logging, including raw API responses.
    pub debug: bool,
}

/// TMDB access configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// v3 API key.
    pub api_key: Option<String>,
    /// v4 read access token.
    pub api_token: Option<String>,
    /// Request timeout in seconds (0 disables the timeout).
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Default filter values used when no flag is given.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Watch region (ISO 3166-1).
    pub region: String,
    /// Comma-separated provider list.
    pub providers: String,
    /// Minimum rating.
    pub min_rating: f64,
    /// Minimum vote count.
    pub min_votes: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            region: String::from(DEFAULT_REGION),
            providers: String::from(DEFAULT_PROVIDERS),
            min_rating: DEFAULT_MIN_RATING,
            min_votes: DEFAULT_MIN_VOTES,
        }
    }
}

/// Environment variables recognized on top of the config file.
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    tmdb_api_key: Option<String>,
    tmdb_api_token: Option<String>,
    region: Option<String>,
    providers: Option<String>,
    min_rating: Option<f64>,
    min_votes: Option<u32>,
    api_timeout_seconds: Option<u64>,
    debug: Option<String>,
}

/// Parses a boolean flag leniently (`1`, `t`, `TRUE`, `0`, `f`, `False`, ...).
fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Resolves the effective configuration: defaults, then the config
    /// file, then `.env` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config path cannot be resolved, the config
    /// file or `.env` is malformed, or an environment value has the wrong type.
    pub fn resolve(dir: Option<&PathBuf>) -> Result<Self> {
        let path = resolve_config_path(dir)?;
        let mut config = Self::load(&path)?;

        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            return Err(e).context("failed to read .env file");
        }

        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
        config.apply_env(vars)?;
        Ok(config)
    }

    /// Overrides fields with values from environment-style key/value pairs.
    ///
    /// Unknown keys are ignored. Keys match case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if a recognized variable cannot be parsed.
    pub fn apply_env<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env: EnvOverrides =
            envy::from_iter(vars).context("invalid configuration in environment")?;

        if let Some(key) = env.tmdb_api_key {
            self.tmdb.api_key = Some(key);
        }
        if let Some(token) = env.tmdb_api_token {
            self.tmdb.api_token = Some(token);
        }
        if let Some(timeout) = env.api_timeout_seconds {
            self.tmdb.timeout_secs = timeout;
        }
        if let Some(region) = env.region {
            self.filter.region = region;
        }
        if let Some(providers) = env.providers {
            self.filter.providers = providers;
        }
        if let Some(min_rating) = env.min_rating {
            self.filter.min_rating = min_rating;
        }
        if let Some(min_votes) = env.min_votes {
            self.filter.min_votes = min_votes;
        }
        if let Some(raw) = env.debug {
            match parse_flag(raw.trim()) {
                Some(debug) => self.debug = debug,
                None => tracing::warn!(value = %raw, "Ignoring DEBUG: not a boolean"),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (String::from(*k), String::from(*v)))
            .collect()
    }

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.filter.region, "DE");
        assert_eq!(
            config.filter.providers,
            "Netflix,DisneyPlus,Wow,RtlPlus,AmazonPrime"
        );
        assert_eq!(config.filter.min_rating, 7.5);
        assert_eq!(config.filter.min_votes, 1000);
        assert_eq!(config.tmdb.timeout_secs, 20);
        assert!(config.tmdb.api_key.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "debug = true\n\n[filter]\nregion = \"US\"\nmin_votes = 250\n\n[tmdb]\napi_key = \"file-key\"\n",
        )
        .unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert!(config.debug);
        assert_eq!(config.filter.region, "US");
        assert_eq!(config.filter.min_votes, 250);
        assert_eq!(config.filter.min_rating, 7.5);
        assert_eq!(config.tmdb.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.tmdb.timeout_secs, 20);
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[filter\nregion = ").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_env_overrides_file_values() {
        // Arrange
        let mut config = AppConfig::default();
        config.filter.region = String::from("US");
        config.tmdb.api_key = Some(String::from("file-key"));

        // Act
        config
            .apply_env(vars(&[
                ("TMDB_API_KEY", "env-key"),
                ("REGION", "AT"),
                ("PROVIDERS", "Netflix"),
                ("MIN_RATING", "8.1"),
                ("MIN_VOTES", "42"),
                ("API_TIMEOUT_SECONDS", "5"),
                ("DEBUG", "true"),
            ]))
            .unwrap();

        // Assert
        assert_eq!(config.tmdb.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.filter.region, "AT");
        assert_eq!(config.filter.providers, "Netflix");
        assert_eq!(config.filter.min_rating, 8.1);
        assert_eq!(config.filter.min_votes, 42);
        assert_eq!(config.tmdb.timeout_secs, 5);
        assert!(config.debug);
    }

    #[test]
    fn test_env_absent_keeps_values_and_ignores_unknown() {
        // Arrange
        let mut config = AppConfig::default();
        config.filter.min_votes = 10;

        // Act
        config
            .apply_env(vars(&[("PATH", "/usr/bin"), ("TMDB_API_TOKEN", "tok")]))
            .unwrap();

        // Assert
        assert_eq!(config.filter.min_votes, 10);
        assert_eq!(config.filter.region, "DE");
        assert_eq!(config.tmdb.api_token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_env_debug_accepts_boolean_spellings() {
        // Arrange
        let cases = [
            ("1", true),
            ("t", true),
            ("T", true),
            ("TRUE", true),
            ("true", true),
            ("True", true),
            ("0", false),
            ("f", false),
            ("F", false),
            ("FALSE", false),
            ("false", false),
            ("False", false),
        ];

        for (value, expected) in cases {
            let mut config = AppConfig::default();
            config.debug = !expected;

            // Act
            config.apply_env(vars(&[("DEBUG", value)])).unwrap();

            // Assert
            assert_eq!(config.debug, expected, "DEBUG={value}");
        }
    }

    #[test]
    fn test_env_debug_unparseable_is_ignored_with_warning() {
        // Arrange
        let (subscriber, handle) = tracing_mock::subscriber::mock()
            .event(tracing_mock::expect::event().at_level(tracing::Level::WARN))
            .run_with_handle();
        let _guard = tracing::subscriber::set_default(subscriber);
        let mut config = AppConfig::default();
        config.debug = true;

        // Act
        let result = config.apply_env(vars(&[("DEBUG", "express:*"), ("MIN_VOTES", "7")]));

        // Assert
        assert!(result.is_ok());
        assert!(config.debug);
        assert_eq!(config.filter.min_votes, 7);
        handle.assert_finished();
    }

    #[test]
    fn test_env_invalid_number_is_error() {
        // Arrange
        let mut config = AppConfig::default();

        // Act
        let result = config.apply_env(vars(&[("MIN_VOTES", "lots")]));

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("invalid configuration in environment")
        );
    }
}
