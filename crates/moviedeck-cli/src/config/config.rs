//! `AppConfig` struct and TOML loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

/// Environment variable that overrides `tmdb.api_key`.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB connection settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB connection configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// API key. `TMDB_API_KEY` takes precedence when set.
    pub api_key: Option<String>,
    /// Response language.
    pub language: String,
    /// API v3 base URL.
    pub base_url: String,
    /// Image CDN base URL; the size segment (`w500`) is appended to it.
    pub image_base_url: String,
    /// Freshness hint for list queries, in seconds.
    pub revalidate_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            language: String::from("en-US"),
            base_url: String::from("https://api.themoviedb.org/3/"),
            image_base_url: String::from("https://image.tmdb.org/t/p/"),
            revalidate_secs: 3600,
        }
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
}

impl TmdbConfig {
    /// Picks the API key: a non-empty `env_value` wins over the file.
    #[must_use]
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone().filter(|key| !key.is_empty()))
    }

    /// Parses `base_url`, adding the trailing slash relative joins need.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).with_context(|| format!("invalid tmdb.base_url: {}", self.base_url))
    }

    /// `image_base_url` with the trailing slash the size segment is appended after.
    #[must_use]
    pub fn image_base_url(&self) -> String {
        let mut raw = self.image_base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.tmdb.api_key.is_none());
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.tmdb.revalidate_secs, 3600);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

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
        std::fs::write(&path, "[tmdb]\napi_key = \"from-file\"\nlanguage = \"ja-JP\"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.tmdb.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.tmdb.language, "ja-JP");
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3/");
    }

    #[test]
    fn test_load_empty_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_env_key_overrides_file_key() {
        // Arrange
        let config = TmdbConfig {
            api_key: Some(String::from("from-file")),
            ..TmdbConfig::default()
        };

        // Act & Assert
        assert_eq!(
            config
                .resolve_api_key(Some(String::from("from-env")))
                .as_deref(),
            Some("from-env")
        );
        assert_eq!(
            config.resolve_api_key(Some(String::new())).as_deref(),
            Some("from-file")
        );
        assert_eq!(config.resolve_api_key(None).as_deref(), Some("from-file"));
    }

    #[test]
    fn test_no_key_anywhere() {
        // Arrange
        let config = TmdbConfig {
            api_key: Some(String::new()),
            ..TmdbConfig::default()
        };

        // Act & Assert
        assert!(config.resolve_api_key(None).is_none());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        // Arrange
        let config = TmdbConfig {
            base_url: String::from("http://localhost:8080/3"),
            ..TmdbConfig::default()
        };

        // Act
        let url = config.base_url().unwrap();

        // Assert
        assert_eq!(url.as_str(), "http://localhost:8080/3/");
        assert_eq!(
            url.join("movie/popular").unwrap().as_str(),
            "http://localhost:8080/3/movie/popular"
        );
    }

    #[test]
    fn test_image_base_url_gets_trailing_slash() {
        // Arrange
        let config = TmdbConfig {
            image_base_url: String::from("https://image.tmdb.org/t/p"),
            ..TmdbConfig::default()
        };

        // Act
        let image_base = config.image_base_url();

        // Assert
        assert_eq!(image_base, "https://image.tmdb.org/t/p/");
        assert_eq!(
            TmdbConfig::default().image_base_url(),
            "https://image.tmdb.org/t/p/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        // Arrange
        let config = TmdbConfig {
            base_url: String::from("not a url"),
            ..TmdbConfig::default()
        };

        // Act & Assert
        assert!(config.base_url().is_err());
    }
}
