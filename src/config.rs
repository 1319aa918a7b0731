use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://pad.crc.nd.edu/api/v2";
pub const DEFAULT_IMAGE_HOST: &str = "https://pad.crc.nd.edu";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300";
pub const DEFAULT_USER_AGENT: &str = "pad-client/0.1";

const CONFIG_DIR_NAME: &str = "pad-client";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Endpoints and presentation defaults for talking to the PAD service.
///
/// Every field is optional in the TOML file; missing keys fall back to the
/// public PAD deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Base of the REST API, e.g. `https://pad.crc.nd.edu/api/v2`.
    pub api_url: String,
    /// Host prefix for `processed_file_location` image paths.
    pub image_host: String,
    /// Shown in place of a card image that has no processed file.
    pub placeholder_image_url: String,
    pub user_agent: String,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            image_host: DEFAULT_IMAGE_HOST.to_string(),
            placeholder_image_url: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl PadConfig {
    /// Load the user config file if it exists, then apply `PAD_API_URL` and
    /// `PAD_IMAGE_HOST` overrides from the environment.
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            Some(path) => {
                debug!("No config file at {:?}, using defaults", path);
                Self::default()
            }
            None => {
                debug!("No config directory on this platform, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(
            std::env::var("PAD_API_URL").ok(),
            std::env::var("PAD_IMAGE_HOST").ok(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PadConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as TOML, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved config to {:?}", path);
        Ok(())
    }

    /// `{config_dir}/pad-client/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    fn apply_overrides(&mut self, api_url: Option<String>, image_host: Option<String>) {
        if let Some(url) = api_url.filter(|s| !s.trim().is_empty()) {
            info!("Using API URL from PAD_API_URL: {}", url);
            self.api_url = url;
        }
        if let Some(host) = image_host.filter(|s| !s.trim().is_empty()) {
            info!("Using image host from PAD_IMAGE_HOST: {}", host);
            self.image_host = host;
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("api_url", &self.api_url),
            ("image_host", &self.image_host),
            ("placeholder_image_url", &self.placeholder_image_url),
        ] {
            let parsed = Url::parse(value)
                .with_context(|| format!("{} is not a valid URL: '{}'", name, value))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                bail!("{} must use http or https, got '{}'", name, parsed.scheme());
            }
        }
        if self.api_url.starts_with("http://") {
            warn!("API URL {} is not using TLS", self.api_url);
        }
        Ok(())
    }

    /// Join a resource path such as `/projects/3/cards` onto the API base.
    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.api_url, path)
    }

    /// Resolve a `processed_file_location` into a fetchable image URL.
    pub fn image_url(&self, location: &str) -> String {
        join_url(&self.image_host, location)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_point_at_pad() {
        let config = PadConfig::default();
        assert_eq!(config.api_url, "https://pad.crc.nd.edu/api/v2");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = PadConfig {
            api_url: "https://example.com/api/".to_string(),
            ..PadConfig::default()
        };
        assert_eq!(config.endpoint("/projects/4/cards"), "https://example.com/api/projects/4/cards");
        assert_eq!(config.endpoint("cards/issues"), "https://example.com/api/cards/issues");
    }

    #[test]
    fn test_image_url_accepts_absolute_locations() {
        let config = PadConfig::default();
        assert_eq!(
            config.image_url("/var/www/html/images/padimages/processed/42275_processed.png"),
            "https://pad.crc.nd.edu/var/www/html/images/padimages/processed/42275_processed.png"
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PadConfig::from_toml_str("api_url = \"http://localhost:8000/api/v2\"\n").unwrap();
        assert_eq!(config.api_url, "http://localhost:8000/api/v2");
        assert_eq!(config.image_host, DEFAULT_IMAGE_HOST);
        assert_eq!(config.placeholder_image_url, DEFAULT_PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = PadConfig::from_toml_str("api_url = \"not a url\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let result = PadConfig::from_toml_str("image_host = \"ftp://pad.example.com\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = PadConfig {
            image_host: "https://images.example.com".to_string(),
            ..PadConfig::default()
        };

        config.save_to(&path).unwrap();
        let loaded = PadConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_overrides_ignore_blank_values() {
        let mut config = PadConfig::default();
        config.apply_overrides(Some("  ".to_string()), Some("https://img.example.com".to_string()));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.image_host, "https://img.example.com");
    }
}
