use std::env;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Upstream image provider settings. Read once at start-up and handed to the
/// relay; nothing here is looked up again per request.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub size: String,
    pub num_images: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: Option<u16>,
    pub history_dir: Option<PathBuf>,
    pub provider: ProviderConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
            size: DEFAULT_IMAGE_SIZE.to_string(),
            num_images: 1,
        }
    }
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_key = env::var("OPENAI_API_KEY").ok();
        let base_url = env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url);
        let model = env::var("OPENAI_IMAGE_MODEL").unwrap_or(defaults.model);
        let size = env::var("OPENAI_IMAGE_SIZE").unwrap_or(defaults.size);

        ProviderConfig {
            api_key,
            base_url,
            model,
            size,
            num_images: defaults.num_images,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>, size: impl Into<String>) -> Self {
        self.model = model.into();
        self.size = size.into();
        self
    }

    /// The credential, if one is set and not blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Start-up check. A missing key is not fatal for the process; the relay
    /// answers every generation with a configuration error instead.
    pub fn validate(&self) -> bool {
        if self.credential().is_none() {
            log::warn!("OPENAI_API_KEY is not set, every generation will fail until it is");
            return false;
        }
        true
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: None,
            history_dir: None,
            provider: ProviderConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());
        let history_dir = env::var("LOGOGEN_HISTORY_DIR").ok().map(PathBuf::from);

        Config {
            host,
            port,
            history_dir,
            provider: ProviderConfig::from_env(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_history_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.history_dir = Some(dir.into());
        self
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Where the file-backed history lives: the configured directory, or
    /// `~/.logogen` when none is set.
    pub fn history_dir_or_default(&self) -> PathBuf {
        self.history_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".logogen")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_defaults() {
        let config = ProviderConfig::new();
        assert_eq!(config.base_url, "https://api.openai.com");
        assert_eq!(config.model, "dall-e-3");
        assert_eq!(config.size, "1024x1024");
        assert_eq!(config.num_images, 1);
        assert!(config.credential().is_none());
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let config = ProviderConfig::new().with_api_key("   ");
        assert!(config.credential().is_none());
        assert!(!config.validate());

        let config = ProviderConfig::new().with_api_key("sk-test");
        assert_eq!(config.credential(), Some("sk-test"));
        assert!(config.validate());
    }

    #[test]
    fn test_config_builders() {
        let config = Config::new()
            .with_port(9000)
            .with_history_dir("/tmp/logogen-history")
            .with_provider(ProviderConfig::new().with_base_url("http://localhost:1234"));

        assert_eq!(config.port_or_default(), 9000);
        assert_eq!(
            config.history_dir_or_default(),
            PathBuf::from("/tmp/logogen-history")
        );
        assert_eq!(config.provider.base_url, "http://localhost:1234");
        assert_eq!(Config::new().port_or_default(), DEFAULT_PORT);
    }
}
