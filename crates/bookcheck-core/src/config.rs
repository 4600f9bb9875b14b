use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_CATALOGUE_URL: &str = "https://na5.iiivega.com/api/search-result/search/format-groups";
const DEFAULT_CUSTOMER_DOMAIN: &str = "mvpl.na5.iiivega.com";
const DEFAULT_HOST_DOMAIN: &str = "librarycatalog.mountainview.gov";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Vision model (OpenAI-compatible chat completions) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL of the API, without the `/chat/completions` suffix
    pub base_url: String,
    pub request_timeout_seconds: u32,
    pub max_tokens: u32,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            request_timeout_seconds: 60,
            max_tokens: 4096,
        }
    }
}

impl VisionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.request_timeout_seconds))
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("OPENAI_API_KEY"));
        }
        Ok(())
    }
}

/// Library catalogue (Vega format-group search) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    pub search_url: String,
    /// Sent as `iii-customer-domain`
    pub customer_domain: String,
    /// Sent as `iii-host-domain`
    pub host_domain: String,
    /// Sent as `api-version`
    pub api_version: String,
    pub request_timeout_seconds: u32,
    pub page_size: u32,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_CATALOGUE_URL.to_string(),
            customer_domain: DEFAULT_CUSTOMER_DOMAIN.to_string(),
            host_domain: DEFAULT_HOST_DOMAIN.to_string(),
            api_version: "2".to_string(),
            request_timeout_seconds: 10,
            page_size: 5,
        }
    }
}

impl CatalogueConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.request_timeout_seconds))
    }

    /// Fixed identifying headers sent with every catalogue request
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("iii-customer-domain".to_string(), self.customer_domain.clone()),
            ("iii-host-domain".to_string(), self.host_domain.clone()),
            ("api-version".to_string(), self.api_version.clone()),
        ]
    }
}

/// Open Library settings for ISBN enrichment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenLibraryConfig {
    pub base_url: String,
    pub request_timeout_seconds: u32,
}

impl Default for OpenLibraryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openlibrary.org".to_string(),
            request_timeout_seconds: 10,
        }
    }
}

impl OpenLibraryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.request_timeout_seconds))
    }

    pub fn search_url(&self) -> String {
        format!("{}/search.json", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub vision: VisionConfig,
    pub catalogue: CatalogueConfig,
    pub open_library: OpenLibraryConfig,
}

impl Settings {
    /// Defaults overridden by whatever is set in the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] but reads variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("OPENAI_API_KEY") {
            settings.vision.api_key = v;
        }
        if let Some(v) = get("OPENAI_MODEL") {
            settings.vision.model = v;
        }
        if let Some(v) = get("OPENAI_BASE_URL") {
            settings.vision.base_url = v;
        }
        if let Some(v) = get("BOOKCHECK_CATALOGUE_URL") {
            settings.catalogue.search_url = v;
        }
        if let Some(v) = get("BOOKCHECK_CUSTOMER_DOMAIN") {
            settings.catalogue.customer_domain = v;
        }
        if let Some(v) = get("BOOKCHECK_HOST_DOMAIN") {
            settings.catalogue.host_domain = v;
        }
        if let Some(v) = get("BOOKCHECK_API_VERSION") {
            settings.catalogue.api_version = v;
        }
        if let Some(v) = get("BOOKCHECK_PAGE_SIZE") {
            settings.catalogue.page_size = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "BOOKCHECK_PAGE_SIZE",
                value: v.clone(),
            })?;
        }
        if let Some(v) = get("BOOKCHECK_OPEN_LIBRARY_URL") {
            settings.open_library.base_url = v;
        }

        Ok(settings)
    }
}
