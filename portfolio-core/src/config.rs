use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BLOG_API_URL: &str = "https://gql.hashnode.com";
pub const DEFAULT_PUBLICATION: &str = "kells";
pub const DEFAULT_HOST_SUFFIX: &str = "hashnode.dev";

/// Everything the content gateways need to reach their remote services.
///
/// Built once at startup and handed to the gateway constructors; nothing in
/// the gateways reads process-wide state at call time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GatewayConfig {
    pub blog: BlogConfig,
    pub cms: CmsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BlogConfig {
    pub api_url: String,
    /// Short publication identifier, e.g. the blog's username.
    pub publication: String,
    pub host_suffix: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CmsConfig {
    pub endpoint: Option<String>,
    pub token: Option<String>,
}

/// Endpoint and token of a CMS that passed the configuration check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsCredentials {
    pub endpoint: String,
    pub token: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BLOG_API_URL.to_owned(),
            publication: DEFAULT_PUBLICATION.to_owned(),
            host_suffix: DEFAULT_HOST_SUFFIX.to_owned(),
        }
    }
}

impl BlogConfig {
    /// Publication host sent as `variables.host`, e.g. `kells.hashnode.dev`.
    pub fn host(&self) -> String {
        let publication = match self.publication.trim() {
            "" => DEFAULT_PUBLICATION,
            value => value,
        };
        format!("{}.{}", publication, self.host_suffix.trim_start_matches('.'))
    }
}

impl CmsConfig {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            token: Some(token.into()),
        }
    }

    /// Returns the credentials only when both values are present and the
    /// endpoint is a valid absolute URL.
    pub fn credentials(&self) -> Option<CmsCredentials> {
        let endpoint = non_blank(self.endpoint.as_deref())?;
        let token = non_blank(self.token.as_deref())?;
        if let Err(err) = Url::parse(endpoint) {
            warn!(error = %err, endpoint, "ignoring invalid CMS endpoint");
            return None;
        }
        Some(CmsCredentials {
            endpoint: endpoint.to_owned(),
            token: token.to_owned(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }
}

impl GatewayConfig {
    /// Default location of the optional config file: `<config_dir>/portfolio/config.json`.
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("portfolio").join("config.json"))
    }

    /// Loads the config file (when there is one) and applies environment
    /// overrides on top. Unreadable files fall back to the defaults.
    pub fn load() -> Self {
        let path = match std::env::var("PORTFOLIO_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path.trim())),
            _ => Self::config_file_path().ok(),
        };

        let mut config = match path {
            Some(path) if path.exists() => match Self::load_from_file(&path) {
                Ok(config) => config,
                Err(err) => {
                    warn!(error = %err, path = %path.display(), "failed to load config, using defaults");
                    Self::default()
                }
            },
            Some(path) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Applies overrides from a key lookup (the process environment in
    /// production). Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_url) = first_value(&lookup, &["HASHNODE_API_URL"]) {
            self.blog.api_url = api_url;
        }
        if let Some(publication) = first_value(&lookup, &["HASHNODE_USERNAME", "NEXT_PUBLIC_HASHNODE_USERNAME"]) {
            self.blog.publication = publication;
        }
        if let Some(endpoint) = first_value(&lookup, &["HYGRAPH_ENDPOINT", "NEXT_PUBLIC_HYGRAPH_ENDPOINT"]) {
            self.cms.endpoint = Some(endpoint);
        }
        if let Some(token) = first_value(&lookup, &["HYGRAPH_TOKEN"]) {
            self.cms.token = Some(token);
        }
    }
}

fn first_value<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|key| lookup(*key))
        .map(|value| value.trim().to_owned())
        .find(|value| !value.is_empty())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
