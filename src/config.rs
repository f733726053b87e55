//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::router::{
    BasePath, BreadcrumbLabels, PageLayout, RegistryError, RouterSettings, ViewRegistry,
    DEFAULT_ASSET_PREFIX,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    /// Extra or overridden fragment paths, by view id
    #[serde(default)]
    pub views: BTreeMap<String, String>,

    /// Extra or overridden breadcrumb labels, by view id
    #[serde(default)]
    pub breadcrumbs: BTreeMap<String, String>,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Deployment of the site
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Fixed base path; detected from the page address when unset
    pub base_path: Option<String>,

    /// Sub-directory deployments recognised by detection
    #[serde(default = "default_known_base_paths")]
    pub known_base_paths: Vec<String>,

    /// Directory holding `index.html`, `views/` and `assets/`
    #[serde(default = "default_root_dir")]
    pub root_dir: String,

    #[serde(default = "default_asset_prefix")]
    pub asset_prefix: String,
}

fn default_known_base_paths() -> Vec<String> {
    vec!["/OK-DEVS".to_string()]
}

fn default_root_dir() -> String {
    "./site".to_string()
}

fn default_asset_prefix() -> String {
    DEFAULT_ASSET_PREFIX.to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            known_base_paths: default_known_base_paths(),
            root_dir: default_root_dir(),
            asset_prefix: default_asset_prefix(),
        }
    }
}

impl SiteConfig {
    /// Base path for a page address: the fixed one, else detection
    pub fn base_path_for(&self, pathname: &str) -> BasePath {
        match &self.base_path {
            Some(fixed) => BasePath::new(fixed),
            None => BasePath::detect(pathname, &self.known_base_paths),
        }
    }
}

/// Page element ids
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_container_id")]
    pub container_id: String,

    #[serde(default = "default_breadcrumbs_id")]
    pub breadcrumbs_id: String,

    #[serde(default = "default_loading_class")]
    pub loading_class: String,
}

fn default_container_id() -> String {
    "app-content".to_string()
}

fn default_breadcrumbs_id() -> String {
    "breadcrumbs".to_string()
}

fn default_loading_class() -> String {
    "loading".to_string()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            breadcrumbs_id: default_breadcrumbs_id(),
            loading_class: default_loading_class(),
        }
    }
}

impl From<&LayoutConfig> for PageLayout {
    fn from(config: &LayoutConfig) -> Self {
        PageLayout {
            container_id: config.container_id.clone(),
            breadcrumbs_id: config.breadcrumbs_id.clone(),
            loading_class: config.loading_class.clone(),
        }
    }
}

/// Preview server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8084
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    #[cfg(feature = "native")]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("okdevs").join("config.toml")),
            Some(PathBuf::from("/etc/okdevs/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `OKDEVS_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Site overrides
        if let Some(base_path) = lookup("OKDEVS_BASE_PATH") {
            self.site.base_path = Some(base_path);
        }
        if let Some(root_dir) = lookup("OKDEVS_SITE_DIR") {
            self.site.root_dir = root_dir;
        }

        // Server overrides
        if let Some(host) = lookup("OKDEVS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("OKDEVS_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("OKDEVS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("OKDEVS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// The configured view registry
    pub fn registry(&self) -> Result<ViewRegistry, ConfigError> {
        Ok(ViewRegistry::site_default().extended(
            self.views
                .iter()
                .map(|(view, path)| (view.as_str(), path.as_str())),
        )?)
    }

    /// Router settings for a page at `pathname`
    pub fn router_settings(&self, pathname: &str) -> Result<RouterSettings, ConfigError> {
        Ok(RouterSettings {
            base_path: self.site.base_path_for(pathname),
            registry: self.registry()?,
            labels: BreadcrumbLabels::site_default().with_overrides(
                self.breadcrumbs
                    .iter()
                    .map(|(view, label)| (view.as_str(), label.as_str())),
            ),
            asset_prefix: Some(self.site.asset_prefix.clone()),
            layout: PageLayout::from(&self.layout),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid view registry: {0}")]
    Registry(#[from] RegistryError),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# OK Devs Configuration
#
# Environment variables override these settings:
# - OKDEVS_BASE_PATH
# - OKDEVS_SITE_DIR
# - OKDEVS_HOST
# - OKDEVS_PORT
# - OKDEVS_LOG_LEVEL
# - OKDEVS_LOG_FORMAT

[site]
# Fixed base path; when unset it is detected from the page address
# base_path = "/OK-DEVS/"

# Sub-directory deployments recognised by detection
known_base_paths = ["/OK-DEVS"]

# Directory holding index.html, views/ and assets/
root_dir = "./site"

# Attribute prefix rewritten onto the base path
asset_prefix = "assets/"

[layout]
# Element replaced by each view
container_id = "app-content"

# Element showing the current view's label
breadcrumbs_id = "breadcrumbs"

# Class set on the container while a view loads
loading_class = "loading"

[views]
# Extra or overridden fragments, by view id
# careers = "views/careers.html"

[breadcrumbs]
# Extra or overridden breadcrumb labels, by view id
# careers = "Careers"

[server]
# Preview server host
host = "127.0.0.1"

# Preview server port
port = 8084

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/okdevs/okdevs.log"
"#
    .to_string()
}
