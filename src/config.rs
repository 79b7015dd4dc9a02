//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding persisted collections (one JSON file per key)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// JSON catalog file; the built-in catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Simulated catalog latency in milliseconds
    #[serde(default)]
    pub latency_ms: u64,

    /// Random jitter added to latency (0 to this value)
    #[serde(default)]
    pub latency_jitter_ms: u64,

    /// Quiet period before search results are recomputed
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Quiet period before suggestions are recomputed
    #[serde(default = "default_suggest_debounce_ms")]
    pub suggest_debounce_ms: u64,

    /// Maximum number of results to print
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Keep the cart across runs. Off by default: the cart lives in memory only.
    #[serde(default)]
    pub persist_cart: bool,
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_suggest_debounce_ms() -> u64 {
    200
}

fn default_max_results() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            catalog_path: None,
            format: OutputFormat::Table,
            latency_ms: 0,
            latency_jitter_ms: 0,
            search_debounce_ms: default_search_debounce_ms(),
            suggest_debounce_ms: default_suggest_debounce_ms(),
            max_results: default_max_results(),
            persist_cart: false,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("storefront.toml");
        if local_config.exists() {
            debug!("Found storefront.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("storefront").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(dir) = std::env::var("STOREFRONT_DATA_DIR") {
            if !dir.is_empty() {
                self.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(catalog) = std::env::var("STOREFRONT_CATALOG") {
            if !catalog.is_empty() {
                self.catalog_path = Some(PathBuf::from(catalog));
            }
        }

        if let Ok(persist) = std::env::var("STOREFRONT_PERSIST_CART") {
            if let Ok(p) = persist.parse() {
                self.persist_cart = p;
            }
        }

        self
    }

    /// Resolves the data directory: configured path, else the platform data dir.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }

        dirs::data_dir()
            .map(|d| d.join("storefront"))
            .unwrap_or_else(|| PathBuf::from(".storefront"))
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
