//! Configuration loading for Curie.
//! Reads curie.toml from the current directory or the path in CURIE_CONFIG.
//! Every field has a default, so a missing file or section is not an error.

use std::path::{Path, PathBuf};

use curie_common::Result;
use curie_phenotype::{PhenotypeClassifier, RuleTable, DEFAULT_MAX_DRIVERS};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "curie.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub phenotype: PhenotypeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "0.0.0.0:8000".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding trials.json and guidelines.json.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

fn default_data_dir() -> PathBuf { PathBuf::from("./data") }

impl Default for DataConfig {
    fn default() -> Self {
        Self { dir: default_data_dir() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhenotypeConfig {
    #[serde(default = "default_max_drivers")]
    pub max_drivers: usize,
    /// Replaces the standard rule table when present.
    #[serde(default)]
    pub rules: Option<RuleTable>,
}

fn default_max_drivers() -> usize { DEFAULT_MAX_DRIVERS }

impl Default for PhenotypeConfig {
    fn default() -> Self {
        Self { max_drivers: default_max_drivers(), rules: None }
    }
}

mod tests;

impl Config {
    /// Load configuration from curie.toml.
    /// Checks CURIE_CONFIG env var first, then current directory.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CURIE_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        if !Path::new(&path).exists() {
            warn!("Config file not found: {path}; using defaults");
            warn!("Copy curie.example.toml to curie.toml to change them.");
            return Ok(Self::default());
        }
        Self::from_path(Path::new(&path))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build the classifier described by the `[phenotype]` section.
    pub fn classifier(&self) -> Result<PhenotypeClassifier> {
        let rules = self.phenotype.rules.clone().unwrap_or_default();
        PhenotypeClassifier::new(rules, self.phenotype.max_drivers)
    }

    /// Bind address, honouring CURIE_BIND and then PORT from the environment.
    pub fn bind_addr(&self) -> String {
        resolve_bind(
            std::env::var("CURIE_BIND").ok(),
            std::env::var("PORT").ok(),
            &self.server.bind,
        )
    }
}

fn resolve_bind(bind_env: Option<String>, port_env: Option<String>, configured: &str) -> String {
    if let Some(bind) = bind_env.filter(|b| !b.is_empty()) {
        return bind;
    }
    match port_env.and_then(|p| p.parse::<u16>().ok()) {
        Some(port) => format!("0.0.0.0:{port}"),
        None => configured.to_string(),
    }
}
