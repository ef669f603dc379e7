//! Configuration types for mnxq.
//!
//! [`Config::load`] reads `~/.config/mnxq/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::ranking::Scorer;
use crate::types::MatchType;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[search]
match_type             = "both"
partial_limit          = 5
lookup_timeout_ms      = 30000
max_concurrent_lookups = 4
scorer                 = "indel"

[sparql]
endpoint = "http://rdf.metanetx.org/sparql"

[server]
addr = "127.0.0.1:8080"
"#;

/// Largest partial-match limit accepted from users.
pub const MAX_PARTIAL_LIMIT: usize = 50;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/mnxq/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub sparql: SparqlConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub match_type: MatchType,
    #[serde(default = "default_partial_limit")]
    pub partial_limit: usize,
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
    #[serde(default = "default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,
    #[serde(default)]
    pub scorer: Scorer,
}

fn default_partial_limit() -> usize { 5 }
fn default_lookup_timeout_ms() -> u64 { 30_000 }
fn default_max_concurrent_lookups() -> usize { 4 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            match_type: MatchType::default(),
            partial_limit: default_partial_limit(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
            max_concurrent_lookups: default_max_concurrent_lookups(),
            scorer: Scorer::default(),
        }
    }
}

/// `[sparql]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SparqlConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String { "http://rdf.metanetx.org/sparql".to_string() }

impl Default for SparqlConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

/// `[server]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

fn default_addr() -> String { "127.0.0.1:8080".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: default_addr() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/mnxq/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file, layered on top of the built-in defaults.
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn validate(&self) -> anyhow::Result<()> {
        check_partial_limit(self.search.partial_limit)?;
        anyhow::ensure!(
            self.search.lookup_timeout_ms > 0,
            "search.lookup_timeout_ms must be greater than zero"
        );
        Ok(())
    }
}

/// Reject partial-match limits outside `1..=MAX_PARTIAL_LIMIT`.
pub fn check_partial_limit(limit: usize) -> anyhow::Result<usize> {
    anyhow::ensure!(
        (1..=MAX_PARTIAL_LIMIT).contains(&limit),
        "partial match limit must be between 1 and {MAX_PARTIAL_LIMIT}, got {limit}"
    );
    Ok(limit)
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("mnxq")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
