//! # Configuration
//!
//! Chooses which dataset to load and how many status buckets to show, with a
//! clear override hierarchy: defaults → config file → env vars.
//!
//! Config lives at `~/.drugmix/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::resolver::ResolverOptions;
use crate::data::DEFAULT_DATASET;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DrugMixConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DatasetConfig {
    /// Bundled dataset name
    pub name: Option<String>,
    /// External dataset file, relative to `~/.drugmix/` unless absolute
    pub file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub include_caution_as_distinct_bucket: Option<bool>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Bundled(String),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub dataset: DatasetSource,
    pub options: ResolverOptions,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetSource::Bundled(DEFAULT_DATASET.to_string()),
            options: ResolverOptions::default(),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// A config file that exists but cannot be used. Both variants carry the
/// offending path so startup can report which file to fix.
#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Malformed { path: PathBuf, source: toml::de::Error },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Malformed { path, .. } => path,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            ConfigError::Malformed { path, source } => {
                write!(f, "{} is not a valid drugmix config: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Malformed { source, .. } => Some(source),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.drugmix/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".drugmix"))
}

/// Returns the path to `~/.drugmix/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Loads `~/.drugmix/config.toml`, seeding it on first run.
/// Without a home directory the defaults are used.
pub fn load_config() -> Result<DrugMixConfig, ConfigError> {
    match config_path() {
        Some(path) => load_or_seed(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(DrugMixConfig::default())
        }
    }
}

/// Reads the config at `path`. A missing file is replaced by the commented-out
/// default and reads as an empty config.
pub fn load_or_seed(path: &Path) -> Result<DrugMixConfig, ConfigError> {
    if path.exists() {
        return load_config_from(path);
    }
    info!("No config at {}, writing a commented default", path.display());
    generate_default_config(path);
    Ok(DrugMixConfig::default())
}

/// Load config from an explicit path. The file must exist.
pub fn load_config_from(path: &Path) -> Result<DrugMixConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DrugMixConfig =
        toml::from_str(&contents).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Loaded config from {}: {config:?}", path.display());
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Drugmix Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars.

# [dataset]
# name = "critical_care"             # Bundled dataset (or DRUGMIX_DATASET)
# file = "my_ward.json"              # External dataset, relative to ~/.drugmix/
#                                    # (or DRUGMIX_DATASET_FILE); wins over name

# [display]
# include_caution_as_distinct_bucket = true   # false = fold caution into
#                                             # limited data (DRUGMIX_CAUTION_BUCKET)
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars.
pub fn resolve(config: &DrugMixConfig) -> ResolvedConfig {
    resolve_with(config, process_env)
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Same as [`resolve`], reading variables through `env` instead of the process
/// environment.
pub fn resolve_with<F>(config: &DrugMixConfig, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Dataset file: env → config. A file always wins over a bundled name.
    let dataset_file = env("DRUGMIX_DATASET_FILE").or_else(|| config.dataset.file.clone());

    let dataset = match dataset_file {
        Some(file) => DatasetSource::File(resolve_dataset_path(&file)),
        None => {
            // Bundled name: env → config → default
            let name = env("DRUGMIX_DATASET")
                .or_else(|| config.dataset.name.clone())
                .unwrap_or_else(|| DEFAULT_DATASET.to_string());
            DatasetSource::Bundled(name)
        }
    };

    // Caution bucket: env → config → default
    let include_caution_as_distinct_bucket = env("DRUGMIX_CAUTION_BUCKET")
        .and_then(|v| parse_caution_bucket(&v))
        .or(config.display.include_caution_as_distinct_bucket)
        .unwrap_or(true);

    ResolvedConfig {
        dataset,
        options: ResolverOptions {
            include_caution_as_distinct_bucket,
        },
    }
}

/// Absolute paths are kept; relative ones resolve against `~/.drugmix/`.
fn resolve_dataset_path(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match config_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}

fn parse_caution_bucket(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "distinct" | "true" | "1" => Some(true),
        "merged" | "false" | "0" => Some(false),
        other => {
            warn!("Ignoring DRUGMIX_CAUTION_BUCKET={other:?}, expected distinct or merged");
            None
        }
    }
}
