// src/config/loader.rs
//! Layered configuration loader
//!
//! Sources are merged as TOML documents, later layers winning key by key:
//!
//! 1. built-in defaults
//! 2. each existing file in the path list
//! 3. `ECG_*` environment variables, `__` separating nested keys
//!    (`ECG_T_WAVE__AMPLITUDE=0.5`, `ECG_ST_SEGMENT__ELEVATION__V2=0.3`)
//!
//! A top-level `pattern = "<name>"` key applies that clinical preset on top
//! of the merged result.

use crate::config::constants::paths;
use crate::config::Configuration;
use crate::error::{EcgErrorBuilder, EcgResult, ExportFormat};
use crate::patterns::{apply_pattern, ClinicalPattern};
use std::path::{Path, PathBuf};

const MERGED_SOURCE: &str = "<merged configuration>";

/// Configuration loader over files and environment
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
    current_config: Configuration,
}

impl ConfigLoader {
    /// Loader over `ecg-synth.toml` then `ecg-synth.local.toml`
    pub fn new() -> Self {
        Self::with_paths(vec![
            PathBuf::from(paths::DEFAULT_CONFIG_FILE),
            PathBuf::from(paths::LOCAL_CONFIG_FILE),
        ])
    }

    /// Create loader with custom paths, lowest precedence first
    pub fn with_paths(config_paths: Vec<PathBuf>) -> Self {
        Self {
            config_paths,
            env_prefix: paths::ENV_PREFIX.to_string(),
            current_config: Configuration::default(),
        }
    }

    /// Read overrides from `<prefix>*` variables instead of `ECG_*`
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// Merge every source, validate and remember the result
    pub fn load(&mut self) -> EcgResult<Configuration> {
        let mut merged = defaults_document()?;

        for config_path in &self.config_paths {
            if config_path.exists() {
                let file_config = load_config_file(config_path)?;
                tracing::info!(path = %config_path.display(), "configuration file loaded");
                merge_toml_values(&mut merged, file_config);
            }
        }

        self.apply_environment_overrides(&mut merged);

        let config = finish(merged)?;
        self.current_config = config.clone();
        Ok(config)
    }

    /// Configuration from the last successful [`load`](Self::load)
    pub fn current_config(&self) -> &Configuration {
        &self.current_config
    }

    /// One TOML document over the defaults, without files or environment
    pub fn from_toml_str(content: &str) -> EcgResult<Configuration> {
        let document = parse_document(content, "<string>")?;
        let mut merged = defaults_document()?;
        merge_toml_values(&mut merged, document);
        finish(merged)
    }

    /// Check a file parses and yields a valid configuration
    pub fn validate_config_file<P: AsRef<Path>>(&self, path: P) -> EcgResult<()> {
        let document = load_config_file(path.as_ref())?;
        let mut merged = defaults_document()?;
        merge_toml_values(&mut merged, document);
        finish(merged).map(|_| ())
    }

    /// Write the current configuration as pretty TOML
    pub fn export_config<P: AsRef<Path>>(&self, path: P) -> EcgResult<()> {
        let path = path.as_ref();
        let toml_content = toml::to_string_pretty(&self.current_config).map_err(|e| {
            EcgErrorBuilder::new("config_loader", "export_config")
                .serialization(ExportFormat::Toml, &e.to_string())
        })?;

        std::fs::write(path, toml_content).map_err(|e| {
            EcgErrorBuilder::new("config_loader", "export_config")
                .config_source(&path.display().to_string(), &e.to_string())
        })
    }

    fn apply_environment_overrides(&self, config: &mut toml::Value) {
        let mut overrides: Vec<(String, String)> = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .filter(|(key, _)| key.starts_with(&self.env_prefix))
            .collect();
        overrides.sort();

        for (key, value) in overrides {
            let Some(stripped) = key.strip_prefix(&self.env_prefix) else {
                continue;
            };
            let config_key = stripped.to_lowercase();
            let path: Vec<&str> = config_key.split(paths::ENV_NESTING_SEPARATOR).collect();

            if path.iter().any(|part| part.is_empty())
                || !set_nested_value(config, &path, parse_env_value(&value))
            {
                tracing::warn!(variable = %key, "ignoring unusable environment override");
            }
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn defaults_document() -> EcgResult<toml::Value> {
    toml::Value::try_from(Configuration::default()).map_err(|e| {
        EcgErrorBuilder::new("config_loader", "defaults").serialization(ExportFormat::Toml, &e.to_string())
    })
}

fn parse_document(content: &str, source: &str) -> EcgResult<toml::Value> {
    toml::from_str(content).map_err(|e| {
        EcgErrorBuilder::new("config_loader", "parse").config_source(source, &e.to_string())
    })
}

fn load_config_file(path: &Path) -> EcgResult<toml::Value> {
    let source = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| {
        EcgErrorBuilder::new("config_loader", "read").config_source(&source, &e.to_string())
    })?;
    parse_document(&content, &source)
}

/// Pull out the pattern key, deserialize, validate, then apply the pattern
fn finish(mut merged: toml::Value) -> EcgResult<Configuration> {
    let pattern = match merged
        .as_table_mut()
        .and_then(|table| table.remove(paths::PATTERN_KEY))
    {
        Some(toml::Value::String(name)) => Some(name.parse::<ClinicalPattern>()?),
        Some(other) => {
            return Err(EcgErrorBuilder::new("config_loader", "pattern").configuration(
                paths::PATTERN_KEY,
                &format!("expected a pattern name, found {}", other.type_str()),
            ))
        }
        None => None,
    };

    let config: Configuration = merged.try_into().map_err(|e: toml::de::Error| {
        EcgErrorBuilder::new("config_loader", "deserialize").config_source(MERGED_SOURCE, &e.to_string())
    })?;
    config.validate()?;

    match pattern {
        Some(pattern) => apply_pattern(&config, pattern),
        None => Ok(config),
    }
}

fn merge_toml_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(&key) {
                    merge_toml_values(base_value, value);
                } else {
                    base_table.insert(key, value);
                }
            }
        }
        (base_value, overlay_value) => {
            *base_value = overlay_value;
        }
    }
}

fn parse_env_value(value: &str) -> toml::Value {
    if let Ok(int_val) = value.parse::<i64>() {
        toml::Value::Integer(int_val)
    } else if let Ok(float_val) = value.parse::<f64>() {
        toml::Value::Float(float_val)
    } else if let Ok(bool_val) = value.parse::<bool>() {
        toml::Value::Boolean(bool_val)
    } else {
        toml::Value::String(value.to_string())
    }
}

/// Returns false when a non-table value sits on the path
fn set_nested_value(config: &mut toml::Value, path: &[&str], value: toml::Value) -> bool {
    let Some((last, parents)) = path.split_last() else {
        return false;
    };

    let mut current = config;
    for part in parents {
        let Some(table) = current.as_table_mut() else {
            return false;
        };
        current = table
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::value::Table::new()));
    }

    match current.as_table_mut() {
        Some(table) => {
            table.insert(last.to_string(), value);
            true
        }
        None => false,
    }
}
