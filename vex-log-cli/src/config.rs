//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "vex-log.toml";

/// Main application configuration (loaded from vex-log.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Directory holding the log files (the SD card)
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Extension of log files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Print a `==> file <==` header before each file when decoding several
    #[serde(default = "default_true")]
    pub header: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn default_log_dir() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"V:\")
    } else {
        PathBuf::from(".")
    }
}

fn default_extension() -> String {
    "txt".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            extension: default_extension(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            header: true,
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Resolve the configuration for this run
///
/// An explicit path must load. The implicit `vex-log.toml` falls back to
/// defaults if it is broken.
pub fn resolve_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        log::info!("Loading configuration from: {:?}", path);
        return load_config(path);
    }

    let implicit = Path::new(DEFAULT_CONFIG_FILE);
    if !implicit.exists() {
        log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
        return Ok(AppConfig::default());
    }

    match load_config(implicit) {
        Ok(config) => {
            log::debug!("Configuration loaded from {:?}", implicit);
            Ok(config)
        }
        Err(e) => {
            log::warn!("Ignoring {}: {:#}", DEFAULT_CONFIG_FILE, e);
            Ok(AppConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            log_dir = "/media/sd"
            extension = "log"

            [output]
            format = "json"
            header = false
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.log_dir, PathBuf::from("/media/sd"));
        assert_eq!(config.extension, "log");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.header);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.extension, "txt");
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.header);
        assert_eq!(config.log_dir, default_log_dir());
    }

    #[test]
    fn test_load_config_reports_parse_errors() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[output]\nformat = \"yaml\"\n").unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_config(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
