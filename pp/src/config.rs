//! plugpipe configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::plugins::OutputFormat;

/// Selects one registered plugin by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    pub name: String,
}

impl PluginConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Which plugin to instantiate for each stage
///
/// The default selection is `hello` -> `upper` -> `console`. It is only used
/// when no configuration is supplied; assembly never falls back to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source: PluginConfig,
    pub transform: PluginConfig,
    pub sink: PluginConfig,
}

impl PipelineConfig {
    pub fn new(source: impl Into<String>, transform: impl Into<String>, sink: impl Into<String>) -> Self {
        Self {
            source: PluginConfig::new(source),
            transform: PluginConfig::new(transform),
            sink: PluginConfig::new(sink),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new("hello", "upper", "console")
    }
}

/// Main plugpipe configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Rendering used by the console sink
    pub format: OutputFormat,

    /// Stage selection
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Project-local config file, relative to the working directory
    pub const PROJECT_FILE: &'static str = ".plugpipe.yml";

    /// The file `load` would read: the explicit path if given, otherwise the
    /// first existing of `./.plugpipe.yml` and `<config_dir>/plugpipe/plugpipe.yml`
    pub fn locate(config_path: Option<&PathBuf>) -> Option<PathBuf> {
        if let Some(path) = config_path {
            return Some(path.clone());
        }
        let user_config = dirs::config_dir().map(|dir| dir.join("plugpipe").join("plugpipe.yml"));
        [Some(PathBuf::from(Self::PROJECT_FILE)), user_config]
            .into_iter()
            .flatten()
            .find(|path| path.exists())
    }

    /// Load the located config file, or defaults when there is none
    ///
    /// A file that exists but cannot be read or parsed is an error, whether
    /// it was passed explicitly or discovered.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        Self::load_from(Self::locate(config_path).as_deref())
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        serde_yaml::from_str(&content).context("Failed to parse config file")
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_pipeline_selection() {
        let config = PipelineConfig::default();
        assert_eq!(config.source.name, "hello");
        assert_eq!(config.transform.name, "upper");
        assert_eq!(config.sink.name, "console");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log-level: debug
format: json
pipeline:
  source:
    name: msg
  transform:
    name: noop
  sink:
    name: console
"#
        )
        .unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.pipeline, PipelineConfig::new("msg", "noop", "console"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "pipeline:\n  sink:\n    name: memory").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.log_level, None);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.pipeline.source.name, "hello");
        assert_eq!(config.pipeline.sink.name, "memory");
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let path = PathBuf::from("/nonexistent/plugpipe.yml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/plugpipe.yml"));
    }

    #[test]
    fn test_locate_prefers_explicit_path() {
        let path = PathBuf::from("/nonexistent/plugpipe.yml");
        assert_eq!(Config::locate(Some(&path)), Some(path));
    }

    #[test]
    fn test_load_from_none_uses_defaults() {
        assert_eq!(Config::load_from(None).unwrap(), Config::default());
    }

    #[test]
    fn test_discovered_malformed_file_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "pipeline:\n  sink: [oops]").unwrap();

        let err = Config::load_from(Some(file.path())).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load config from"));
    }

    #[test]
    fn test_invalid_yaml_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "pipeline: [not, a, map]").unwrap();

        assert!(Config::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = Config {
            log_level: Some("warn".to_string()),
            format: OutputFormat::Json,
            pipeline: PipelineConfig::new("msg", "upper", "console"),
        };

        let yaml = config.to_yaml().unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
