//! CLI configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use sampler_engine::{RemainderPolicy, SamplerConfig, SamplingResult};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable holding the session seed.
pub const ENV_SEED: &str = "SAMPLER_SEED";
/// Environment variable holding the log level.
pub const ENV_LOG_LEVEL: &str = "SAMPLER_LOG_LEVEL";
/// Environment variable holding the remainder policy.
pub const ENV_REMAINDER_POLICY: &str = "SAMPLER_REMAINDER_POLICY";
/// Environment variable holding the output format.
pub const ENV_FORMAT: &str = "SAMPLER_FORMAT";
/// Environment variable holding the histogram bin count.
pub const ENV_BINS: &str = "SAMPLER_BINS";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidFormat(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Invalid bin count: {0}. Must be at least 1")]
    InvalidBins(usize),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// How results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Summary plus a text histogram or bar chart
    #[default]
    Table,
    /// `{request, seed, output, summary}` documents
    Json,
    /// One row per value or replicate
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl OutputFormat {
    /// Lower-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_policy(value: &str) -> Result<RemainderPolicy, ConfigError> {
    RemainderPolicy::from_str(value).map_err(|_| ConfigError::InvalidValue {
        key: "remainder_policy",
        value: value.to_string(),
    })
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Session seed; drawn from OS entropy when absent
    pub seed: Option<u64>,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Treatment of weighted-category mass that does not sum to one
    #[serde(deserialize_with = "deserialize_remainder_policy")]
    pub remainder_policy: RemainderPolicy,
    /// Output format
    #[serde(deserialize_with = "deserialize_format")]
    pub format: OutputFormat,
    /// Fixed histogram bin count; automatic when absent
    pub bins: Option<usize>,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_remainder_policy<'de, D>(deserializer: D) -> Result<RemainderPolicy, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_policy(&s).map_err(serde::de::Error::custom)
}

fn deserialize_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Overrides fields whose variable `lookup` returns
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = Some(seed.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "seed",
                value: seed.clone(),
            })?);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(policy) = lookup(ENV_REMAINDER_POLICY) {
            self.remainder_policy = parse_policy(&policy)?;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = OutputFormat::from_str(&format)?;
        }
        if let Some(bins) = lookup(ENV_BINS) {
            self.bins = Some(bins.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "bins",
                value: bins.clone(),
            })?);
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(bins) = self.bins {
            if bins == 0 {
                return Err(ConfigError::InvalidBins(bins));
            }
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(policy) = &cli.remainder_policy {
            self.remainder_policy = parse_policy(policy)?;
        }
        if let Some(format) = &cli.format {
            self.format = OutputFormat::from_str(format)?;
        }
        if let Some(bins) = cli.bins {
            self.bins = Some(bins);
        }
        Ok(())
    }

    /// Engine session configuration
    pub fn sampler_config(&self) -> SamplingResult<SamplerConfig> {
        SamplerConfig::builder()
            .maybe_seed(self.seed)
            .remainder_policy(self.remainder_policy)
            .build()
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Seed override
    pub seed: Option<u64>,
    /// Log level override
    pub log_level: Option<String>,
    /// Remainder policy override
    pub remainder_policy: Option<String>,
    /// Output format override
    pub format: Option<String>,
    /// Histogram bin count override
    pub bins: Option<usize>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.remainder_policy, RemainderPolicy::Discard);
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.bins, None);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(format!("{}", OutputFormat::Table), "table");
        assert!(OutputFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            seed = 42
            log_level = "debug"
            remainder_policy = "Normalise"
            format = "json"
            bins = 30
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.remainder_policy, RemainderPolicy::Normalize);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.bins, Some(30));
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: CliConfig = toml::from_str("format = \"csv\"").unwrap();
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_toml_rejects_unknown_keys_and_values() {
        assert!(toml::from_str::<CliConfig>("port = 80").is_err());
        assert!(toml::from_str::<CliConfig>("remainder_policy = \"ignore\"").is_err());
    }

    #[test]
    fn test_from_file_validates() {
        let file = config_file("bins = 0\n");
        assert!(matches!(
            CliConfig::from_file(file.path()),
            Err(ConfigError::InvalidBins(0))
        ));

        let missing = CliConfig::from_file(Path::new("/nonexistent/sampler.toml"));
        assert!(matches!(missing, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_apply_env() {
        let mut config = CliConfig::default();
        config
            .apply_env(env(&[
                (ENV_SEED, "7"),
                (ENV_REMAINDER_POLICY, "reject"),
                (ENV_BINS, "12"),
            ]))
            .unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.remainder_policy, RemainderPolicy::Reject);
        assert_eq!(config.bins, Some(12));
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_apply_env_invalid_seed() {
        let mut config = CliConfig::default();
        let err = config.apply_env(env(&[(ENV_SEED, "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "seed", .. }));
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = CliConfig::default();
        let cli = CliArgs {
            seed: Some(99),
            log_level: Some("warn".to_string()),
            format: Some("csv".to_string()),
            ..Default::default()
        };

        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_build_config_priority() {
        let file = config_file("seed = 1\nformat = \"json\"\nbins = 5\nlog_level = \"error\"\n");
        let cli = CliArgs {
            config_file: Some(file.path().to_path_buf()),
            seed: Some(3),
            ..Default::default()
        };

        let config = build_config_with(&cli, env(&[(ENV_SEED, "2"), (ENV_FORMAT, "csv")])).unwrap();

        assert_eq!(config.seed, Some(3)); // CLI beats env and file
        assert_eq!(config.format, OutputFormat::Csv); // env beats file
        assert_eq!(config.bins, Some(5)); // file beats default
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.remainder_policy, RemainderPolicy::Discard);
    }

    #[test]
    fn test_build_config_with_defaults() {
        let config = build_config_with(&CliArgs::default(), env(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_build_config_rejects_zero_bins() {
        let cli = CliArgs {
            bins: Some(0),
            ..Default::default()
        };
        assert!(build_config_with(&cli, env(&[])).is_err());
    }

    #[test]
    fn test_sampler_config() {
        let config = CliConfig {
            seed: Some(5),
            remainder_policy: RemainderPolicy::Normalize,
            ..Default::default()
        };
        let sampler_config = config.sampler_config().unwrap();
        assert_eq!(sampler_config.seed(), Some(5));
        assert_eq!(sampler_config.remainder_policy(), RemainderPolicy::Normalize);
    }

    #[test]
    fn test_config_error_display() {
        assert!(ConfigError::InvalidBins(0).to_string().contains("Invalid bin count"));
        assert!(ConfigError::InvalidLogLevel("bad".to_string())
            .to_string()
            .contains("Invalid log level"));
    }
}
