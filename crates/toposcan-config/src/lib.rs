//! Configuration system for toposcan.
//!
//! Load pipeline configuration from TOML or YAML to control threading,
//! batching, classification and decoration without code changes. The
//! builtin rule and growth tables can be replaced by TOML files.
//!
//! # Examples
//!
//! ```
//! use toposcan_config::{PipelineConfig, ThreadCount};
//!
//! let config = PipelineConfig::from_toml_str(r#"
//!     threads = { specific = 8 }
//!     batch_size = 5000
//!
//!     [classifier]
//!     strategy = "fast"
//! "#).unwrap();
//!
//! assert_eq!(config.threads, ThreadCount::Specific(8));
//! assert_eq!(config.batch_size, 5000);
//! assert_eq!(config.decoration.instanton_cap, Some(3));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use toposcan_config::PipelineConfig;
//!
//! let config = PipelineConfig::load("toposcan.toml").unwrap_or_default();
//! assert_eq!(config.batch_size, 10_000);
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toposcan_core::{ClassifierStrategy, GrowthTable, RuleTable, SpectralClassifier};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main pipeline configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct PipelineConfig {
    /// Number of worker threads.
    pub threads: ThreadCount,

    /// Configurations per queued batch.
    pub batch_size: usize,

    /// Buffered output size that triggers a flush to disk.
    pub flush_threshold_bytes: usize,

    /// Records between progress log lines.
    pub progress_interval: u64,

    pub classifier: ClassifierConfig,

    pub decoration: DecorationConfig,

    /// Output format override. Each job has its own default.
    pub emit: Option<EmitFormat>,

    /// TOML file replacing the builtin gluing rules.
    pub rule_table: Option<PathBuf>,

    /// TOML file replacing the builtin growth tables.
    pub growth_table: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threads: ThreadCount::Auto,
            batch_size: 10_000,
            flush_threshold_bytes: 64 << 20,
            progress_interval: 50_000,
            classifier: ClassifierConfig::default(),
            decoration: DecorationConfig::default(),
            emit: None,
            rule_table: None,
            growth_table: None,
        }
    }
}

impl PipelineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be positive".into()));
        }
        if let ThreadCount::Specific(0) = self.threads {
            return Err(ConfigError::Invalid("threads must be positive".into()));
        }
        let tol = self.classifier.tolerance;
        if !(tol.is_finite() && tol > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "classifier tolerance must be positive, got {}",
                tol
            )));
        }
        Ok(())
    }

    pub fn with_threads(mut self, threads: ThreadCount) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_flush_threshold(mut self, bytes: usize) -> Self {
        self.flush_threshold_bytes = bytes;
        self
    }

    pub fn with_progress_interval(mut self, records: u64) -> Self {
        self.progress_interval = records;
        self
    }

    pub fn with_strategy(mut self, strategy: ClassifierStrategy) -> Self {
        self.classifier.strategy = strategy;
        self
    }

    pub fn with_emit(mut self, emit: EmitFormat) -> Self {
        self.emit = Some(emit);
        self
    }

    pub fn with_rule_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.rule_table = Some(path.into());
        self
    }

    pub fn with_growth_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.growth_table = Some(path.into());
        self
    }

    /// Classifier built from the `classifier` section.
    pub fn classifier(&self) -> SpectralClassifier {
        self.classifier.build()
    }

    /// The configured rule table, or the builtin one.
    pub fn rule_table(&self) -> Result<Arc<RuleTable>, ConfigError> {
        match &self.rule_table {
            Some(path) => Ok(Arc::new(load_table(path)?)),
            None => Ok(RuleTable::builtin()),
        }
    }

    /// The configured growth table, or the builtin one.
    pub fn growth_table(&self) -> Result<Arc<GrowthTable>, ConfigError> {
        match &self.growth_table {
            Some(path) => Ok(Arc::new(load_table(path)?)),
            None => Ok(GrowthTable::builtin()),
        }
    }
}

fn load_table<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Worker thread count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// One thread per available core.
    #[default]
    Auto,

    /// Specific number of threads.
    Specific(usize),
}

impl ThreadCount {
    /// Resolves the thread count to an actual number, at least 1.
    pub fn resolve(&self) -> usize {
        match self {
            ThreadCount::Auto => std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4),
            ThreadCount::Specific(n) => (*n).max(1),
        }
    }
}

impl std::fmt::Display for ThreadCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreadCount::Auto => write!(f, "Auto"),
            ThreadCount::Specific(n) => write!(f, "{}", n),
        }
    }
}

/// Spectral classifier configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ClassifierConfig {
    /// Eigenvalues within this distance of zero count as null.
    pub tolerance: f64,

    pub strategy: ClassifierStrategy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            tolerance: toposcan_core::DEFAULT_TOLERANCE,
            strategy: ClassifierStrategy::Exact,
        }
    }
}

impl ClassifierConfig {
    pub fn build(&self) -> SpectralClassifier {
        SpectralClassifier::new()
            .with_tolerance(self.tolerance)
            .with_strategy(self.strategy)
    }
}

/// Caps on decorations tried per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct DecorationConfig {
    /// Side links tried per node; `None` tries the whole bank.
    pub side_cap: Option<usize>,

    /// Instantons tried per node; `None` tries the whole bank.
    pub instanton_cap: Option<usize>,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            side_cap: None,
            instanton_cap: Some(3),
        }
    }
}

/// How saved records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitFormat {
    /// One compact line per configuration.
    Line,
    /// The composed intersection form as integer rows.
    Matrix,
}
