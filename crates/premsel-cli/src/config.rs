//! `premsel.toml`: the one configuration file every command reads.
//!
//! ```toml
//! [corpus]
//! root = "data/TPTP"
//!
//! [prover]
//! binary = "eprover"
//! args = ["--auto", "--proof-object"]
//! cpu_limit_secs = 5
//! grace_secs = 2.0
//! cpu_limit_flag = "--cpu-limit={secs}"
//!
//! [batch]
//! workers = 4
//! output = "data/results/dataset.jsonl"
//!
//! [selection]
//! k = 32
//! ```
//!
//! A missing file means all defaults. Command-line flags override file values.

use premsel_proof::ProverConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "premsel.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PremselConfig {
    pub corpus: CorpusSection,
    pub prover: ProverSection,
    pub batch: BatchSection,
    pub selection: SelectionSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusSection {
    /// Directory that `include('...')` paths are relative to.
    pub root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProverSection {
    pub binary: PathBuf,
    pub args: Vec<String>,
    pub cpu_limit_secs: u64,
    pub grace_secs: f64,
    /// Empty string disables the flag.
    pub cpu_limit_flag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSection {
    pub workers: usize,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSection {
    pub k: usize,
}

impl Default for CorpusSection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data/TPTP"),
        }
    }
}

impl Default for ProverSection {
    fn default() -> Self {
        let eprover = ProverConfig::eprover("eprover");
        Self {
            binary: eprover.binary,
            args: eprover.args,
            cpu_limit_secs: eprover.cpu_limit.as_secs(),
            grace_secs: eprover.grace.as_secs_f64(),
            cpu_limit_flag: eprover.cpu_limit_flag.unwrap_or_default(),
        }
    }
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            workers: 4,
            output: PathBuf::from("data/results/dataset.jsonl"),
        }
    }
}

impl Default for SelectionSection {
    fn default() -> Self {
        Self { k: 32 }
    }
}

impl PremselConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch.workers == 0 {
            return Err(ConfigError::Invalid("batch.workers must be at least 1".to_string()));
        }
        if !(self.prover.grace_secs.is_finite() && self.prover.grace_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "prover.grace_secs must be positive, got {}",
                self.prover.grace_secs
            )));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Render)
    }

    /// Runtime prover settings, with `TPTP` pointed at the corpus root.
    pub fn prover_config(&self) -> Result<ProverConfig, ConfigError> {
        self.validate()?;
        let grace = Duration::try_from_secs_f64(self.prover.grace_secs)
            .map_err(|e| ConfigError::Invalid(format!("prover.grace_secs: {e}")))?;
        let flag = self.prover.cpu_limit_flag.trim();
        Ok(ProverConfig {
            binary: self.prover.binary.clone(),
            args: self.prover.args.clone(),
            cpu_limit_flag: (!flag.is_empty()).then(|| flag.to_string()),
            cpu_limit: Duration::from_secs(self.prover.cpu_limit_secs),
            grace,
            corpus_root: Some(self.corpus.root.clone()),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to render config: {0}")]
    Render(toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
