//! CLI configuration management.
//!
//! Settings come from a TOML file (`lattice.toml` by default), fall back to
//! built-in defaults when the file is absent, and can be overridden through
//! `LATTICE_*` environment variables.

use pricer_core::math::solvers::SolverConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Largest lattice the CLI will build.
pub const MAX_STEPS: usize = 10_000;

/// Configuration error types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration file is not valid TOML for [`CliConfig`]
    #[error("Parse error: {0}")]
    Parse(String),

    /// Environment override could not be parsed
    #[error("Environment variable {name}: cannot parse '{value}'")]
    Env {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
    },

    /// Invalid log level name
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// One or more settings are out of range
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Log levels accepted in the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-iteration solver output
    Trace,
    /// Lattice parameters and solver iterations
    Debug,
    /// Command progress
    #[default]
    Info,
    /// Degenerate probabilities and non-convergence only
    Warn,
    /// Errors only
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
        write!(f, "{}", self.as_filter_str())
    }
}

/// CLI configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Default lattice steps
    #[serde(default = "default_steps")]
    pub steps: usize,

    /// Implied-volatility iteration budget
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Implied-volatility price tolerance
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Log level used when `RUST_LOG` is unset
    #[serde(default)]
    pub log_level: LogLevel,

    /// Directory for generated reports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_steps() -> usize {
    50
}

fn default_max_iterations() -> usize {
    100
}

fn default_tolerance() -> f64 {
    1e-4
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            log_level: LogLevel::default(),
            output_dir: default_output_dir(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load, apply environment overrides and validate
    pub fn resolve(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `LATTICE_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(steps) = lookup("LATTICE_STEPS") {
            self.steps = parse_env("LATTICE_STEPS", steps)?;
        }

        if let Some(max_iterations) = lookup("LATTICE_MAX_ITERATIONS") {
            self.max_iterations = parse_env("LATTICE_MAX_ITERATIONS", max_iterations)?;
        }

        if let Some(tolerance) = lookup("LATTICE_TOLERANCE") {
            self.tolerance = parse_env("LATTICE_TOLERANCE", tolerance)?;
        }

        if let Some(log_level) = lookup("LATTICE_LOG_LEVEL") {
            self.log_level = log_level.parse()?;
        }

        if let Some(output_dir) = lookup("LATTICE_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }

        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.steps == 0 {
            errors.push("steps must be greater than 0".to_string());
        }
        if self.steps > MAX_STEPS {
            errors.push(format!(
                "steps {} exceeds maximum allowed ({})",
                self.steps, MAX_STEPS
            ));
        }

        if self.max_iterations == 0 {
            errors.push("max_iterations must be greater than 0".to_string());
        }

        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            errors.push(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            ));
        }

        if self.output_dir.as_os_str().is_empty() {
            errors.push("output_dir cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Solver tolerance and budget as a [`SolverConfig`].
    ///
    /// Only meaningful on a validated configuration.
    pub fn solver_config(&self) -> SolverConfig<f64> {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }
}

fn parse_env<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { name, value })
}
