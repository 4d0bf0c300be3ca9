//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`:
//!
//! ```yaml
//! layout: extended
//! sanitizer_policy: strict
//! report_title: Acme (Pty) Ltd - POPIA Assessment
//! output_dir: reports/
//! ```
//!
//! Every field is optional. Unknown fields are rejected so typos surface
//! immediately. Command-line flags take precedence over the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use popia_assessment::Layout;
use popia_report::DEFAULT_TITLE;
use popia_sanitizer::SanitizerPolicy;
use serde::{Deserialize, Serialize};

/// Settings shared by all subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Questionnaire layout used by `questions`, `assess` and `report`.
    pub layout: Layout,
    /// Consent policy used by `sanitize`.
    pub sanitizer_policy: SanitizerPolicy,
    /// Heading of the PDF report.
    pub report_title: String,
    /// Where generated files go. Defaults to the current directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            sanitizer_policy: SanitizerPolicy::default(),
            report_title: DEFAULT_TITLE.to_string(),
            output_dir: None,
        }
    }
}

impl CliConfig {
    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("invalid configuration")
    }

    /// Load the configuration at `path`.
    ///
    /// No path, or a path that does not exist, yields the defaults. A file
    /// that exists but does not parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::warn!(path = %path.display(), "configuration file not found; using defaults");
            return Ok(Self::default());
        }
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration: {}", path.display()))?;
        let config = Self::from_yaml(&yaml)
            .with_context(|| format!("in configuration file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Directory for generated files.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
