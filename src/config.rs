//! TOML configuration for source enumeration.
//!
//! Sources are enumerated statically, either from a config file or from the
//! built-in default mapping — never discovered at runtime:
//!
//! ```toml
//! # voltrec.toml
//! output = "output_data.py"
//!
//! [[sources]]
//! path = "eppendorf_ref.csv"
//! name = "eppendorf"
//!
//! [[sources]]
//! path = "glass_ref.csv"
//! name = "glassware"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure for voltrec.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Output artifact path; the CLI default applies when absent.
    pub output: Option<PathBuf>,

    /// Source tables to process, in order.
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
}

/// One (source table, output name) pair.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSpec {
    /// Path to the CSV reference table.
    pub path: PathBuf,

    /// Variable name the record block is assigned to in the artifact.
    pub name: String,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// The historical static mapping, used when no config file is given.
    pub fn default_sources() -> Vec<SourceSpec> {
        vec![
            SourceSpec {
                path: PathBuf::from("eppendorf_ref.csv"),
                name: "eppendorf".to_string(),
            },
            SourceSpec {
                path: PathBuf::from("glass_ref.csv"),
                name: "glassware".to_string(),
            },
        ]
    }
}
