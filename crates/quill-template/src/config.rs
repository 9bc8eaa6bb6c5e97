/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Engine configuration.
//!
//! ```toml
//! template_root = "public/templates/default"
//! extension = "html"
//! max_depth = 50
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TemplateError, TemplateResult};

/// Default maximum `foreach` nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Settings shared by every template created from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Base directory for root-relative sources.
    pub template_root: PathBuf,

    /// Extension added to root-relative names that have none.
    pub extension: String,

    /// Maximum `foreach` nesting depth.
    pub max_depth: usize,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            template_root: PathBuf::from("templates"),
            extension: "html".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TemplateConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(source: &str) -> TemplateResult<Self> {
        toml::from_str(source).map_err(|e| TemplateError::Config {
            message: e.to_string(),
        })
    }

    /// Read a configuration file.
    pub fn from_file(path: &Path) -> TemplateResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source).map_err(|e| match e {
            TemplateError::Config { message } => TemplateError::Config {
                message: format!("{}: {}", path.display(), message),
            },
            _ => e,
        })
    }

    pub fn with_template_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.template_root = root.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
