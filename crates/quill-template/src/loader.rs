/*
 * loader.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template source loading.
//!
//! A source is either inline text or a file, addressed relative to the
//! configured template root or by absolute path. Reading goes through a
//! [`SourceResolver`] so that tests and bundled templates can avoid the
//! filesystem.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::TemplateConfig;
use crate::error::{TemplateError, TemplateResult};

/// How the `source` argument of `load` is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// The source is the template text itself.
    Inline,
    /// A name relative to the template root, e.g. `modules/article/list`.
    #[default]
    Relative,
    /// A filesystem path used as-is.
    Absolute,
}

impl FromStr for SourceKind {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inline" | "html" => Ok(SourceKind::Inline),
            "relative" | "file_relative" => Ok(SourceKind::Relative),
            "absolute" | "file_absolute" => Ok(SourceKind::Absolute),
            other => Err(TemplateError::UnknownSourceKind {
                kind: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Inline => f.write_str("inline"),
            SourceKind::Relative => f.write_str("relative"),
            SourceKind::Absolute => f.write_str("absolute"),
        }
    }
}

/// Trait for reading template files.
pub trait SourceResolver {
    /// Read the template at `path`.
    ///
    /// Returns `Ok(None)` if it does not exist. Other read failures are
    /// errors.
    fn read_source(&self, path: &Path) -> TemplateResult<Option<String>>;
}

/// Resolver that reads from the filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileSystemResolver;

impl SourceResolver for FileSystemResolver {
    fn read_source(&self, path: &Path) -> TemplateResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(source) => Ok(Some(source)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Resolver that serves templates from an in-memory map keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    sources: HashMap<PathBuf, String>,
}

impl MemoryResolver {
    /// Create a new empty memory resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template under the full path it will be requested by.
    pub fn add(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> &mut Self {
        self.sources.insert(path.into(), content.into());
        self
    }

    /// Create a resolver with the given templates.
    pub fn with_sources(
        sources: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<String>)>,
    ) -> Self {
        let mut resolver = Self::new();
        for (path, content) in sources {
            resolver.add(path, content);
        }
        resolver
    }
}

impl SourceResolver for MemoryResolver {
    fn read_source(&self, path: &Path) -> TemplateResult<Option<String>> {
        Ok(self.sources.get(path).cloned())
    }
}

/// Resolve a root-relative template name to a path.
///
/// If the name has no extension, `extension` is added.
///
/// ```ignore
/// // root: /tpl, ext: html, name: "email/report"    → /tpl/email/report.html
/// // root: /tpl, ext: html, name: "email/report.txt" → /tpl/email/report.txt
/// ```
pub fn resolve_relative_path(name: &str, root: &Path, extension: &str) -> PathBuf {
    let path = root.join(name);
    if Path::new(name).extension().is_some() || extension.is_empty() {
        path
    } else {
        path.with_extension(extension)
    }
}

/// Load template text according to `kind`.
pub fn load_source(
    source: &str,
    kind: SourceKind,
    config: &TemplateConfig,
    resolver: &impl SourceResolver,
) -> TemplateResult<String> {
    let path = match kind {
        SourceKind::Inline => return Ok(source.to_string()),
        SourceKind::Relative => {
            resolve_relative_path(source, &config.template_root, &config.extension)
        }
        SourceKind::Absolute => PathBuf::from(source),
    };

    tracing::debug!(path = %path.display(), %kind, "Loading template source");
    resolver
        .read_source(&path)?
        .ok_or(TemplateError::SourceNotFound { path })
}
