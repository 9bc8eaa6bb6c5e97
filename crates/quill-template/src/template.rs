/*
 * template.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The [`Template`] type: a source text plus the data it is rendered with.
//!
//! A template is built per render request. Sources are loaded and data is
//! assigned first; `parse` then runs the resolution pipeline (see
//! [`crate::render`]). The source itself is never modified, so `parse` can be
//! called repeatedly.

use crate::config::TemplateConfig;
use crate::error::TemplateResult;
use crate::inject::InjectPosition;
use crate::loader::{FileSystemResolver, SourceKind, SourceResolver, load_source};
use crate::model::DataModel;
use crate::value::Assignable;

/// A template source and its data model.
#[derive(Debug, Clone, Default)]
pub struct Template {
    /// The loaded template text.
    pub(crate) source: String,

    /// Tags, iteration lists and injection buffers.
    pub(crate) model: DataModel,

    pub(crate) config: TemplateConfig,
}

impl Template {
    /// Create an empty template using `config` for loading and rendering.
    pub fn new(config: TemplateConfig) -> Self {
        Self {
            source: String::new(),
            model: DataModel::new(),
            config,
        }
    }

    /// Create a template from inline text with the default configuration.
    pub fn from_inline(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Load the template source from the filesystem or inline text.
    ///
    /// # Errors
    /// [`TemplateError::SourceNotFound`](crate::TemplateError::SourceNotFound)
    /// if a file-based source does not exist.
    pub fn load(&mut self, source: &str, kind: SourceKind) -> TemplateResult<&mut Self> {
        self.load_with_resolver(source, kind, &FileSystemResolver)
    }

    /// Load the template source through a custom resolver.
    pub fn load_with_resolver(
        &mut self,
        source: &str,
        kind: SourceKind,
        resolver: &impl SourceResolver,
    ) -> TemplateResult<&mut Self> {
        self.source = load_source(source, kind, &self.config, resolver)?;
        Ok(self)
    }

    /// Assign a value. See [`DataModel::assign`].
    pub fn assign(&mut self, key: impl Into<String>, value: impl Into<Assignable>) -> &mut Self {
        self.model.assign(key, value);
        self
    }

    /// Assign many values at once, each key prefixed with `prefix`.
    pub fn assign_all<K, V>(
        &mut self,
        values: impl IntoIterator<Item = (K, V)>,
        prefix: &str,
    ) -> &mut Self
    where
        K: AsRef<str>,
        V: Into<Assignable>,
    {
        self.model.assign_all(values, prefix);
        self
    }

    /// Add text before or after the final output.
    pub fn inject(&mut self, text: &str, position: InjectPosition) -> &mut Self {
        self.model.inject(text, position);
        self
    }

    /// The loaded template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn model(&self) -> &DataModel {
        &self.model
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateError;
    use crate::loader::MemoryResolver;
    use crate::value::TemplateValue;

    #[test]
    fn test_builder_chain() {
        let mut template = Template::from_inline("x");
        template
            .assign("a", 1)
            .assign("b", "two")
            .inject("<", InjectPosition::Prepend);

        assert_eq!(template.model().tag("a"), Some(&TemplateValue::Integer(1)));
        assert_eq!(template.model().tag("b"), Some(&TemplateValue::from("two")));
        assert_eq!(template.model().injections().prepend(), "<");
    }

    #[test]
    fn test_load_with_resolver() {
        let resolver = MemoryResolver::with_sources([("tpl/mail/welcome.html", "Hi {name}")]);
        let mut template = Template::new(TemplateConfig::default().with_template_root("tpl"));
        template
            .load_with_resolver("mail/welcome", SourceKind::Relative, &resolver)
            .unwrap();

        assert_eq!(template.source(), "Hi {name}");
    }

    #[test]
    fn test_load_missing_file() {
        let mut template = Template::default();
        let result = template.load("/definitely/not/here.html", SourceKind::Absolute);
        assert!(matches!(result, Err(TemplateError::SourceNotFound { .. })));
    }
}
