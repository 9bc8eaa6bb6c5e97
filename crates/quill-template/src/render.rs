/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The resolution pipeline.
//!
//! ```text
//! conditions → iterations (recursive) → interpolation → injection
//! ```
//!
//! Iteration entries re-enter [`render_body`], which runs every step except
//! injection. Injection belongs to the render that owns the `parse` call and
//! is applied exactly once.

use std::io::Write;

use crate::condition::resolve_conditions;
use crate::error::TemplateResult;
use crate::interpolate::interpolate;
use crate::iteration::resolve_iterations;
use crate::model::DataModel;
use crate::render_context::RenderContext;
use crate::template::Template;

impl Template {
    /// Render this template.
    ///
    /// # Errors
    /// [`TemplateError::NestingTooDeep`](crate::TemplateError::NestingTooDeep)
    /// if `foreach` blocks nest deeper than the configured `max_depth`.
    /// Everything else the pipeline cannot resolve is left in the output as
    /// written.
    pub fn parse(&self) -> TemplateResult<String> {
        let ctx = RenderContext::new(self.config.max_depth);
        let body = render_body(&self.source, &self.model, &ctx)?;
        Ok(self.model.injections().apply(body))
    }

    /// Render this template to standard output.
    pub fn output(&self) -> TemplateResult<()> {
        let rendered = self.parse()?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    /// Render this template and assign the result to `layout` under `slot`.
    pub fn fill_slot(&self, layout: &mut Template, slot: &str) -> TemplateResult<()> {
        let content = self.parse()?;
        layout.assign(slot, content);
        Ok(())
    }

    /// Render this template into `layout` under `slot`, then render the
    /// layout.
    pub fn render_into_layout(&self, layout: &mut Template, slot: &str) -> TemplateResult<String> {
        self.fill_slot(layout, slot)?;
        layout.parse()
    }
}

/// Run conditions, iterations and interpolation over `text`.
pub(crate) fn render_body(
    text: &str,
    model: &DataModel,
    ctx: &RenderContext,
) -> TemplateResult<String> {
    let text = resolve_conditions(text, model, ctx)?;
    let text = if model.has_iterations() {
        resolve_iterations(&text, model, ctx)?
    } else {
        text
    };
    Ok(interpolate(&text, model.tags()))
}
