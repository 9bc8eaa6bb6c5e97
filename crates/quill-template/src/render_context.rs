/*
 * render_context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Render state threaded through the resolution pipeline.
//!
//! Iteration entries are rendered by recursing into the whole pipeline, so
//! the nesting depth of `foreach` blocks is also the recursion depth. The
//! context tracks it and turns runaway nesting into
//! [`TemplateError::NestingTooDeep`] instead of a stack overflow.

use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{TemplateError, TemplateResult};

/// State for one level of the render recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Current nesting depth (0 for the top-level render).
    pub depth: usize,

    /// Maximum nesting depth before error.
    pub max_depth: usize,
}

impl RenderContext {
    /// Create a top-level context with the given depth limit.
    pub fn new(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    /// Create the context for an iteration entry one level deeper.
    pub fn child(&self) -> TemplateResult<RenderContext> {
        let depth = self.depth + 1;
        if depth > self.max_depth {
            return Err(TemplateError::NestingTooDeep {
                max_depth: self.max_depth,
            });
        }
        Ok(RenderContext {
            depth,
            max_depth: self.max_depth,
        })
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
