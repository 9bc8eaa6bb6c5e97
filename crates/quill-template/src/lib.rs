/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Block-scanning template engine for HTML fragments, emails and reports.
//!
//! Templates are plain text with a small set of markers:
//!
//! - Interpolation: `{name}` or `{user.name}`
//! - Truthiness: `{condition name="flag" is="true"}...{/condition}`
//! - Equality: `{condition name="status" value="active"}...{/condition}`
//! - Iteration: `{foreach items}...{/foreach}`
//!
//! Blocks are located by a balanced scan over the text rather than by a
//! parser, so a template never fails to "compile": markers that cannot be
//! resolved (unknown names, unterminated blocks) are left in the output as
//! written.
//!
//! # Architecture
//!
//! A [`Template`] owns its source text and a [`DataModel`]. `parse` runs:
//!
//! 1. [`condition`]: keep or drop condition blocks
//! 2. [`iteration`]: expand `foreach` blocks, rendering each entry through
//!    the whole pipeline again with its own model
//! 3. [`interpolate`]: substitute `{key}` placeholders
//! 4. [`inject`]: wrap the result with prepend/append text (top level only)
//!
//! # Example
//!
//! ```ignore
//! use quill_template::{InjectPosition, Template};
//!
//! let mut template = Template::from_inline("{foreach items}<li>{label}</li>{/foreach}");
//! template
//!     .assign("items", serde_json::json!([{ "label": "A" }, { "label": "B" }]))
//!     .inject("<ul>", InjectPosition::Prepend)
//!     .inject("</ul>", InjectPosition::Append);
//!
//! assert_eq!(template.parse()?, "<ul><li>A</li><li>B</li></ul>");
//! ```

pub mod block;
pub mod condition;
pub mod config;
pub mod error;
pub mod inject;
pub mod interpolate;
pub mod iteration;
pub mod loader;
pub mod model;
pub mod render;
pub mod render_context;
pub mod scanner;
pub mod template;
pub mod value;

// Re-export main types at crate root
pub use block::{Block, ConditionBlock, IterationBlock, Predicate};
pub use config::{DEFAULT_MAX_DEPTH, TemplateConfig};
pub use error::{TemplateError, TemplateResult};
pub use inject::{InjectPosition, Injections};
pub use loader::{FileSystemResolver, MemoryResolver, SourceKind, SourceResolver};
pub use model::DataModel;
pub use render_context::RenderContext;
pub use scanner::{BlockFamily, Span, find_block};
pub use template::Template;
pub use value::{Assignable, Entry, SCALAR_ENTRY_KEY, TemplateValue};
