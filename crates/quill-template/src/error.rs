/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template loading and rendering.
//!
//! Only loading, configuration and nesting-depth failures are errors. Anything
//! the resolution pipeline cannot make sense of (unknown names, unterminated
//! blocks) is left in the output verbatim instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during template operations.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A file-based source does not exist.
    #[error("Template source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// A source kind name that is not one of the supported kinds.
    #[error("Unknown template source kind: {kind}")]
    UnknownSourceKind { kind: String },

    /// An injection position name that is neither `prepend` nor `append`.
    #[error("Invalid injection position: {position}")]
    InvalidInjectPosition { position: String },

    /// Iteration blocks nested deeper than the configured limit.
    #[error("Template nesting too deep (depth > {max_depth})")]
    NestingTooDeep { max_depth: usize },

    /// Invalid engine configuration.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// I/O error (e.g., reading a template file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
