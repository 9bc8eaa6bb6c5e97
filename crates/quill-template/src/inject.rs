/*
 * inject.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Prepend/append buffers wrapped around the top-level output.

use std::fmt;
use std::str::FromStr;

use crate::error::TemplateError;

/// Where injected text goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InjectPosition {
    /// Before the rendered text.
    #[default]
    Prepend,
    /// After the rendered text.
    Append,
}

impl FromStr for InjectPosition {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prepend" => Ok(InjectPosition::Prepend),
            "append" => Ok(InjectPosition::Append),
            other => Err(TemplateError::InvalidInjectPosition {
                position: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for InjectPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectPosition::Prepend => f.write_str("prepend"),
            InjectPosition::Append => f.write_str("append"),
        }
    }
}

/// Accumulated injection text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Injections {
    prepend: String,
    append: String,
}

impl Injections {
    /// Append `text` to the buffer for `position`.
    pub fn push(&mut self, text: &str, position: InjectPosition) {
        match position {
            InjectPosition::Prepend => self.prepend.push_str(text),
            InjectPosition::Append => self.append.push_str(text),
        }
    }

    pub fn prepend(&self) -> &str {
        &self.prepend
    }

    pub fn append(&self) -> &str {
        &self.append
    }

    pub fn is_empty(&self) -> bool {
        self.prepend.is_empty() && self.append.is_empty()
    }

    /// Wrap `body` with both buffers.
    pub fn apply(&self, body: String) -> String {
        if self.is_empty() {
            return body;
        }
        let mut out = String::with_capacity(self.prepend.len() + body.len() + self.append.len());
        out.push_str(&self.prepend);
        out.push_str(&body);
        out.push_str(&self.append);
        out
    }
}
