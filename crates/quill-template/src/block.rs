/*
 * block.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Resolvable template blocks.
//!
//! Conditions and iterations share one capability: given the current text
//! and a data model, locate their own span and produce the edited text, or
//! report that they do not apply (in which case the text stays as it is).

use crate::error::TemplateResult;
use crate::model::DataModel;
use crate::render_context::RenderContext;

/// The test a condition block applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `is="true|false"`: truthiness of a tag or list.
    Is(String),
    /// `value="LITERAL"`: equality with a tag's canonical string.
    Value(String),
}

impl Predicate {
    /// The attribute name used in markup.
    pub fn attribute(&self) -> &'static str {
        match self {
            Predicate::Is(_) => "is",
            Predicate::Value(_) => "value",
        }
    }

    /// The literal the template value is compared against.
    pub fn expected(&self) -> &str {
        match self {
            Predicate::Is(v) | Predicate::Value(v) => v,
        }
    }
}

/// `{condition name="NAME" is|value="LITERAL"} ... {/condition}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionBlock {
    /// Name looked up in the data model.
    pub name: String,
    /// The test applied to the named value.
    pub predicate: Predicate,
}

impl ConditionBlock {
    pub fn new(name: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }

    /// Open marker without braces, e.g. `condition name="x" is="true"`.
    pub fn marker(&self) -> String {
        format!(
            "condition name=\"{}\" {}=\"{}\"",
            self.name,
            self.predicate.attribute(),
            self.predicate.expected()
        )
    }
}

/// `{foreach NAME} ... {/foreach}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationBlock {
    /// Name of the iteration list.
    pub name: String,
}

impl IterationBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Open marker without braces, e.g. `foreach items`.
    pub fn marker(&self) -> String {
        format!("foreach {}", self.name)
    }
}

/// A block the pipeline knows how to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Condition(ConditionBlock),
    Iteration(IterationBlock),
}

impl Block {
    pub fn marker(&self) -> String {
        match self {
            Block::Condition(block) => block.marker(),
            Block::Iteration(block) => block.marker(),
        }
    }

    /// Resolve this block against `model`.
    ///
    /// Returns the edited text, or `None` when the block is left untouched
    /// (unknown name, marker absent, or unterminated block).
    pub fn resolve(
        &self,
        text: &str,
        model: &DataModel,
        ctx: &RenderContext,
    ) -> TemplateResult<Option<String>> {
        match self {
            Block::Condition(block) => Ok(block.resolve(text, model)),
            Block::Iteration(block) => match model.iteration(&block.name) {
                Some(entries) => block.resolve(text, entries, ctx),
                None => Ok(None),
            },
        }
    }
}

impl From<ConditionBlock> for Block {
    fn from(block: ConditionBlock) -> Self {
        Block::Condition(block)
    }
}

impl From<IterationBlock> for Block {
    fn from(block: IterationBlock) -> Self {
        Block::Iteration(block)
    }
}
