/*
 * condition.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Condition resolution.
//!
//! Condition markers are collected in one pass over the text, then resolved
//! in order of appearance against the text as it is being edited. A condition
//! whose name is unknown, or whose marker was already removed together with
//! an enclosing block, is left exactly as written.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, ConditionBlock, Predicate};
use crate::error::TemplateResult;
use crate::model::DataModel;
use crate::render_context::RenderContext;
use crate::scanner::{BlockFamily, find_block};

/// `{condition name="NAME" is|value="LITERAL"}`
///
/// Group 1 is the name, group 2 the attribute, group 3 the literal.
static CONDITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\{condition name="(.*?)" (value|is)="(.*?)"\}"#)
        .expect("Invalid regex pattern for condition markers")
});

/// Collect every condition marker in `text`, in order of appearance.
pub fn scan_conditions(text: &str) -> Vec<ConditionBlock> {
    CONDITION_PATTERN
        .captures_iter(text)
        .map(|caps| {
            let expected = caps[3].to_string();
            let predicate = match &caps[2] {
                "is" => Predicate::Is(expected),
                _ => Predicate::Value(expected),
            };
            ConditionBlock::new(&caps[1], predicate)
        })
        .collect()
}

/// Resolve every condition block in `text` against `model`.
pub fn resolve_conditions(
    text: &str,
    model: &DataModel,
    ctx: &RenderContext,
) -> TemplateResult<String> {
    let mut current = text.to_string();

    for block in scan_conditions(text).into_iter().map(Block::from) {
        match block.resolve(&current, model, ctx)? {
            Some(resolved) => current = resolved,
            None => tracing::debug!(
                marker = %block.marker(),
                depth = ctx.depth,
                "Leaving unresolved condition in place"
            ),
        }
    }

    Ok(current)
}

impl ConditionBlock {
    /// The value this condition compares against its literal, or `None` if
    /// the name cannot be resolved.
    ///
    /// - `is`: `"true"` for a non-empty tag or non-empty list, else `"false"`.
    ///   Requires the name in either store.
    /// - `value`: the tag's canonical string. Requires the name in the tag
    ///   store.
    pub fn template_value(&self, model: &DataModel) -> Option<String> {
        match self.predicate {
            Predicate::Is(_) => model
                .contains(&self.name)
                .then(|| model.is_truthy(&self.name).to_string()),
            Predicate::Value(_) => model.tag(&self.name).map(|v| v.render()),
        }
    }

    /// Keep or drop this block's content in `text`.
    pub fn resolve(&self, text: &str, model: &DataModel) -> Option<String> {
        let template_value = self.template_value(model)?;
        let span = find_block(text, BlockFamily::Condition, &self.marker())?;

        let replacement = if template_value == self.predicate.expected() {
            span.content
        } else {
            ""
        };
        Some(span.splice(text, replacement))
    }
}
