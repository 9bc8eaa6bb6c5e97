/*
 * interpolate.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `{key}` placeholder substitution.
//!
//! All placeholders are replaced in a single left-to-right pass. Substituted
//! values are copied to the output and never scanned again, so a value that
//! itself looks like `{other}` stays literal. Placeholders for unknown keys
//! are kept as written.

use indexmap::IndexMap;

use crate::value::TemplateValue;

/// Substitute every `{key}` in `text` whose key is in `tags`.
///
/// A placeholder normally runs from `{` to the next `}`. Keys that contain
/// `}` themselves are tried first, longest first, so `{a}b}` matches the key
/// `a}b` when it is assigned.
pub fn interpolate(text: &str, tags: &IndexMap<String, TemplateValue>) -> String {
    if tags.is_empty() {
        return text.to_string();
    }

    let mut braced: Vec<(&str, &TemplateValue)> = tags
        .iter()
        .filter(|(key, _)| key.contains('}'))
        .map(|(key, value)| (key.as_str(), value))
        .collect();
    braced.sort_by_key(|(key, _)| std::cmp::Reverse(key.len()));

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match placeholder_at(after, tags, &braced) {
            Some((key_len, value)) => {
                out.push_str(&value.render());
                rest = &after[key_len + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Find the placeholder whose key starts at `after` (just past its `{`).
///
/// Returns the key length and its value.
fn placeholder_at<'t>(
    after: &str,
    tags: &'t IndexMap<String, TemplateValue>,
    braced: &[(&str, &'t TemplateValue)],
) -> Option<(usize, &'t TemplateValue)> {
    braced
        .iter()
        .find(|(key, _)| {
            after
                .strip_prefix(*key)
                .is_some_and(|tail| tail.starts_with('}'))
        })
        .map(|(key, value)| (key.len(), *value))
        .or_else(|| {
            let close = after.find('}')?;
            tags.get(&after[..close]).map(|value| (close, value))
        })
}
