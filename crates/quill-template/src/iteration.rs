/*
 * iteration.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Iteration resolution.
//!
//! Each `{foreach NAME}` block is expanded once per entry of the matching
//! list. An entry is rendered by running the full pipeline (conditions,
//! nested iterations, interpolation) over the block body with a model built
//! from that entry alone. Injection never happens inside an entry.

use crate::block::{Block, IterationBlock};
use crate::error::TemplateResult;
use crate::model::DataModel;
use crate::render::render_body;
use crate::render_context::RenderContext;
use crate::scanner::{BlockFamily, find_block};
use crate::value::Entry;

/// Expand every iteration list of `model` found in `text`, in assignment order.
pub fn resolve_iterations(
    text: &str,
    model: &DataModel,
    ctx: &RenderContext,
) -> TemplateResult<String> {
    let mut current = text.to_string();

    for (name, _) in model.iterations() {
        let block = Block::from(IterationBlock::new(name));
        match block.resolve(&current, model, ctx)? {
            Some(expanded) => current = expanded,
            None => tracing::debug!(
                list = %name,
                depth = ctx.depth,
                "No foreach block for iteration list"
            ),
        }
    }

    Ok(current)
}

impl IterationBlock {
    /// Replace this block in `text` with one rendering of its body per entry.
    ///
    /// Returns `None` when the block does not occur in `text`.
    pub fn resolve(
        &self,
        text: &str,
        entries: &[Entry],
        ctx: &RenderContext,
    ) -> TemplateResult<Option<String>> {
        let Some(span) = find_block(text, BlockFamily::Foreach, &self.marker()) else {
            return Ok(None);
        };

        let child_ctx = ctx.child()?;
        let mut expanded = String::new();
        for entry in entries {
            let sub_model = DataModel::from_entry(entry);
            expanded.push_str(&render_body(span.content, &sub_model, &child_ctx)?);
        }

        Ok(Some(span.splice(text, &expanded)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateError;
    use crate::value::Assignable;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn record(fields: &[(&str, Assignable)]) -> Assignable {
        let map: IndexMap<String, Assignable> = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Assignable::Map(map)
    }

    fn resolve(text: &str, model: &DataModel) -> String {
        resolve_iterations(text, model, &RenderContext::default()).unwrap()
    }

    #[test]
    fn test_entries_render_in_order() {
        let mut model = DataModel::new();
        model.assign(
            "items",
            vec![
                record(&[("label", "A".into())]),
                record(&[("label", "B".into())]),
            ],
        );

        assert_eq!(resolve("{foreach items}[{label}]{/foreach}", &model), "[A][B]");
    }

    #[test]
    fn test_scalar_entries_use_value_key() {
        let mut model = DataModel::new();
        model.assign("items", vec![1, 2, 3]);

        assert_eq!(resolve("{foreach items}{value},{/foreach}", &model), "1,2,3,");
    }

    #[test]
    fn test_empty_list_removes_block() {
        let mut model = DataModel::new();
        model.assign("items", Vec::<i32>::new());

        assert_eq!(resolve("a{foreach items}x{/foreach}b", &model), "ab");
    }

    #[test]
    fn test_empty_body_block_is_removed() {
        let mut model = DataModel::new();
        model.assign("items", vec!["a", "b"]);

        assert_eq!(resolve("[{foreach items}{/foreach}]", &model), "[]");
    }

    #[test]
    fn test_missing_block_is_noop() {
        let mut model = DataModel::new();
        model.assign("items", vec![1]);

        assert_eq!(resolve("no blocks here", &model), "no blocks here");
    }

    #[test]
    fn test_unassigned_block_is_left_verbatim() {
        let text = "{foreach rows}{value}{/foreach}";
        assert_eq!(resolve(text, &DataModel::new()), text);
    }

    #[test]
    fn test_nested_foreach() {
        let mut model = DataModel::new();
        model.assign(
            "groups",
            vec![
                record(&[("name", "x".into()), ("members", vec![1, 2].into())]),
                record(&[("name", "y".into()), ("members", vec![3].into())]),
            ],
        );

        let text = "{foreach groups}{name}:{foreach members}{value}{/foreach};{/foreach}";
        assert_eq!(resolve(text, &model), "x:12;y:3;");
    }

    #[test]
    fn test_condition_inside_foreach() {
        let mut model = DataModel::new();
        model.assign(
            "users",
            vec![
                record(&[("name", "ada".into()), ("admin", true.into())]),
                record(&[("name", "bob".into()), ("admin", false.into())]),
            ],
        );

        let text = r#"{foreach users}{name}{condition name="admin" is="true"}*{/condition} {/foreach}"#;
        assert_eq!(resolve(text, &model), "ada* bob ");
    }

    #[test]
    fn test_parent_tags_are_not_visible_in_entries() {
        let mut model = DataModel::new();
        model.assign("title", "T");
        model.assign("items", vec!["a"]);

        assert_eq!(
            resolve("{foreach items}{title}{value}{/foreach}", &model),
            "{title}a"
        );
    }

    #[test]
    fn test_only_first_block_per_name_expands() {
        let mut model = DataModel::new();
        model.assign("items", vec!["a", "b"]);

        assert_eq!(
            resolve("{foreach items}{value}{/foreach}|{foreach items}{value}{/foreach}", &model),
            "ab|{foreach items}{value}{/foreach}"
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut model = DataModel::new();
        model.assign(
            "outer",
            vec![record(&[("inner", vec![record(&[("leaf", vec![1].into())])].into())])],
        );
        let text = "{foreach outer}{foreach inner}{foreach leaf}{value}{/foreach}{/foreach}{/foreach}";

        assert_eq!(
            resolve_iterations(text, &model, &RenderContext::new(3)).unwrap(),
            "1"
        );
        assert!(matches!(
            resolve_iterations(text, &model, &RenderContext::new(2)),
            Err(TemplateError::NestingTooDeep { max_depth: 2 })
        ));
    }
}
