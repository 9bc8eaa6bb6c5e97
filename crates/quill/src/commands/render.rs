/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render command implementation
 */

//! Render command implementation.
//!
//! `quill render` loads one template, assigns data from a JSON file and from
//! `--var KEY:VALUE` pairs, applies injections and optionally wraps the
//! result in a layout template.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use quill_template::{InjectPosition, SourceKind, Template, TemplateConfig};

/// Arguments for the render command
#[derive(Debug, Default)]
pub struct RenderArgs {
    /// Template path, root-relative name, or inline text
    pub input: String,
    /// Treat `input` as template text
    pub inline: bool,
    /// Treat `input` as a name under the template root
    pub relative: bool,
    /// TOML configuration file
    pub config: Option<PathBuf>,
    /// Template root override
    pub root: Option<PathBuf>,
    /// JSON data file
    pub data: Option<PathBuf>,
    /// `KEY:VALUE` assignments, applied after the data file
    pub variables: Vec<String>,
    pub prepend: Vec<String>,
    pub append: Vec<String>,
    /// Layout template file
    pub layout: Option<PathBuf>,
    /// Layout variable receiving the rendered template
    pub slot: String,
    /// Output file path
    pub output: Option<PathBuf>,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    let template = prepare(&args)?;

    match &args.output {
        Some(path) => {
            let rendered = template.parse().context("Failed to render template")?;
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            info!("Output created: {}", path.display());
        }
        None => template.output().context("Failed to render template")?,
    }

    Ok(())
}

/// Build the template that produces the final output.
///
/// With a layout, the input template is rendered into the layout's slot and
/// the layout is returned.
fn prepare(args: &RenderArgs) -> Result<Template> {
    let config = load_config(args)?;
    let kind = source_kind(args);

    let mut template = Template::new(config);
    template
        .load(&args.input, kind)
        .with_context(|| format!("Failed to load template ({}): {}", kind, args.input))?;

    if let Some(path) = &args.data {
        let values = read_data(path)?;
        debug!("Assigning {} values from {}", values.len(), path.display());
        template.assign_all(values, "");
    }

    for variable in &args.variables {
        let (key, value) = parse_variable(variable)?;
        template.assign(key, value);
    }

    for text in &args.prepend {
        template.inject(text, InjectPosition::Prepend);
    }
    for text in &args.append {
        template.inject(text, InjectPosition::Append);
    }

    let Some(layout_path) = &args.layout else {
        return Ok(template);
    };

    let mut layout = Template::new(template.config().clone());
    layout
        .load(&layout_path.to_string_lossy(), SourceKind::Absolute)
        .with_context(|| format!("Failed to load layout {}", layout_path.display()))?;

    template
        .fill_slot(&mut layout, &args.slot)
        .context("Failed to render template")?;
    Ok(layout)
}

fn load_config(args: &RenderArgs) -> Result<TemplateConfig> {
    let config = match &args.config {
        Some(path) => TemplateConfig::from_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => TemplateConfig::default(),
    };

    Ok(match &args.root {
        Some(root) => config.with_template_root(root),
        None => config,
    })
}

fn source_kind(args: &RenderArgs) -> SourceKind {
    if args.inline {
        SourceKind::Inline
    } else if args.relative {
        SourceKind::Relative
    } else {
        SourceKind::Absolute
    }
}

/// Read a JSON data file whose top level is an object.
fn read_data(path: &Path) -> Result<serde_json::Map<String, serde_json::Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse data file {}", path.display()))?;

    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => anyhow::bail!(
            "Data file {} must contain a JSON object, found {}",
            path.display(),
            json_kind(&other)
        ),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Split a `KEY:VALUE` argument at the first colon.
fn parse_variable(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once(':') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => anyhow::bail!("Invalid variable '{}': expected KEY:VALUE", arg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn inline_args(input: &str) -> RenderArgs {
        RenderArgs {
            input: input.to_string(),
            inline: true,
            slot: "content".to_string(),
            ..RenderArgs::default()
        }
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(parse_variable("name:Ada").unwrap(), ("name", "Ada"));
        assert_eq!(
            parse_variable("url:https://example.com").unwrap(),
            ("url", "https://example.com")
        );
        assert_eq!(parse_variable("empty:").unwrap(), ("empty", ""));
        assert!(parse_variable("novalue").is_err());
        assert!(parse_variable(":value").is_err());
    }

    #[test]
    fn test_source_kind_flags() {
        let mut args = RenderArgs::default();
        assert_eq!(source_kind(&args), SourceKind::Absolute);
        args.relative = true;
        assert_eq!(source_kind(&args), SourceKind::Relative);
        args.inline = true;
        assert_eq!(source_kind(&args), SourceKind::Inline);
    }

    #[test]
    fn test_inline_with_variables_and_injections() {
        let mut args = inline_args("Hello {name}");
        args.variables = vec!["name:Ada".to_string()];
        args.prepend = vec!["<p>".to_string()];
        args.append = vec!["</p>".to_string()];

        let template = prepare(&args).unwrap();
        assert_eq!(template.parse().unwrap(), "<p>Hello Ada</p>");
    }

    #[test]
    fn test_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.json");
        std::fs::write(
            &data,
            r#"{"user": {"name": "Ada"}, "items": [{"label": "x"}, {"label": "y"}]}"#,
        )
        .unwrap();

        let mut args = inline_args("{user.name}:{foreach items}[{label}]{/foreach}");
        args.data = Some(data);

        let template = prepare(&args).unwrap();
        assert_eq!(template.parse().unwrap(), "Ada:[x][y]");
    }

    #[test]
    fn test_variables_override_data() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.json");
        std::fs::write(&data, r#"{"name": "from-data"}"#).unwrap();

        let mut args = inline_args("{name}");
        args.data = Some(data);
        args.variables = vec!["name:from-cli".to_string()];

        assert_eq!(prepare(&args).unwrap().parse().unwrap(), "from-cli");
    }

    #[test]
    fn test_data_file_must_be_object() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.json");
        std::fs::write(&data, "[1, 2]").unwrap();

        let err = read_data(&data).unwrap_err();
        assert!(err.to_string().contains("must contain a JSON object, found an array"));
    }

    #[test]
    fn test_relative_with_root_and_layout() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("body.html"), "Hi {name}").unwrap();
        let layout = dir.path().join("layout.html");
        std::fs::write(&layout, "<main>{content}</main>").unwrap();

        let args = RenderArgs {
            input: "body".to_string(),
            relative: true,
            root: Some(dir.path().to_path_buf()),
            variables: vec!["name:Ada".to_string()],
            layout: Some(layout),
            slot: "content".to_string(),
            ..RenderArgs::default()
        };

        assert_eq!(
            prepare(&args).unwrap().parse().unwrap(),
            "<main>Hi Ada</main>"
        );
    }

    #[test]
    fn test_layout_receives_injected_body_in_named_slot() {
        let dir = tempfile::tempdir().unwrap();
        let layout = dir.path().join("page.html");
        std::fs::write(&layout, "<body>{main}</body>").unwrap();

        let mut args = inline_args("{foreach rows}<p>{value}</p>{/foreach}");
        args.data = Some(dir.path().join("rows.json"));
        std::fs::write(dir.path().join("rows.json"), r#"{"rows": [1, 2]}"#).unwrap();
        args.prepend = vec!["<hr>".to_string()];
        args.layout = Some(layout);
        args.slot = "main".to_string();

        assert_eq!(
            prepare(&args).unwrap().parse().unwrap(),
            "<body><hr><p>1</p><p>2</p></body>"
        );
    }

    #[test]
    fn test_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("note.txt"), "note").unwrap();
        let config = dir.path().join("quill.toml");
        std::fs::write(
            &config,
            format!(
                "template_root = {:?}\nextension = \"txt\"\n",
                dir.path().to_string_lossy()
            ),
        )
        .unwrap();

        let args = RenderArgs {
            input: "note".to_string(),
            relative: true,
            config: Some(config),
            ..RenderArgs::default()
        };

        assert_eq!(prepare(&args).unwrap().parse().unwrap(), "note");
    }

    #[test]
    fn test_execute_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.html");

        let mut args = inline_args("{a}-{b}");
        args.variables = vec!["a:1".to_string(), "b:2".to_string()];
        args.output = Some(output.clone());

        execute(args).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "1-2");
    }

    #[test]
    fn test_missing_template() {
        let args = RenderArgs {
            input: "/definitely/not/here.html".to_string(),
            ..RenderArgs::default()
        };

        let err = prepare(&args).unwrap_err();
        assert!(err.to_string().contains("Failed to load template"));
    }
}
