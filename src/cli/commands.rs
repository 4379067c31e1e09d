// ABOUTME: Command implementations for the templar CLI
// ABOUTME: Handles execution of the render, eval and time commands

use anyhow::Result;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use super::args::{Args, TimeFormat, TreeFormat};
use super::config::Config;
use crate::format::DatePattern;
use crate::period;
use crate::template::{RenderableTree, TemplateContext, TemplateEngine};

/// Render every templated string of a YAML/JSON file and print the result
pub async fn render_file(
    file: PathBuf,
    context_file: Option<PathBuf>,
    vars: Vec<String>,
    format: TreeFormat,
    config: &Config,
) -> Result<()> {
    let output = render_file_to_string(&file, context_file.as_deref(), &vars, format, config).await?;
    println!("{}", output);
    Ok(())
}

pub async fn render_file_to_string(
    file: &Path,
    context_file: Option<&Path>,
    vars: &[String],
    format: TreeFormat,
    config: &Config,
) -> Result<String> {
    info!("Rendering tree: {}", file.display());

    let contents = fs::read_to_string(file)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", file.display(), e))?;
    let tree = parse_tree(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse '{}': {}", file.display(), e))?;

    let context = build_context(config, context_file, vars).await?;
    debug!("Context has {} top-level keys", context.as_map().len());

    let engine = TemplateEngine::with_options(config.template);
    let rendered = engine
        .render_tree(&tree, &context.to_json())
        .map_err(|e| anyhow::anyhow!("Failed to render '{}': {}", file.display(), e))?;

    format_tree(&rendered, format)
}

/// Render a single template string and print it
pub async fn eval_template(template: String, vars: Vec<String>, config: &Config) -> Result<()> {
    let context = build_context(config, None, &vars).await?;
    let engine = TemplateEngine::with_options(config.template);
    let rendered = engine
        .render(&template, &context)
        .map_err(|e| anyhow::anyhow!("Failed to render template: {}", e))?;

    println!("{}", rendered);
    Ok(())
}

/// Resolve a time expression and print it
pub async fn resolve_time(expression: String, format: TimeFormat) -> Result<()> {
    println!("{}", format_time(&expression, format)?);
    Ok(())
}

pub fn format_time(expression: &str, format: TimeFormat) -> Result<String> {
    let millis = period::resolve_str(expression)?;
    info!("Resolved '{}' to {}", expression, millis);

    let pattern = match format {
        TimeFormat::Millis => return Ok(millis.to_string()),
        TimeFormat::Short => DatePattern::Short,
        TimeFormat::Iso => DatePattern::YearMonthDay,
        TimeFormat::Mmm => DatePattern::AbbreviatedMonth,
        TimeFormat::Long => DatePattern::Long,
    };

    pattern
        .format_millis(millis)
        .ok_or_else(|| anyhow::anyhow!("Instant {} is outside the printable date range", millis))
}

/// Context precedence: config variables, then the context file, then `--var`
async fn build_context(
    config: &Config,
    context_file: Option<&Path>,
    vars: &[String],
) -> Result<TemplateContext> {
    let mut context = TemplateContext::from_variables(&config.template_vars);

    if let Some(path) = context_file {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read context '{}': {}", path.display(), e))?;
        let value: JsonValue = serde_yaml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse context '{}': {}", path.display(), e))?;
        context.merge(TemplateContext::from_json(value)?);
    }

    context.extend_variables(Args::parse_variables(vars)?);
    Ok(context)
}

/// Parse YAML (and therefore JSON) into a tree. The document root must be a mapping.
fn parse_tree(contents: &str) -> Result<RenderableTree> {
    match serde_yaml::from_str::<JsonValue>(contents)? {
        JsonValue::Object(tree) => Ok(tree),
        other => Err(anyhow::anyhow!(
            "Expected a mapping at the document root, found {}",
            other
        )),
    }
}

fn format_tree(tree: &RenderableTree, format: TreeFormat) -> Result<String> {
    Ok(match format {
        TreeFormat::Json => serde_json::to_string_pretty(tree)?,
        TreeFormat::Yaml => serde_yaml::to_string(tree)?,
    })
}
