// ABOUTME: Scalar and structural template rendering over a template environment
// ABOUTME: Renders single strings and rebuilds nested JSON trees with templated leaves rendered

use std::panic::{self, AssertUnwindSafe};

use serde_json::{Map, Value as JsonValue};
use tracing::warn;

use super::engine::TemplateEnvironment;
use super::error::Result;

pub const OPEN_MARKER: &str = "{{";
pub const CLOSE_MARKER: &str = "}}";

/// Nested key/value structure rendered by [`render_tree`]. Keys keep their
/// insertion order.
pub type RenderableTree = Map<String, JsonValue>;

/// True when `text` contains both the opening and closing marker
pub fn has_templates(text: &str) -> bool {
    text.contains(OPEN_MARKER) && text.contains(CLOSE_MARKER)
}

/// Compile and evaluate `template` against `context`.
///
/// Engine failures are returned as errors. A panic raised while rendering
/// is logged and resumed unchanged.
pub fn render_string<E>(env: &E, template: &str, context: &JsonValue) -> Result<String>
where
    E: TemplateEnvironment + ?Sized,
{
    match panic::catch_unwind(AssertUnwindSafe(|| env.render_template(template, context))) {
        Ok(rendered) => rendered,
        Err(payload) => {
            warn!(
                template = %template,
                "render_string: unrecoverable failure while rendering template"
            );
            panic::resume_unwind(payload)
        }
    }
}

/// Render every templated string leaf of `tree`, recursing into nested
/// objects. The input is left untouched; the first failing leaf aborts the
/// whole render.
pub fn render_tree<E>(env: &E, tree: &RenderableTree, context: &JsonValue) -> Result<RenderableTree>
where
    E: TemplateEnvironment + ?Sized,
{
    let mut rendered = Map::with_capacity(tree.len());
    for (key, value) in tree {
        rendered.insert(key.clone(), render_value(env, value, context)?);
    }
    Ok(rendered)
}

fn render_value<E>(env: &E, value: &JsonValue, context: &JsonValue) -> Result<JsonValue>
where
    E: TemplateEnvironment + ?Sized,
{
    match value {
        JsonValue::String(text) if has_templates(text) => {
            render_string(env, text, context).map(JsonValue::String)
        }
        JsonValue::Object(nested) => render_tree(env, nested, context).map(JsonValue::Object),
        // Plain strings, numbers, booleans, nulls and arrays are copied as-is
        other => Ok(other.clone()),
    }
}
