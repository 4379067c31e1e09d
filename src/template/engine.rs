// ABOUTME: Main template engine implementation using Handlebars
// ABOUTME: Provides the template environment trait and the Handlebars-backed engine facade

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::context::TemplateContext;
use super::error::{Result, TemplateError};
use super::helpers;
use super::reflect::{self, Reflectable};
use super::render::{self, RenderableTree};

/// Template compilation capability the renderers depend on
pub trait TemplateEnvironment: Send + Sync {
    /// Compile `template` and evaluate it against `context`
    fn render_template(&self, template: &str, context: &JsonValue) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Fail on missing variables instead of rendering them empty
    #[serde(default)]
    pub strict_mode: bool,

    /// HTML-escape `{{value}}` expressions. Helper output is never escaped.
    #[serde(default = "default_escape_html")]
    pub escape_html: bool,
}

fn default_escape_html() -> bool {
    true
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            strict_mode: false,
            escape_html: default_escape_html(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    options: EngineOptions,
}

impl TemplateEngine {
    /// Create a new template engine with all built-in helpers
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// Create a template engine with explicit options
    pub fn with_options(options: EngineOptions) -> Self {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(options.strict_mode);
        handlebars.set_dev_mode(false);

        if !options.escape_html {
            handlebars.register_escape_fn(handlebars::no_escape);
        }

        helpers::register_helpers(&mut handlebars);

        Self {
            handlebars,
            options,
        }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Render a template string with the given JSON context
    pub fn render_string(&self, template: &str, context: &JsonValue) -> Result<String> {
        render::render_string(self, template, context)
    }

    /// Render a template string with the given context
    pub fn render(&self, template: &str, context: &TemplateContext) -> Result<String> {
        render::render_string(self, template, &context.to_json())
    }

    /// Render every templated string leaf of `tree`, returning a new tree
    pub fn render_tree(&self, tree: &RenderableTree, context: &JsonValue) -> Result<RenderableTree> {
        render::render_tree(self, tree, context)
    }

    /// Render the templated string properties of `object` in place
    pub fn render_properties<'a, T: Reflectable>(
        &self,
        object: &'a mut T,
        context: &JsonValue,
    ) -> &'a mut T {
        reflect::render_properties(self, object, context)
    }

    /// Validate template syntax without rendering
    pub fn validate_template(&self, template: &str) -> Result<()> {
        match handlebars::Template::compile(template) {
            Ok(_) => Ok(()),
            Err(e) => Err(TemplateError::SyntaxError(e.to_string())),
        }
    }

    /// Check if a string contains both template markers
    pub fn has_templates(&self, text: &str) -> bool {
        render::has_templates(text)
    }

    /// Compile `source` and keep it under `name` for [`render_named`](Self::render_named).
    /// Registering the same name again replaces the template.
    pub fn register_template(&mut self, name: &str, source: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, source)
            .map_err(|e| TemplateError::SyntaxError(format!("{}: {}", name, e)))
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Render a template registered with [`register_template`](Self::register_template)
    pub fn render_named(&self, name: &str, context: &JsonValue) -> Result<String> {
        if !self.has_template(name) {
            return Err(TemplateError::RenderError(format!(
                "no template registered as '{}'",
                name
            )));
        }
        self.handlebars
            .render(name, context)
            .map_err(TemplateError::HandlebarsError)
    }

    /// Register a custom helper function
    pub fn register_helper<F>(&mut self, name: &str, helper: F)
    where
        F: handlebars::HelperDef + Send + Sync + 'static,
    {
        self.handlebars.register_helper(name, Box::new(helper));
    }
}

impl TemplateEnvironment for TemplateEngine {
    fn render_template(&self, template: &str, context: &JsonValue) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(TemplateError::HandlebarsError)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
