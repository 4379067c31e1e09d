// ABOUTME: Error types for template engine operations
// ABOUTME: Defines render failures and the per-property skip records of reflective rendering

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template render error: {0}")]
    RenderError(String),

    #[error("Template syntax error: {0}")]
    SyntaxError(String),

    #[error("Invalid template context: expected a JSON object, got {0}")]
    InvalidContext(String),

    #[error("Handlebars error: {0}")]
    HandlebarsError(#[from] handlebars::RenderError),
}

/// A property left unrendered by the reflective renderer
#[derive(Error, Debug)]
#[error("property '{property}' skipped: {reason}")]
pub struct PropertySkipped {
    pub property: &'static str,
    pub reason: SkipReason,
}

#[derive(Error, Debug)]
pub enum SkipReason {
    #[error("render failed: {0}")]
    Render(#[source] TemplateError),

    #[error("setter rejected value: {0}")]
    Mutator(String),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
