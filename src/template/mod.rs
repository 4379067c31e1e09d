// ABOUTME: Template engine module for templar
// ABOUTME: Provides string, tree and property rendering plus the built-in formatting helpers

pub mod context;
pub mod engine;
pub mod error;
pub mod helpers;
pub mod reflect;
pub mod render;

pub use context::TemplateContext;
pub use engine::{EngineOptions, TemplateEngine, TemplateEnvironment};
pub use error::{PropertySkipped, Result, SkipReason, TemplateError};
pub use reflect::{
    render_properties, render_properties_checked, render_properties_with, Reflectable,
    StringProperty,
};
pub use render::{has_templates, render_string, render_tree, RenderableTree};
