// ABOUTME: CLI module for the templar template renderer
// ABOUTME: Exports command line interface components and main application logic

pub mod app;
pub mod args;
pub mod commands;
pub mod config;

pub use app::App;
pub use args::{Args, Commands, TimeFormat, TreeFormat};
pub use config::{Config, LoggingConfig};
