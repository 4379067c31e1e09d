// ABOUTME: Main library module for templar
// ABOUTME: Exports the template engine, time expressions, formatters and supporting contracts

pub mod cli;
pub mod dns;
pub mod dump_mode;
pub mod format;
pub mod period;
pub mod priority;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use dns::{DnsManager, DnsRecord, DnsRecordMatch, DnsType, MemoryDnsManager};
pub use dump_mode::DumpMode;
pub use period::{resolve_str, resolve_time, PeriodError, TimeExpression};
pub use priority::{sort_by_priority, sort_priority, HasPriority};
pub use template::{
    render_properties, render_string, render_tree, Reflectable, RenderableTree, StringProperty,
    TemplateContext, TemplateEngine, TemplateEnvironment, TemplateError,
};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
