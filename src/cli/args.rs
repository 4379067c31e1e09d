// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and the render, eval and time subcommands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "templar")]
#[command(about = "Render Handlebars templates inside YAML/JSON trees and resolve relative time expressions")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every templated string in a YAML or JSON file
    Render {
        #[arg(help = "Path to the YAML or JSON tree to render")]
        file: PathBuf,

        #[arg(long, help = "YAML or JSON file with context values")]
        context: Option<PathBuf>,

        #[arg(
            short = 'V',
            long = "var",
            help = "Context variables (key=value), override the context file"
        )]
        vars: Vec<String>,

        #[arg(long, value_enum, default_value_t = TreeFormat::Json, help = "Output format")]
        format: TreeFormat,
    },

    /// Render a single template string
    Eval {
        #[arg(help = "Template string, e.g. \"Total {{dollarsWithSign amount}}\"")]
        template: String,

        #[arg(short = 'V', long = "var", help = "Context variables (key=value)")]
        vars: Vec<String>,
    },

    /// Resolve a time expression such as now1m0d,0m-5d
    Time {
        #[arg(help = "Epoch millis, 'now', or 'now' followed by <months>m<days>d terms")]
        expression: String,

        #[arg(long, value_enum, default_value_t = TimeFormat::Millis, help = "Output format")]
        format: TimeFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TreeFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimeFormat {
    /// Epoch milliseconds
    Millis,
    /// MM/dd/yyyy
    Short,
    /// yyyy-MM-dd
    Iso,
    /// MMM dd, yyyy
    Mmm,
    /// MMMM d, yyyy
    Long,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format
    pub fn parse_variables(
        vars: &[String],
    ) -> anyhow::Result<std::collections::HashMap<String, String>> {
        let mut variables = std::collections::HashMap::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.insert(key.to_string(), value.to_string());
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'key=value'",
                    var
                ));
            }
        }

        Ok(variables)
    }
}
