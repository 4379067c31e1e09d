// ABOUTME: Database dump mode selector
// ABOUTME: Three-valued enumeration parsed case-insensitively from strings and serde input

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DumpMode {
    All,
    Schema,
    Data,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid dump mode '{0}'. Expected one of: all, schema, data")]
pub struct ParseDumpModeError(pub String);

impl DumpMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DumpMode::All => "all",
            DumpMode::Schema => "schema",
            DumpMode::Data => "data",
        }
    }
}

impl FromStr for DumpMode {
    type Err = ParseDumpModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(DumpMode::All),
            "schema" => Ok(DumpMode::Schema),
            "data" => Ok(DumpMode::Data),
            _ => Err(ParseDumpModeError(s.to_string())),
        }
    }
}

impl TryFrom<String> for DumpMode {
    type Error = ParseDumpModeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for DumpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
