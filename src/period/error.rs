// ABOUTME: Error types for relative time expression parsing and evaluation
// ABOUTME: Every variant is a malformed time expression reported with the offending input

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Malformed time expression term '{term}': {reason}")]
    MalformedTerm { term: String, reason: String },

    #[error("Malformed time expression term '{term}': months must precede days")]
    OutOfOrder { term: String },

    #[error("Unsupported time source '{0}': expected epoch millis, 'now', or 'now' followed by period terms")]
    UnsupportedSource(String),

    #[error("Time expression term '{term}' is outside the supported date range")]
    OutOfRange { term: String },
}

impl PeriodError {
    pub(crate) fn malformed(term: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTerm {
            term: term.to_string(),
            reason: reason.into(),
        }
    }

    /// The term or source text the error refers to
    pub fn offending_input(&self) -> &str {
        match self {
            Self::MalformedTerm { term, .. }
            | Self::OutOfOrder { term }
            | Self::OutOfRange { term } => term,
            Self::UnsupportedSource(source) => source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PeriodError>;
