// ABOUTME: Evaluator for "now"-anchored relative time expressions
// ABOUTME: Resolves time sources (epoch millis, "now", "now1m0d,0m-5d") into epoch milliseconds

use chrono::{DateTime, Days, Months, Utc};
use serde_json::{Number, Value as JsonValue};

use super::error::{PeriodError, Result};
use super::token::{self, PeriodTerm};

/// Anchor token that every relative expression starts with
pub const NOW: &str = "now";

/// A parsed `now<term>,<term>,...` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeExpression {
    terms: Vec<PeriodTerm>,
    raw_terms: Vec<String>,
}

impl TimeExpression {
    /// Parse an expression. The input must start with `now`; terms follow
    /// immediately, separated by commas.
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.trim();
        let body = source
            .strip_prefix(NOW)
            .ok_or_else(|| PeriodError::UnsupportedSource(source.to_string()))?;

        if body.is_empty() {
            return Ok(Self {
                terms: Vec::new(),
                raw_terms: Vec::new(),
            });
        }

        Ok(Self {
            terms: token::tokenize(body)?,
            raw_terms: body.split(',').map(str::to_string).collect(),
        })
    }

    pub fn terms(&self) -> &[PeriodTerm] {
        &self.terms
    }

    /// Apply every term in order, starting from `now`
    pub fn evaluate(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        self.terms
            .iter()
            .zip(&self.raw_terms)
            .try_fold(now, |at, (term, raw)| {
                term.apply(at)
                    .ok_or_else(|| PeriodError::OutOfRange { term: raw.clone() })
            })
    }
}

impl PeriodTerm {
    /// Add the months, then the days, using calendar arithmetic.
    /// Returns `None` when the result leaves chrono's supported range.
    pub fn apply(&self, at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let months = Months::new(self.months.unsigned_abs());
        let at = if self.months >= 0 {
            at.checked_add_months(months)?
        } else {
            at.checked_sub_months(months)?
        };

        let days = Days::new(self.days.unsigned_abs());
        if self.days >= 0 {
            at.checked_add_days(days)
        } else {
            at.checked_sub_days(days)
        }
    }
}

/// Resolve a time source against the current clock
pub fn resolve_time(source: &JsonValue) -> Result<i64> {
    resolve_time_at(source, Utc::now())
}

/// Resolve a time source against a fixed `now`
pub fn resolve_time_at(source: &JsonValue, now: DateTime<Utc>) -> Result<i64> {
    match source {
        JsonValue::Null => Ok(now.timestamp_millis()),
        JsonValue::Number(number) => match number_to_millis(number) {
            Some(0) => Ok(now.timestamp_millis()),
            Some(millis) => Ok(millis),
            None => Err(PeriodError::OutOfRange {
                term: number.to_string(),
            }),
        },
        JsonValue::String(text) => resolve_str_at(text, now),
        other => Err(PeriodError::UnsupportedSource(other.to_string())),
    }
}

/// Resolve a textual time source against the current clock
pub fn resolve_str(source: &str) -> Result<i64> {
    resolve_str_at(source, Utc::now())
}

pub fn resolve_str_at(source: &str, now: DateTime<Utc>) -> Result<i64> {
    let trimmed = source.trim();

    if is_current_instant(trimmed) {
        return Ok(now.timestamp_millis());
    }

    if trimmed.starts_with(NOW) {
        let instant = TimeExpression::parse(trimmed)?.evaluate(now)?;
        return Ok(instant.timestamp_millis());
    }

    match parse_millis(trimmed) {
        // "00", "0.0" and friends mean now, like a JSON 0
        Some(0) => Ok(now.timestamp_millis()),
        Some(millis) => Ok(millis),
        None => Err(PeriodError::UnsupportedSource(source.to_string())),
    }
}

fn is_current_instant(source: &str) -> bool {
    matches!(source, "" | "0" | NOW)
}

fn number_to_millis(number: &Number) -> Option<i64> {
    number
        .as_i64()
        .or_else(|| number.as_f64().and_then(truncate_millis))
}

fn parse_millis(source: &str) -> Option<i64> {
    source
        .parse::<i64>()
        .ok()
        .or_else(|| source.parse::<f64>().ok().and_then(truncate_millis))
}

fn truncate_millis(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}
