// ABOUTME: Fixed date output patterns used by the template date helpers
// ABOUTME: Formats epoch milliseconds as UTC calendar dates

use chrono::{DateTime, TimeZone, Utc};

/// The four supported date layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// `MM/dd/yyyy`
    Short,
    /// `yyyy-MM-dd`
    YearMonthDay,
    /// `MMM dd, yyyy`
    AbbreviatedMonth,
    /// `MMMM d, yyyy`
    Long,
}

impl DatePattern {
    pub const ALL: [DatePattern; 4] = [
        DatePattern::Short,
        DatePattern::YearMonthDay,
        DatePattern::AbbreviatedMonth,
        DatePattern::Long,
    ];

    fn strftime(self) -> &'static str {
        match self {
            DatePattern::Short => "%m/%d/%Y",
            DatePattern::YearMonthDay => "%Y-%m-%d",
            DatePattern::AbbreviatedMonth => "%b %d, %Y",
            DatePattern::Long => "%B %-d, %Y",
        }
    }

    pub fn format(self, instant: DateTime<Utc>) -> String {
        instant.format(self.strftime()).to_string()
    }

    /// Format epoch millis, or `None` if they fall outside chrono's range
    pub fn format_millis(self, millis: i64) -> Option<String> {
        to_datetime(millis).map(|instant| self.format(instant))
    }
}

pub fn to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}
