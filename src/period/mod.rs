// ABOUTME: Relative time expression module
// ABOUTME: Tokenizes and evaluates "now" plus ordered month/day offsets into epoch milliseconds

pub mod error;
pub mod expression;
pub mod token;

pub use error::{PeriodError, Result};
pub use expression::{
    resolve_str, resolve_str_at, resolve_time, resolve_time_at, TimeExpression, NOW,
};
pub use token::PeriodTerm;
