// ABOUTME: Formatting utilities shared by the template helpers
// ABOUTME: Currency amounts in cents and fixed date patterns

pub mod currency;
pub mod date;

pub use currency::{
    format_amount, format_dollars_and_cents_no_sign, format_dollars_and_cents_with_sign,
    format_dollars_no_sign, format_dollars_with_sign, CentsPolicy, SignPolicy,
};
pub use date::DatePattern;
