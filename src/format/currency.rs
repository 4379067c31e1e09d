// ABOUTME: Currency formatting for amounts held as smallest-unit integers (cents)
// ABOUTME: Provides the four dollar variants: with or without sign, with or without cents

/// Whether the `$` symbol is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignPolicy {
    WithSign,
    NoSign,
}

/// Whether the fractional cents are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentsPolicy {
    WithCents,
    DollarsOnly,
}

pub fn format_dollars_no_sign(cents: i64) -> String {
    format_amount(cents, SignPolicy::NoSign, CentsPolicy::DollarsOnly)
}

pub fn format_dollars_with_sign(cents: i64) -> String {
    format_amount(cents, SignPolicy::WithSign, CentsPolicy::DollarsOnly)
}

pub fn format_dollars_and_cents_no_sign(cents: i64) -> String {
    format_amount(cents, SignPolicy::NoSign, CentsPolicy::WithCents)
}

pub fn format_dollars_and_cents_with_sign(cents: i64) -> String {
    format_amount(cents, SignPolicy::WithSign, CentsPolicy::WithCents)
}

/// Format `cents` with thousands separators. Negative amounts put `-` before
/// the symbol; dollars-only output truncates the cents toward zero.
pub fn format_amount(cents: i64, sign: SignPolicy, policy: CentsPolicy) -> String {
    let magnitude = cents.unsigned_abs();
    let dollars = magnitude / 100;
    let remainder = magnitude % 100;

    let mut out = String::new();
    if cents < 0 && (policy == CentsPolicy::WithCents || dollars > 0) {
        out.push('-');
    }
    if sign == SignPolicy::WithSign {
        out.push('$');
    }
    out.push_str(&group_thousands(dollars));
    if policy == CentsPolicy::WithCents {
        out.push_str(&format!(".{:02}", remainder));
    }
    out
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
