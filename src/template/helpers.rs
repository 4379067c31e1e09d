// ABOUTME: Handlebars helper functions for template rendering
// ABOUTME: Implements the currency and date formatting helpers with relative time support

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
};
use serde_json::Value as JsonValue;

use crate::format::{self, DatePattern};
use crate::period;

pub const CURRENCY_HELPERS: [&str; 4] = [
    "dollarsNoSign",
    "dollarsWithSign",
    "dollarsAndCentsNoSign",
    "dollarsAndCentsWithSign",
];

pub const DATE_HELPERS: [&str; 4] = [
    "date_short",
    "date_yyyy_mm_dd",
    "date_mmm_dd_yyyy",
    "date_long",
];

/// Amount in cents from a helper argument. Missing, blank and zero amounts
/// produce `None`.
fn currency_cents(name: &str, source: Option<&JsonValue>) -> Result<Option<i64>, RenderErrorReason> {
    let cents = match source {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as i64)),
        Some(JsonValue::String(text)) if text.trim().is_empty() => None,
        Some(JsonValue::String(text)) => {
            let text = text.trim();
            let parsed = text
                .parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64));
            match parsed {
                Some(cents) => Some(cents),
                None => {
                    return Err(RenderErrorReason::Other(format!(
                        "{}: '{}' is not an amount in cents",
                        name, text
                    )))
                }
            }
        }
        Some(other) => {
            return Err(RenderErrorReason::Other(format!(
                "{}: '{}' is not an amount in cents",
                name, other
            )))
        }
    };

    Ok(cents.filter(|cents| *cents != 0))
}

fn write_currency(
    h: &Helper,
    out: &mut dyn Output,
    name: &str,
    format_cents: fn(i64) -> String,
) -> HelperResult {
    if let Some(cents) = currency_cents(name, h.param(0).map(|p| p.value()))? {
        out.write(&format_cents(cents))?;
    }
    Ok(())
}

fn write_date(h: &Helper, out: &mut dyn Output, name: &str, pattern: DatePattern) -> HelperResult {
    let resolved = match h.param(0) {
        Some(param) => period::resolve_time(param.value()),
        None => period::resolve_str(period::NOW),
    };
    let millis = resolved.map_err(|e| RenderErrorReason::Other(format!("{}: {}", name, e)))?;

    let formatted = pattern.format_millis(millis).ok_or_else(|| {
        RenderErrorReason::Other(format!("{}: instant {} is out of range", name, millis))
    })?;
    out.write(&formatted)?;
    Ok(())
}

/// Whole dollars with thousands separators: `1,234`
pub fn dollars_no_sign_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_currency(h, out, "dollarsNoSign", format::format_dollars_no_sign)
}

/// Whole dollars with the `$` symbol: `$1,234`
pub fn dollars_with_sign_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_currency(h, out, "dollarsWithSign", format::format_dollars_with_sign)
}

/// Dollars and cents: `1,234.56`
pub fn dollars_and_cents_no_sign_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_currency(
        h,
        out,
        "dollarsAndCentsNoSign",
        format::format_dollars_and_cents_no_sign,
    )
}

/// Dollars and cents with the `$` symbol: `$1,234.56`
pub fn dollars_and_cents_with_sign_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_currency(
        h,
        out,
        "dollarsAndCentsWithSign",
        format::format_dollars_and_cents_with_sign,
    )
}

/// `MM/dd/yyyy`
pub fn date_short_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_date(h, out, "date_short", DatePattern::Short)
}

/// `yyyy-MM-dd`
pub fn date_yyyy_mm_dd_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_date(h, out, "date_yyyy_mm_dd", DatePattern::YearMonthDay)
}

/// `MMM dd, yyyy`
pub fn date_mmm_dd_yyyy_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_date(h, out, "date_mmm_dd_yyyy", DatePattern::AbbreviatedMonth)
}

/// `MMMM d, yyyy`
pub fn date_long_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_date(h, out, "date_long", DatePattern::Long)
}

pub fn register_currency_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("dollarsNoSign", Box::new(dollars_no_sign_helper));
    handlebars.register_helper("dollarsWithSign", Box::new(dollars_with_sign_helper));
    handlebars.register_helper(
        "dollarsAndCentsNoSign",
        Box::new(dollars_and_cents_no_sign_helper),
    );
    handlebars.register_helper(
        "dollarsAndCentsWithSign",
        Box::new(dollars_and_cents_with_sign_helper),
    );
}

pub fn register_date_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("date_short", Box::new(date_short_helper));
    handlebars.register_helper("date_yyyy_mm_dd", Box::new(date_yyyy_mm_dd_helper));
    handlebars.register_helper("date_mmm_dd_yyyy", Box::new(date_mmm_dd_yyyy_helper));
    handlebars.register_helper("date_long", Box::new(date_long_helper));
}

/// Register all built-in helpers with a Handlebars instance. Registering
/// again replaces the helpers with identical ones.
pub fn register_helpers(handlebars: &mut Handlebars) {
    register_currency_helpers(handlebars);
    register_date_helpers(handlebars);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn create_test_handlebars() -> Handlebars<'static> {
        let mut handlebars = Handlebars::new();
        register_helpers(&mut handlebars);
        handlebars
    }

    fn render(handlebars: &Handlebars, template: &str, data: JsonValue) -> String {
        handlebars.render_template(template, &data).unwrap()
    }

    #[test]
    fn test_all_helpers_registered() {
        let handlebars = create_test_handlebars();
        for name in CURRENCY_HELPERS.iter().chain(DATE_HELPERS.iter()) {
            let template = format!("{{{{{} 1700000000000}}}}", name);
            let result = handlebars.render_template(&template, &json!({}));
            assert!(result.is_ok(), "helper {} failed: {:?}", name, result);
        }
    }

    #[test]
    fn test_currency_variants() {
        let handlebars = create_test_handlebars();
        let data = json!({ "amount": 123456 });

        assert_eq!(render(&handlebars, "{{dollarsNoSign amount}}", data.clone()), "1,234");
        assert_eq!(render(&handlebars, "{{dollarsWithSign amount}}", data.clone()), "$1,234");
        assert_eq!(
            render(&handlebars, "{{dollarsAndCentsNoSign amount}}", data.clone()),
            "1,234.56"
        );
        assert_eq!(
            render(&handlebars, "{{dollarsAndCentsWithSign amount}}", data),
            "$1,234.56"
        );
    }

    #[test]
    fn test_currency_empty_sources() {
        let handlebars = create_test_handlebars();
        for name in CURRENCY_HELPERS {
            for data in [
                json!({}),
                json!({ "amount": null }),
                json!({ "amount": 0 }),
                json!({ "amount": "" }),
                json!({ "amount": "0" }),
            ] {
                let template = format!("[{{{{{} amount}}}}]", name);
                assert_eq!(render(&handlebars, &template, data.clone()), "[]", "{} {}", name, data);
            }
        }
    }

    #[test]
    fn test_currency_numeric_strings() {
        let handlebars = create_test_handlebars();
        let data = json!({ "amount": " 9999 " });
        assert_eq!(
            render(&handlebars, "{{dollarsAndCentsWithSign amount}}", data),
            "$99.99"
        );
    }

    #[test]
    fn test_currency_rejects_non_numbers() {
        let handlebars = create_test_handlebars();
        let result = handlebars.render_template("{{dollarsNoSign amount}}", &json!({ "amount": "lots" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_currency_output_is_not_escaped() {
        let handlebars = create_test_handlebars();
        let result = render(&handlebars, "{{dollarsWithSign amount}}", json!({ "amount": 100 }));
        assert_eq!(result, "$1");
    }

    #[test]
    fn test_date_helpers_with_epoch_millis() {
        let handlebars = create_test_handlebars();
        let data = json!({ "when": 1_700_000_000_000_i64 });

        assert_eq!(render(&handlebars, "{{date_short when}}", data.clone()), "11/14/2023");
        assert_eq!(render(&handlebars, "{{date_yyyy_mm_dd when}}", data.clone()), "2023-11-14");
        assert_eq!(
            render(&handlebars, "{{date_mmm_dd_yyyy when}}", data.clone()),
            "Nov 14, 2023"
        );
        assert_eq!(render(&handlebars, "{{date_long when}}", data), "November 14, 2023");
    }

    #[test]
    fn test_date_helpers_default_to_now() {
        let handlebars = create_test_handlebars();
        let before = DatePattern::YearMonthDay.format(Utc::now());
        let missing = render(&handlebars, "{{date_yyyy_mm_dd missing}}", json!({}));
        let bare = render(&handlebars, "{{date_yyyy_mm_dd}}", json!({}));
        let after = DatePattern::YearMonthDay.format(Utc::now());

        for result in [missing, bare] {
            assert!(result == before || result == after, "unexpected {}", result);
        }
    }

    #[test]
    fn test_date_helpers_with_relative_expression() {
        let handlebars = create_test_handlebars();
        let expected_millis = period::resolve_str("now0m15d").unwrap();
        let expected = DatePattern::YearMonthDay.format_millis(expected_millis).unwrap();

        let result = render(
            &handlebars,
            "{{date_yyyy_mm_dd \"now0m15d\"}}",
            json!({}),
        );
        assert_eq!(result, expected);
    }

    #[test]
    fn test_date_helpers_reject_malformed_expressions() {
        let handlebars = create_test_handlebars();
        let result = handlebars.render_template("{{date_short \"now5d0m\"}}", &json!({}));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("months must precede days"), "{}", err);
    }

    #[test]
    fn test_registration_is_idempotent() {
        let mut handlebars = create_test_handlebars();
        register_helpers(&mut handlebars);
        assert_eq!(
            render(&handlebars, "{{dollarsNoSign 500}}", json!({})),
            "5"
        );
    }
}
