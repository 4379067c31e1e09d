// ABOUTME: Integration tests for string, tree and property rendering
// ABOUTME: Exercises pass-through, ordering, idempotence, helper output and failure isolation

use serde_json::{json, Value as JsonValue};

use templar::template::{
    render_properties_checked, EngineOptions, RenderableTree, SkipReason, TemplateContext,
    TemplateEngine,
};

mod common;
use common::Invoice;

fn tree(value: JsonValue) -> RenderableTree {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

fn keys(map: &RenderableTree) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

#[test]
fn test_strings_without_both_markers_pass_through() {
    let engine = TemplateEngine::new();
    let context = json!({ "name": "Ada" });

    for text in [
        "plain",
        "",
        "{{ only opens",
        "only closes }}",
        "{ single } braces",
    ] {
        let input = tree(json!({ "k": text }));
        let rendered = engine.render_tree(&input, &context).unwrap();
        assert_eq!(rendered["k"], text, "text {:?}", text);
    }
}

#[test]
fn test_reversed_markers_still_reach_the_engine() {
    let engine = TemplateEngine::new();
    let input = tree(json!({
        "fine": "{{name}}",
        "nested": { "k": "}} backwards {{" }
    }));

    assert!(engine.has_templates("}} backwards {{"));
    assert!(engine.render_tree(&input, &json!({ "name": "Ada" })).is_err());
}

#[test]
fn test_nested_tree_keeps_keys_and_order() {
    let engine = TemplateEngine::new();
    let input = tree(json!({
        "zebra": "{{name}}",
        "apple": {
            "mango": 7,
            "banana": "Hi {{name}}",
            "cherry": { "date": "{{date_yyyy_mm_dd 1700000000000}}", "flag": true }
        },
        "list": ["{{name}}", 1],
        "nothing": null
    }));

    let rendered = engine.render_tree(&input, &json!({ "name": "Ada" })).unwrap();

    assert_eq!(keys(&rendered), vec!["zebra", "apple", "list", "nothing"]);
    assert_eq!(rendered["zebra"], "Ada");

    let apple = rendered["apple"].as_object().unwrap();
    assert_eq!(keys(apple), vec!["mango", "banana", "cherry"]);
    assert_eq!(apple["mango"], 7);
    assert_eq!(apple["banana"], "Hi Ada");

    let cherry = apple["cherry"].as_object().unwrap();
    assert_eq!(keys(cherry), vec!["date", "flag"]);
    assert_eq!(cherry["date"], "2023-11-14");
    assert_eq!(cherry["flag"], true);

    // Arrays are copied, not rendered
    assert_eq!(rendered["list"], json!(["{{name}}", 1]));
    assert_eq!(rendered["nothing"], JsonValue::Null);

    // The input is untouched
    assert_eq!(input["zebra"], "{{name}}");
}

#[test]
fn test_tree_render_is_all_or_nothing() {
    let engine = TemplateEngine::new();
    let input = tree(json!({
        "ok": "{{name}}",
        "nested": { "bad": "{{date_long \"now5d0m\"}}" }
    }));

    let result = engine.render_tree(&input, &json!({ "name": "Ada" }));
    let message = result.unwrap_err().to_string();
    assert!(message.contains("months must precede days"), "{}", message);
}

#[test]
fn test_rendering_is_idempotent_once_markers_are_gone() {
    let engine = TemplateEngine::new();
    let context = json!({ "name": "Ada", "amount": 123456 });

    for template in [
        "Hello {{name}}",
        "Owed {{dollarsAndCentsWithSign amount}}",
        "On {{date_mmm_dd_yyyy 1700000000000}}",
        "no markers at all",
    ] {
        let once = engine.render_string(template, &context).unwrap();
        let twice = engine.render_string(&once, &context).unwrap();
        assert_eq!(once, twice, "template {:?}", template);
    }
}

#[test]
fn test_currency_helper_boundary() {
    let engine = TemplateEngine::new();
    let helpers = [
        "dollarsNoSign",
        "dollarsWithSign",
        "dollarsAndCentsNoSign",
        "dollarsAndCentsWithSign",
    ];

    for helper in helpers {
        for context in [json!({ "amount": 0 }), json!({}), json!({ "amount": null })] {
            let template = format!("[{{{{{} amount}}}}]", helper);
            assert_eq!(
                engine.render_string(&template, &context).unwrap(),
                "[]",
                "{} with {}",
                helper,
                context
            );
        }
    }

    let context = json!({ "amount": 123456 });
    let rendered: Vec<String> = helpers
        .iter()
        .map(|helper| {
            engine
                .render_string(&format!("{{{{{} amount}}}}", helper), &context)
                .unwrap()
        })
        .collect();
    assert_eq!(rendered, vec!["1,234", "$1,234", "1,234.56", "$1,234.56"]);

    let negative = engine
        .render_string("{{dollarsAndCentsWithSign amount}}", &json!({ "amount": -5 }))
        .unwrap();
    assert_eq!(negative, "-$0.05");
}

#[test]
fn test_helper_output_is_not_escaped() {
    let engine = TemplateEngine::new();
    let context = json!({ "who": "<Ada>", "amount": 100 });

    let rendered = engine
        .render_string("{{who}} {{dollarsWithSign amount}}", &context)
        .unwrap();
    assert_eq!(rendered, "&lt;Ada&gt; $1");

    let raw = TemplateEngine::with_options(EngineOptions {
        escape_html: false,
        ..EngineOptions::default()
    });
    assert_eq!(
        raw.render_string("{{who}}", &context).unwrap(),
        "<Ada>"
    );
}

#[test]
fn test_context_builder_renders() {
    let engine = TemplateEngine::new();
    let mut context = TemplateContext::new();
    context.insert("customer", json!({ "name": "Ada" }));
    context.insert("amount", 9900);

    let rendered = engine
        .render("{{customer.name}} owes {{dollarsWithSign amount}}", &context)
        .unwrap();
    assert_eq!(rendered, "Ada owes $99");
}

#[test]
fn test_reflective_renderer_isolates_failures() {
    let engine = TemplateEngine::new();
    let mut invoice = Invoice::new(
        "Invoice for {{name}}",
        "Due {{date_short \"now5d0m\"}}",
        "{{name}}",
        "{{date_yyyy_mm_dd when}}",
    );

    let context = json!({ "name": "Ada", "when": 1700000000000i64 });
    let skipped = render_properties_checked(&engine, &mut invoice, &context);

    assert_eq!(invoice.title.as_deref(), Some("Invoice for Ada"));
    assert_eq!(invoice.summary.as_deref(), Some("Due {{date_short \"now5d0m\"}}"));
    // Read-only properties are never rendered
    assert_eq!(invoice.reference, "{{name}}");
    assert_eq!(invoice.due, "2023-11-14");

    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].property, "summary");
    assert!(matches!(skipped[0].reason, SkipReason::Render(_)));
}

#[test]
fn test_reflective_renderer_reports_rejected_values() {
    let engine = TemplateEngine::new();
    let mut invoice = Invoice::new("{{name}}", "plain", "REF-1", "{{missing}}");

    let skipped = render_properties_checked(&engine, &mut invoice, &json!({ "name": "Ada" }));

    assert_eq!(invoice.title.as_deref(), Some("Ada"));
    assert_eq!(invoice.summary.as_deref(), Some("plain"));
    assert_eq!(invoice.due, "{{missing}}");
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].property, "due");
    assert!(matches!(skipped[0].reason, SkipReason::Mutator(_)));
}

#[test]
fn test_engine_render_properties_returns_the_object() {
    let engine = TemplateEngine::new();
    let mut invoice = Invoice {
        title: None,
        summary: Some("{{dollarsNoSign total}}".to_string()),
        ..Invoice::default()
    };

    let rendered = engine.render_properties(&mut invoice, &json!({ "total": 250000 }));
    assert_eq!(rendered.summary.as_deref(), Some("2,500"));
    assert_eq!(rendered.title, None);
}

#[test]
fn test_strict_mode_rejects_missing_variables() {
    let strict = TemplateEngine::with_options(EngineOptions {
        strict_mode: true,
        ..EngineOptions::default()
    });

    assert!(strict.render_string("{{missing}}", &json!({})).is_err());
    assert_eq!(
        TemplateEngine::new()
            .render_string("[{{missing}}]", &json!({}))
            .unwrap(),
        "[]"
    );
}
