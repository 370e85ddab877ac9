//! Property tests for template substitution and rendering limits.

use apiconn_embed::{RenderOptions, apply_template, escape_html, render_list};
use proptest::prelude::*;
use serde_json::{Value, json};

proptest! {
    #[test]
    fn text_without_placeholders_is_unchanged(text in "[^{}]*") {
        prop_assert_eq!(apply_template(&text, &json!({"a": 1})), text);
    }

    #[test]
    fn string_values_are_substituted_verbatim(value in "[a-zA-Z0-9 ]{1,40}") {
        let data = json!({"outer": {"inner": value.clone()}});
        prop_assert_eq!(apply_template("<{{ outer.inner }}>", &data), format!("<{value}>"));
    }

    #[test]
    fn list_never_exceeds_ten_items(len in 1usize..40) {
        let items: Vec<Value> = (0..len).map(|i| json!(i)).collect();
        let html = render_list(&items, &RenderOptions::default());
        prop_assert_eq!(html.matches("<li").count(), len.min(10));
    }

    #[test]
    fn escaped_text_has_no_markup(raw in ".*") {
        let escaped = escape_html(&raw);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
    }
}
