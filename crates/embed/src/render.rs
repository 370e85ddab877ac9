//! HTML rendering of query results.
//!
//! Responsibilities:
//! - Substitute `{{path}}` placeholders from a JSON payload.
//! - Render lists (first 10 items) and objects (first 5 entries) as HTML.
//! - Apply the `api-loaded` / `api-error` classes to the target element.
//!
//! Does NOT handle:
//! - Sanitizing markup. Values are inserted verbatim unless
//!   [`RenderOptions::escape_html`] is set, so untrusted upstream data can
//!   inject markup into the page.
//!
//! Invariants:
//! - Output for a given payload and options is deterministic.
//! - Object key order is the payload's order.

use serde_json::Value;

use crate::dom::Element;

/// Items shown by [`render_list`].
pub const MAX_LIST_ITEMS: usize = 10;
/// Entries shown by [`render_object`].
pub const MAX_OBJECT_ENTRIES: usize = 5;
/// Characters of compact JSON kept for nested values before `...`.
pub const NESTED_PREVIEW_CHARS: usize = 100;
/// Characters kept for scalar values.
pub const SCALAR_PREVIEW_CHARS: usize = 200;

pub const CLASS_LOADED: &str = "api-loaded";
pub const CLASS_ERROR: &str = "api-error";
pub const CLASS_LOADING: &str = "api-loading";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Escape `& < > " '` in rendered values and keys.
    pub escape_html: bool,
}

impl RenderOptions {
    pub fn escaped() -> Self {
        Self { escape_html: true }
    }

    fn text(&self, raw: &str) -> String {
        if self.escape_html {
            escape_html(raw)
        } else {
            raw.to_string()
        }
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Text form of a value: strings unquoted, everything else as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Dot-path lookup. Object keys and array indices are supported; a falsy
/// intermediate value ends the walk.
pub fn lookup_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |current, key| {
        if is_falsy(current) {
            return None;
        }
        match current {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    })
}

/// Replace every `{{ path }}` in `template` with the value at `path`.
///
/// Missing paths and falsy values (`null`, `false`, `0`, `""`) become empty.
/// Objects and arrays are substituted as compact JSON (`{"a":1}`, `["a","b"]`),
/// not as a browser would stringify them (`[object Object]`, `a,b`).
pub fn apply_template(template: &str, data: &Value) -> String {
    apply_template_with(template, data, &RenderOptions::default())
}

pub fn apply_template_with(template: &str, data: &Value, options: &RenderOptions) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let inner_len = after.find('}').unwrap_or(after.len());
        if inner_len > 0 && after[inner_len..].starts_with("}}") {
            let path = after[..inner_len].trim();
            if let Some(value) = lookup_path(data, path).filter(|v| !is_falsy(v)) {
                out.push_str(&options.text(&display_value(value)));
            }
            rest = &after[inner_len + 2..];
        } else {
            out.push('{');
            rest = &rest[start + 1..];
        }
    }
    out.push_str(rest);
    out
}

/// The part of a response that is rendered without a template:
/// `result`, else `data`, else the whole payload.
pub fn result_payload(data: &Value) -> &Value {
    data.get("result")
        .or_else(|| data.get("data"))
        .unwrap_or(data)
}

pub fn render_data(data: &Value, template: Option<&str>, options: &RenderOptions) -> String {
    if let Some(template) = template {
        return apply_template_with(template, data, options);
    }
    match result_payload(data) {
        Value::Array(items) => render_list(items, options),
        value @ (Value::Object(_) | Value::Null) => render_object(value, options),
        scalar => format!(
            "<div class=\"api-result\">{}</div>",
            options.text(&display_value(scalar))
        ),
    }
}

pub fn render_list(items: &[Value], options: &RenderOptions) -> String {
    if items.is_empty() {
        return "<div class=\"api-empty\">No data available</div>".to_string();
    }
    let body: String = items
        .iter()
        .take(MAX_LIST_ITEMS)
        .map(|item| {
            let inner = match item {
                Value::Object(_) | Value::Array(_) | Value::Null => render_object(item, options),
                scalar => options.text(&display_value(scalar)),
            };
            format!("<li class=\"api-list-item\">{inner}</li>")
        })
        .collect();
    format!("<ul class=\"api-list\">{body}</ul>")
}

fn render_entry_value(value: &Value, options: &RenderOptions) -> String {
    match value {
        Value::Object(_) | Value::Array(_) | Value::Null => {
            let json = value.to_string();
            format!(
                "{}...",
                options.text(truncate_chars(&json, NESTED_PREVIEW_CHARS))
            )
        }
        scalar => options.text(truncate_chars(&display_value(scalar), SCALAR_PREVIEW_CHARS)),
    }
}

/// Render the first entries of an object (or array, keyed by index).
pub fn render_object(value: &Value, options: &RenderOptions) -> String {
    let entries: Vec<(String, &Value)> = match value {
        Value::Null => return "<div class=\"api-empty\">No data</div>".to_string(),
        Value::Object(map) => map
            .iter()
            .take(MAX_OBJECT_ENTRIES)
            .map(|(k, v)| (k.clone(), v))
            .collect(),
        Value::Array(items) => items
            .iter()
            .take(MAX_OBJECT_ENTRIES)
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        scalar => return render_entry_value(scalar, options),
    };
    let body: String = entries
        .into_iter()
        .map(|(key, value)| {
            format!(
                "<div class=\"api-item\"><strong>{}:</strong> {}</div>",
                options.text(&key),
                render_entry_value(value, options)
            )
        })
        .collect();
    format!("<div class=\"api-object\">{body}</div>")
}

pub fn render_error(message: &str, options: &RenderOptions) -> String {
    format!("<div class=\"api-error\">Error: {}</div>", options.text(message))
}

/// Render `data` into `element` and mark it loaded.
pub fn show_data(element: &mut Element, data: &Value, template: Option<&str>, options: &RenderOptions) {
    element.set_inner_html(render_data(data, template, options));
    element.add_class(CLASS_LOADED);
    element.remove_class(CLASS_ERROR);
    element.remove_class(CLASS_LOADING);
}

/// Render an error into `element` and mark it failed.
pub fn show_error(element: &mut Element, message: &str, options: &RenderOptions) {
    element.set_inner_html(render_error(message, options));
    element.add_class(CLASS_ERROR);
    element.remove_class(CLASS_LOADED);
    element.remove_class(CLASS_LOADING);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RAW: RenderOptions = RenderOptions { escape_html: false };

    #[test]
    fn test_template_paths() {
        let data = json!({"result": {"user": {"name": "Ada", "age": 36}}});
        assert_eq!(
            apply_template("<b>{{ result.user.name }}</b> ({{result.user.age}})", &data),
            "<b>Ada</b> (36)"
        );
    }

    #[test]
    fn test_template_falsy_and_missing_are_empty() {
        let data = json!({"zero": 0, "no": false, "empty": "", "nil": null});
        assert_eq!(
            apply_template("[{{zero}}|{{no}}|{{empty}}|{{nil}}|{{missing.deep}}]", &data),
            "[||||]"
        );
    }

    #[test]
    fn test_template_objects_are_json() {
        let data = json!({"tags": ["a", "b"], "meta": {"k": 1}});
        assert_eq!(apply_template("{{tags}} {{meta}}", &data), "[\"a\",\"b\"] {\"k\":1}");
    }

    #[test]
    fn test_template_array_index() {
        let data = json!({"items": [{"title": "first"}]});
        assert_eq!(apply_template("{{items.0.title}}", &data), "first");
    }

    #[test]
    fn test_template_unmatched_braces_left_alone() {
        let data = json!({"a": "x"});
        assert_eq!(apply_template("{{}} {{a", &data), "{{}} {{a");
        assert_eq!(apply_template("{{{a}}", &data), "");
        assert_eq!(apply_template("{ {{a}} }", &data), "{ x }");
    }

    #[test]
    fn test_render_data_dispatch() {
        assert!(render_data(&json!({"result": [1]}), None, &RAW).starts_with("<ul class=\"api-list\">"));
        assert!(render_data(&json!({"result": {"a": 1}}), None, &RAW).starts_with("<div class=\"api-object\">"));
        assert_eq!(
            render_data(&json!({"result": "done"}), None, &RAW),
            "<div class=\"api-result\">done</div>"
        );
        assert_eq!(
            render_data(&json!({"result": null}), None, &RAW),
            "<div class=\"api-empty\">No data</div>"
        );
    }

    #[test]
    fn test_render_data_falls_back_to_data_then_payload() {
        assert_eq!(
            render_data(&json!({"success": true, "data": [7]}), None, &RAW),
            "<ul class=\"api-list\"><li class=\"api-list-item\">7</li></ul>"
        );
        assert_eq!(
            render_data(&json!(42), None, &RAW),
            "<div class=\"api-result\">42</div>"
        );
    }

    #[test]
    fn test_render_list_limits_and_empty() {
        let items: Vec<Value> = (0..15).map(|i| json!(i)).collect();
        let html = render_list(&items, &RAW);
        assert_eq!(html.matches("<li class=\"api-list-item\">").count(), 10);
        assert_eq!(
            render_list(&[], &RAW),
            "<div class=\"api-empty\">No data available</div>"
        );
    }

    #[test]
    fn test_render_object_entries() {
        let html = render_object(&json!({"name": "Ada", "tags": ["x"], "none": null}), &RAW);
        assert_eq!(
            html,
            "<div class=\"api-object\">\
             <div class=\"api-item\"><strong>name:</strong> Ada</div>\
             <div class=\"api-item\"><strong>tags:</strong> [\"x\"]...</div>\
             <div class=\"api-item\"><strong>none:</strong> null...</div>\
             </div>"
        );
    }

    #[test]
    fn test_render_object_keeps_payload_key_order() {
        let data: Value =
            serde_json::from_str(r#"{"zeta":1,"alpha":2,"mid":3,"b":4,"a":5,"dropped":6}"#).unwrap();
        let html = render_object(&data, &RAW);
        let zeta = html.find("<strong>zeta:</strong>").unwrap();
        let alpha = html.find("<strong>alpha:</strong>").unwrap();
        assert!(zeta < alpha);
        assert!(html.contains("<strong>a:</strong> 5"));
        assert!(!html.contains("dropped"));
    }

    #[test]
    fn test_render_object_truncation() {
        let long = "x".repeat(250);
        let nested: Vec<String> = (0..50).map(|i| format!("item{i}")).collect();
        let html = render_object(&json!({"long": long, "nested": nested}), &RAW);
        assert!(html.contains(&format!("<strong>long:</strong> {}</div>", "x".repeat(200))));
        let nested_json = serde_json::to_string(&nested).unwrap();
        assert!(html.contains(&format!("{}...", &nested_json[..100])));
    }

    #[test]
    fn test_render_object_limits_entries() {
        let obj: serde_json::Map<String, Value> =
            (0..8).map(|i| (format!("k{i}"), json!(i))).collect();
        let html = render_object(&Value::Object(obj), &RAW);
        assert_eq!(html.matches("class=\"api-item\"").count(), 5);
        assert!(html.contains("<strong>k0:</strong>"));
        assert!(!html.contains("<strong>k5:</strong>"));
    }

    #[test]
    fn test_escaping_is_opt_in() {
        let data = json!({"result": "<script>alert(1)</script>"});
        assert!(render_data(&data, None, &RAW).contains("<script>"));
        let escaped = render_data(&data, None, &RenderOptions::escaped());
        assert!(escaped.contains("&lt;script&gt;"));
        assert!(!escaped.contains("<script>"));
    }

    #[test]
    fn test_show_data_and_error_classes() {
        let mut el = Element::new("div").with_class(CLASS_LOADING).with_class(CLASS_ERROR);
        show_data(&mut el, &json!({"result": "ok"}), None, &RAW);
        assert!(el.has_class(CLASS_LOADED));
        assert!(!el.has_class(CLASS_ERROR));
        assert!(!el.has_class(CLASS_LOADING));

        show_error(&mut el, "HTTP error! status: 500", &RAW);
        assert_eq!(
            el.inner_html(),
            Some("<div class=\"api-error\">Error: HTTP error! status: 500</div>")
        );
        assert!(el.has_class(CLASS_ERROR));
        assert!(!el.has_class(CLASS_LOADED));
    }
}
