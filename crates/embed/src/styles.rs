//! Default stylesheet for rendered results.
//!
//! Pages inject this into a `<style>` element once; every class the renderer
//! emits is covered.

pub const DEFAULT_STYLES: &str = r#"
.api-result, .api-error, .api-loading, .api-empty {
    padding: 10px;
    margin: 10px 0;
    border-radius: 4px;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
}

.api-result {
    background-color: #f8f9fa;
    border: 1px solid #dee2e6;
}

.api-error {
    background-color: #f8d7da;
    border: 1px solid #f5c6cb;
    color: #721c24;
}

.api-loading {
    background-color: #d1ecf1;
    border: 1px solid #bee5eb;
    color: #0c5460;
}

.api-empty {
    background-color: #fff3cd;
    border: 1px solid #ffeaa7;
    color: #856404;
}

.api-list {
    list-style: none;
    padding: 0;
    margin: 0;
}

.api-list-item {
    padding: 8px;
    margin: 4px 0;
    background-color: #ffffff;
    border: 1px solid #e9ecef;
    border-radius: 3px;
}

.api-object .api-item {
    margin: 4px 0;
    padding: 4px 0;
    border-bottom: 1px solid #eee;
}

.api-object .api-item:last-child {
    border-bottom: none;
}

.api-object strong {
    color: #495057;
}

[data-api-action] {
    cursor: pointer;
}

[data-api-action]:disabled {
    opacity: 0.6;
    cursor: not-allowed;
}
"#;

/// Wrap [`DEFAULT_STYLES`] in a `<style>` tag.
pub fn style_tag() -> String {
    format!("<style>{DEFAULT_STYLES}</style>")
}
