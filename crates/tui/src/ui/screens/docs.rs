//! Embedding guide: how to put live query results in a web page.
//!
//! The attribute tables come from `apiconn_embed` so the guide lists exactly
//! what the SDK binds.

use apiconn_config::Theme;
use apiconn_embed::binding::{
    ATTR_AUTO_LOAD, ATTR_CONNECTION_ID, ATTR_TARGET, ATTR_TEMPLATE,
};
use apiconn_embed::{BINDING_DESCRIPTORS, BindingKind, UNSUPPORTED_ATTRIBUTES};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::ui::screens::screen_block;
use crate::ui::theme::ThemeExt;

pub struct DocsRenderConfig<'a> {
    pub base_url: &'a str,
    pub scroll: u16,
    pub theme: &'a Theme,
}

pub fn render_docs(f: &mut Frame, area: Rect, config: DocsRenderConfig) {
    let DocsRenderConfig {
        base_url,
        scroll,
        theme,
    } = config;

    let lines = docs_lines(base_url, theme);
    let p = Paragraph::new(lines)
        .block(screen_block("Embedding Guide (Up/Down scroll)", theme))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(p, area);
}

fn kind_description(kind: BindingKind) -> &'static str {
    match kind {
        BindingKind::AutoLoad => "runs the query when the page loads",
        BindingKind::ActionButton => "runs the query when the button is clicked",
        BindingKind::Form => "runs the query with the form's fields on submit",
    }
}

pub(crate) fn docs_lines(base_url: &str, theme: &Theme) -> Vec<Line<'static>> {
    let heading = |text: &str| Line::from(Span::styled(text.to_string(), theme.title()));
    let code = |text: String| Line::from(Span::styled(format!("    {text}"), theme.info()));
    let text = |text: &str| Line::from(Span::styled(text.to_string(), theme.text()));

    let mut lines = vec![
        heading("1. Load the SDK"),
        code(format!(
            "<script src=\"{base_url}/static/api-connector.js\" data-api-key=\"YOUR_API_KEY\""
        )),
        code(format!("        data-base-url=\"{base_url}\"></script>")),
        Line::from(""),
        heading("2. Bind elements"),
    ];

    for descriptor in BINDING_DESCRIPTORS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<22}", descriptor.attribute), theme.info()),
            Span::styled(kind_description(descriptor.kind).to_string(), theme.text()),
        ]));
    }

    lines.extend([
        Line::from(""),
        heading("3. Options"),
        Line::from(vec![
            Span::styled(format!("  {ATTR_CONNECTION_ID:<22}"), theme.info()),
            Span::styled("connection to query (required)".to_string(), theme.text()),
        ]),
        Line::from(vec![
            Span::styled(format!("  {ATTR_TARGET:<22}"), theme.info()),
            Span::styled("CSS selector that receives the result".to_string(), theme.text()),
        ]),
        Line::from(vec![
            Span::styled(format!("  {ATTR_TEMPLATE:<22}"), theme.info()),
            Span::styled("HTML with {{field.path}} placeholders".to_string(), theme.text()),
        ]),
        Line::from(vec![
            Span::styled(format!("  {ATTR_AUTO_LOAD:<22}"), theme.info()),
            Span::styled("\"false\" skips the page-load query".to_string(), theme.text()),
        ]),
        Line::from(""),
        heading("Example"),
        code("<div data-api-query=\"Show my latest repositories\"".to_string()),
        code("     data-connection-id=\"1\"".to_string()),
        code("     data-template=\"<h3>{{name}}</h3>\"></div>".to_string()),
        Line::from(""),
    ]);

    lines.extend(platform_lines(base_url, theme));

    lines.extend([
        Line::from(""),
        heading("Not supported"),
        text("These attributes are recognised but ignored:"),
    ]);

    for attr in UNSUPPORTED_ATTRIBUTES {
        lines.push(Line::from(vec![
            Span::styled(format!("  {attr:<22}"), theme.disabled()),
            Span::styled("unsupported".to_string(), theme.warning()),
        ]));
    }

    lines
}

fn platform_lines(base_url: &str, theme: &Theme) -> Vec<Line<'static>> {
    let heading = |text: &str| Line::from(Span::styled(text.to_string(), theme.title()));
    let code = |text: String| Line::from(Span::styled(format!("    {text}"), theme.info()));
    let text = |text: &str| Line::from(Span::styled(format!("  {text}"), theme.text()));
    let sdk = format!("{base_url}/static/api-connector.js");

    vec![
        heading("Platforms"),
        text("WordPress: enqueue the SDK from the theme's functions.php,"),
        text("then paste bound elements into any post, page or widget."),
        code(format!(
            "wp_enqueue_script('api-connector', '{sdk}', array(), '1.0.0', true);"
        )),
        Line::from(""),
        text("React/Next.js: load the SDK once, in a useEffect or pages/_document.js."),
        text("Elements are bound once, on page load, so render them before the SDK runs."),
        code("useEffect(() => {".to_string()),
        code("  const script = document.createElement('script');".to_string()),
        code(format!("  script.src = '{sdk}';")),
        code("  document.head.appendChild(script);".to_string()),
        code("  return () => document.head.removeChild(script);".to_string()),
        code("}, []);".to_string()),
    ]
}
