//! Query screen: pick a connection, type a question, read the answer.

use apiconn_client::{Connection, QueryResponse};
use apiconn_config::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
};

use crate::app::forms::TextField;
use crate::ui::json_lines;
use crate::ui::screens::screen_block;
use crate::ui::theme::{ThemeExt, spinner_char};

const MAX_EXAMPLES_SHOWN: usize = 5;

pub struct QueryRenderConfig<'a> {
    pub connection: Option<&'a Connection>,
    pub connection_count: usize,
    pub input: &'a TextField,
    pub examples: &'a [String],
    pub example_index: Option<usize>,
    pub running: bool,
    pub result: Option<&'a QueryResponse>,
    pub scroll: u16,
    pub theme: &'a Theme,
    pub spinner_frame: u8,
}

pub fn render_query(f: &mut Frame, area: Rect, config: QueryRenderConfig) {
    let QueryRenderConfig {
        connection,
        connection_count,
        input,
        examples,
        example_index,
        running,
        result,
        scroll,
        theme,
        spinner_frame,
    } = config;

    let examples_height = if examples.is_empty() {
        0
    } else {
        examples.len().min(MAX_EXAMPLES_SHOWN) as u16 + 2
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(examples_height),
            Constraint::Min(0),
        ])
        .split(area);

    let selector = match connection {
        Some(conn) => Line::from(vec![
            Span::styled(conn.name.clone(), theme.title()),
            Span::styled(format!("  {}", conn.base_url), theme.text_dim()),
            Span::styled(
                format!("  ({connection_count} saved, Ctrl+N/Ctrl+P to switch)"),
                theme.text_dim(),
            ),
        ]),
        None if connection_count == 0 => Line::from(Span::styled(
            "No connections yet. Add one on the Connections screen (2).",
            theme.warning(),
        )),
        None => Line::from(Span::styled(
            "Press Ctrl+N to choose a connection",
            theme.warning(),
        )),
    };
    f.render_widget(
        Paragraph::new(selector).block(screen_block("Connection", theme)),
        rows[0],
    );

    let input_line = if input.is_empty() {
        Line::from(Span::styled(
            "Ask in plain English, e.g. \"Show me my repositories\"",
            theme.disabled(),
        ))
    } else {
        Line::from(Span::styled(input.value().to_string(), theme.text()))
    };
    let input_block = screen_block("Query", theme).border_style(theme.border_focused());
    f.render_widget(Paragraph::new(input_line).block(input_block), rows[1]);
    let cursor_x = rows[1].x + 1 + input.cursor() as u16;
    if cursor_x < rows[1].x + rows[1].width.saturating_sub(1) {
        f.set_cursor_position(Position::new(cursor_x, rows[1].y + 1));
    }

    if !examples.is_empty() {
        let items: Vec<ListItem> = examples
            .iter()
            .take(MAX_EXAMPLES_SHOWN)
            .enumerate()
            .map(|(i, example)| {
                let style = if Some(i) == example_index {
                    theme.highlight()
                } else {
                    theme.info()
                };
                ListItem::new(Span::styled(example.clone(), style))
            })
            .collect();
        f.render_widget(
            List::new(items).block(screen_block("Example Queries (Up/Down)", theme)),
            rows[2],
        );
    }

    render_result(f, rows[3], running, result, scroll, theme, spinner_frame);
}

fn render_result(
    f: &mut Frame,
    area: Rect,
    running: bool,
    result: Option<&QueryResponse>,
    scroll: u16,
    theme: &Theme,
    spinner_frame: u8,
) {
    let block = screen_block("Result", theme);

    if running {
        let p = Paragraph::new(format!("{} Processing query...", spinner_char(spinner_frame)))
            .style(theme.info())
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let Some(result) = result else {
        let p = Paragraph::new("Results appear here. Press Enter to run the query.")
            .style(theme.text_dim())
            .block(block);
        f.render_widget(p, area);
        return;
    };

    let mut lines = Vec::new();
    if let Some(interpretation) = &result.interpretation {
        lines.push(Line::from(vec![
            Span::styled("Interpreted as: ", theme.text_dim()),
            Span::styled(interpretation.summary(), theme.title()),
        ]));
        if !interpretation.params.is_null()
            && interpretation.params.as_object().is_none_or(|m| !m.is_empty())
        {
            lines.push(Line::from(vec![
                Span::styled("Parameters: ", theme.text_dim()),
                Span::styled(interpretation.params.to_string(), theme.text()),
            ]));
        }
        lines.push(Line::from(""));
    }

    if result.success {
        match &result.data {
            Some(data) => lines.extend(json_lines(data, theme)),
            None => lines.push(Line::from(Span::styled("No data returned.", theme.text_dim()))),
        }
    } else {
        lines.push(Line::from(Span::styled(
            format!(
                "Error: {}",
                result.error.as_deref().unwrap_or("unknown error")
            ),
            theme.error(),
        )));
    }

    let p = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(p, area);
}
