//! Dashboard: query counts, success rate, connections, providers and the
//! recent activity feed.

use apiconn_client::NotificationKind;
use apiconn_client::views::DashboardStats;
use apiconn_config::Theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use crate::ui::screens::{Availability, render_unavailable, screen_block};
use crate::ui::theme::ThemeExt;

pub struct DashboardRenderConfig<'a> {
    pub loading: bool,
    pub stats: Option<&'a DashboardStats>,
    pub error: Option<&'a str>,
    pub theme: &'a Theme,
    pub spinner_frame: u8,
}

pub fn render_dashboard(f: &mut Frame, area: Rect, config: DashboardRenderConfig) {
    let DashboardRenderConfig {
        loading,
        stats,
        error,
        theme,
        spinner_frame,
    } = config;

    let availability = Availability::of(stats, loading, error, spinner_frame);
    if render_unavailable(f, area, "Dashboard", "dashboard", availability, theme) {
        return;
    }
    let Some(stats) = stats else {
        return;
    };

    let warning_height = if stats.has_high_error_rate() { 1 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(warning_height),
            Constraint::Min(0),
        ])
        .split(area);

    render_stat_cards(f, rows[0], stats, theme);

    if stats.has_high_error_rate() {
        let warning = Paragraph::new(format!(
            "High error rate: {:.2}% of queries failed. Check your connections.",
            stats.error_rate
        ))
        .style(theme.warning().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
        f.render_widget(warning, rows[1]);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[2]);

    render_activity(f, bottom[0], stats, theme);

    let quick = Paragraph::new(vec![
        Line::from(Span::styled("2", theme.title())),
        Line::from("  Add a connection"),
        Line::from(Span::styled("3", theme.title())),
        Line::from("  Ask a question in plain English"),
        Line::from(Span::styled("5", theme.title())),
        Line::from("  Browse the API catalog"),
        Line::from(Span::styled("8", theme.title())),
        Line::from("  Embed queries in a web page"),
    ])
    .style(theme.text())
    .block(screen_block("Quick Actions", theme));
    f.render_widget(quick, bottom[1]);
}

fn render_stat_cards(f: &mut Frame, area: Rect, stats: &DashboardStats, theme: &Theme) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let rate_style = if stats.has_high_error_rate() {
        theme.warning()
    } else {
        theme.success()
    };
    let values = [
        (
            "Total Queries",
            stats.total_queries.to_string(),
            format!("{} ok, {} failed", stats.successful_queries, stats.failed_queries),
            theme.text(),
        ),
        (
            "Success Rate",
            format!("{}%", stats.success_rate),
            format!("error rate {:.2}%", stats.error_rate),
            rate_style,
        ),
        (
            "Active Connections",
            stats.active_connections.to_string(),
            String::from("saved APIs"),
            theme.info(),
        ),
        (
            "Available APIs",
            stats.providers_available.to_string(),
            String::from("in the catalog"),
            theme.info(),
        ),
    ];

    for ((title, value, detail, style), card) in values.into_iter().zip(cards.iter()) {
        let p = Paragraph::new(vec![
            Line::from(Span::styled(value, style.add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(detail, theme.text_dim())),
        ])
        .alignment(Alignment::Center)
        .block(screen_block(title, theme));
        f.render_widget(p, *card);
    }
}

fn render_activity(f: &mut Frame, area: Rect, stats: &DashboardStats, theme: &Theme) {
    if stats.recent_activity.is_empty() {
        let p = Paragraph::new("No recent activity. Run a query to get started.")
            .style(theme.text_dim())
            .alignment(Alignment::Center)
            .block(screen_block("Recent Activity", theme));
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = stats
        .recent_activity
        .iter()
        .map(|item| {
            let (marker, style) = match item.kind {
                NotificationKind::Success => ("✓", theme.success()),
                NotificationKind::Error => ("✗", theme.error()),
                NotificationKind::Warning => ("!", theme.warning()),
                NotificationKind::Info => ("i", theme.info()),
            };
            let mut spans = vec![
                Span::styled(format!("{marker} "), style),
                Span::styled(item.message.clone(), theme.text()),
            ];
            if !item.time.is_empty() {
                spans.push(Span::styled(format!("  {}", item.time), theme.text_dim()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    f.render_widget(List::new(items).block(screen_block("Recent Activity", theme)), area);
}
