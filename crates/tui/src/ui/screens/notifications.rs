//! Notification center screen.

use apiconn_client::views::{NotificationCenter, NotificationFilter};
use apiconn_client::{Notification, NotificationKind};
use apiconn_config::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Tabs},
};

use crate::ui::screens::screen_block;
use crate::ui::theme::ThemeExt;

pub struct NotificationsRenderConfig<'a> {
    pub center: &'a NotificationCenter,
    pub filter: NotificationFilter,
    pub state: &'a mut ListState,
    pub theme: &'a Theme,
}

pub fn render_notifications(f: &mut Frame, area: Rect, config: NotificationsRenderConfig) {
    let NotificationsRenderConfig {
        center,
        filter,
        state,
        theme,
    } = config;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let titles = NotificationFilter::ALL
        .iter()
        .map(|f| format!("{} ({})", f.label(), center.filtered(*f).len()));
    let selected = NotificationFilter::ALL
        .iter()
        .position(|f| *f == filter)
        .unwrap_or(0);
    let title = format!(
        "Notifications: {} unread, {} alerts",
        center.unread_count(),
        center.alert_count()
    );
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme.text_dim())
        .highlight_style(theme.highlight())
        .block(screen_block(&title, theme));
    f.render_widget(tabs, rows[0]);

    let visible = center.filtered(filter);
    let block = screen_block("m read | M all read | d delete | X clear", theme);
    if visible.is_empty() {
        let message = if center.is_empty() {
            "No notifications yet."
        } else {
            "Nothing matches this filter."
        };
        f.render_widget(Paragraph::new(message).style(theme.text_dim()).block(block), rows[1]);
        return;
    }

    let items: Vec<ListItem> = visible.iter().map(|n| notification_item(n, theme)).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(theme.highlight())
        .highlight_symbol("> ");
    f.render_stateful_widget(list, rows[1], state);
}

fn notification_item(n: &Notification, theme: &Theme) -> ListItem<'static> {
    let (marker, style) = match n.kind {
        NotificationKind::Success => ("✓", theme.success()),
        NotificationKind::Error => ("✗", theme.error()),
        NotificationKind::Warning => ("!", theme.warning()),
        NotificationKind::Info => ("i", theme.info()),
    };
    let title_style = if n.read {
        theme.text()
    } else {
        theme.text().add_modifier(Modifier::BOLD)
    };
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(if n.read { "  " } else { "● " }, theme.info()),
            Span::styled(format!("{marker} "), style),
            Span::styled(n.title.clone(), title_style),
            Span::styled(
                format!("  {}", n.timestamp.format("%b %d, %H:%M")),
                theme.text_dim(),
            ),
        ]),
        Line::from(Span::styled(format!("    {}", n.message), theme.text_dim())),
    ])
}
