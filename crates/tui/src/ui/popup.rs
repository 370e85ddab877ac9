//! Modal popups: delete confirmations and the key help.
//!
//! While a popup is open it receives every key; `y` confirms, `n` or `Esc`
//! dismisses.

use apiconn_client::ResourceId;
use apiconn_config::Theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::centered_rect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popup {
    ConfirmDeleteConnection { id: ResourceId, name: String },
    ConfirmDeleteApiKey { id: ResourceId, name: String },
    Help,
}

const HELP_TEXT: &str = "\
Global Keys:
  Tab / Shift+Tab  Next / previous screen
  1-8              Jump to screen
  r                Refresh current screen
  ?                This help
  q / Ctrl+C       Quit

Connections:  n new  t test  d delete
  form:  Tab next field  Ctrl+P provider template
         Ctrl+T test  Enter save  Esc cancel
Query:        Ctrl+N/Ctrl+P connection  Up/Down examples
              Enter run  PgUp/PgDn scroll result
History:      / search  Left/Right page  Enter detail
Explorer:     / search  g category  v tab  f favourite  c connect
Settings:     Left/Right pane  Space toggle  s save  c theme
              a add key  t test key  d delete key
Notifications: Left/Right filter  m read  M all read
               d delete  X clear";

/// Render `popup` centred over the current frame.
pub fn render_popup(f: &mut Frame, popup: &Popup, theme: &Theme) {
    let area = match popup {
        Popup::Help => centered_rect(70, 70, f.area()),
        _ => centered_rect(50, 20, f.area()),
    };
    f.render_widget(Clear, area);

    match popup {
        Popup::ConfirmDeleteConnection { name, .. } => {
            render_confirm(f, area, "Confirm Delete", &format!("Delete connection '{name}'? (y/n)"), theme);
        }
        Popup::ConfirmDeleteApiKey { name, .. } => {
            render_confirm(f, area, "Confirm Delete", &format!("Delete API key '{name}'? (y/n)"), theme);
        }
        Popup::Help => {
            let p = Paragraph::new(HELP_TEXT)
                .block(
                    Block::default()
                        .title(" Help ")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme.info)),
                )
                .style(Style::default().fg(theme.text))
                .alignment(Alignment::Left)
                .wrap(Wrap { trim: false });
            f.render_widget(p, area);
        }
    }
}

fn render_confirm(f: &mut Frame, area: Rect, title: &str, text: &str, theme: &Theme) {
    let p = Paragraph::new(text)
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error)),
        )
        .style(Style::default().fg(theme.text))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}
