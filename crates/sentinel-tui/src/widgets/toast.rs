//! Transient notification banners, stacked in the top-right corner.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use sentinel_core::{Notification, Notifications};

use crate::theme;

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;

/// Oldest banner on top, newest below it, clipped to the available rows.
pub struct ToastStack<'a> {
    notifications: &'a Notifications,
}

impl<'a> ToastStack<'a> {
    pub fn new(notifications: &'a Notifications) -> Self {
        Self { notifications }
    }
}

impl Widget for ToastStack<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
        if width < 8 {
            return;
        }
        let x = area.right().saturating_sub(width + 1);
        let mut y = area.y + 1;

        for notification in self.notifications.iter() {
            if y + TOAST_HEIGHT > area.bottom() {
                break;
            }
            let slot = Rect::new(x, y, width, TOAST_HEIGHT);
            render_toast(notification, slot, buf);
            y += TOAST_HEIGHT;
        }
    }
}

fn render_toast(notification: &Notification, area: Rect, buf: &mut Buffer) {
    let color = theme::notification_color(notification.kind);

    Clear.render(area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::BG_DARK));

    let line = Line::from(vec![
        Span::styled(
            format!("{} ", theme::notification_icon(notification.kind)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(notification.message.as_str(), theme::card_value()),
    ]);

    Paragraph::new(line)
        .wrap(Wrap { trim: true })
        .block(block)
        .render(area, buf);
}
