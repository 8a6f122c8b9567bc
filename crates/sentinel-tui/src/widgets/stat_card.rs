//! Boxed counter used for the three stats above the card list.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::theme;

pub struct StatCard<'a> {
    label: &'a str,
    value: usize,
    color: Color,
}

impl<'a> StatCard<'a> {
    pub fn new(label: &'a str, value: usize, color: Color) -> Self {
        Self {
            label,
            value,
            color,
        }
    }
}

impl Widget for StatCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(format!(" {} ", self.label), theme::card_label()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        Paragraph::new(Line::from(Span::styled(
            self.value.to_string(),
            theme::stat_value(self.color),
        )))
        .alignment(Alignment::Center)
        .block(block)
        .render(area, buf);
    }
}
