//! Server and player cards, laid out as a grid or a compact list.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use sentinel_core::{Badge, Card, LayoutMode};

use crate::theme;

/// Narrowest grid column before cards wrap onto more rows.
const MIN_CARD_WIDTH: u16 = 38;

fn badge_style(badge: &Badge) -> Style {
    match badge {
        Badge::Free => theme::badge_free(),
        Badge::Occupied => theme::badge_occupied(),
        Badge::PlayerId(_) => theme::badge_id(),
    }
}

// ── Single card ──────────────────────────────────────────────────────

/// A bordered card: title left, badge right, one line per info row.
pub struct CardWidget<'a> {
    card: &'a Card,
}

impl<'a> CardWidget<'a> {
    pub fn new(card: &'a Card) -> Self {
        Self { card }
    }

    /// Rows needed to draw the card including borders.
    pub fn height(card: &Card) -> u16 {
        u16::try_from(card.rows.len()).unwrap_or(u16::MAX - 2) + 2
    }
}

impl Widget for CardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let badge = self.card.badge.label();
        let block = Block::default()
            .title(Span::styled(format!(" {} ", self.card.title), theme::title_style()))
            .title_top(
                Line::from(Span::styled(format!(" {badge} "), badge_style(&self.card.badge)))
                    .right_aligned(),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let lines: Vec<Line> = self
            .card
            .rows
            .iter()
            .map(|row| {
                Line::from(vec![
                    Span::styled(format!("{}: ", row.label), theme::card_label()),
                    Span::styled(row.value.as_str(), theme::card_value()),
                ])
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

// ── Collections ──────────────────────────────────────────────────────

/// All cards of one view, drawn in the active layout starting at `offset`.
pub struct CardCollection<'a> {
    cards: &'a [Card],
    layout: LayoutMode,
    offset: usize,
}

impl<'a> CardCollection<'a> {
    pub fn new(cards: &'a [Card], layout: LayoutMode) -> Self {
        Self {
            cards,
            layout,
            offset: 0,
        }
    }

    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset.min(self.cards.len().saturating_sub(1));
        self
    }

    /// Cards per grid row for a given width.
    pub fn columns(width: u16) -> u16 {
        (width / MIN_CARD_WIDTH).max(1)
    }

    fn render_grid(&self, area: Rect, buf: &mut Buffer) {
        let columns = Self::columns(area.width);
        let card_width = area.width / columns;
        let mut y = area.y;

        for chunk in self.cards[self.offset..].chunks(usize::from(columns)) {
            let row_height = chunk.iter().map(CardWidget::height).max().unwrap_or(2);
            if y + row_height > area.bottom() {
                break;
            }
            let mut x = area.x;
            for card in chunk {
                let cell = Rect::new(x, y, card_width, row_height);
                CardWidget::new(card).render(cell, buf);
                x += card_width;
            }
            y += row_height;
        }
    }

    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self.cards[self.offset..]
            .iter()
            .take(usize::from(area.height))
            .map(list_line)
            .collect();
        Paragraph::new(lines).render(area, buf);
    }
}

fn list_line(card: &Card) -> Line<'_> {
    let mut spans = vec![
        Span::styled(format!("{:<20}", card.title), theme::title_style()),
        Span::styled(format!("{:<12}", card.badge.label()), badge_style(&card.badge)),
    ];
    for row in &card.rows {
        spans.push(Span::styled(format!("{} ", row.label), theme::card_label()));
        spans.push(Span::styled(format!("{}  ", row.value), theme::card_value()));
    }
    Line::from(spans)
}

impl Widget for CardCollection<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.cards.is_empty() || area.is_empty() {
            return;
        }
        match self.layout {
            LayoutMode::Grid => self.render_grid(area, buf),
            LayoutMode::List => self.render_list(area, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

    use sentinel_core::{LayoutMode, Server, render_servers};

    use super::{CardCollection, CardWidget};

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn servers() -> Vec<Server> {
        vec![
            Server {
                name: "Alpha".into(),
                ip: "10.0.0.1".into(),
                port: 7777,
                is_free: 1,
                max_players: 16,
                ..Server::default()
            },
            Server {
                name: "Beta".into(),
                ip: "10.0.0.2".into(),
                port: 7778,
                current_players: 4,
                max_players: 16,
                ..Server::default()
            },
        ]
    }

    #[test]
    fn card_shows_title_badge_and_rows() {
        let view = render_servers(&servers());
        let card = &view.cards[0];
        let area = Rect::new(0, 0, 40, CardWidget::height(card));
        let mut buf = Buffer::empty(area);
        CardWidget::new(card).render(area, &mut buf);

        let top = row(&buf, 0);
        assert!(top.contains("Alpha"));
        assert!(top.contains("Free"));
        assert!(row(&buf, 1).contains("Address: 10.0.0.1:7777"));
    }

    #[test]
    fn grid_places_cards_side_by_side_when_wide() {
        let view = render_servers(&servers());
        let area = Rect::new(0, 0, 80, 10);
        let mut buf = Buffer::empty(area);
        CardCollection::new(&view.cards, LayoutMode::Grid).render(area, &mut buf);

        let top = row(&buf, 0);
        assert!(top.contains("Alpha"));
        assert!(top.contains("Beta"));
        assert_eq!(CardCollection::columns(80), 2);
    }

    #[test]
    fn list_uses_one_line_per_card() {
        let view = render_servers(&servers());
        let area = Rect::new(0, 0, 120, 4);
        let mut buf = Buffer::empty(area);
        CardCollection::new(&view.cards, LayoutMode::List).render(area, &mut buf);

        assert!(row(&buf, 0).starts_with("Alpha"));
        assert!(row(&buf, 1).starts_with("Beta"));
        assert!(row(&buf, 1).contains("Occupied"));
        assert_eq!(row(&buf, 2).trim(), "");
    }

    #[test]
    fn offset_skips_leading_cards() {
        let view = render_servers(&servers());
        let area = Rect::new(0, 0, 120, 2);
        let mut buf = Buffer::empty(area);
        CardCollection::new(&view.cards, LayoutMode::List)
            .offset(1)
            .render(area, &mut buf);

        assert!(row(&buf, 0).starts_with("Beta"));
    }
}
