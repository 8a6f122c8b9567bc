//! Dashboard screen: stat cards over the server or player card collection.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use sentinel_core::{Card, DashboardState, ViewMode};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::card::CardCollection;
use crate::widgets::stat_card::StatCard;

pub struct DashboardScreen {
    state: Option<Arc<DashboardState>>,
    /// Index of the first visible card.
    scroll: usize,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            state: None,
            scroll: 0,
        }
    }

    fn card_count(&self) -> usize {
        self.state.as_deref().map_or(0, |s| cards_for(s).len())
    }

    fn render_stats(state: &DashboardState, frame: &mut Frame, area: Rect) {
        let stats: [(&str, usize, _); 3] = match state.view_mode {
            ViewMode::Servers => {
                let s = state.servers.as_deref().map(|v| v.stats).unwrap_or_default();
                [
                    ("Total Servers", s.total, theme::NEON_CYAN),
                    ("Free", s.free, theme::SUCCESS_GREEN),
                    ("Occupied", s.occupied, theme::ERROR_RED),
                ]
            }
            ViewMode::Players => {
                let s = state.players.as_deref().map(|v| v.stats).unwrap_or_default();
                [
                    ("Players", s.total, theme::NEON_CYAN),
                    ("Servers", s.unique_servers, theme::LIGHT_BLUE),
                    ("Active (5 min)", s.recently_active, theme::CORAL),
                ]
            }
        };

        let cols = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);
        for ((label, value, color), col) in stats.into_iter().zip(cols.iter()) {
            frame.render_widget(StatCard::new(label, value, color), *col);
        }
    }

    fn render_cards(&self, state: &DashboardState, frame: &mut Frame, area: Rect) {
        let placeholder = match state.view_mode {
            ViewMode::Servers => state.servers.as_deref().map(|v| v.placeholder()),
            ViewMode::Players => state.players.as_deref().map(|v| v.placeholder()),
        };

        let message = match placeholder {
            Some(None) => {
                frame.render_widget(
                    CardCollection::new(cards_for(state), state.layout_mode).offset(self.scroll),
                    area,
                );
                return;
            }
            Some(Some(empty)) => empty,
            None if !state.config.is_polling_enabled() => {
                "No base URL configured. Press s to open settings."
            }
            None if state.loading => "Loading...",
            None => "Waiting for the first refresh. Press r to fetch now.",
        };

        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(message, theme::card_label())))
                .alignment(Alignment::Center),
            middle,
        );
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Cards of the active view, empty until that view has been fetched.
fn cards_for(state: &DashboardState) -> &[Card] {
    match state.view_mode {
        ViewMode::Servers => state.servers.as_deref().map_or(&[], |v| v.cards.as_slice()),
        ViewMode::Players => state.players.as_deref().map_or(&[], |v| v.cards.as_slice()),
    }
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::ScrollTop),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::StateUpdated(state) => {
                let view_changed = self
                    .state
                    .as_deref()
                    .is_some_and(|old| old.view_mode != state.view_mode);
                self.state = Some(Arc::clone(state));
                if view_changed {
                    self.scroll = 0;
                }
                self.scroll = self.scroll.min(self.card_count().saturating_sub(1));
            }
            Action::ScrollDown => {
                if self.scroll + 1 < self.card_count() {
                    self.scroll += 1;
                }
            }
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollTop => self.scroll = 0,
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(state) = self.state.as_deref() else {
            frame.render_widget(
                Paragraph::new(Span::styled("Starting...", theme::card_label()))
                    .alignment(Alignment::Center),
                area,
            );
            return;
        };

        let [stats_area, cards_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        Self::render_stats(state, frame, stats_area);
        self.render_cards(state, frame, cards_area);
    }
}
