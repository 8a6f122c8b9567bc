//! Settings screen: refresh rate and upstream base URL.
//!
//! Values are edited as raw text and handed to the controller unparsed,
//! so validation messages come from one place. Opening the screen reloads
//! both fields from the live configuration; Esc discards edits.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_input::{Input, InputRequest};

use sentinel_core::DashboardState;

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    RefreshInterval,
    BaseUrl,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Self::RefreshInterval => "  Refresh interval (seconds)",
            Self::BaseUrl => "  Base URL",
        }
    }

    fn other(self) -> Self {
        match self {
            Self::RefreshInterval => Self::BaseUrl,
            Self::BaseUrl => Self::RefreshInterval,
        }
    }
}

pub struct SettingsScreen {
    focused: bool,
    active_field: Field,
    refresh_input: Input,
    url_input: Input,
    state: Option<Arc<DashboardState>>,
}

impl SettingsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            active_field: Field::BaseUrl,
            refresh_input: Input::default(),
            url_input: Input::default(),
            state: None,
        }
    }

    fn load_from_state(&mut self) {
        let Some(state) = self.state.as_deref() else {
            return;
        };
        self.refresh_input =
            Input::new(state.config.refresh_interval_secs().to_string());
        self.url_input = Input::new(state.config.base_url().to_owned());
    }

    fn active_input_mut(&mut self) -> &mut Input {
        match self.active_field {
            Field::RefreshInterval => &mut self.refresh_input,
            Field::BaseUrl => &mut self.url_input,
        }
    }

    fn input(&self, field: Field) -> &Input {
        match field {
            Field::RefreshInterval => &self.refresh_input,
            Field::BaseUrl => &self.url_input,
        }
    }

    fn edit_request(key: KeyEvent) -> Option<InputRequest> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let request = match key.code {
            KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
            KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
            KeyCode::Char(c) if !ctrl => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return None,
        };
        Some(request)
    }

    fn apply_action(&self) -> Action {
        Action::ApplySettings {
            refresh_interval: self.refresh_input.value().to_owned(),
            base_url: self.url_input.value().to_owned(),
        }
    }

    // ── Drawing ─────────────────────────────────────────────────────

    fn render_input_field(&self, frame: &mut Frame, area: Rect, field: Field) {
        if area.height < 4 {
            return;
        }
        let active = self.active_field == field;
        let input = self.input(field);

        let label_style = if active {
            Style::default().fg(theme::NEON_CYAN)
        } else {
            Style::default().fg(theme::DIM_WHITE)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(field.label(), label_style)),
            Rect::new(area.x, area.y, area.width, 1),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if active {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let block_area = Rect::new(area.x, area.y + 1, area.width, 3);
        let inner = block.inner(block_area);
        frame.render_widget(block, block_area);

        let width = usize::from(inner.width.max(1)) - 1;
        let scroll = input.visual_scroll(width);
        frame.render_widget(
            Paragraph::new(Span::styled(input.value(), Style::default().fg(theme::NEON_CYAN)))
                .scroll((0, u16::try_from(scroll).unwrap_or(0))),
            inner,
        );

        if active && self.focused {
            let offset = input.visual_cursor().saturating_sub(scroll);
            let x = inner.x + u16::try_from(offset).unwrap_or(inner.width);
            frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), inner.y));
        }
    }
}

impl Default for SettingsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SettingsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc => return Ok(Some(Action::SwitchScreen(ScreenId::Dashboard))),
            KeyCode::Enter => return Ok(Some(self.apply_action())),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.active_field = self.active_field.other();
                return Ok(None);
            }
            _ => {}
        }

        if let Some(request) = Self::edit_request(key) {
            self.active_input_mut().handle(request);
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::StateUpdated(state) = action {
            let first = self.state.is_none();
            self.state = Some(Arc::clone(state));
            if first && self.focused {
                self.load_from_state();
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let panel_w = 64u16.min(area.width.saturating_sub(4));
        let panel_h = 14u16.min(area.height);
        let panel = Rect::new(
            area.x + (area.width.saturating_sub(panel_w)) / 2,
            area.y + (area.height.saturating_sub(panel_h)) / 2,
            panel_w,
            panel_h,
        );

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    "Settings",
                    Style::default()
                        .fg(theme::NEON_CYAN)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let [refresh_area, url_area, _, hints_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(Rect::new(
            inner.x + 1,
            inner.y + 1,
            inner.width.saturating_sub(2),
            inner.height.saturating_sub(1),
        ));

        self.render_input_field(frame, refresh_area, Field::RefreshInterval);
        self.render_input_field(frame, url_area, Field::BaseUrl);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Tab next field  Enter apply  Esc cancel",
                theme::key_hint(),
            ))
            .alignment(Alignment::Center),
            hints_area,
        );
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn set_focused(&mut self, focused: bool) {
        if focused && !self.focused {
            self.load_from_state();
            self.active_field = Field::BaseUrl;
        }
        self.focused = focused;
    }
}
