//! Dashboard app: key routing, controller commands and frame layout.
//!
//! Controller calls that touch the network are spawned so the loop never
//! waits on a fetch; their results arrive through the data bridge like
//! any other state change.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use sentinel_core::{Configuration, CoreError, Dashboard, DashboardState, LayoutMode, ViewMode};

use crate::action::Action;
use crate::component::Component;
use crate::data_bridge::spawn_data_bridge;
use crate::event::{Event, EventRates, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::{self, Tui};
use crate::widgets::countdown::CountdownGauge;
use crate::widgets::toast::ToastStack;

/// Owns the controller handle and the screens it feeds.
pub struct App {
    dashboard: Dashboard,
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Latest controller snapshot, for the header and notification overlay.
    state: Option<Arc<DashboardState>>,
    /// Layout the current terminal width would suggest, when it differs.
    layout_hint: Option<LayoutMode>,
    throbber: ThrobberState,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            dashboard,
            active_screen: ScreenId::Dashboard,
            screens: create_screens().into_iter().collect(),
            running: true,
            help_visible: false,
            state: None,
            layout_hint: None,
            throbber: ThrobberState::default(),
            action_tx,
            action_rx,
        }
    }

    /// Mount every screen and seed it with the current snapshot, so a
    /// screen focused before the data bridge delivers still has state.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        let seed = Action::StateUpdated(Arc::new(self.dashboard.snapshot()));
        self.process_action(&seed)?;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Start polling when a base URL is already configured; otherwise
    /// open the settings form so the user can supply one.
    fn start_dashboard(&self) -> Result<()> {
        if self.dashboard.config().is_polling_enabled() {
            self.spawn_command("startup refresh", |d| async move {
                d.start_timers().await;
                d.refresh().await
            });
        } else {
            info!("no base URL configured, opening settings");
            self.action_tx
                .send(Action::SwitchScreen(ScreenId::Settings))?;
        }
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        let cancel = CancellationToken::new();
        let bridge = tokio::spawn(spawn_data_bridge(
            self.dashboard.subscribe(),
            self.action_tx.clone(),
            cancel.clone(),
        ));

        self.start_dashboard()?;
        let mut events = EventReader::spawn(EventRates::default());

        info!("dashboard loop running");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w) => self.action_tx.send(Action::Resize(w))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        cancel.cancel();
        let _ = bridge.await;
        self.dashboard.shutdown().await;
        tui.exit()?;
        info!("dashboard loop stopped");
        Ok(())
    }

    /// Run a controller command in the background. Failures are already
    /// surfaced as notifications by the controller, so they are only logged.
    fn spawn_command<F, Fut>(&self, name: &'static str, command: F)
    where
        F: FnOnce(Dashboard) -> Fut,
        Fut: Future<Output = Result<(), CoreError>> + Send + 'static,
    {
        let fut = command(self.dashboard.clone());
        tokio::spawn(async move {
            if let Err(e) = fut.await {
                debug!(command = name, error = %e, "dashboard command failed");
            }
        });
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Map a key event to an action. Global keys are handled here unless
    /// the active screen is capturing text input.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        let Some(screen) = self.screens.get_mut(&self.active_screen) else {
            return Ok(None);
        };
        if screen.captures_input() {
            return screen.handle_key_event(key);
        }

        let action = match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => Action::Quit,
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => Action::ToggleHelp,
            (KeyModifiers::NONE, KeyCode::Char('v')) => Action::ToggleView,
            (KeyModifiers::NONE, KeyCode::Char('l')) => Action::ToggleLayout,
            (KeyModifiers::NONE, KeyCode::Char('r')) => Action::Refresh,
            (KeyModifiers::NONE, KeyCode::Char('x')) => Action::DismissNotification,
            (KeyModifiers::NONE, KeyCode::Char('s')) => Action::SwitchScreen(ScreenId::Settings),
            _ => return screen.handle_key_event(key),
        };
        Ok(Some(action))
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Resize(w) => self.apply_viewport_width(tui::viewport_width_for(*w)),

            Action::Tick => {
                if self.state.as_deref().is_some_and(|s| s.loading) {
                    self.throbber.calc_next();
                }
                self.dashboard.prune_notifications();
            }

            Action::SwitchScreen(target) => self.switch_screen(*target),

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::ToggleView => {
                self.spawn_command("toggle view", |d| async move { d.toggle_view_mode().await });
            }

            Action::ToggleLayout => {
                self.dashboard.toggle_layout_mode();
                self.layout_hint = None;
            }

            Action::Refresh => {
                self.spawn_command("refresh", |d| async move { d.refresh().await });
            }

            Action::DismissNotification => {
                self.dashboard.dismiss_latest();
            }

            Action::ApplySettings {
                refresh_interval,
                base_url,
            } => {
                let accepted = Configuration::parse(refresh_interval, base_url).is_ok();
                let (refresh_interval, base_url) = (refresh_interval.clone(), base_url.clone());
                self.spawn_command("apply settings", |d| async move {
                    d.apply_settings_input(&refresh_interval, &base_url).await
                });
                if accepted {
                    self.switch_screen(ScreenId::Dashboard);
                }
            }

            Action::StateUpdated(state) => {
                self.state = Some(Arc::clone(state));
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            Action::Render => {}

            other => {
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    if let Some(follow_up) = screen.update(other)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Record the layout the new width suggests. The active layout stays.
    fn apply_viewport_width(&mut self, width: u32) {
        self.layout_hint = self.dashboard.on_resize(width);
    }

    fn switch_screen(&mut self, target: ScreenId) {
        if target == self.active_screen {
            return;
        }
        debug!("switching screen: {} → {}", self.active_screen, target);
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.active_screen = target;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
    }

    // ── Drawing ─────────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, content_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header_area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }

        self.render_status_bar(frame, status_area);

        if let Some(state) = self.state.as_deref() {
            frame.render_widget(ToastStack::new(&state.notifications), content_area);
        }

        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_header(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Star Deception Sentinel ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(state) = self.state.clone() else {
            return;
        };

        let [tabs_area, layout_area, loader_area, countdown_area] = Layout::horizontal([
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(14),
            Constraint::Length(28),
        ])
        .areas(inner);

        let mut tabs = Vec::new();
        for mode in [ViewMode::Servers, ViewMode::Players] {
            let style = if mode == state.view_mode {
                theme::tab_active()
            } else {
                theme::tab_inactive()
            };
            tabs.push(Span::styled(format!(" {} ", mode.label()), style));
        }
        frame.render_widget(Paragraph::new(Line::from(tabs)), tabs_area);

        let layout = match state.layout_mode {
            LayoutMode::Grid => "▦ grid",
            LayoutMode::List => "☰ list",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(layout, theme::card_value())),
            layout_area,
        );

        if state.loading {
            let throbber = Throbber::default()
                .label("Loading")
                .style(Style::default().fg(theme::NEON_CYAN))
                .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
            frame.render_stateful_widget(throbber, loader_area, &mut self.throbber);
        }

        if state.countdown_visible {
            frame.render_widget(CountdownGauge::new(&state.countdown), countdown_area);
        } else {
            frame.render_widget(
                Paragraph::new(Span::styled("auto-refresh off", theme::key_hint())),
                countdown_area,
            );
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(" ")];
        let hints: &[(&str, &str)] = match self.active_screen {
            ScreenId::Dashboard => &[
                ("v", "view"),
                ("l", "layout"),
                ("r", "refresh"),
                ("s", "settings"),
                ("x", "dismiss"),
                ("?", "help"),
                ("q", "quit"),
            ],
            ScreenId::Settings => &[("Enter", "apply"), ("Esc", "back"), ("Ctrl+C", "quit")],
        };
        for (key, label) in hints {
            spans.push(Span::styled(*key, theme::key_hint_key()));
            spans.push(Span::styled(format!(" {label}  "), theme::key_hint()));
        }

        if let Some(hint) = self.layout_hint {
            spans.push(Span::styled(
                format!("│ {hint} layout suits this width  "),
                Style::default().fg(theme::ELECTRIC_YELLOW),
            ));
        }

        if let Some(at) = self.state.as_deref().and_then(|s| s.last_refresh) {
            let local = at.with_timezone(&chrono::Local);
            spans.push(Span::styled(
                format!("│ updated {}", local.format("%H:%M:%S")),
                theme::key_hint(),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 48u16.min(area.width.saturating_sub(4));
    let height = 15u16.min(area.height.saturating_sub(2));
    let help_area = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Keys ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let entry = |key: &'static str, label: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
            Span::styled(label, theme::key_hint()),
        ])
    };

    let lines = vec![
        Line::from(""),
        entry("v", "Switch servers / players"),
        entry("l", "Switch grid / list"),
        entry("r", "Refresh now"),
        entry("s", "Settings"),
        entry("x", "Dismiss latest notification"),
        entry("j/k ↑/↓", "Scroll cards"),
        entry("g", "Back to first card"),
        entry("?", "This help"),
        entry("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled("  Esc or ? to close", theme::key_hint())),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
