//! Seconds-until-refresh gauge shown in the header.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Gauge, Widget},
};

use sentinel_core::Countdown;

use crate::theme;

/// Draws a [`Countdown`] as a gauge that fills as the next refresh nears.
pub struct CountdownGauge<'a> {
    countdown: &'a Countdown,
}

impl<'a> CountdownGauge<'a> {
    pub fn new(countdown: &'a Countdown) -> Self {
        Self { countdown }
    }

    pub fn label(&self) -> String {
        format!("Next refresh in {}s", self.countdown.remaining())
    }
}

impl Widget for CountdownGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = self.label();
        Gauge::default()
            .ratio(self.countdown.ratio().clamp(0.0, 1.0))
            .label(label)
            .gauge_style(Style::default().fg(theme::ELECTRIC_PURPLE).bg(theme::BG_DARK))
            .use_unicode(true)
            .render(area, buf);
    }
}
