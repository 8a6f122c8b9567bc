//! Terminal event pump.
//!
//! A background task merges crossterm input with two clocks: a slow tick
//! that drives the spinner and notification expiry, and a fast render tick.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal resized to this many columns.
    Resize(u16),
    Tick,
    Render,
}

/// Rates for the synthetic events.
#[derive(Debug, Clone, Copy)]
pub struct EventRates {
    pub tick: Duration,
    pub render: Duration,
}

impl Default for EventRates {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(250),
            render: Duration::from_millis(50),
        }
    }
}

pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    pub fn spawn(rates: EventRates) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(pump(tx, rates, cancel.clone()));
        Self { rx, cancel }
    }

    /// Next event, or `None` once the pump has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn pump(tx: mpsc::UnboundedSender<Event>, rates: EventRates, cancel: CancellationToken) {
    let mut input = EventStream::new();
    let mut tick = tokio::time::interval(rates.tick);
    let mut render = tokio::time::interval(rates.render);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    render.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => break,
            _ = tick.tick() => Event::Tick,
            _ = render.tick() => Event::Render,
            Some(Ok(raw)) = input.next() => match translate(raw) {
                Some(event) => event,
                None => continue,
            },
        };

        if tx.send(event).is_err() {
            break;
        }
    }
}

/// Keep key presses and resizes; drop releases, repeats, mouse and focus.
fn translate(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(cols, _) => Some(Event::Resize(cols)),
        _ => None,
    }
}
