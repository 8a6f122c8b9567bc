// ── Render layer ──
//
// Pure functions from upstream records to typed view-models. Every call
// rebuilds the whole view; nothing is patched incrementally. Front-ends
// draw `Card`s without ever touching the raw records.

use std::collections::HashSet;

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, Utc};

use sentinel_api::{Player, Server};

/// A player counts as recently active when updated within this window.
pub const RECENT_ACTIVITY_WINDOW: TimeDelta = TimeDelta::minutes(5);

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

// ── View-models ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge {
    Free,
    Occupied,
    PlayerId(String),
}

impl Badge {
    pub fn label(&self) -> String {
        match self {
            Self::Free => "Free".into(),
            Self::Occupied => "Occupied".into(),
            Self::PlayerId(id) => format!("ID: {id}"),
        }
    }
}

/// One labelled line on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
}

impl InfoRow {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub badge: Badge,
    pub rows: Vec<InfoRow>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerStats {
    pub total: usize,
    pub free: usize,
    pub occupied: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServersView {
    pub stats: ServerStats,
    pub cards: Vec<Card>,
}

impl ServersView {
    pub fn placeholder(&self) -> Option<&'static str> {
        self.cards.is_empty().then_some("No servers found")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub total: usize,
    pub unique_servers: usize,
    pub recently_active: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayersView {
    pub stats: PlayerStats,
    pub cards: Vec<Card>,
}

impl PlayersView {
    pub fn placeholder(&self) -> Option<&'static str> {
        self.cards.is_empty().then_some("No players found")
    }
}

// ── Servers ──────────────────────────────────────────────────────────

pub fn server_stats(servers: &[Server]) -> ServerStats {
    let free = servers.iter().filter(|s| s.is_free()).count();
    ServerStats {
        total: servers.len(),
        free,
        occupied: servers.len() - free,
    }
}

pub fn render_servers(servers: &[Server]) -> ServersView {
    ServersView {
        stats: server_stats(servers),
        cards: servers.iter().map(server_card).collect(),
    }
}

fn server_card(server: &Server) -> Card {
    let mut rows = vec![
        InfoRow::new("Address", server.address()),
        InfoRow::new(
            "Players",
            format!("{}/{}", server.current_players, server.max_players),
        ),
    ];

    match server.coordinate_ranges() {
        Some(ranges) => {
            rows.push(InfoRow::new("X", range(ranges.x)));
            rows.push(InfoRow::new("Y", range(ranges.y)));
            rows.push(InfoRow::new("Z", range(ranges.z)));
        }
        None => rows.push(InfoRow::new("Coordinates", "Undefined")),
    }

    rows.push(InfoRow::new("Created", format_timestamp(&server.created_at)));
    rows.push(InfoRow::new("Updated", format_timestamp(&server.updated_at)));

    Card {
        title: server.name.clone(),
        badge: if server.is_free() {
            Badge::Free
        } else {
            Badge::Occupied
        },
        rows,
    }
}

fn range((start, end): (Option<f64>, Option<f64>)) -> String {
    format!("{} → {}", axis(start), axis(end))
}

fn axis(value: Option<f64>) -> String {
    value.map_or_else(|| "?".to_owned(), |v| v.to_string())
}

// ── Players ──────────────────────────────────────────────────────────

pub fn player_stats(players: &[Player], now: DateTime<Utc>) -> PlayerStats {
    let unique_servers = players
        .iter()
        .map(|p| &p.server_id)
        .collect::<HashSet<_>>()
        .len();
    let recently_active = players
        .iter()
        .filter(|p| is_recently_active(&p.updated_at, now))
        .count();

    PlayerStats {
        total: players.len(),
        unique_servers,
        recently_active,
    }
}

pub fn render_players(players: &[Player], now: DateTime<Utc>) -> PlayersView {
    PlayersView {
        stats: player_stats(players, now),
        cards: players.iter().map(player_card).collect(),
    }
}

fn player_card(player: &Player) -> Card {
    Card {
        title: player.name.clone(),
        badge: Badge::PlayerId(player.id.to_string()),
        rows: vec![
            InfoRow::new("Client ID", player.client_id.to_string()),
            InfoRow::new("Server", format!("Server {}", player.server_id)),
            InfoRow::new(
                "Position",
                format!("X: {}, Y: {}, Z: {}", player.x, player.y, player.z),
            ),
            InfoRow::new("Created", format_timestamp(&player.created_at)),
            InfoRow::new("Updated", format_timestamp(&player.updated_at)),
        ],
    }
}

/// Unparseable timestamps never count as recent.
fn is_recently_active(updated_at: &str, now: DateTime<Utc>) -> bool {
    parse_timestamp(updated_at).is_some_and(|t| now - t < RECENT_ACTIVITY_WINDOW)
}

// ── Timestamps ───────────────────────────────────────────────────────

/// Accepts RFC 3339 and the `YYYY-MM-DD HH:MM:SS` form (taken as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Long local form, or `"Invalid date"`.
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(
        || "Invalid date".to_owned(),
        |dt| dt.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
    )
}
