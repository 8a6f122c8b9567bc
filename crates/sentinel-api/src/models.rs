// SDO API response types
//
// Models for the `/sdo/servers` and `/sdo/players` endpoints. Both return a
// bare JSON array. Timestamps are kept as the raw strings the upstream sends;
// `sentinel-core` parses them when it builds view-models, so a single odd
// timestamp never rejects a whole refresh.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// An identifier the upstream may send as either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ident {
    Int(i64),
    Text(String),
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl Default for Ident {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

// ── Server ───────────────────────────────────────────────────────────

/// One game server from `GET {base}/sdo/servers`.
///
/// `is_free` is an integer flag on the wire (1 = free, 0 = occupied); a
/// boolean is accepted too. Scalars sent as `null` take their default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Server {
    #[serde(default)]
    pub id: Option<Ident>,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub ip: String,
    #[serde(default, deserialize_with = "nullable")]
    pub port: u16,
    #[serde(default, deserialize_with = "flag")]
    pub is_free: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub current_players: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub max_players: u32,
    #[serde(default)]
    pub coordinate_x_start: Option<f64>,
    #[serde(default)]
    pub coordinate_x_end: Option<f64>,
    #[serde(default)]
    pub coordinate_y_start: Option<f64>,
    #[serde(default)]
    pub coordinate_y_end: Option<f64>,
    #[serde(default)]
    pub coordinate_z_start: Option<f64>,
    #[serde(default)]
    pub coordinate_z_end: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub created_at: String,
    #[serde(default, deserialize_with = "nullable")]
    pub updated_at: String,
}

impl Server {
    /// Whether the server is flagged free.
    pub fn is_free(&self) -> bool {
        self.is_free == 1
    }

    /// `ip:port` as shown on a server card.
    pub fn address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }

    /// Coordinate ranges, present only when the upstream assigned a region.
    pub fn coordinate_ranges(&self) -> Option<CoordinateRanges> {
        self.coordinate_x_start?;
        Some(CoordinateRanges {
            x: (self.coordinate_x_start, self.coordinate_x_end),
            y: (self.coordinate_y_start, self.coordinate_y_end),
            z: (self.coordinate_z_start, self.coordinate_z_end),
        })
    }
}

/// `(start, end)` per axis. Ends may still be null upstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateRanges {
    pub x: (Option<f64>, Option<f64>),
    pub y: (Option<f64>, Option<f64>),
    pub z: (Option<f64>, Option<f64>),
}

// ── Player ───────────────────────────────────────────────────────────

/// One connected player from `GET {base}/sdo/players`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default, deserialize_with = "nullable")]
    pub id: Ident,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub client_id: Ident,
    #[serde(default, deserialize_with = "nullable")]
    pub server_id: Ident,
    #[serde(default, deserialize_with = "nullable")]
    pub x: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub y: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub z: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub created_at: String,
    #[serde(default, deserialize_with = "nullable")]
    pub updated_at: String,
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Treat an explicit `null` like a missing key.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn flag<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Int(i64),
        Bool(bool),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Int(n)) => n,
        Some(Flag::Bool(b)) => i64::from(b),
        None => 0,
    })
}
