// sentinel-api: Async Rust client for the Star Deception SDO status API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::SdoClient;
pub use error::Error;
pub use models::{CoordinateRanges, Ident, Player, Server};
pub use transport::TransportConfig;
