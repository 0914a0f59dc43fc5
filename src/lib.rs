//! Shade is a Discord bot combining Lavalink-backed music playback,
//! small message-component games, and general utility commands.

pub mod commands;
pub mod config;
pub mod events;
pub mod utils;

use lavalink_rs::client::LavalinkClient;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// Shared data accessible across all command invocations and event handlers.
pub struct Data {
    /// Client for the external Lavalink audio node.
    pub lavalink: LavalinkClient,
    /// Process configuration loaded from the environment at startup.
    pub config: config::Config,
    /// When this process came up, for uptime reporting.
    pub started_at: chrono::DateTime<chrono::Utc>,
}
