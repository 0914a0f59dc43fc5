//! This module aggregates all the command modules for the bot.

/// Interactive games played through message components (e.g., tic-tac-toe).
pub mod games;
/// General purpose commands (e.g., ping, server and user info).
pub mod general;
/// Commands related to music playback through the Lavalink node.
pub mod music;
