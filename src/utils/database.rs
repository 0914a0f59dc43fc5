//! Provides functions for interacting with the application's SQLite database.
//! Handles initialization, table creation, and per-user win/loss/draw records
//! for the interactive games.

use rusqlite::{Connection, Result as SqlResult, params};
use serenity::model::id::UserId;
use std::sync::Once;

/// The filename for the SQLite database.
pub const APPDATA_DB: &str = "application_data.db";
/// Ensures that database table creation logic runs only once.
static DB_INIT: Once = Once::new();

/// How a finished game ended for one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
    Draw,
}

/// A user's aggregate record for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub game: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

/// Initializes the database by ensuring the necessary tables are created.
/// Uses `std::sync::Once` to guarantee table creation happens only once per
/// application run.
pub fn init_db() -> SqlResult<()> {
    DB_INIT.call_once(|| {
        if let Err(e) = create_tables() {
            eprintln!("Failed to create database tables: {}", e);
        }
    });
    Ok(())
}

/// Creates the `game_records` table if it doesn't exist.
fn create_tables() -> SqlResult<()> {
    let conn = Connection::open(APPDATA_DB)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS game_records (
            user_id TEXT NOT NULL,
            game TEXT NOT NULL,
            wins INTEGER NOT NULL DEFAULT 0,
            losses INTEGER NOT NULL DEFAULT 0,
            draws INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (user_id, game)
        )",
        [],
    )?;

    Ok(())
}

/// Records the outcome of a finished game for a user, creating the row on
/// first play.
pub fn record_outcome(user_id: UserId, game: &str, outcome: GameOutcome) -> SqlResult<()> {
    let conn = Connection::open(APPDATA_DB)?;

    let (wins, losses, draws) = match outcome {
        GameOutcome::Win => (1, 0, 0),
        GameOutcome::Loss => (0, 1, 0),
        GameOutcome::Draw => (0, 0, 1),
    };

    conn.execute(
        "INSERT INTO game_records (user_id, game, wins, losses, draws)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(user_id, game) DO UPDATE SET
             wins = wins + ?3,
             losses = losses + ?4,
             draws = draws + ?5",
        params![user_id.to_string(), game, wins, losses, draws],
    )?;

    Ok(())
}

/// Retrieves all game records for a user, ordered by game name.
/// Returns an empty list when the user has never finished a game or the
/// database is unavailable.
pub fn get_records(user_id: UserId) -> Vec<GameRecord> {
    let Ok(conn) = Connection::open(APPDATA_DB) else {
        return Vec::new();
    };

    let Ok(mut statement) = conn.prepare(
        "SELECT game, wins, losses, draws FROM game_records
         WHERE user_id = ?1 ORDER BY game",
    ) else {
        return Vec::new();
    };

    let rows = statement.query_map(params![user_id.to_string()], |row| {
        Ok(GameRecord {
            game: row.get(0)?,
            wins: row.get(1)?,
            losses: row.get(2)?,
            draws: row.get(3)?,
        })
    });

    match rows {
        Ok(records) => records.filter_map(Result::ok).collect(),
        Err(_) => Vec::new(),
    }
}
