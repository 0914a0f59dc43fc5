//! Environment-backed configuration for the bot process.
//!
//! Values are read from the process environment (a `.env` file is loaded by
//! `main` before this runs). Several variables accept legacy alias names;
//! the first non-empty candidate wins.

use std::env;
use thiserror::Error;

/// Errors produced while loading configuration at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is required but was not found in the environment or .env file")]
    MissingVar(&'static str),

    #[error("{0} must be a numeric ID, got '{1}'")]
    InvalidId(&'static str, String),
}

/// Process configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token.
    pub token: String,
    /// Application (client) ID registered with Discord.
    pub app_id: u64,
    /// User ID that receives startup notifications.
    pub owner_id: u64,
    /// Guild used for command registration when not syncing globally.
    pub guild_id: Option<u64>,
    /// Register slash commands globally instead of per guild.
    pub sync_global: bool,
    /// Connection details for the Lavalink audio node.
    pub lavalink: LavalinkConfig,
}

/// Connection details for the external Lavalink audio node.
#[derive(Debug, Clone)]
pub struct LavalinkConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
}

impl LavalinkConfig {
    /// The `host:port` address lavalink-rs expects for a node.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&'static str]| -> Option<String> {
            keys.iter().find_map(|key| {
                lookup(key)
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
            })
        };

        let token = first(&["DISCORD_TOKEN", "TOKEN", "BOT_TOKEN"])
            .ok_or(ConfigError::MissingVar("DISCORD_TOKEN"))?;

        let app_id = parse_id("APP_ID", first(&["APP_ID", "APPLICATION_ID", "CLIENT_ID"]))?;
        let owner_id = parse_id("OWNER_ID", first(&["OWNER_ID", "OWNER", "BOT_OWNER"]))?;

        let guild_id = match first(&["GUILD_ID", "SERVER_ID", "GUILD"]) {
            Some(raw) => Some(
                raw.parse()
                    .map_err(|_| ConfigError::InvalidId("GUILD_ID", raw))?,
            ),
            None => None,
        };

        let sync_global = first(&["SYNC_GLOBAL"])
            .map(|value| matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        let lavalink = LavalinkConfig {
            host: first(&["LAVALINK_HOST"]).unwrap_or_else(|| "localhost".to_string()),
            port: first(&["LAVALINK_PORT"])
                .and_then(|value| value.parse().ok())
                .unwrap_or(2333),
            password: first(&["LAVALINK_PASSWORD"])
                .unwrap_or_else(|| "youshallnotpass".to_string()),
        };

        Ok(Config {
            token,
            app_id,
            owner_id,
            guild_id,
            sync_global,
            lavalink,
        })
    }
}

fn parse_id(name: &'static str, value: Option<String>) -> Result<u64, ConfigError> {
    let raw = value.ok_or(ConfigError::MissingVar(name))?;
    raw.parse().map_err(|_| ConfigError::InvalidId(name, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars = source(pairs);
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("DISCORD_TOKEN", "token-value"),
        ("APP_ID", "123"),
        ("OWNER_ID", "456"),
    ];

    #[test]
    fn loads_required_values_with_defaults() {
        let config = load(REQUIRED).unwrap();

        assert_eq!(config.token, "token-value");
        assert_eq!(config.app_id, 123);
        assert_eq!(config.owner_id, 456);
        assert_eq!(config.guild_id, None);
        assert!(!config.sync_global);
        assert_eq!(config.lavalink.host, "localhost");
        assert_eq!(config.lavalink.port, 2333);
        assert_eq!(config.lavalink.password, "youshallnotpass");
        assert_eq!(config.lavalink.address(), "localhost:2333");
    }

    #[test]
    fn token_aliases_fall_back_in_order() {
        let mut pairs = REQUIRED.to_vec();
        pairs[0] = ("BOT_TOKEN", "alias-token");
        let config = load(&pairs).unwrap();
        assert_eq!(config.token, "alias-token");
    }

    #[test]
    fn empty_values_are_treated_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("GUILD_ID", "   "));
        let config = load(&pairs).unwrap();
        assert_eq!(config.guild_id, None);
    }

    #[test]
    fn missing_token_is_an_error() {
        let result = load(&[("APP_ID", "123"), ("OWNER_ID", "456")]);
        assert_matches!(result, Err(ConfigError::MissingVar("DISCORD_TOKEN")));
    }

    #[test]
    fn non_numeric_app_id_is_an_error() {
        let result = load(&[
            ("DISCORD_TOKEN", "t"),
            ("APP_ID", "not-a-number"),
            ("OWNER_ID", "456"),
        ]);
        assert_matches!(result, Err(ConfigError::InvalidId("APP_ID", _)));
    }

    #[test]
    fn non_numeric_guild_id_is_an_error() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("GUILD_ID", "abc"));
        assert_matches!(load(&pairs), Err(ConfigError::InvalidId("GUILD_ID", _)));
    }

    #[test_case::test_case("true", true; "lowercase true")]
    #[test_case::test_case("1", true; "numeric one")]
    #[test_case::test_case("YES", true; "uppercase yes")]
    #[test_case::test_case("false", false; "explicit false")]
    #[test_case::test_case("0", false; "numeric zero")]
    fn sync_global_parses_boolean_spellings(raw: &str, expected: bool) {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("SYNC_GLOBAL", raw));
        assert_eq!(load(&pairs).unwrap().sync_global, expected);
    }

    #[test]
    fn invalid_lavalink_port_falls_back_to_default() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("LAVALINK_PORT", "not-a-port"));
        assert_eq!(load(&pairs).unwrap().lavalink.port, 2333);
    }

    #[test]
    fn lavalink_overrides_are_respected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("LAVALINK_HOST", "audio.internal"),
            ("LAVALINK_PORT", "8443"),
            ("LAVALINK_PASSWORD", "hunter2"),
        ]);
        let config = load(&pairs).unwrap();
        assert_eq!(config.lavalink.address(), "audio.internal:8443");
        assert_eq!(config.lavalink.password, "hunter2");
    }
}
