use lavalink_rs::client::LavalinkClient;
use lavalink_rs::model::track::{TrackData, TrackLoadData};
use lavalink_rs::player_context::{PlayerContext, TrackInQueue};
use lavalink_rs::prelude::SearchEngines;
use poise::serenity_prelude as serenity;
use serenity::client::Context;
use serenity::model::id::{ChannelId, GuildId};
use songbird::Songbird;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use super::lavalink_events::PlayerData;

/// Errors that can occur during music operations
#[derive(Error, Debug)]
pub enum MusicError {
    #[error("Not in a guild")]
    NotInGuild,

    #[error("Failed to join voice channel: {0}")]
    JoinError(String),

    #[error("Not connected to a voice channel")]
    NotConnected,

    #[error("Failed to get voice manager")]
    NoVoiceManager,

    #[error("User is not in a voice channel")]
    UserNotInVoiceChannel,

    #[error("Audio node error: {0}")]
    AudioNodeError(String),

    #[error("No results found for: {0}")]
    NoResults(String),
}

/// Result type for music operations
pub type MusicResult<T> = Result<T, MusicError>;

/// Thin facade over Songbird (voice gateway) and the Lavalink client
/// (playback). Songbird owns the Discord voice connection; every play,
/// pause, and queue mutation is proxied to the audio node.
pub struct MusicManager;

impl MusicManager {
    /// Get the Songbird voice client from the context
    pub async fn get_songbird(ctx: &Context) -> MusicResult<Arc<Songbird>> {
        songbird::get(ctx).await.ok_or(MusicError::NoVoiceManager)
    }

    /// Get the Lavalink player for this guild, if one exists.
    pub fn get_player(lavalink: &LavalinkClient, guild_id: GuildId) -> MusicResult<PlayerContext> {
        lavalink
            .get_player_context(guild_id)
            .ok_or(MusicError::NotConnected)
    }

    /// Get the voice channel ID that the user is currently in
    pub fn get_user_voice_channel(
        ctx: &Context,
        guild_id: GuildId,
        user_id: serenity::UserId,
    ) -> MusicResult<ChannelId> {
        let guild = ctx.cache.guild(guild_id).ok_or(MusicError::NotInGuild)?;

        let voice_state = guild
            .voice_states
            .get(&user_id)
            .ok_or(MusicError::UserNotInVoiceChannel)?;

        voice_state
            .channel_id
            .ok_or(MusicError::UserNotInVoiceChannel)
    }

    /// Join a voice channel and create a Lavalink player for the guild.
    /// Returns the existing player when already connected. Track-start
    /// announcements go to `text_channel`.
    pub async fn join_channel(
        ctx: &Context,
        lavalink: &LavalinkClient,
        guild_id: GuildId,
        channel_id: ChannelId,
        text_channel: ChannelId,
    ) -> MusicResult<PlayerContext> {
        if let Some(player) = lavalink.get_player_context(guild_id) {
            return Ok(player);
        }

        let songbird = Self::get_songbird(ctx).await?;

        // Songbird only negotiates the voice gateway; the connection info is
        // handed to the audio node, which does the actual streaming.
        let (connection_info, _call) = songbird
            .join_gateway(guild_id, channel_id)
            .await
            .map_err(|e| MusicError::JoinError(e.to_string()))?;

        let player = lavalink
            .create_player_context_with_data::<PlayerData>(
                guild_id,
                connection_info,
                Arc::new(PlayerData {
                    text_channel,
                    http: ctx.http.clone(),
                }),
            )
            .await
            .map_err(|e| MusicError::AudioNodeError(e.to_string()))?;

        info!("Joined voice channel {} in guild {}", channel_id, guild_id);

        Ok(player)
    }

    /// Leave a voice channel, destroying the guild's Lavalink player.
    pub async fn leave_channel(
        ctx: &Context,
        lavalink: &LavalinkClient,
        guild_id: GuildId,
    ) -> MusicResult<()> {
        lavalink
            .delete_player(guild_id)
            .await
            .map_err(|e| MusicError::AudioNodeError(e.to_string()))?;

        let songbird = Self::get_songbird(ctx).await?;

        if songbird.get(guild_id).is_some() {
            songbird
                .remove(guild_id)
                .await
                .map_err(|_| MusicError::JoinError("Failed to leave voice channel".to_string()))?;
        }

        Ok(())
    }

    /// Performs a basic check if the input string can be parsed as an http(s) URL.
    pub fn is_url(input: &str) -> bool {
        Url::parse(input)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
    }

    /// Processes the request to play or queue a track/playlist.
    /// Resolves the query on the audio node, tags each track with its
    /// requester, appends to the player queue, and starts playback if the
    /// player is idle.
    ///
    /// Returns the first resolved track, the number of tracks queued, and
    /// whether playback was started by this request.
    pub async fn process_play_request(
        lavalink: &LavalinkClient,
        player: &PlayerContext,
        guild_id: GuildId,
        requester: &serenity::User,
        input: &str,
    ) -> MusicResult<(TrackData, usize, bool)> {
        let query = if Self::is_url(input) {
            input.to_string()
        } else {
            SearchEngines::YouTube
                .to_query(input)
                .map_err(|e| MusicError::AudioNodeError(e.to_string()))?
        };

        debug!("Loading tracks for query: {}", query);

        let loaded = lavalink
            .load_tracks(guild_id, &query)
            .await
            .map_err(|e| MusicError::AudioNodeError(e.to_string()))?;

        let mut tracks: Vec<TrackInQueue> = match loaded.data {
            Some(TrackLoadData::Track(track)) => vec![track.into()],
            // Searches return a result list; queue only the top hit.
            Some(TrackLoadData::Search(results)) => {
                results.into_iter().take(1).map(Into::into).collect()
            }
            Some(TrackLoadData::Playlist(playlist)) => {
                playlist.tracks.into_iter().map(Into::into).collect()
            }
            Some(TrackLoadData::Error(err)) => {
                return Err(MusicError::AudioNodeError(err.message));
            }
            None => Vec::new(),
        };

        if tracks.is_empty() {
            return Err(MusicError::NoResults(input.to_string()));
        }

        for item in &mut tracks {
            item.track.user_data = Some(serde_json::json!({
                "requester": requester.name,
            }));
        }

        let first_track = tracks[0].track.clone();
        let number_of_tracks = tracks.len();

        let queue = player.get_queue();
        queue
            .append(tracks.into())
            .map_err(|e| MusicError::AudioNodeError(e.to_string()))?;

        // Kick the player when nothing is loaded; otherwise the new tracks
        // just wait their turn.
        let mut started = false;
        if let Ok(player_data) = player.get_player().await {
            if player_data.track.is_none() && queue.get_track(0).await.is_ok_and(|t| t.is_some()) {
                player
                    .skip()
                    .map_err(|e| MusicError::AudioNodeError(e.to_string()))?;
                started = true;
            }
        }

        info!(
            "Queued {} track(s) for guild {} (started: {})",
            number_of_tracks, guild_id, started
        );

        Ok((first_track, number_of_tracks, started))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://youtube.com/watch?v=abc123", true; "https url")]
    #[test_case("http://example.com/track.mp3", true; "http url")]
    #[test_case("never gonna give you up", false; "search query")]
    #[test_case("ftp://example.com/file", false; "non http scheme")]
    #[test_case("", false; "empty input")]
    fn is_url_only_accepts_http_schemes(input: &str, expected: bool) {
        assert_eq!(MusicManager::is_url(input), expected);
    }
}
