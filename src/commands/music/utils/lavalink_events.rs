//! Event hooks for the Lavalink node connection.

use lavalink_rs::client::LavalinkClient;
use lavalink_rs::hook;
use lavalink_rs::model::events;
use poise::serenity_prelude as serenity;
use serenity::all::{ChannelId, CreateMessage, Http};
use std::sync::Arc;
use tracing::{error, info};

use super::{button_controls, embedded_messages};

/// Per-player context data: where track announcements for the guild go.
pub struct PlayerData {
    pub text_channel: ChannelId,
    pub http: Arc<Http>,
}

#[hook]
pub async fn ready_event(client: LavalinkClient, session_id: String, event: &events::Ready) {
    // A fresh (non-resumed) session has no server-side players left; drop any
    // stale local contexts so guild state starts clean.
    if !event.resumed {
        client.delete_all_player_contexts().await.ok();
    }

    info!(
        "Lavalink node ready, session {} (resumed: {})",
        session_id, event.resumed
    );
}

#[hook]
pub async fn track_start(client: LavalinkClient, _session_id: String, event: &events::TrackStart) {
    info!(
        "Track started in guild {}: {}",
        event.guild_id.0, event.track.info.title
    );

    let Some(player) = client.get_player_context(event.guild_id) else {
        return;
    };

    let data = match player.data::<PlayerData>() {
        Ok(data) => data,
        Err(e) => {
            error!(
                "Missing player data for guild {}: {}",
                event.guild_id.0, e
            );
            return;
        }
    };

    let message = CreateMessage::new()
        .embed(embedded_messages::now_playing(&event.track))
        .components(button_controls::create_music_control_buttons());

    if let Err(e) = data.text_channel.send_message(&data.http, message).await {
        error!("Failed to send now playing message: {}", e);
    }
}
