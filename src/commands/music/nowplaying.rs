use crate::commands::music::utils::{
    embedded_messages,
    music_manager::{MusicError, MusicManager},
};
use crate::{CommandResult, Context};

/// Show the currently playing track
#[poise::command(slash_command, category = "Music")]
pub async fn nowplaying(ctx: Context<'_>) -> CommandResult {
    let guild_id = ctx.guild_id().ok_or_else(|| {
        Box::new(MusicError::NotInGuild) as Box<dyn std::error::Error + Send + Sync>
    })?;

    let player = match MusicManager::get_player(&ctx.data().lavalink, guild_id) {
        Ok(player) => player,
        Err(err) => {
            ctx.send(embedded_messages::bot_not_in_voice_channel(err))
                .await?;
            return Ok(());
        }
    };

    let player_data = player.get_player().await?;

    match player_data.track {
        Some(track) => {
            ctx.send(embedded_messages::now_playing_status(
                &track,
                player_data.state.position,
                player_data.volume,
                player_data.paused,
            ))
            .await?;
        }
        None => {
            ctx.send(embedded_messages::no_track_playing()).await?;
        }
    }

    Ok(())
}
