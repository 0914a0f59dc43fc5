use crate::commands::music::utils::{
    embedded_messages,
    music_manager::{MusicError, MusicManager},
};
use crate::{CommandResult, Context};

/// Pause the current track
#[poise::command(slash_command, category = "Music")]
pub async fn pause(ctx: Context<'_>) -> CommandResult {
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
        Some(track) if player_data.paused => {
            ctx.send(embedded_messages::already_paused(&track)).await?;
        }
        Some(track) => {
            player.set_pause(true).await?;
            ctx.send(embedded_messages::paused(&track)).await?;
        }
        None => {
            ctx.send(embedded_messages::no_track_playing()).await?;
        }
    }

    Ok(())
}
