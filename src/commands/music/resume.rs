use crate::commands::music::utils::{
    embedded_messages,
    music_manager::{MusicError, MusicManager},
};
use crate::{CommandResult, Context};

/// Resume the paused track
#[poise::command(slash_command, category = "Music")]
pub async fn resume(ctx: Context<'_>) -> CommandResult {
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
            player.set_pause(false).await?;
            ctx.send(embedded_messages::resumed(&track)).await?;
        }
        Some(track) => {
            ctx.send(embedded_messages::not_paused(&track)).await?;
        }
        None => {
            ctx.send(embedded_messages::no_track_playing()).await?;
        }
    }

    Ok(())
}
