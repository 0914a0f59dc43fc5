use crate::commands::music::utils::{
    embedded_messages,
    music_manager::{MusicError, MusicManager},
};
use crate::{CommandResult, Context};

/// Stop the music, clear the queue, and leave the voice channel
#[poise::command(slash_command, category = "Music")]
pub async fn stop(ctx: Context<'_>) -> CommandResult {
    let guild_id = ctx.guild_id().ok_or_else(|| {
        Box::new(MusicError::NotInGuild) as Box<dyn std::error::Error + Send + Sync>
    })?;

    let lavalink = &ctx.data().lavalink;

    let player = match MusicManager::get_player(lavalink, guild_id) {
        Ok(player) => player,
        Err(err) => {
            ctx.send(embedded_messages::bot_not_in_voice_channel(err))
                .await?;
            return Ok(());
        }
    };

    // Clear the queue first so the node doesn't advance to the next track
    player.get_queue().clear()?;
    player.stop_now().await?;

    // Attempt to leave the voice channel
    if let Err(e) = MusicManager::leave_channel(ctx.serenity_context(), lavalink, guild_id).await {
        // Log the error but continue, as the main goal (stopping) is achieved
        tracing::warn!("Failed to leave voice channel during stop: {}", e);
    }

    ctx.send(embedded_messages::stopped()).await?;

    Ok(())
}
