use rand::seq::SliceRandom;

use crate::commands::music::utils::{
    embedded_messages,
    music_manager::{MusicError, MusicManager},
};
use crate::{CommandResult, Context};

/// Shuffle the queued tracks
#[poise::command(slash_command, category = "Music")]
pub async fn shuffle(ctx: Context<'_>) -> CommandResult {
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

    let queue_ref = player.get_queue();
    let mut queued_tracks = queue_ref.get_queue().await?;

    if queued_tracks.len() < 2 {
        ctx.send(embedded_messages::queue_is_empty()).await?;
        return Ok(());
    }

    // Only the waiting tracks are shuffled; the current track keeps playing.
    queued_tracks.make_contiguous().shuffle(&mut rand::rng());
    let count = queued_tracks.len();
    queue_ref.replace(queued_tracks)?;

    ctx.send(embedded_messages::shuffled(count)).await?;

    Ok(())
}
