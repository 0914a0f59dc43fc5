use poise::CreateReply;

use crate::commands::music::utils::{
    embedded_messages,
    music_manager::{MusicError, MusicManager},
};
use crate::{CommandResult, Context};

/// View the current music queue
#[poise::command(slash_command, category = "Music")]
pub async fn queue(ctx: Context<'_>) -> CommandResult {
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
    let queued_tracks: Vec<_> = player.get_queue().get_queue().await?.into_iter().collect();

    let embed = embedded_messages::music_queue(
        player_data.track.as_ref(),
        player_data.state.position,
        &queued_tracks,
    );

    ctx.send(CreateReply::default().embed(embed)).await?;

    Ok(())
}
