use crate::commands::music::utils::{
    embedded_messages,
    music_manager::{MusicError, MusicManager},
};
use crate::{CommandResult, Context};

/// Skip the currently playing song
#[poise::command(slash_command, category = "Music")]
pub async fn skip(ctx: Context<'_>) -> CommandResult {
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

    // A track has to actually be loaded on the player; an empty player with
    // a non-empty queue means the node is already advancing.
    let now_playing = player.get_player().await?.track;

    match now_playing {
        Some(track) => {
            player.skip()?;
            ctx.send(embedded_messages::skipped(&track)).await?;
        }
        None => {
            ctx.send(embedded_messages::no_track_to_skip()).await?;
        }
    }

    Ok(())
}
