use tracing::info;

use crate::commands::music::utils::{
    embedded_messages,
    music_manager::{MusicError, MusicManager},
};
use crate::{CommandResult, Context};

/// Play a song from YouTube or a direct URL
#[poise::command(slash_command, category = "Music")]
pub async fn play(
    ctx: Context<'_>,
    #[description = "URL or search query"] query: String,
) -> CommandResult {
    info!("Received play command with query: {}", query);
    let guild_id = ctx.guild_id().ok_or_else(|| {
        Box::new(MusicError::NotInGuild) as Box<dyn std::error::Error + Send + Sync>
    })?;

    // Get the user's voice channel
    let user_id = ctx.author().id;
    let channel_id =
        match MusicManager::get_user_voice_channel(ctx.serenity_context(), guild_id, user_id) {
            Ok(channel_id) => channel_id,
            Err(err) => {
                ctx.send(embedded_messages::user_not_in_voice_channel(err))
                    .await?;
                return Ok(());
            }
        };

    // Defer the response since resolving the query on the audio node might take time
    ctx.defer().await?;

    let lavalink = &ctx.data().lavalink;

    // Join the voice channel if not already connected
    let player = match MusicManager::join_channel(
        ctx.serenity_context(),
        lavalink,
        guild_id,
        channel_id,
        ctx.channel_id(),
    )
    .await
    {
        Ok(player) => player,
        Err(err) => {
            ctx.send(embedded_messages::failed_to_join_voice_channel(err))
                .await?;
            return Ok(());
        }
    };

    match MusicManager::process_play_request(lavalink, &player, guild_id, ctx.author(), &query)
        .await
    {
        Ok((track, number_of_tracks, started)) => {
            let queue_length = player.get_queue().get_count().await.unwrap_or(0);
            ctx.send(embedded_messages::play_confirmation(
                &track,
                number_of_tracks,
                started,
                queue_length,
            ))
            .await?;
        }
        Err(err) => {
            ctx.send(embedded_messages::failed_to_process_audio_source(err))
                .await?;
        }
    }

    Ok(())
}
