//! Handlers for the music control buttons attached to track announcements.

use ::serenity::all::{ComponentInteraction, CreateInteractionResponseFollowup};
use poise::serenity_prelude::{self as serenity, Context};
use tracing::{error, warn};

use super::music_manager::MusicManager;
use crate::Data;

type ButtonInteractionResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Handle a button interaction
pub async fn handle_interaction(
    ctx: &Context,
    interaction: &mut ComponentInteraction,
    data: &Data,
) -> ButtonInteractionResult {
    let guild_id = interaction.guild_id.ok_or("Not in a guild")?;

    // Defer the interaction response immediately
    interaction.defer(ctx).await?;

    let Some(player) = data.lavalink.get_player_context(guild_id) else {
        return error_followup(ctx, interaction, "I'm not in a voice channel.").await;
    };

    match interaction.data.custom_id.as_str() {
        "music_play_pause" => {
            let player_data = player.get_player().await?;
            match player_data.track {
                Some(track) => {
                    let pausing = !player_data.paused;
                    player.set_pause(pausing).await?;
                    let verb = if pausing { "Paused" } else { "Resumed" };
                    confirm_followup(ctx, interaction, &format!("{} **{}**", verb, track.info.title))
                        .await?;
                }
                None => {
                    error_followup(ctx, interaction, "No track is currently playing.").await?;
                }
            }
        }
        "music_skip" => {
            let now_playing = player.get_player().await?.track;
            match now_playing {
                Some(track) => {
                    player.skip()?;
                    confirm_followup(
                        ctx,
                        interaction,
                        &format!("Skipped **{}**", track.info.title),
                    )
                    .await?;
                }
                None => {
                    error_followup(ctx, interaction, "No track is currently playing to skip.")
                        .await?;
                }
            }
        }
        "music_stop" => {
            player.get_queue().clear()?;
            player.stop_now().await?;

            if let Err(e) = MusicManager::leave_channel(ctx, &data.lavalink, guild_id).await {
                warn!("Failed to leave voice channel via button stop: {}", e);
            }

            confirm_followup(ctx, interaction, "Stopped playback and cleared the queue.").await?;
        }
        _ => {
            error!("Unknown button ID: {}", interaction.data.custom_id);
            error_followup(ctx, interaction, "Unknown button action.").await?;
        }
    }

    Ok(())
}

/// Send an ephemeral confirmation followup message
async fn confirm_followup(
    ctx: &Context,
    interaction: &ComponentInteraction,
    content: &str,
) -> ButtonInteractionResult {
    interaction
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new()
                .content(content.to_string())
                .ephemeral(true),
        )
        .await?;
    Ok(())
}

/// Send an ephemeral error followup message for failed interactions
async fn error_followup(
    ctx: &Context,
    interaction: &ComponentInteraction,
    content: &str,
) -> ButtonInteractionResult {
    interaction
        .create_followup(
            &ctx.http,
            serenity::CreateInteractionResponseFollowup::new()
                .content(content)
                .ephemeral(true),
        )
        .await?;
    Ok(())
}
