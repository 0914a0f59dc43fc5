//! Central collection of embeds and replies sent by the music commands.

use ::serenity::all::CreateEmbed;
use lavalink_rs::model::track::TrackData;
use lavalink_rs::player_context::TrackInQueue;
use poise::CreateReply;

use super::music_manager::MusicError;
use crate::commands::music::format_millis;

/// Create a progress bar for the current track
fn format_progress_bar(position_ms: u64, total_ms: u64) -> String {
    const BAR_LENGTH: usize = 15;
    let progress = if total_ms == 0 {
        0.0
    } else {
        (position_ms as f64 / total_ms as f64).clamp(0.0, 1.0)
    };

    let filled = (progress * BAR_LENGTH as f64).round() as usize;
    let empty = BAR_LENGTH - filled;

    format!("▬{}🔘{}▬", "▬".repeat(filled), "▬".repeat(empty))
}

/// Markdown link for a track, falling back to a bare title.
fn track_line(track: &TrackData) -> String {
    match &track.info.uri {
        Some(uri) => format!("[{}]({})", track.info.title, uri),
        None => track.info.title.clone(),
    }
}

/// The requester name stored alongside the track, if any.
fn requester_of(track: &TrackData) -> Option<String> {
    track
        .user_data
        .as_ref()
        .and_then(|data| data["requester"].as_str())
        .map(|name| name.to_string())
}

/// Create an embed for when a song starts playing
pub fn now_playing(track: &TrackData) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title("🎵 Now Playing")
        .description(format!(
            "{}\nby {}",
            track_line(track),
            track.info.author
        ))
        .field("Duration", format!("`{}`", format_millis(track.info.length)), true)
        .color(0x00ff00);

    if let Some(requester) = requester_of(track) {
        embed = embed.field("Requested by", requester, true);
    }

    if let Some(artwork) = &track.info.artwork_url {
        embed = embed.thumbnail(artwork.clone());
    }

    embed
}

/// Reply confirming a successful play request. Distinguishes a track that
/// started immediately, a track queued behind others, and a playlist.
pub fn play_confirmation(
    track: &TrackData,
    number_of_tracks: usize,
    started: bool,
    queue_length: usize,
) -> CreateReply {
    let mut embed = if number_of_tracks > 1 {
        CreateEmbed::new()
            .title("🎵 Added Playlist to Queue")
            .description(format!("Queued **{}** tracks", number_of_tracks))
            .field("First Track", track_line(track), false)
            .color(0x00ff00)
    } else if started {
        CreateEmbed::new()
            .title("🎵 Now Playing")
            .description(track_line(track))
            .field("Duration", format!("`{}`", format_millis(track.info.length)), true)
            .color(0x00ff00)
    } else {
        CreateEmbed::new()
            .title("🎵 Added to Queue")
            .description(track_line(track))
            .field("Duration", format!("`{}`", format_millis(track.info.length)), true)
            .field("Position", format!("`#{}`", queue_length), true)
            .color(0x00ff00)
    };

    if let Some(artwork) = &track.info.artwork_url {
        embed = embed.thumbnail(artwork.clone());
    }

    CreateReply::default().embed(embed)
}

/// Create an embed for the music queue
pub fn music_queue(
    current_track: Option<&TrackData>,
    position_ms: u64,
    queue: &[TrackInQueue],
) -> CreateEmbed {
    let mut description = String::new();

    if let Some(track) = current_track {
        description.push_str("**🎵 Now Playing**\n");
        description.push_str(&format!("**{}**\n", track_line(track)));

        let progress = format_progress_bar(position_ms, track.info.length);
        description.push_str(&format!(
            "{} `{}/{}`\n",
            progress,
            format_millis(position_ms),
            format_millis(track.info.length)
        ));

        description.push('\n');
    } else {
        description.push_str("**🔇 Nothing playing**\n\n");
    }

    if queue.is_empty() {
        description.push_str("**📭 Queue is empty**");
    } else {
        description.push_str(&format!("**📋 Queue - {} tracks**\n", queue.len()));
        for (index, item) in queue.iter().take(10).enumerate() {
            // Track number emoji (1-10) or default bullet point
            let number = if index < 10 {
                format!("{}\u{FE0F}\u{20E3}", index + 1)
            } else {
                "•".to_string()
            };

            description.push_str(&format!(
                "{} {} `{}`\n",
                number,
                track_line(&item.track),
                format_millis(item.track.info.length)
            ));
        }

        if queue.len() > 10 {
            description.push_str(&format!("…and {} more\n", queue.len() - 10));
        }

        let total_ms: u64 = queue.iter().map(|item| item.track.info.length).sum();
        if total_ms > 0 {
            description.push_str(&format!(
                "\n**⏱️ Total Duration:** `{}`",
                format_millis(total_ms)
            ));
        }
    }

    CreateEmbed::new()
        .title("🎵 Music Queue")
        .description(description)
        .color(0x00ff00)
}

/// Create an embed for the currently playing track with progress and state.
pub fn now_playing_status(
    track: &TrackData,
    position_ms: u64,
    volume: u16,
    paused: bool,
) -> CreateReply {
    let progress = format_progress_bar(position_ms, track.info.length);

    let mut embed = CreateEmbed::new()
        .title(if paused { "⏸️ Now Playing (Paused)" } else { "🎵 Now Playing" })
        .description(format!(
            "**{}**\nby {}\n{} `{}/{}`",
            track_line(track),
            track.info.author,
            progress,
            format_millis(position_ms),
            format_millis(track.info.length)
        ))
        .field("Volume", format!("`{}%`", volume), true)
        .color(0x00ff00);

    if let Some(requester) = requester_of(track) {
        embed = embed.field("Requested by", requester, true);
    }

    if let Some(artwork) = &track.info.artwork_url {
        embed = embed.thumbnail(artwork.clone());
    }

    CreateReply::default().embed(embed)
}

/// Create an embed for when the bot is not connected to a voice channel
pub fn bot_not_in_voice_channel(err: MusicError) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("❌ Error")
            .description(format!("Not connected to a voice channel: {}", err))
            .color(0xff0000),
    )
}

/// Create an embed for when a user is not connected to a voice channel
pub fn user_not_in_voice_channel(err: MusicError) -> CreateReply {
    CreateReply::default()
        .embed(
            CreateEmbed::new()
                .title("❌ Error")
                .description(format!("You need to be in a voice channel: {}", err))
                .color(0xff0000),
        )
        .ephemeral(true)
}

/// Create an embed for when the bot fails to join a voice channel
pub fn failed_to_join_voice_channel(err: MusicError) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("❌ Error")
            .description(format!("Failed to join voice channel: {}", err))
            .color(0xff0000),
    )
}

/// Create an embed for when the bot fails to process an audio source
pub fn failed_to_process_audio_source(err: MusicError) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("❌ Error")
            .description(format!("Failed to process audio source: {}", err))
            .color(0xff0000),
    )
}

/// Create an embed for when a track is paused
pub fn paused(track: &TrackData) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("⏸️ Paused")
            .description(format!("Paused {}", track_line(track)))
            .color(0x00ff00),
    )
}

/// Create an embed for when a track is resumed
pub fn resumed(track: &TrackData) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("▶️ Resumed")
            .description(format!("Resumed {}", track_line(track)))
            .color(0x00ff00),
    )
}

/// Create an embed for when the track is already paused
pub fn already_paused(track: &TrackData) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("❌ Error")
            .description(format!("{} is already paused", track_line(track)))
            .color(0xff0000),
    )
}

/// Create an embed for when the track is not paused
pub fn not_paused(track: &TrackData) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("❌ Error")
            .description(format!("{} is not paused", track_line(track)))
            .color(0xff0000),
    )
}

/// Create an embed for when no track is playing
pub fn no_track_playing() -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("❌ Error")
            .description("No track is currently playing")
            .color(0xff0000),
    )
}

/// Create an embed for when a track is skipped
pub fn skipped(track: &TrackData) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("⏭️ Skipped")
            .description(format!("Skipped {}", track_line(track))),
    )
}

/// Create an embed for when there is no track to skip
pub fn no_track_to_skip() -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("❌ Error")
            .description("No track is currently playing"),
    )
}

/// Create an embed for when the bot stops playing music
pub fn stopped() -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("⏹️ Stopped")
            .description("Playback stopped and queue cleared")
            .color(0x00ff00),
    )
}

/// Create an embed for when the queue is empty
pub fn queue_is_empty() -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("❌ Error")
            .description("The queue is empty")
            .color(0xff0000),
    )
}

/// Create an embed for when the player volume changes
pub fn volume_set(level: u16) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("🔊 Volume")
            .description(format!("Volume set to `{}%`", level))
            .color(0x00ff00),
    )
}

/// Create an embed for when the queue is shuffled
pub fn shuffled(count: usize) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("🔀 Shuffled")
            .description(format!("Shuffled {} queued tracks", count))
            .color(0x00ff00),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn progress_bar_is_empty_at_start() {
        assert_eq!(
            format_progress_bar(0, 100_000),
            format!("▬🔘{}▬", "▬".repeat(15))
        );
    }

    #[test]
    fn progress_bar_is_full_at_end() {
        assert_eq!(
            format_progress_bar(100_000, 100_000),
            format!("▬{}🔘▬", "▬".repeat(15))
        );
    }

    #[test]
    fn progress_bar_handles_unknown_total() {
        // Streams report a zero length; the bar stays pinned at the start.
        assert_eq!(
            format_progress_bar(5_000, 0),
            format!("▬🔘{}▬", "▬".repeat(15))
        );
    }

    #[test]
    fn progress_bar_clamps_position_overflow() {
        // Position can briefly overshoot the reported length.
        assert_eq!(
            format_progress_bar(120_000, 100_000),
            format!("▬{}🔘▬", "▬".repeat(15))
        );
    }
}
