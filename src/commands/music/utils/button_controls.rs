use serenity::all::{ButtonStyle, CreateActionRow, CreateButton, ReactionType};

/// Creates a row of music control buttons
pub fn create_music_control_buttons() -> Vec<CreateActionRow> {
    let play_pause = CreateButton::new("music_play_pause")
        .emoji(ReactionType::Unicode("⏯️".to_string()))
        .style(ButtonStyle::Primary)
        .label("Play/Pause");

    let skip = CreateButton::new("music_skip")
        .emoji(ReactionType::Unicode("⏭️".to_string()))
        .style(ButtonStyle::Secondary)
        .label("Skip");

    let stop = CreateButton::new("music_stop")
        .emoji(ReactionType::Unicode("⏹️".to_string()))
        .style(ButtonStyle::Danger)
        .label("Stop");

    vec![CreateActionRow::Buttons(vec![play_pause, skip, stop])]
}
