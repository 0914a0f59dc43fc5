//! Penalty shootout simulation against the bot. Each round the user first
//! shoots at one of three corners, then dives to defend the bot's shot.

use ::serenity::all::{
    ButtonStyle, ComponentInteraction, CreateActionRow, CreateButton, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, MessageId, UserId,
};
use dashmap::DashMap;
use poise::{CreateReply, serenity_prelude as serenity};
use rand::Rng;
use std::sync::LazyLock;
use tracing::warn;

use super::{acknowledge, ephemeral_reply};
use crate::utils::database::{self, GameOutcome};
use crate::{CommandResult, Context, Error};

const GAME_NAME: &str = "football";

/// Penalties each side takes.
pub const ROUNDS: u8 = 5;

/// In-flight shootouts keyed by the message holding the scoreboard.
static GAMES: LazyLock<DashMap<MessageId, Shootout>> = LazyLock::new(DashMap::new);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Center,
    Right,
}

impl Direction {
    fn from_custom_id(custom_id: &str) -> Option<Self> {
        match custom_id {
            "fb_left" => Some(Direction::Left),
            "fb_center" => Some(Direction::Center),
            "fb_right" => Some(Direction::Right),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Center => "center",
            Direction::Right => "right",
        }
    }

    fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..3) {
            0 => Direction::Left,
            1 => Direction::Center,
            _ => Direction::Right,
        }
    }
}

/// What the user does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Shooting,
    Diving,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Shootout {
    player_id: UserId,
    round: u8,
    phase: Phase,
    player_goals: u8,
    bot_goals: u8,
    last_event: Option<String>,
}

impl Shootout {
    pub fn new(player_id: UserId) -> Self {
        Self {
            player_id,
            round: 1,
            phase: Phase::Shooting,
            player_goals: 0,
            bot_goals: 0,
            last_event: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn score(&self) -> (u8, u8) {
        (self.player_goals, self.bot_goals)
    }

    /// Resolve the user's shot against the keeper's dive. A shot scores
    /// unless the keeper picked the same corner.
    pub fn resolve_shot(&mut self, shot: Direction, keeper: Direction) -> bool {
        debug_assert_eq!(self.phase, Phase::Shooting);
        let scored = shot != keeper;
        if scored {
            self.player_goals += 1;
        }
        self.phase = Phase::Diving;
        self.last_event = Some(if scored {
            format!(
                "⚽ You shot {} and scored! The keeper went {}.",
                shot.label(),
                keeper.label()
            )
        } else {
            format!("🧤 Saved! The keeper guessed {} with you.", shot.label())
        });
        scored
    }

    /// Resolve the user's dive against the bot's shot. A dive saves only
    /// when the directions match.
    pub fn resolve_dive(&mut self, dive: Direction, shot: Direction) -> bool {
        debug_assert_eq!(self.phase, Phase::Diving);
        let saved = dive == shot;
        if !saved {
            self.bot_goals += 1;
        }
        self.last_event = Some(if saved {
            format!("🧤 You dove {} and saved the bot's shot!", dive.label())
        } else {
            format!(
                "⚽ The bot shot {} while you dove {}. Goal.",
                shot.label(),
                dive.label()
            )
        });
        self.advance_round();
        saved
    }

    fn advance_round(&mut self) {
        if self.round >= ROUNDS {
            self.phase = Phase::Finished;
        } else {
            self.round += 1;
            self.phase = Phase::Shooting;
        }
    }

    /// Final outcome for the user, once all rounds are played.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.phase != Phase::Finished {
            return None;
        }
        Some(if self.player_goals > self.bot_goals {
            GameOutcome::Win
        } else if self.bot_goals > self.player_goals {
            GameOutcome::Loss
        } else {
            GameOutcome::Draw
        })
    }
}

/// Start a penalty shootout against the bot
#[poise::command(slash_command, category = "Games")]
pub async fn football(ctx: Context<'_>) -> CommandResult {
    let game = Shootout::new(ctx.author().id);

    let reply = ctx
        .send(
            CreateReply::default()
                .embed(scoreboard_embed(&game))
                .components(direction_buttons(false)),
        )
        .await?;

    let message = reply.message().await?;
    GAMES.insert(message.id, game);

    Ok(())
}

enum PressResult {
    Stale,
    NotYourGame,
    Update { game: Shootout, finished: bool },
}

/// Handle a press on the `fb_<direction>` buttons.
pub async fn handle_interaction(
    ctx: &serenity::Context,
    interaction: &mut ComponentInteraction,
) -> Result<(), Error> {
    let message_id = interaction.message.id;

    let Some(direction) = Direction::from_custom_id(&interaction.data.custom_id) else {
        return acknowledge(ctx, interaction).await;
    };

    let bot_choice = Direction::random(&mut rand::rng());

    let result = match GAMES.get_mut(&message_id) {
        None => PressResult::Stale,
        Some(mut entry) => {
            let game = entry.value_mut();
            if game.player_id != interaction.user.id {
                PressResult::NotYourGame
            } else {
                match game.phase() {
                    Phase::Shooting => {
                        game.resolve_shot(direction, bot_choice);
                    }
                    Phase::Diving => {
                        game.resolve_dive(direction, bot_choice);
                    }
                    Phase::Finished => {}
                }
                PressResult::Update {
                    finished: game.phase() == Phase::Finished,
                    game: game.clone(),
                }
            }
        }
    };

    match result {
        PressResult::Stale => acknowledge(ctx, interaction).await,
        PressResult::NotYourGame => {
            ephemeral_reply(ctx, interaction, "This is not your shootout.").await
        }
        PressResult::Update { game, finished } => {
            if finished {
                GAMES.remove(&message_id);
                record_result(&game);
            }

            interaction
                .create_response(
                    ctx,
                    CreateInteractionResponse::UpdateMessage(
                        CreateInteractionResponseMessage::new()
                            .embed(scoreboard_embed(&game))
                            .components(direction_buttons(finished)),
                    ),
                )
                .await?;
            Ok(())
        }
    }
}

fn scoreboard_embed(game: &Shootout) -> CreateEmbed {
    let (player_goals, bot_goals) = game.score();

    let prompt = match game.phase() {
        Phase::Shooting => format!(
            "Round {}/{} — pick a corner to **shoot** at!",
            game.round(),
            ROUNDS
        ),
        Phase::Diving => format!(
            "Round {}/{} — pick a corner to **dive** to!",
            game.round(),
            ROUNDS
        ),
        Phase::Finished => match game.outcome() {
            Some(GameOutcome::Win) => "🏆 You win the shootout!".to_string(),
            Some(GameOutcome::Loss) => "💀 The bot wins the shootout!".to_string(),
            _ => "🤝 The shootout ends level!".to_string(),
        },
    };

    let mut description = String::new();
    if let Some(event) = &game.last_event {
        description.push_str(event);
        description.push_str("\n\n");
    }
    description.push_str(&prompt);

    CreateEmbed::new()
        .title("⚽ Penalty Shootout")
        .description(description)
        .field("Score", format!("You {} - {} Bot", player_goals, bot_goals), false)
        .color(match game.phase() {
            Phase::Finished => 0x00ff00,
            _ => 0x00b0f4,
        })
}

fn direction_buttons(disable_all: bool) -> Vec<CreateActionRow> {
    let left = CreateButton::new("fb_left")
        .label("Left")
        .style(ButtonStyle::Primary)
        .disabled(disable_all);

    let center = CreateButton::new("fb_center")
        .label("Center")
        .style(ButtonStyle::Primary)
        .disabled(disable_all);

    let right = CreateButton::new("fb_right")
        .label("Right")
        .style(ButtonStyle::Primary)
        .disabled(disable_all);

    vec![CreateActionRow::Buttons(vec![left, center, right])]
}

fn record_result(game: &Shootout) {
    let Some(outcome) = game.outcome() else {
        return;
    };

    if let Err(e) = database::record_outcome(game.player_id, GAME_NAME, outcome) {
        warn!(
            "Failed to record football outcome for {}: {}",
            game.player_id, e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn game() -> Shootout {
        Shootout::new(UserId::new(7))
    }

    #[test]
    fn new_game_starts_shooting_round_one() {
        let game = game();
        assert_eq!(game.phase(), Phase::Shooting);
        assert_eq!(game.round(), 1);
        assert_eq!(game.score(), (0, 0));
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn shot_scores_when_keeper_goes_elsewhere() {
        let mut game = game();
        assert!(game.resolve_shot(Direction::Left, Direction::Right));
        assert_eq!(game.score(), (1, 0));
        assert_eq!(game.phase(), Phase::Diving);
    }

    #[test]
    fn shot_is_saved_on_matching_corner() {
        let mut game = game();
        assert!(!game.resolve_shot(Direction::Center, Direction::Center));
        assert_eq!(game.score(), (0, 0));
        assert_eq!(game.phase(), Phase::Diving);
    }

    #[test]
    fn dive_saves_only_on_matching_corner() {
        let mut game = game();
        game.resolve_shot(Direction::Left, Direction::Left);

        assert!(game.resolve_dive(Direction::Right, Direction::Right));
        assert_eq!(game.score(), (0, 0));

        game.resolve_shot(Direction::Left, Direction::Left);
        assert!(!game.resolve_dive(Direction::Left, Direction::Center));
        assert_eq!(game.score(), (0, 1));
    }

    #[test]
    fn completing_a_dive_advances_the_round() {
        let mut game = game();
        game.resolve_shot(Direction::Left, Direction::Right);
        game.resolve_dive(Direction::Left, Direction::Left);
        assert_eq!(game.round(), 2);
        assert_eq!(game.phase(), Phase::Shooting);
    }

    #[test]
    fn shootout_finishes_after_all_rounds() {
        let mut game = game();
        for _ in 0..ROUNDS {
            game.resolve_shot(Direction::Left, Direction::Right);
            game.resolve_dive(Direction::Left, Direction::Left);
        }
        assert_eq!(game.phase(), Phase::Finished);
        assert_eq!(game.score(), (ROUNDS, 0));
        assert_eq!(game.outcome(), Some(GameOutcome::Win));
    }

    #[test]
    fn bot_wins_when_it_outscores_the_player() {
        let mut game = game();
        for _ in 0..ROUNDS {
            game.resolve_shot(Direction::Left, Direction::Left);
            game.resolve_dive(Direction::Left, Direction::Right);
        }
        assert_eq!(game.score(), (0, ROUNDS));
        assert_eq!(game.outcome(), Some(GameOutcome::Loss));
    }

    #[test]
    fn level_score_is_a_draw() {
        let mut game = game();
        for _ in 0..ROUNDS {
            game.resolve_shot(Direction::Left, Direction::Right);
            game.resolve_dive(Direction::Left, Direction::Center);
        }
        assert_eq!(game.score(), (ROUNDS, ROUNDS));
        assert_eq!(game.outcome(), Some(GameOutcome::Draw));
    }

    #[test]
    fn outcome_is_none_mid_game() {
        let mut game = game();
        game.resolve_shot(Direction::Left, Direction::Right);
        assert_eq!(game.outcome(), None);
    }
}
