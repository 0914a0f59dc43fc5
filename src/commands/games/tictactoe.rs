//! Tic-tac-toe on a 3x3 grid of message buttons. The challenger always
//! plays X; the opponent is another member or a built-in bot seat.

use ::serenity::all::{
    ButtonStyle, ComponentInteraction, CreateActionRow, CreateButton, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, MessageId, UserId,
};
use dashmap::DashMap;
use poise::{CreateReply, serenity_prelude as serenity};
use std::sync::LazyLock;
use tracing::warn;

use super::{acknowledge, ephemeral_reply};
use crate::utils::database::{self, GameOutcome};
use crate::{CommandResult, Context, Error};

const GAME_NAME: &str = "tictactoe";

/// In-flight games keyed by the message holding the board.
static GAMES: LazyLock<DashMap<MessageId, TicTacToe>> = LazyLock::new(DashMap::new);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

/// Who occupies one side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    User(UserId),
    Bot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Won(Mark),
    Draw,
}

/// All eight winning lines of the board.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone)]
pub struct TicTacToe {
    board: [Option<Mark>; 9],
    challenger: UserId,
    opponent: Seat,
    turn: Mark,
}

impl TicTacToe {
    pub fn new(challenger: UserId, opponent: Seat) -> Self {
        Self {
            board: [None; 9],
            challenger,
            opponent,
            turn: Mark::X,
        }
    }

    pub fn board(&self) -> &[Option<Mark>; 9] {
        &self.board
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Place `mark` in `cell`. Rejects out-of-turn moves, occupied cells,
    /// and moves on a finished board.
    pub fn place(&mut self, cell: usize, mark: Mark) -> bool {
        if mark != self.turn
            || cell >= 9
            || self.board[cell].is_some()
            || self.state() != GameState::InProgress
        {
            return false;
        }
        self.board[cell] = Some(mark);
        self.turn = mark.other();
        true
    }

    pub fn state(&self) -> GameState {
        for line in LINES {
            if let [Some(a), Some(b), Some(c)] = line.map(|i| self.board[i]) {
                if a == b && b == c {
                    return GameState::Won(a);
                }
            }
        }
        if self.board.iter().all(|cell| cell.is_some()) {
            GameState::Draw
        } else {
            GameState::InProgress
        }
    }

    /// Pick a cell for the bot seat: complete its own line, block the
    /// opponent's, then prefer center, corners, and finally any open cell.
    pub fn bot_move(&self) -> Option<usize> {
        let me = self.turn;
        if let Some(cell) = self.find_line_completion(me) {
            return Some(cell);
        }
        if let Some(cell) = self.find_line_completion(me.other()) {
            return Some(cell);
        }
        if self.board[4].is_none() {
            return Some(4);
        }
        for cell in [0, 2, 6, 8] {
            if self.board[cell].is_none() {
                return Some(cell);
            }
        }
        (0..9).find(|&cell| self.board[cell].is_none())
    }

    fn find_line_completion(&self, mark: Mark) -> Option<usize> {
        for line in LINES {
            let marked = line
                .iter()
                .filter(|&&cell| self.board[cell] == Some(mark))
                .count();
            let open: Vec<usize> = line
                .iter()
                .copied()
                .filter(|&cell| self.board[cell].is_none())
                .collect();
            if marked == 2 && open.len() == 1 {
                return Some(open[0]);
            }
        }
        None
    }

    fn seat_of(&self, mark: Mark) -> Seat {
        match mark {
            Mark::X => Seat::User(self.challenger),
            Mark::O => self.opponent,
        }
    }

    /// The mark a user plays, if they are part of this game.
    fn mark_of(&self, user_id: UserId) -> Option<Mark> {
        if user_id == self.challenger {
            Some(Mark::X)
        } else if self.opponent == Seat::User(user_id) {
            Some(Mark::O)
        } else {
            None
        }
    }

    fn seat_mention(&self, mark: Mark) -> String {
        match self.seat_of(mark) {
            Seat::User(user_id) => format!("<@{}>", user_id),
            Seat::Bot => "the bot".to_string(),
        }
    }
}

/// Challenge another member (or the bot) to tic-tac-toe
#[poise::command(slash_command, category = "Games")]
pub async fn tictactoe(
    ctx: Context<'_>,
    #[description = "Opponent (leave empty to play against the bot)"] opponent: Option<
        serenity::User,
    >,
) -> CommandResult {
    let opponent_seat = match &opponent {
        Some(user) if user.id == ctx.author().id => {
            ctx.send(
                CreateReply::default()
                    .content("You cannot challenge yourself.")
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }
        Some(user) if user.bot => Seat::Bot,
        Some(user) => Seat::User(user.id),
        None => Seat::Bot,
    };

    let game = TicTacToe::new(ctx.author().id, opponent_seat);

    let reply = ctx
        .send(
            CreateReply::default()
                .embed(board_embed(&game))
                .components(board_buttons(&game, false)),
        )
        .await?;

    let message = reply.message().await?;
    GAMES.insert(message.id, game);

    Ok(())
}

/// What a button press resolved to, computed while holding the game lock.
enum PressResult {
    Stale,
    NotYourGame,
    NotYourTurn,
    CellTaken,
    Update {
        game: TicTacToe,
        finished: bool,
    },
}

/// Handle a press on one of the `ttt_<cell>` board buttons.
pub async fn handle_interaction(
    ctx: &serenity::Context,
    interaction: &mut ComponentInteraction,
) -> Result<(), Error> {
    let message_id = interaction.message.id;

    let Some(cell) = interaction
        .data
        .custom_id
        .strip_prefix("ttt_")
        .and_then(|raw| raw.parse::<usize>().ok())
    else {
        return acknowledge(ctx, interaction).await;
    };

    // Mutate under the map entry without awaiting, then respond.
    let result = match GAMES.get_mut(&message_id) {
        None => PressResult::Stale,
        Some(mut entry) => {
            let game = entry.value_mut();
            match game.mark_of(interaction.user.id) {
                None => PressResult::NotYourGame,
                Some(mark) if mark != game.turn => PressResult::NotYourTurn,
                Some(mark) => {
                    if !game.place(cell, mark) {
                        PressResult::CellTaken
                    } else {
                        // The bot answers immediately on its turn.
                        if game.state() == GameState::InProgress
                            && game.seat_of(game.turn) == Seat::Bot
                        {
                            if let Some(reply_cell) = game.bot_move() {
                                let bot_mark = game.turn;
                                game.place(reply_cell, bot_mark);
                            }
                        }
                        PressResult::Update {
                            finished: game.state() != GameState::InProgress,
                            game: game.clone(),
                        }
                    }
                }
            }
        }
    };

    match result {
        PressResult::Stale => acknowledge(ctx, interaction).await,
        PressResult::NotYourGame => {
            ephemeral_reply(ctx, interaction, "You are not part of this game.").await
        }
        PressResult::NotYourTurn => ephemeral_reply(ctx, interaction, "It's not your turn.").await,
        PressResult::CellTaken => {
            ephemeral_reply(ctx, interaction, "That square is already taken.").await
        }
        PressResult::Update { game, finished } => {
            if finished {
                GAMES.remove(&message_id);
                record_results(&game);
            }

            interaction
                .create_response(
                    ctx,
                    CreateInteractionResponse::UpdateMessage(
                        CreateInteractionResponseMessage::new()
                            .embed(board_embed(&game))
                            .components(board_buttons(&game, finished)),
                    ),
                )
                .await?;
            Ok(())
        }
    }
}

fn board_embed(game: &TicTacToe) -> CreateEmbed {
    let matchup = format!(
        "❌ {} vs ⭕ {}",
        game.seat_mention(Mark::X),
        game.seat_mention(Mark::O)
    );

    let status = match game.state() {
        GameState::InProgress => format!(
            "Turn: {} ({})",
            game.seat_mention(game.turn),
            game.turn.label()
        ),
        GameState::Won(mark) => format!("🏆 {} wins!", game.seat_mention(mark)),
        GameState::Draw => "🤝 It's a draw!".to_string(),
    };

    CreateEmbed::new()
        .title("Tic-Tac-Toe")
        .description(format!("{}\n\n{}", matchup, status))
        .color(match game.state() {
            GameState::InProgress => 0x00b0f4,
            GameState::Won(_) => 0x00ff00,
            GameState::Draw => 0xffaa00,
        })
}

fn board_buttons(game: &TicTacToe, disable_all: bool) -> Vec<CreateActionRow> {
    (0..3)
        .map(|row| {
            let buttons = (0..3)
                .map(|col| {
                    let cell = row * 3 + col;
                    let (label, style) = match game.board[cell] {
                        Some(Mark::X) => ("X", ButtonStyle::Danger),
                        Some(Mark::O) => ("O", ButtonStyle::Primary),
                        None => ("·", ButtonStyle::Secondary),
                    };
                    CreateButton::new(format!("ttt_{}", cell))
                        .label(label)
                        .style(style)
                        .disabled(disable_all || game.board[cell].is_some())
                })
                .collect();
            CreateActionRow::Buttons(buttons)
        })
        .collect()
}

/// Persist win/loss/draw for the human participants.
fn record_results(game: &TicTacToe) {
    let outcomes: Vec<(Seat, GameOutcome)> = match game.state() {
        GameState::Won(mark) => vec![
            (game.seat_of(mark), GameOutcome::Win),
            (game.seat_of(mark.other()), GameOutcome::Loss),
        ],
        GameState::Draw => vec![
            (game.seat_of(Mark::X), GameOutcome::Draw),
            (game.seat_of(Mark::O), GameOutcome::Draw),
        ],
        GameState::InProgress => Vec::new(),
    };

    for (seat, outcome) in outcomes {
        if let Seat::User(user_id) = seat {
            if let Err(e) = database::record_outcome(user_id, GAME_NAME, outcome) {
                warn!("Failed to record tictactoe outcome for {}: {}", user_id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn challenger() -> UserId {
        UserId::new(100)
    }

    fn bot_game() -> TicTacToe {
        TicTacToe::new(challenger(), Seat::Bot)
    }

    fn game_with(board: [Option<Mark>; 9], turn: Mark) -> TicTacToe {
        let mut game = bot_game();
        game.board = board;
        game.turn = turn;
        game
    }

    const X: Option<Mark> = Some(Mark::X);
    const O: Option<Mark> = Some(Mark::O);
    const E: Option<Mark> = None;

    #[test]
    fn fresh_game_starts_with_x() {
        let game = bot_game();
        assert_eq!(game.turn(), Mark::X);
        assert_eq!(game.state(), GameState::InProgress);
    }

    #[test]
    fn place_alternates_turns() {
        let mut game = bot_game();
        assert!(game.place(0, Mark::X));
        assert_eq!(game.turn(), Mark::O);
        assert!(game.place(1, Mark::O));
        assert_eq!(game.turn(), Mark::X);
    }

    #[test]
    fn place_rejects_out_of_turn_moves() {
        let mut game = bot_game();
        assert!(!game.place(0, Mark::O));
        assert!(game.place(0, Mark::X));
        assert!(!game.place(1, Mark::X));
    }

    #[test]
    fn place_rejects_occupied_cells_and_bad_indices() {
        let mut game = bot_game();
        assert!(game.place(4, Mark::X));
        assert!(!game.place(4, Mark::O));
        assert!(!game.place(9, Mark::O));
    }

    #[rstest]
    #[case([0, 1, 2])]
    #[case([3, 4, 5])]
    #[case([6, 7, 8])]
    #[case([0, 3, 6])]
    #[case([1, 4, 7])]
    #[case([2, 5, 8])]
    #[case([0, 4, 8])]
    #[case([2, 4, 6])]
    fn every_line_wins(#[case] line: [usize; 3]) {
        let mut board = [E; 9];
        for cell in line {
            board[cell] = X;
        }
        let game = game_with(board, Mark::O);
        assert_eq!(game.state(), GameState::Won(Mark::X));
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let board = [X, O, X, X, O, O, O, X, X];
        let game = game_with(board, Mark::O);
        assert_eq!(game.state(), GameState::Draw);
    }

    #[test]
    fn no_moves_allowed_after_win() {
        let mut game = game_with([X, X, X, E, O, O, E, E, E], Mark::O);
        assert!(!game.place(3, Mark::O));
    }

    #[test]
    fn bot_takes_winning_cell() {
        // O (the bot) can complete the top row at cell 2.
        let game = game_with([O, O, E, X, X, E, E, E, E], Mark::O);
        assert_eq!(game.bot_move(), Some(2));
    }

    #[test]
    fn bot_blocks_opponent_win_when_it_cannot_win() {
        // X threatens the left column at cell 6; O has no win available.
        let game = game_with([X, E, E, X, O, E, E, E, E], Mark::O);
        assert_eq!(game.bot_move(), Some(6));
    }

    #[test]
    fn bot_prefers_winning_over_blocking() {
        // Both sides have two in a row; the bot should finish its own.
        let game = game_with([X, X, E, O, O, E, E, E, E], Mark::O);
        assert_eq!(game.bot_move(), Some(5));
    }

    #[test]
    fn bot_takes_center_then_corner() {
        let game = game_with([X, E, E, E, E, E, E, E, E], Mark::O);
        assert_eq!(game.bot_move(), Some(4));

        let game = game_with([X, E, E, E, O, X, E, E, E], Mark::O);
        assert_eq!(game.bot_move(), Some(0));
    }

    #[test]
    fn bot_blocks_diagonal_threat() {
        // X holds 2 and 4; the anti-diagonal closes at 6.
        let game = game_with([X, O, X, O, X, O, E, X, O], Mark::O);
        assert_eq!(game.bot_move(), Some(6));
    }

    #[test]
    fn mark_of_identifies_participants() {
        let other = UserId::new(200);
        let game = TicTacToe::new(challenger(), Seat::User(other));
        assert_eq!(game.mark_of(challenger()), Some(Mark::X));
        assert_eq!(game.mark_of(other), Some(Mark::O));
        assert_eq!(game.mark_of(UserId::new(300)), None);
    }

    #[test]
    fn bot_seat_claims_no_user() {
        let game = bot_game();
        assert_eq!(game.mark_of(UserId::new(200)), None);
    }
}
