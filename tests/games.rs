//! Integration tests driving the game state machines through full matches.

mod common;

use pretty_assertions::assert_eq;
use serenity::model::id::UserId;
use shade::commands::games::blackjack::{Blackjack, Outcome, Phase, standard_deck};
use shade::commands::games::football::{Direction, ROUNDS, Shootout};
use shade::commands::games::tictactoe::{GameState, Mark, Seat, TicTacToe};
use shade::utils::database::GameOutcome;

#[test]
fn tictactoe_bot_converts_a_fork_into_a_win() {
    common::init();

    let mut game = TicTacToe::new(UserId::new(1), Seat::Bot);

    // Challenger opens a corner; the bot must take the center.
    assert!(game.place(0, Mark::X));
    let reply = game.bot_move().unwrap();
    assert_eq!(reply, 4);
    assert!(game.place(reply, Mark::O));

    // Top-row threat forces a block at 2.
    assert!(game.place(1, Mark::X));
    let reply = game.bot_move().unwrap();
    assert_eq!(reply, 2);
    assert!(game.place(reply, Mark::O));

    // The block handed the bot the anti-diagonal; it closes it at 6.
    assert!(game.place(3, Mark::X));
    let reply = game.bot_move().unwrap();
    assert_eq!(reply, 6);
    assert!(game.place(reply, Mark::O));

    assert_eq!(game.state(), GameState::Won(Mark::O));
    assert!(!game.place(5, Mark::X));
}

#[test]
fn tictactoe_two_players_to_a_draw() {
    common::init();

    let challenger = UserId::new(1);
    let opponent = UserId::new(2);
    let mut game = TicTacToe::new(challenger, Seat::User(opponent));

    for (cell, mark) in [
        (0, Mark::X),
        (1, Mark::O),
        (2, Mark::X),
        (4, Mark::O),
        (3, Mark::X),
        (5, Mark::O),
        (7, Mark::X),
        (6, Mark::O),
        (8, Mark::X),
    ] {
        assert_eq!(game.state(), GameState::InProgress);
        assert!(game.place(cell, mark), "move {} by {:?} rejected", cell, mark);
    }

    assert_eq!(game.state(), GameState::Draw);
}

#[test]
fn blackjack_unshuffled_deck_deals_a_natural() {
    common::init();

    // The fixed deck ends ...J♠ Q♠ K♠ A♠, so the player is dealt a natural
    // 21 against the dealer's 20 and the game resolves without input.
    let game = Blackjack::new(UserId::new(1), standard_deck());

    assert_eq!(shade::commands::games::blackjack::hand_value(game.player_hand()), 21);
    assert_eq!(shade::commands::games::blackjack::hand_value(game.dealer_hand()), 20);
    assert_eq!(game.phase(), Phase::Finished(Outcome::PlayerWin));
}

#[test]
fn blackjack_hit_until_bust_from_a_fixed_deck() {
    common::init();

    // Drop the four top cards so the player starts on 10♠ + 9♠ (19) and the
    // first hit draws the 6♠ for a bust.
    let mut deck = standard_deck();
    deck.truncate(48);

    let mut game = Blackjack::new(UserId::new(1), deck);
    assert_eq!(game.phase(), Phase::PlayerTurn);

    game.hit();
    assert_eq!(game.phase(), Phase::Finished(Outcome::DealerWin));
    assert!(shade::commands::games::blackjack::hand_value(game.player_hand()) > 21);
}

#[test]
fn football_full_shootout_ends_with_a_winner() {
    common::init();

    let mut game = Shootout::new(UserId::new(1));

    for round in 1..=ROUNDS {
        assert_eq!(game.round(), round);

        // The shooter scores whenever the keeper commits elsewhere.
        assert!(game.resolve_shot(Direction::Left, Direction::Right));
        // A matching dive keeps the bot off the scoreboard.
        assert!(game.resolve_dive(Direction::Center, Direction::Center));
    }

    assert_eq!(game.phase(), shade::commands::games::football::Phase::Finished);
    assert_eq!(game.score(), (ROUNDS, 0));
    assert_eq!(game.outcome(), Some(GameOutcome::Win));
}

#[test]
fn football_trading_goals_ends_level() {
    common::init();

    let mut game = Shootout::new(UserId::new(1));

    for _ in 0..ROUNDS {
        assert!(game.resolve_shot(Direction::Right, Direction::Left));
        assert!(!game.resolve_dive(Direction::Left, Direction::Right));
    }

    assert_eq!(game.score(), (ROUNDS, ROUNDS));
    assert_eq!(game.outcome(), Some(GameOutcome::Draw));
}
