//! Single-player blackjack against the dealer, driven by hit/stand buttons.

use ::serenity::all::{
    ButtonStyle, ComponentInteraction, CreateActionRow, CreateButton, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, MessageId, UserId,
};
use dashmap::DashMap;
use poise::{CreateReply, serenity_prelude as serenity};
use rand::seq::SliceRandom;
use std::sync::LazyLock;
use tracing::warn;

use super::{acknowledge, ephemeral_reply};
use crate::utils::database::{self, GameOutcome};
use crate::{CommandResult, Context, Error};

const GAME_NAME: &str = "blackjack";

/// In-flight games keyed by the message holding the table.
static GAMES: LazyLock<DashMap<MessageId, Blackjack>> = LazyLock::new(DashMap::new);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Base value; aces start at 11 and are demoted during hand valuation.
    fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    fn label(self) -> String {
        format!("{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

/// A full 52-card deck in fixed order; shuffle before dealing.
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { rank, suit });
        }
    }
    deck
}

/// Best blackjack value of a hand: aces count 11, then demote to 1 while
/// the hand would bust.
pub fn hand_value(cards: &[Card]) -> u8 {
    let mut total: u8 = cards.iter().map(|card| card.rank.value()).sum();
    let mut aces = cards.iter().filter(|card| card.rank == Rank::Ace).count();
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    total
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerWin,
    DealerWin,
    Push,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    PlayerTurn,
    Finished(Outcome),
}

#[derive(Debug, Clone)]
pub struct Blackjack {
    player_id: UserId,
    deck: Vec<Card>,
    player: Vec<Card>,
    dealer: Vec<Card>,
    phase: Phase,
}

impl Blackjack {
    /// Deal a new game from a pre-shuffled deck. A natural 21 stands
    /// immediately.
    pub fn new(player_id: UserId, mut deck: Vec<Card>) -> Self {
        let mut draw = || deck.pop().expect("a fresh deck holds enough cards to deal");
        let player = vec![draw(), draw()];
        let dealer = vec![draw(), draw()];

        let mut game = Self {
            player_id,
            deck,
            player,
            dealer,
            phase: Phase::PlayerTurn,
        };

        if hand_value(&game.player) == 21 {
            game.stand();
        }

        game
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_hand(&self) -> &[Card] {
        &self.player
    }

    pub fn dealer_hand(&self) -> &[Card] {
        &self.dealer
    }

    /// Draw one card for the player. Busting ends the game; reaching 21
    /// stands automatically.
    pub fn hit(&mut self) {
        if self.phase != Phase::PlayerTurn {
            return;
        }

        if let Some(card) = self.deck.pop() {
            self.player.push(card);
        }

        match hand_value(&self.player) {
            value if value > 21 => self.phase = Phase::Finished(Outcome::DealerWin),
            21 => self.stand(),
            _ => {}
        }
    }

    /// End the player's turn: the dealer draws to 17, then hands are compared.
    pub fn stand(&mut self) {
        if matches!(self.phase, Phase::Finished(_)) {
            return;
        }

        while hand_value(&self.dealer) < 17 {
            match self.deck.pop() {
                Some(card) => self.dealer.push(card),
                None => break,
            }
        }

        let player = hand_value(&self.player);
        let dealer = hand_value(&self.dealer);

        let outcome = if dealer > 21 || player > dealer {
            Outcome::PlayerWin
        } else if dealer > player {
            Outcome::DealerWin
        } else {
            Outcome::Push
        };

        self.phase = Phase::Finished(outcome);
    }
}

/// Play a round of blackjack against the dealer
#[poise::command(slash_command, category = "Games")]
pub async fn blackjack(ctx: Context<'_>) -> CommandResult {
    let mut deck = standard_deck();
    deck.shuffle(&mut rand::rng());

    let game = Blackjack::new(ctx.author().id, deck);
    let finished = matches!(game.phase(), Phase::Finished(_));

    if finished {
        record_result(&game);
    }

    let reply = ctx
        .send(
            CreateReply::default()
                .embed(table_embed(&game))
                .components(table_buttons(finished)),
        )
        .await?;

    if !finished {
        let message = reply.message().await?;
        GAMES.insert(message.id, game);
    }

    Ok(())
}

enum PressResult {
    Stale,
    NotYourGame,
    Update { game: Blackjack, finished: bool },
}

/// Handle a press on the `bj_hit` / `bj_stand` buttons.
pub async fn handle_interaction(
    ctx: &serenity::Context,
    interaction: &mut ComponentInteraction,
) -> Result<(), Error> {
    let message_id = interaction.message.id;

    let result = match GAMES.get_mut(&message_id) {
        None => PressResult::Stale,
        Some(mut entry) => {
            let game = entry.value_mut();
            if game.player_id != interaction.user.id {
                PressResult::NotYourGame
            } else {
                match interaction.data.custom_id.as_str() {
                    "bj_hit" => game.hit(),
                    "bj_stand" => game.stand(),
                    _ => {}
                }
                PressResult::Update {
                    finished: matches!(game.phase(), Phase::Finished(_)),
                    game: game.clone(),
                }
            }
        }
    };

    match result {
        PressResult::Stale => acknowledge(ctx, interaction).await,
        PressResult::NotYourGame => {
            ephemeral_reply(ctx, interaction, "This is not your game.").await
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
                            .embed(table_embed(&game))
                            .components(table_buttons(finished)),
                    ),
                )
                .await?;
            Ok(())
        }
    }
}

fn hand_line(cards: &[Card]) -> String {
    let labels: Vec<String> = cards.iter().map(|card| card.label()).collect();
    format!("{} ({})", labels.join(" "), hand_value(cards))
}

fn table_embed(game: &Blackjack) -> CreateEmbed {
    let (dealer_line, status, color) = match game.phase() {
        Phase::PlayerTurn => (
            // Hole card stays hidden until the player stands.
            format!("{} 🂠", game.dealer_hand()[0].label()),
            "Hit or stand?".to_string(),
            0x00b0f4,
        ),
        Phase::Finished(outcome) => {
            let (status, color) = match outcome {
                Outcome::PlayerWin => ("🏆 You win!".to_string(), 0x00ff00),
                Outcome::DealerWin => ("💀 Dealer wins!".to_string(), 0xff0000),
                Outcome::Push => ("🤝 Push!".to_string(), 0xffaa00),
            };
            (hand_line(game.dealer_hand()), status, color)
        }
    };

    CreateEmbed::new()
        .title("🃏 Blackjack")
        .field("Your Hand", hand_line(game.player_hand()), false)
        .field("Dealer's Hand", dealer_line, false)
        .description(status)
        .color(color)
}

fn table_buttons(disable_all: bool) -> Vec<CreateActionRow> {
    let hit = CreateButton::new("bj_hit")
        .label("Hit")
        .style(ButtonStyle::Primary)
        .disabled(disable_all);

    let stand = CreateButton::new("bj_stand")
        .label("Stand")
        .style(ButtonStyle::Secondary)
        .disabled(disable_all);

    vec![CreateActionRow::Buttons(vec![hit, stand])]
}

fn record_result(game: &Blackjack) {
    let Phase::Finished(outcome) = game.phase() else {
        return;
    };

    let outcome = match outcome {
        Outcome::PlayerWin => GameOutcome::Win,
        Outcome::DealerWin => GameOutcome::Loss,
        Outcome::Push => GameOutcome::Draw,
    };

    if let Err(e) = database::record_outcome(game.player_id, GAME_NAME, outcome) {
        warn!(
            "Failed to record blackjack outcome for {}: {}",
            game.player_id, e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn card(rank: Rank) -> Card {
        Card {
            rank,
            suit: Suit::Spades,
        }
    }

    /// Build a deck that deals the given hands: `Blackjack::new` pops two
    /// player cards, then two dealer cards, then `hit`/`stand` draws from
    /// `rest` in order.
    fn rigged_deck(player: [Rank; 2], dealer: [Rank; 2], rest: &[Rank]) -> Vec<Card> {
        let mut order: Vec<Card> = Vec::new();
        order.extend(player.map(card));
        order.extend(dealer.map(card));
        order.extend(rest.iter().copied().map(card));
        // Cards are popped from the back of the deck.
        order.reverse();
        order
    }

    fn player() -> UserId {
        UserId::new(42)
    }

    #[test]
    fn deck_has_52_unique_cards() {
        let deck = standard_deck();
        assert_eq!(deck.len(), 52);
        for i in 0..deck.len() {
            for j in (i + 1)..deck.len() {
                assert_ne!(deck[i], deck[j]);
            }
        }
    }

    #[test]
    fn hand_value_counts_faces_as_ten() {
        assert_eq!(hand_value(&[card(Rank::King), card(Rank::Queen)]), 20);
    }

    #[test]
    fn hand_value_keeps_ace_high_when_safe() {
        assert_eq!(hand_value(&[card(Rank::Ace), card(Rank::Seven)]), 18);
    }

    #[test]
    fn hand_value_demotes_aces_to_avoid_busting() {
        assert_eq!(hand_value(&[card(Rank::Ace), card(Rank::Nine), card(Rank::Five)]), 15);
        assert_eq!(
            hand_value(&[card(Rank::Ace), card(Rank::Ace), card(Rank::Nine)]),
            21
        );
        assert_eq!(
            hand_value(&[
                card(Rank::Ace),
                card(Rank::Ace),
                card(Rank::Ace),
                card(Rank::King),
                card(Rank::Nine)
            ]),
            22
        );
    }

    #[test]
    fn deal_gives_two_cards_each() {
        let deck = rigged_deck(
            [Rank::Two, Rank::Three],
            [Rank::Four, Rank::Five],
            &[Rank::Six],
        );
        let game = Blackjack::new(player(), deck);
        assert_eq!(game.player_hand(), &[card(Rank::Two), card(Rank::Three)]);
        assert_eq!(game.dealer_hand(), &[card(Rank::Four), card(Rank::Five)]);
        assert_eq!(game.phase(), Phase::PlayerTurn);
    }

    #[test]
    fn natural_21_stands_immediately() {
        let deck = rigged_deck(
            [Rank::Ace, Rank::King],
            [Rank::Nine, Rank::Nine],
            &[Rank::Two],
        );
        let game = Blackjack::new(player(), deck);
        assert_eq!(game.phase(), Phase::Finished(Outcome::PlayerWin));
    }

    #[test]
    fn player_bust_loses() {
        let deck = rigged_deck(
            [Rank::King, Rank::Queen],
            [Rank::Nine, Rank::Nine],
            &[Rank::Five],
        );
        let mut game = Blackjack::new(player(), deck);
        game.hit();
        assert_eq!(game.phase(), Phase::Finished(Outcome::DealerWin));
    }

    #[test]
    fn dealer_draws_to_seventeen_then_stops() {
        // Dealer starts at 12 and must draw the five, then stand on 17.
        let deck = rigged_deck(
            [Rank::King, Rank::Nine],
            [Rank::Ten, Rank::Two],
            &[Rank::Five, Rank::Ten],
        );
        let mut game = Blackjack::new(player(), deck);
        game.stand();
        assert_eq!(game.dealer_hand().len(), 3);
        assert_eq!(hand_value(game.dealer_hand()), 17);
        assert_eq!(game.phase(), Phase::Finished(Outcome::PlayerWin));
    }

    #[test]
    fn dealer_bust_is_a_player_win() {
        let deck = rigged_deck(
            [Rank::Ten, Rank::Eight],
            [Rank::Ten, Rank::Six],
            &[Rank::King],
        );
        let mut game = Blackjack::new(player(), deck);
        game.stand();
        assert!(hand_value(game.dealer_hand()) > 21);
        assert_eq!(game.phase(), Phase::Finished(Outcome::PlayerWin));
    }

    #[test]
    fn equal_hands_push() {
        let deck = rigged_deck(
            [Rank::Ten, Rank::Nine],
            [Rank::Ten, Rank::Nine],
            &[Rank::Two],
        );
        let mut game = Blackjack::new(player(), deck);
        game.stand();
        assert_eq!(game.phase(), Phase::Finished(Outcome::Push));
    }

    #[test]
    fn hitting_to_21_stands_automatically() {
        // Player 10 + 9, hits a 2 for exactly 21; dealer sits on 18.
        let deck = rigged_deck(
            [Rank::Ten, Rank::Nine],
            [Rank::Ten, Rank::Eight],
            &[Rank::Two],
        );
        let mut game = Blackjack::new(player(), deck);
        game.hit();
        assert_matches!(game.phase(), Phase::Finished(Outcome::PlayerWin));
    }

    #[test]
    fn moves_after_finish_are_ignored() {
        let deck = rigged_deck(
            [Rank::King, Rank::Queen],
            [Rank::Nine, Rank::Nine],
            &[Rank::Five, Rank::Five],
        );
        let mut game = Blackjack::new(player(), deck);
        game.hit();
        let hand_size = game.player_hand().len();
        game.hit();
        game.stand();
        assert_eq!(game.player_hand().len(), hand_size);
        assert_eq!(game.phase(), Phase::Finished(Outcome::DealerWin));
    }
}
