//! Interactive games played through message components. Each game keeps its
//! in-flight state keyed by the game message id and records finished games
//! to the database.

/// Blackjack against the dealer.
pub mod blackjack;
/// Penalty shootout simulation.
pub mod football;
/// Tic-tac-toe against another member or the bot.
pub mod tictactoe;

use ::serenity::all::{
    ComponentInteraction, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use poise::serenity_prelude::Context as SerenityContext;

use crate::Error;

/// Respond to a component press with an ephemeral rejection.
pub(crate) async fn ephemeral_reply(
    ctx: &SerenityContext,
    interaction: &ComponentInteraction,
    content: &str,
) -> Result<(), Error> {
    interaction
        .create_response(
            ctx,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(content.to_string())
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}

/// Acknowledge a press without changing anything, e.g. for buttons on a
/// game that finished or was lost to a restart.
pub(crate) async fn acknowledge(
    ctx: &SerenityContext,
    interaction: &ComponentInteraction,
) -> Result<(), Error> {
    interaction
        .create_response(ctx, CreateInteractionResponse::Acknowledge)
        .await?;
    Ok(())
}
