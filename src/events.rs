//! Gateway event routing and the global command error handler.

use ::serenity::all::{ComponentInteraction, CreateEmbed, FullEvent, Interaction};
use poise::{CreateReply, serenity_prelude as serenity};
use tracing::error;

use crate::commands::games;
use crate::commands::music::utils::component_handlers;
use crate::{Data, Error};

/// Route raw gateway events. Component interactions are dispatched to their
/// owning feature by `custom_id` prefix.
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let FullEvent::InteractionCreate {
        interaction: Interaction::Component(component),
    } = event
    {
        let mut component = component.clone();
        dispatch_component(ctx, &mut component, data).await;
    }

    Ok(())
}

async fn dispatch_component(
    ctx: &serenity::Context,
    component: &mut ComponentInteraction,
    data: &Data,
) {
    let custom_id = component.data.custom_id.clone();

    let result = if custom_id.starts_with("music_") {
        component_handlers::handle_interaction(ctx, component, data).await
    } else if custom_id.starts_with("ttt_") {
        games::tictactoe::handle_interaction(ctx, component).await
    } else if custom_id.starts_with("bj_") {
        games::blackjack::handle_interaction(ctx, component).await
    } else if custom_id.starts_with("fb_") {
        games::football::handle_interaction(ctx, component).await
    } else {
        Ok(())
    };

    if let Err(e) = result {
        error!("Error handling component interaction {}: {}", custom_id, e);
    }
}

/// Global error handler for commands. Recoverable command failures get a
/// generic user-facing embed; everything else falls through to the poise
/// default.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Command '{}' failed: {}", ctx.command().name, error);

            let reply = CreateReply::default()
                .embed(
                    CreateEmbed::new()
                        .title("❌ Command Error")
                        .description(
                            "An error occurred while executing the command. \
                             Please try again later.",
                        )
                        .color(0xff0000),
                )
                .ephemeral(true);

            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send error message: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}
