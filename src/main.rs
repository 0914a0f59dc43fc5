use ::serenity::all::ClientBuilder;
use dotenv::dotenv;
use lavalink_rs::model::events;
use lavalink_rs::prelude::*;
use poise::serenity_prelude as serenity;
use songbird::SerenityInit;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use shade::commands::{
    games::{blackjack::*, football::*, tictactoe::*},
    general::{ping::*, serverinfo::*, userinfo::*},
    music::{
        nowplaying::*, pause::*, play::*, queue::*, resume::*, shuffle::*, skip::*, stop::*,
        volume::*,
    },
    music::utils::lavalink_events,
};
use shade::config::Config;
use shade::{CommandResult, Context, Data, Error};

#[poise::command(slash_command, category = "General")]
async fn help(
    ctx: Context<'_>,
    #[description = "Specific command to show help about"]
    #[autocomplete = "poise::builtins::autocomplete_command"]
    command: Option<String>,
) -> CommandResult {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration {
            show_context_menu_commands: true,
            ..Default::default()
        },
    )
    .await
    .map_err(|e| e.into())
}

#[poise::command(prefix_command, hide_in_help)]
async fn register(ctx: Context<'_>) -> Result<(), Error> {
    poise::builtins::register_application_commands_buttons(ctx)
        .await
        .map_err(|e| e.into())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shade=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let config = Config::from_env()?;

    // Initialize the SQLite database
    if let Err(e) = shade::utils::database::init_db() {
        eprintln!("Failed to initialize database: {}", e);
    }

    let token = config.token.clone();
    let app_id = serenity::ApplicationId::new(config.app_id);

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let commands = vec![
        // Default commands
        register(),
        help(),
        // General commands
        ping(),
        serverinfo(),
        userinfo(),
        // Music commands
        play(),
        pause(),
        resume(),
        skip(),
        stop(),
        queue(),
        volume(),
        shuffle(),
        nowplaying(),
        // Game commands
        tictactoe(),
        blackjack(),
        football(),
    ];

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands,
            event_handler: |ctx, event, framework, data| {
                Box::pin(shade::events::handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(shade::events::on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("!".into()),
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                let commands = &framework.options().commands;

                // Sync commands per configuration: globally, or into the
                // configured development guild for fast iteration.
                if config.sync_global {
                    poise::builtins::register_globally(ctx, commands).await?;
                    info!("Synced {} commands globally", commands.len());
                } else if let Some(guild_id) = config.guild_id {
                    let guild = serenity::GuildId::new(guild_id);
                    poise::builtins::register_in_guild(ctx, commands, guild).await?;
                    info!("Synced {} commands for guild {}", commands.len(), guild_id);
                } else {
                    info!("No guild ID configured and global sync disabled, skipping command sync");
                }

                ctx.set_presence(
                    Some(serenity::ActivityData::watching("you from the shadows")),
                    serenity::OnlineStatus::DoNotDisturb,
                );

                info!(
                    "{} is ready and online in {} guilds",
                    ready.user.name,
                    ready.guilds.len()
                );

                let node = NodeBuilder {
                    hostname: config.lavalink.address(),
                    is_ssl: false,
                    events: events::Events::default(),
                    password: config.lavalink.password.clone(),
                    user_id: ready.user.id.into(),
                    session_id: None,
                };

                let lavalink = LavalinkClient::new(
                    events::Events {
                        ready: Some(lavalink_events::ready_event),
                        track_start: Some(lavalink_events::track_start),
                        ..Default::default()
                    },
                    vec![node],
                    NodeDistributionStrategy::round_robin(),
                )
                .await;

                let data = Data {
                    lavalink,
                    config,
                    started_at: chrono::Utc::now(),
                };

                notify_owner_startup(ctx, &data, ready, commands.len()).await;

                Ok(data)
            })
        });

    let client_builder = ClientBuilder::new(token, intents)
        .application_id(app_id)
        .framework(framework.build());

    let mut client = client_builder.register_songbird().await?;
    client.start().await.map_err(Into::into)
}

/// DM the configured owner that the bot came up. Failures are logged, never fatal.
async fn notify_owner_startup(
    ctx: &serenity::Context,
    data: &Data,
    ready: &serenity::Ready,
    command_count: usize,
) {
    let owner_id = serenity::UserId::new(data.config.owner_id);

    let embed = serenity::CreateEmbed::new()
        .title("🤖 Bot Started Successfully")
        .description(format!("**{}** is now online and ready!", ready.user.name))
        .field(
            "Status",
            format!(
                "• Connected to **{}** guilds\n• Registered **{}** commands",
                ready.guilds.len(),
                command_count
            ),
            false,
        )
        .color(0x00ff00)
        .timestamp(serenity::Timestamp::now());

    match owner_id.to_user(ctx).await {
        Ok(owner) => {
            if let Err(e) = owner
                .dm(ctx, serenity::CreateMessage::new().embed(embed))
                .await
            {
                error!("Failed to send startup DM to owner: {}", e);
            }
        }
        Err(e) => error!("Failed to fetch owner {}: {}", owner_id, e),
    }
}
