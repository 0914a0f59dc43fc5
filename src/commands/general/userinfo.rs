use ::serenity::all::CreateEmbed;
use poise::{CreateReply, serenity_prelude as serenity};

use crate::utils::database;
use crate::{CommandResult, Context};

/// Show information about a user
#[poise::command(slash_command, category = "General")]
pub async fn userinfo(
    ctx: Context<'_>,
    #[description = "User to inspect (defaults to you)"] user: Option<serenity::User>,
) -> CommandResult {
    let user = user.unwrap_or_else(|| ctx.author().clone());

    let member = match ctx.guild_id() {
        Some(guild_id) => guild_id.member(ctx, user.id).await.ok(),
        None => None,
    };

    let mut embed = CreateEmbed::new()
        .title(user.name.clone())
        .thumbnail(user.face())
        .field("User ID", user.id.to_string(), true)
        .field(
            "Account Created",
            format!("<t:{}:D>", user.id.created_at().unix_timestamp()),
            true,
        )
        .color(0x00ff00);

    if let Some(member) = &member {
        if let Some(joined_at) = member.joined_at {
            embed = embed.field(
                "Joined Server",
                format!("<t:{}:D>", joined_at.unix_timestamp()),
                true,
            );
        }
        embed = embed.field("Roles", member.roles.len().to_string(), true);
    }

    let records = database::get_records(user.id);
    if !records.is_empty() {
        embed = embed.field("Game Records", format_records(&records), false);
    }

    ctx.send(CreateReply::default().embed(embed)).await?;

    Ok(())
}

fn format_records(records: &[database::GameRecord]) -> String {
    records
        .iter()
        .map(|record| {
            format!(
                "**{}** — {}W / {}L / {}D",
                record.game, record.wins, record.losses, record.draws
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
