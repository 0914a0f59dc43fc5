use ::serenity::all::CreateEmbed;
use poise::{CreateReply, serenity_prelude as serenity};

use crate::{CommandResult, Context};

/// Show information about this server
#[poise::command(slash_command, category = "General")]
pub async fn serverinfo(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.send(
            CreateReply::default()
                .content("This command can only be used in a server.")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    // Copy what we need out of the cache reference before any awaits.
    let snapshot = {
        let guild = ctx.guild().ok_or("Guild not found in cache")?;
        GuildSnapshot {
            name: guild.name.clone(),
            owner_id: guild.owner_id,
            member_count: guild.member_count,
            boost_tier: guild.premium_tier,
            boost_count: guild.premium_subscription_count.unwrap_or(0),
            icon_url: guild.icon_url(),
        }
    };

    let mut embed = CreateEmbed::new()
        .title(snapshot.name)
        .field("Server ID", guild_id.to_string(), true)
        .field("Owner", format!("<@{}>", snapshot.owner_id), true)
        .field("Members", snapshot.member_count.to_string(), true)
        .field(
            "Created",
            format!("<t:{}:D>", guild_id.created_at().unix_timestamp()),
            true,
        )
        .field(
            "Boosts",
            format!(
                "{} ({} boosts)",
                boost_tier_label(snapshot.boost_tier),
                snapshot.boost_count
            ),
            true,
        )
        .color(0x00ff00);

    if let Some(icon) = snapshot.icon_url {
        embed = embed.thumbnail(icon);
    }

    ctx.send(CreateReply::default().embed(embed)).await?;

    Ok(())
}

struct GuildSnapshot {
    name: String,
    owner_id: serenity::UserId,
    member_count: u64,
    boost_tier: serenity::PremiumTier,
    boost_count: u64,
    icon_url: Option<String>,
}

fn boost_tier_label(tier: serenity::PremiumTier) -> &'static str {
    match tier {
        serenity::PremiumTier::Tier0 => "No Level",
        serenity::PremiumTier::Tier1 => "Level 1",
        serenity::PremiumTier::Tier2 => "Level 2",
        serenity::PremiumTier::Tier3 => "Level 3",
        _ => "Unknown",
    }
}
