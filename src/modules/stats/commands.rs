use super::{embeds::stats_embed, models::StatsKind};
use crate::database::Database;
use crate::modules::{
    destiny::{membership, ApiError, DestinyApi, Membership},
    messages::{reply_manager, ReplyError, ReplyManager},
    register::database::RegistrationDatabase,
};
use crate::{Context, Error};
use poise::{command, serenity_prelude::UserId};
use serde_json::Value;
use tracing::{debug, warn};

pub const STATS_UNAVAILABLE: &str = "Sorry, I can't seem to retrieve those stats right now";

/// Display PvP stats across all characters on an account
///
/// `stats pvp` shows your own stats on your registered platform,
/// `stats pvp Asal#1502 bnet` a player on Battle.net and
/// `stats pvp @user [platform]` a registered user's.
#[command(prefix_command, check = "within_rate_limit", category = "Stats")]
pub async fn pvp(
    ctx: Context<'_>,
    #[description = "Player name or @mention"] username: Option<String>,
    #[description = "xbox, playstation, pc or steam"] platform: Option<String>,
) -> Result<(), Error> {
    show_stats(ctx, StatsKind::Pvp, username, platform).await
}

/// Display PvE stats across all characters on an account
#[command(prefix_command, check = "within_rate_limit", category = "Stats")]
pub async fn pve(
    ctx: Context<'_>,
    #[description = "Player name or @mention"] username: Option<String>,
    #[description = "xbox, playstation, pc or steam"] platform: Option<String>,
) -> Result<(), Error> {
    show_stats(ctx, StatsKind::Pve, username, platform).await
}

/// Display Trials of the Nine stats across all characters on an account
#[command(prefix_command, check = "within_rate_limit", category = "Stats")]
pub async fn trials(
    ctx: Context<'_>,
    #[description = "Player name or @mention"] username: Option<String>,
    #[description = "xbox, playstation, pc or steam"] platform: Option<String>,
) -> Result<(), Error> {
    show_stats(ctx, StatsKind::Trials, username, platform).await
}

/// Display Iron Banner stats across all characters on an account
#[command(prefix_command, check = "within_rate_limit", category = "Stats")]
pub async fn ib(
    ctx: Context<'_>,
    #[description = "Player name or @mention"] username: Option<String>,
    #[description = "xbox, playstation, pc or steam"] platform: Option<String>,
) -> Result<(), Error> {
    show_stats(ctx, StatsKind::IronBanner, username, platform).await
}

/// Display Rumble stats across all characters on an account
#[command(prefix_command, check = "within_rate_limit", category = "Stats")]
pub async fn rumble(
    ctx: Context<'_>,
    #[description = "Player name or @mention"] username: Option<String>,
    #[description = "xbox, playstation, pc or steam"] platform: Option<String>,
) -> Result<(), Error> {
    show_stats(ctx, StatsKind::Rumble, username, platform).await
}

/// Display Doubles stats across all characters on an account
#[command(prefix_command, check = "within_rate_limit", category = "Stats")]
pub async fn doubles(
    ctx: Context<'_>,
    #[description = "Player name or @mention"] username: Option<String>,
    #[description = "xbox, playstation, pc or steam"] platform: Option<String>,
) -> Result<(), Error> {
    show_stats(ctx, StatsKind::Doubles, username, platform).await
}

/// Display Mayhem stats across all characters on an account
#[command(prefix_command, check = "within_rate_limit", category = "Stats")]
pub async fn mayhem(
    ctx: Context<'_>,
    #[description = "Player name or @mention"] username: Option<String>,
    #[description = "xbox, playstation, pc or steam"] platform: Option<String>,
) -> Result<(), Error> {
    show_stats(ctx, StatsKind::Mayhem, username, platform).await
}

/// Shared allowance of the stats commands: a couple of lookups per user every few seconds.
async fn within_rate_limit(ctx: Context<'_>) -> Result<bool, Error> {
    Ok(ctx.data().stats_limiter.try_acquire(ctx.author().id).await)
}

async fn show_stats(
    ctx: Context<'_>,
    kind: StatsKind,
    username: Option<String>,
    platform: Option<String>,
) -> Result<(), Error> {
    let mut manager = reply_manager(ctx);
    if let Err(e) = ctx.channel_id().broadcast_typing(ctx.http()).await {
        debug!("Failed to trigger typing in {}: {}", ctx.channel_id(), e);
    }

    let data = ctx.data();
    let outcome = fetch_and_reply(
        &mut manager,
        &*data.destiny,
        &data.dbs.registrations,
        ctx.author().id,
        kind,
        username.as_deref(),
        platform.as_deref(),
    )
    .await;

    Ok(manager.conclude(outcome).await?)
}

/// Resolves the requested player and replies with their stats, or with why
/// they could not be looked up.
pub async fn fetch_and_reply(
    manager: &mut ReplyManager,
    client: &dyn DestinyApi,
    registrations: &Database<RegistrationDatabase>,
    caller: UserId,
    kind: StatsKind,
    username: Option<&str>,
    platform: Option<&str>,
) -> Result<(), ReplyError> {
    let resolved = membership::resolve(client, registrations, caller, username, platform).await;
    let membership = match resolved {
        Ok(membership) => membership,
        Err(e) => {
            manager.say(e.to_string()).await?;
            return Ok(());
        }
    };

    let stats = client
        .get_historical_stats(
            membership.platform,
            &membership.membership_id,
            &["General"],
            kind.modes(),
        )
        .await;

    render_stats(manager, kind, &membership, stats).await
}

/// Replies with the stats card, or with an apology when there is nothing to show.
pub async fn render_stats(
    manager: &mut ReplyManager,
    kind: StatsKind,
    membership: &Membership,
    stats: Result<Value, ApiError>,
) -> Result<(), ReplyError> {
    let embed = match stats {
        Ok(document) => stats_embed(kind, &document, membership),
        Err(e) => {
            warn!(
                "Fetching {:?} stats for {} failed: {}",
                kind, membership.membership_id, e
            );
            None
        }
    };

    match embed {
        Some(embed) => manager.send_embed(embed).await?,
        None => manager.say(STATS_UNAVAILABLE).await?,
    };
    Ok(())
}
