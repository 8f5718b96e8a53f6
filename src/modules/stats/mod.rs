pub mod commands;
pub mod embeds;
pub mod models;

use crate::utils::RateLimiter;
use commands::*;
use poise::command;
use std::time::Duration;

/// Lookups each user may run across all stats commands per window.
const USES_PER_WINDOW: usize = 2;
const WINDOW: Duration = Duration::from_secs(5);

pub fn rate_limiter() -> RateLimiter {
    RateLimiter::new(USES_PER_WINDOW, WINDOW)
}

/// 📊 Display various Destiny 2 stats
#[command(
    prefix_command,
    subcommands("pvp", "pve", "trials", "ib", "rumble", "doubles", "mayhem"),
    category = "Stats"
)]
pub async fn stats(ctx: crate::Context<'_>) -> Result<(), crate::Error> {
    poise::builtins::help(ctx, Some("stats"), Default::default()).await?;
    Ok(())
}
