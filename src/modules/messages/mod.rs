pub mod manager;
pub mod platform;
#[cfg(test)]
pub mod testing;

pub use manager::{Prompt, ReplyError, ReplyManager};
pub use platform::{PlatformMessage, SerenityPlatform};

use crate::Context;
use std::sync::Arc;

/// Fallback reply when a command fails after it started talking.
pub const GENERIC_FAILURE: &str = "Something went wrong while running that command";

/// Builds the reply manager for a command invocation. Prefix invocations
/// also track the triggering message so it is cleaned up with the replies.
pub fn reply_manager(ctx: Context<'_>) -> ReplyManager {
    let private = ctx.guild_id().is_none();
    let platform = Arc::new(SerenityPlatform::new(ctx.serenity_context().clone(), private));
    let mut manager = ReplyManager::new(
        platform,
        ctx.author().id,
        ctx.channel_id(),
        ctx.data().config.messages.clone(),
    );

    if let poise::Context::Prefix(prefix) = ctx {
        manager.track(PlatformMessage::from_message(prefix.msg, private));
    }

    manager
}
