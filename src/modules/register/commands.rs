use super::database::{Registration, RegistrationDatabase};
use crate::database::Database;
use crate::modules::{
    destiny::{membership, DestinyApi, LookupError, Platform},
    messages::{reply_manager, Prompt, ReplyManager},
};
use crate::{Context, Error};
use poise::command;
use poise::serenity_prelude::UserId;
use std::time::SystemTime;
use tracing::info;

const PLATFORM_QUESTION: &str =
    "Which platform do you play on? Answer with `xbox`, `playstation`, `pc` or `steam`";

/// Register your Destiny 2 account with the bot
///
/// The bot asks for your platform and in-game name. Once registered, the
/// stats commands default to your account.
#[command(prefix_command, user_cooldown = 5, category = "Account")]
pub async fn register(ctx: Context<'_>) -> Result<(), Error> {
    let mut manager = reply_manager(ctx);
    let data = ctx.data();

    let outcome = run_registration(
        &mut manager,
        &*data.destiny,
        &data.dbs.registrations,
        ctx.author().id,
    )
    .await;

    manager.conclude(outcome).await
}

/// Walks the owner through registration. Cancelled or abandoned prompts end
/// the flow quietly since the manager has already cleaned up.
pub async fn run_registration(
    manager: &mut ReplyManager,
    client: &dyn DestinyApi,
    registrations: &Database<RegistrationDatabase>,
    user: UserId,
) -> Result<(), Error> {
    let answer = match manager.prompt_and_wait(PLATFORM_QUESTION).await? {
        Prompt::Answered(answer) => answer,
        Prompt::Cancelled | Prompt::TimedOut => return Ok(()),
    };

    let platform = match answer.content.parse::<Platform>() {
        Ok(platform) => platform,
        Err(unknown) => {
            manager
                .say(LookupError::UnknownPlatform(unknown).to_string())
                .await?;
            return Ok(());
        }
    };

    let answer = match manager
        .prompt_and_wait(format!("What's your in-game name on {}?", platform))
        .await?
    {
        Prompt::Answered(answer) => answer,
        Prompt::Cancelled | Prompt::TimedOut => return Ok(()),
    };

    let found = match membership::search(client, platform, answer.content.trim()).await {
        Ok(found) => found,
        Err(e) => {
            manager.say(e.to_string()).await?;
            return Ok(());
        }
    };

    registrations
        .register(
            user.get(),
            Registration {
                platform: found.platform,
                membership_id: found.membership_id.clone(),
                display_name: found.display_name.clone(),
                registered_at: SystemTime::now(),
            },
        )
        .await?;
    info!(
        "Registered {} as {} on {}",
        user, found.display_name, found.platform
    );

    manager
        .say(format!(
            "You're all set! I registered **{}** on {}",
            found.display_name, found.platform
        ))
        .await?;
    Ok(())
}
