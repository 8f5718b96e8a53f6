use config::Config;
use databases::Databases;
use modules::{
    destiny::BungieClient,
    register::register,
    stats::{self, stats},
    utils::help,
};
use poise::serenity_prelude::{self as serenity, ActivityData};
use std::sync::Arc;
use tracing::{error, info, trace};
use tracing_subscriber::EnvFilter;
use utils::RateLimiter;

mod config;
mod database;
mod databases;
mod modules;
mod utils;

/// Shared state handed to every command.
#[derive(Debug)]
pub struct Data {
    pub config: Arc<Config>,
    pub dbs: Arc<Databases>,
    pub destiny: Arc<BungieClient>,
    pub stats_limiter: RateLimiter,
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

fn location(ctx: Context<'_>) -> String {
    ctx.guild_id()
        .map_or_else(|| "DM".to_string(), |id| id.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    info!("starting ghostbot");

    let config = Arc::new(Config::from_env()?);
    let dbs = Arc::new(Databases::open(&config.data_dir).await?);
    let destiny = Arc::new(BungieClient::new(config.bungie_api_key.clone())?);

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let data = Data {
        config: config.clone(),
        dbs,
        destiny,
        stats_limiter: stats::rate_limiter(),
    };

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions::<Data, Error> {
            commands: vec![help(), register(), stats()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.messages.command_prefix.clone()),
                mention_as_prefix: false,
                ..Default::default()
            },
            pre_command: |ctx| {
                Box::pin(async move {
                    trace!(
                        "Command {} used by {} in {}",
                        ctx.command().qualified_name,
                        ctx.author().tag(),
                        location(ctx)
                    );
                })
            },
            post_command: |ctx| {
                Box::pin(async move {
                    info!(
                        "Command {} completed for {} in {}",
                        ctx.command().qualified_name,
                        ctx.author().tag(),
                        location(ctx)
                    );
                })
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!(
                                "Command {} failed for {} in {}: {:?}",
                                ctx.command().qualified_name,
                                ctx.author().tag(),
                                location(ctx),
                                error
                            );
                        }
                        poise::FrameworkError::CooldownHit {
                            remaining_cooldown,
                            ctx,
                            ..
                        } => {
                            trace!(
                                "Command {} on cooldown for {} ({:?} left)",
                                ctx.command().qualified_name,
                                ctx.author().tag(),
                                remaining_cooldown
                            );
                        }
                        poise::FrameworkError::CommandCheckFailed {
                            error: None, ctx, ..
                        } => {
                            trace!(
                                "Command {} rate limited for {} in {}",
                                ctx.command().qualified_name,
                                ctx.author().tag(),
                                location(ctx)
                            );
                        }
                        err => error!("Other framework error: {:?}", err),
                    }
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, _framework| {
            Box::pin(async move {
                info!("connected as {}", ready.user.name);
                ctx.set_activity(Some(ActivityData::listening(format!(
                    "{}help",
                    data.config.messages.command_prefix
                ))));
                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}
