use super::{client::DestinyApi, Platform};
use crate::{
    database::Database,
    modules::register::database::{Registration, RegistrationDatabase},
    utils::parse_mention,
};
use poise::serenity_prelude::UserId;
use thiserror::Error;
use tracing::warn;

/// A Destiny 2 account that stats can be fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub platform: Platform,
    pub membership_id: String,
    pub display_name: String,
}

impl From<Registration> for Membership {
    fn from(registration: Registration) -> Self {
        Self {
            platform: registration.platform,
            membership_id: registration.membership_id,
            display_name: registration.display_name,
        }
    }
}

/// Why a player could not be resolved. The message is shown to users as is.
#[derive(Error, Debug, PartialEq)]
pub enum LookupError {
    #[error("You don't have a Destiny 2 account registered yet. Use the `register` command first!")]
    NotRegistered,
    #[error("That user hasn't registered a Destiny 2 account")]
    MentionNotRegistered,
    #[error("I don't know the platform `{0}`. Try xbox, playstation, pc or steam")]
    UnknownPlatform(String),
    #[error("Please tell me which platform to look on, for example `Asal#1502 pc`")]
    MissingPlatform,
    #[error("I couldn't find a Guardian named **{name}** on {platform}")]
    PlayerNotFound { name: String, platform: Platform },
    #[error("Sorry, I can't look up players right now")]
    Upstream,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Caller,
    Mentioned(UserId),
    Named(String),
}

impl Target {
    pub fn parse(username: Option<&str>) -> Self {
        match username.map(str::trim).filter(|u| !u.is_empty()) {
            None => Self::Caller,
            Some(name) => parse_mention(name)
                .map(Self::Mentioned)
                .unwrap_or_else(|| Self::Named(name.to_string())),
        }
    }
}

pub async fn search(
    client: &dyn DestinyApi,
    platform: Platform,
    name: &str,
) -> Result<Membership, LookupError> {
    let found = client.search_player(platform, name).await.map_err(|e| {
        warn!("Player search for {} on {} failed: {}", name, platform, e);
        LookupError::Upstream
    })?;

    found
        .and_then(|info| {
            Some(Membership {
                platform: Platform::from_membership_type(info.membership_type)?,
                membership_id: info.membership_id,
                display_name: info.display_name,
            })
        })
        .ok_or_else(|| LookupError::PlayerNotFound {
            name: name.to_string(),
            platform,
        })
}

// A registered account is reused as is unless another platform was asked for.
async fn from_registration(
    client: &dyn DestinyApi,
    registration: Registration,
    platform: Option<Platform>,
) -> Result<Membership, LookupError> {
    match platform {
        Some(platform) if platform != registration.platform => {
            search(client, platform, &registration.display_name).await
        }
        _ => Ok(registration.into()),
    }
}

/// Resolves the `[username] [platform]` arguments shared by the stats commands.
pub async fn resolve(
    client: &dyn DestinyApi,
    registrations: &Database<RegistrationDatabase>,
    caller: UserId,
    username: Option<&str>,
    platform: Option<&str>,
) -> Result<Membership, LookupError> {
    let platform = platform
        .map(str::parse::<Platform>)
        .transpose()
        .map_err(LookupError::UnknownPlatform)?;

    match Target::parse(username) {
        Target::Caller => {
            let registration = registrations
                .get_registration(caller.get())
                .await
                .ok_or(LookupError::NotRegistered)?;
            from_registration(client, registration, platform).await
        }
        Target::Mentioned(user) => {
            let registration = registrations
                .get_registration(user.get())
                .await
                .ok_or(LookupError::MentionNotRegistered)?;
            from_registration(client, registration, platform).await
        }
        Target::Named(name) => {
            let platform = match platform {
                Some(platform) => platform,
                None => registrations
                    .get_registration(caller.get())
                    .await
                    .map(|r| r.platform)
                    .ok_or(LookupError::MissingPlatform)?,
            };
            search(client, platform, &name).await
        }
    }
}
