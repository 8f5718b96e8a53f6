use super::{
    platform::{ChatPlatform, Outgoing, PlatformError, PlatformMessage},
    GENERIC_FAILURE,
};
use crate::config::MessageSettings;
use futures::future::join_all;
use poise::serenity_prelude::{ChannelId, CreateEmbed, Mentionable, UserId};
use std::{fmt::Display, sync::Arc};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ReplyError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error("this interaction has already been cleaned up")]
    Closed,
}

/// Outcome of [`ReplyManager::prompt_and_wait`].
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    Answered(PlatformMessage),
    /// The owner started another command instead of answering.
    Cancelled,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Active,
    Cleaning,
    Done,
}

/// Sends the replies of a single command invocation and removes them again
/// once the invocation is over.
pub struct ReplyManager {
    platform: Arc<dyn ChatPlatform>,
    owner: UserId,
    channel: ChannelId,
    settings: MessageSettings,
    tracked: Vec<PlatformMessage>,
    state: State,
}

impl ReplyManager {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        owner: UserId,
        channel: ChannelId,
        settings: MessageSettings,
    ) -> Self {
        Self {
            platform,
            owner,
            channel,
            settings,
            tracked: Vec::new(),
            state: State::Active,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn tracked(&self) -> &[PlatformMessage] {
        &self.tracked
    }

    /// Adds `message` to the cleanup set. Messages already tracked are ignored.
    pub fn track(&mut self, message: PlatformMessage) {
        if self.state != State::Active {
            return;
        }
        if self.tracked.iter().any(|m| m.id == message.id) {
            return;
        }
        self.tracked.push(message);
    }

    fn ensure_active(&self) -> Result<(), ReplyError> {
        match self.state {
            State::Active => Ok(()),
            _ => Err(ReplyError::Closed),
        }
    }

    /// Sends `content` to the invocation channel. Text is prefixed with a
    /// mention of the owner, embeds are sent as is. With `persist` unset the
    /// message is left in the channel for good.
    pub async fn reply(
        &mut self,
        content: Outgoing,
        persist: bool,
    ) -> Result<PlatformMessage, ReplyError> {
        self.ensure_active()?;

        let payload = match content {
            Outgoing::Text(text) => Outgoing::Text(format!("{}: {}", self.owner.mention(), text)),
            embed => embed,
        };

        let message = self.platform.send_message(self.channel, payload).await?;
        if persist {
            self.track(message.clone());
        }
        Ok(message)
    }

    pub async fn say(&mut self, text: impl Into<String>) -> Result<PlatformMessage, ReplyError> {
        self.reply(Outgoing::Text(text.into()), true).await
    }

    pub async fn say_untracked(
        &mut self,
        text: impl Into<String>,
    ) -> Result<PlatformMessage, ReplyError> {
        self.reply(Outgoing::Text(text.into()), false).await
    }

    pub async fn send_embed(&mut self, embed: CreateEmbed) -> Result<PlatformMessage, ReplyError> {
        self.reply(Outgoing::Embed(embed), true).await
    }

    /// Asks the owner something and waits for their next message in the channel.
    ///
    /// A reply starting with the command prefix means the owner moved on to
    /// another command: everything is cleaned up right away and
    /// [`Prompt::Cancelled`] is returned. A timeout is handled the same way.
    pub async fn prompt_and_wait(
        &mut self,
        content: impl Into<String>,
    ) -> Result<Prompt, ReplyError> {
        self.say(content).await?;

        let response = self
            .platform
            .wait_for_message(self.owner, self.channel, self.settings.prompt_timeout)
            .await;

        match response {
            None => {
                debug!("Prompt for {} in {} timed out", self.owner, self.channel);
                self.cleanup().await;
                Ok(Prompt::TimedOut)
            }
            Some(message) if message.content.starts_with(&self.settings.command_prefix) => {
                debug!(
                    "Prompt for {} in {} cancelled by a new command",
                    self.owner, self.channel
                );
                self.cleanup().await;
                Ok(Prompt::Cancelled)
            }
            Some(message) => {
                self.track(message.clone());
                Ok(Prompt::Answered(message))
            }
        }
    }

    /// Deletes every tracked message outside of direct messages. Failures are
    /// logged and otherwise ignored. Only the first call does anything.
    pub async fn cleanup(&mut self) {
        if self.state != State::Active {
            return;
        }
        self.state = State::Cleaning;

        let messages = std::mem::take(&mut self.tracked);
        let platform = &self.platform;
        let deletions = messages
            .iter()
            .filter(|m| !m.is_private)
            .map(|message| async move {
                if let Err(e) = platform.delete_message(message).await {
                    warn!(
                        "Failed to delete message {} in {}: {}",
                        message.id, message.channel_id, e
                    );
                }
            });
        join_all(deletions).await;

        debug!(
            "Cleaned up {} messages for {} in {}",
            messages.len(),
            self.owner,
            self.channel
        );
        self.state = State::Done;
    }

    /// Ends the invocation: waits out the cleanup delay, then cleans up.
    pub async fn finish(&mut self) {
        if self.state != State::Active {
            return;
        }
        tokio::time::sleep(self.settings.cleanup_delay).await;
        self.cleanup().await;
    }

    /// Finishes the invocation with the command's `outcome`. A failure gets a
    /// tracked apology first, and is handed back to the caller afterwards.
    pub async fn conclude<T, E: Display>(&mut self, outcome: Result<T, E>) -> Result<T, E> {
        if let Err(e) = &outcome {
            debug!("Command for {} in {} failed: {}", self.owner, self.channel, e);
        }
        if outcome.is_err() {
            if let Err(e) = self.say(GENERIC_FAILURE).await {
                warn!("Failed to apologise to {} in {}: {}", self.owner, self.channel, e);
            }
        }
        self.finish().await;
        outcome
    }
}
