use async_trait::async_trait;
use poise::serenity_prelude::{
    self as serenity, ChannelId, Context, CreateAllowedMentions, CreateEmbed, CreateMessage,
    Message, MessageCollector, MessageId, UserId,
};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

/// Payload of an outgoing message.
#[derive(Debug, Clone)]
pub enum Outgoing {
    Text(String),
    Embed(CreateEmbed),
}

/// What the reply manager needs to know about a message, sent or received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub author_id: UserId,
    pub content: String,
    /// Direct-message channel; never scrubbed.
    pub is_private: bool,
}

impl PlatformMessage {
    pub fn from_message(message: &Message, is_private: bool) -> Self {
        Self {
            id: message.id,
            channel_id: message.channel_id,
            author_id: message.author.id,
            content: message.content.clone(),
            is_private,
        }
    }
}

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    async fn send_message(
        &self,
        channel: ChannelId,
        payload: Outgoing,
    ) -> Result<PlatformMessage, PlatformError>;

    async fn delete_message(&self, message: &PlatformMessage) -> Result<(), PlatformError>;

    /// Resolves with the next message `author` posts in `channel`, or `None`
    /// once `timeout` runs out.
    async fn wait_for_message(
        &self,
        author: UserId,
        channel: ChannelId,
        timeout: Option<Duration>,
    ) -> Option<PlatformMessage>;
}

/// [`ChatPlatform`] backed by a live serenity gateway context, bound to the
/// channel kind of one invocation.
pub struct SerenityPlatform {
    ctx: Context,
    // REST responses carry no guild id, so privacy is taken from the invocation.
    private: bool,
}

impl SerenityPlatform {
    pub fn new(ctx: Context, private: bool) -> Self {
        Self { ctx, private }
    }
}

#[async_trait]
impl ChatPlatform for SerenityPlatform {
    async fn send_message(
        &self,
        channel: ChannelId,
        payload: Outgoing,
    ) -> Result<PlatformMessage, PlatformError> {
        let builder = match payload {
            Outgoing::Text(text) => CreateMessage::new().content(text),
            Outgoing::Embed(embed) => CreateMessage::new().embed(embed),
        }
        .allowed_mentions(CreateAllowedMentions::new().all_users(true).empty_roles());

        let message = channel.send_message(&self.ctx, builder).await?;
        Ok(PlatformMessage::from_message(&message, self.private))
    }

    async fn delete_message(&self, message: &PlatformMessage) -> Result<(), PlatformError> {
        message
            .channel_id
            .delete_message(&self.ctx, message.id)
            .await?;
        debug!("Deleted message {} in {}", message.id, message.channel_id);
        Ok(())
    }

    async fn wait_for_message(
        &self,
        author: UserId,
        channel: ChannelId,
        timeout: Option<Duration>,
    ) -> Option<PlatformMessage> {
        let mut collector = MessageCollector::new(&self.ctx)
            .author_id(author)
            .channel_id(channel);
        if let Some(timeout) = timeout {
            collector = collector.timeout(timeout);
        }

        let message = collector.next().await?;
        Some(PlatformMessage::from_message(&message, self.private))
    }
}
