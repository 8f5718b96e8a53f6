//! In-memory [`ChatPlatform`] for exercising reply flows without Discord.

use super::platform::{ChatPlatform, Outgoing, PlatformError, PlatformMessage};
use async_trait::async_trait;
use poise::serenity_prelude::{self as serenity, ChannelId, CreateEmbed, MessageId, UserId};
use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::sync::mpsc;

const BOT: UserId = UserId::new(1);

pub struct FakePlatform {
    next_id: AtomicU64,
    sent: Mutex<Vec<Outgoing>>,
    deleted: Mutex<Vec<MessageId>>,
    delete_attempts: AtomicU64,
    failing: Mutex<HashSet<MessageId>>,
    fail_next_send: AtomicBool,
    private: bool,
    inbox_tx: mpsc::UnboundedSender<PlatformMessage>,
    inbox_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<PlatformMessage>>,
}

impl FakePlatform {
    pub fn new() -> Arc<Self> {
        Self::build(false)
    }

    /// A platform whose channel is a direct-message conversation.
    pub fn in_direct_messages() -> Arc<Self> {
        Self::build(true)
    }

    fn build(private: bool) -> Arc<Self> {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Arc::new(Self {
            next_id: AtomicU64::new(1_000),
            sent: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            delete_attempts: AtomicU64::new(0),
            failing: Mutex::new(HashSet::new()),
            fail_next_send: AtomicBool::new(false),
            private,
            inbox_tx,
            inbox_rx: tokio::sync::Mutex::new(inbox_rx),
        })
    }

    fn next_id(&self) -> MessageId {
        MessageId::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Queues a message as if `author` had typed it into `channel`.
    pub fn queue_incoming(&self, author: UserId, channel: ChannelId, content: &str) -> PlatformMessage {
        let message = PlatformMessage {
            id: self.next_id(),
            channel_id: channel,
            author_id: author,
            content: content.to_string(),
            is_private: self.private,
        };
        self.inbox_tx
            .send(message.clone())
            .expect("inbox receiver lives as long as the platform");
        message
    }

    pub fn fail_deletion_of(&self, id: MessageId) {
        self.failing.lock().unwrap().insert(id);
    }

    /// Makes the next send fail as if Discord rejected it.
    pub fn fail_next_send(&self) {
        self.fail_next_send.store(true, Ordering::SeqCst);
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter_map(|payload| match payload {
                Outgoing::Text(text) => Some(text.clone()),
                Outgoing::Embed(_) => None,
            })
            .collect()
    }

    pub fn sent_embeds(&self) -> Vec<CreateEmbed> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter_map(|payload| match payload {
                Outgoing::Embed(embed) => Some(embed.clone()),
                Outgoing::Text(_) => None,
            })
            .collect()
    }

    pub fn deleted(&self) -> Vec<MessageId> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn delete_attempts(&self) -> u64 {
        self.delete_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatPlatform for FakePlatform {
    async fn send_message(
        &self,
        channel: ChannelId,
        payload: Outgoing,
    ) -> Result<PlatformMessage, PlatformError> {
        if self.fail_next_send.swap(false, Ordering::SeqCst) {
            return Err(serenity::Error::Other("Missing Permissions").into());
        }
        let content = match &payload {
            Outgoing::Text(text) => text.clone(),
            Outgoing::Embed(_) => String::new(),
        };
        self.sent.lock().unwrap().push(payload);
        Ok(PlatformMessage {
            id: self.next_id(),
            channel_id: channel,
            author_id: BOT,
            content,
            is_private: self.private,
        })
    }

    async fn delete_message(&self, message: &PlatformMessage) -> Result<(), PlatformError> {
        self.delete_attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().unwrap().contains(&message.id) {
            return Err(serenity::Error::Other("Unknown Message").into());
        }
        self.deleted.lock().unwrap().push(message.id);
        Ok(())
    }

    async fn wait_for_message(
        &self,
        author: UserId,
        channel: ChannelId,
        timeout: Option<Duration>,
    ) -> Option<PlatformMessage> {
        let mut inbox = self.inbox_rx.lock().await;
        let next = async {
            loop {
                let message = inbox.recv().await?;
                if message.author_id == author && message.channel_id == channel {
                    return Some(message);
                }
            }
        };
        match timeout {
            Some(timeout) => tokio::time::timeout(timeout, next).await.ok().flatten(),
            None => next.await,
        }
    }
}
