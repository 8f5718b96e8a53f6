//! In-memory [`DestinyApi`] with a fixed roster of players.

use super::{
    client::{ApiError, DestinyApi, UserInfo},
    Platform,
};
use async_trait::async_trait;
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Mutex,
    },
};

#[derive(Default)]
pub struct FakeDestiny {
    players: Mutex<HashMap<(Platform, String), UserInfo>>,
    stats: Mutex<Option<Value>>,
    down: AtomicBool,
    searches: AtomicU64,
}

impl FakeDestiny {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_player(&self, platform: Platform, display_name: &str, membership_id: &str) {
        self.players.lock().unwrap().insert(
            (platform, display_name.to_string()),
            UserInfo {
                membership_id: membership_id.to_string(),
                membership_type: platform.membership_type(),
                display_name: display_name.to_string(),
            },
        );
    }

    pub fn set_stats(&self, stats: Value) {
        *self.stats.lock().unwrap() = Some(stats);
    }

    /// Every following request fails as if Bungie.net were unreachable.
    pub fn go_down(&self) {
        self.down.store(true, Ordering::SeqCst);
    }

    pub fn searches(&self) -> u64 {
        self.searches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DestinyApi for FakeDestiny {
    async fn get_historical_stats(
        &self,
        _platform: Platform,
        _membership_id: &str,
        _groups: &[&str],
        _modes: &[u32],
    ) -> Result<Value, ApiError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(ApiError::EmptyResponse);
        }
        self.stats.lock().unwrap().clone().ok_or(ApiError::EmptyResponse)
    }

    async fn search_player(
        &self,
        platform: Platform,
        display_name: &str,
    ) -> Result<Option<UserInfo>, ApiError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            return Err(ApiError::Bungie {
                code: 5,
                status: "SystemDisabled".into(),
                message: "Maintenance".into(),
            });
        }
        Ok(self
            .players
            .lock()
            .unwrap()
            .get(&(platform, display_name.to_string()))
            .cloned())
    }
}
