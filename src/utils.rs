use poise::serenity_prelude::UserId;
use std::{
    collections::{HashMap, VecDeque},
    time::Duration,
};
use tokio::{sync::Mutex, time::Instant};

/// Declares a struct together with a `Default` impl built from inline
/// field defaults. Fields without `= expr` fall back to `Default::default()`.
#[macro_export]
macro_rules! default_struct {
    (
        $(#[$struct_meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $type:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$struct_meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $type
            ),*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field: $crate::default_struct!(@default $($default)?)
                    ),*
                }
            }
        }
    };
    (@default) => {
        Default::default()
    };
    (@default $expr:expr) => {
        $expr
    };
}

/// Parses a raw user mention (`<@123>` or the legacy nickname form `<@!123>`).
pub fn parse_mention(input: &str) -> Option<UserId> {
    let inner = input.trim().strip_prefix("<@")?.strip_suffix('>')?;
    let digits = inner.strip_prefix('!').unwrap_or(inner);
    match digits.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(id) => Some(UserId::new(id)),
    }
}

/// Allows each user `uses` invocations within any sliding `window`.
#[derive(Debug)]
pub struct RateLimiter {
    uses: usize,
    window: Duration,
    recent: Mutex<HashMap<UserId, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(uses: usize, window: Duration) -> Self {
        Self {
            uses,
            window,
            recent: Mutex::new(HashMap::new()),
        }
    }

    /// Records a use by `user`, or returns `false` when their allowance is spent.
    pub async fn try_acquire(&self, user: UserId) -> bool {
        let now = Instant::now();
        let mut recent = self.recent.lock().await;
        let history = recent.entry(user).or_default();
        while history
            .front()
            .is_some_and(|used| now.duration_since(*used) >= self.window)
        {
            history.pop_front();
        }

        if history.len() >= self.uses {
            return false;
        }
        history.push_back(now);
        true
    }
}
