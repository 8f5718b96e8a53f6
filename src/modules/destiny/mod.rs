pub mod client;
pub mod membership;
pub mod platform;
#[cfg(test)]
pub mod testing;

pub use client::{ApiError, BungieClient, DestinyApi};
pub use membership::{LookupError, Membership};
pub use platform::Platform;
