pub mod destiny;
pub mod messages;
pub mod register;
pub mod stats;
pub mod utils;
