pub mod commands;
pub mod database;

pub use commands::register;
