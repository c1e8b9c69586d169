pub mod client;
pub mod endpoints;
pub mod models;

pub use client::KaraokeClient;
pub use endpoints::{QueueEntryEndpoint, SettingsEndpoint};
pub use models::*;
