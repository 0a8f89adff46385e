// src/models/mod.rs

//! Domain models for the bot.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod car;
mod config;
mod selectors;

// Re-export all public types
pub use car::{CarRecord, PriceList};
pub use config::{BotConfig, Config, Messages, ScraperConfig};
pub use selectors::ListingSelectors;

/// Identity of one chat thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationId(pub i64);

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
