//! Service layer for the bot.
//!
//! This module contains the price fetching logic (`PriceFetcher`) and the
//! `PriceSource` seam the handler depends on.

mod prices;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::PriceList;

pub use prices::PriceFetcher;

/// Anything that can produce a fresh price list.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the current listings.
    async fn fetch(&self) -> Result<PriceList, FetchError>;

    /// Fetch, collapsing every failure into an empty list.
    async fn fetch_or_empty(&self) -> PriceList {
        match self.fetch().await {
            Ok(list) => list,
            Err(error) => {
                log::warn!("Price fetch failed: {}", error);
                PriceList::default()
            }
        }
    }
}
