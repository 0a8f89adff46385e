// src/services/prices.rs

//! Price fetcher service.
//!
//! Downloads the listing page and extracts car records using configured CSS
//! selectors.

use async_trait::async_trait;
use chrono::FixedOffset;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, FetchError, Result};
use crate::models::{CarRecord, ListingSelectors, PriceList, ScraperConfig};
use crate::services::PriceSource;
use crate::utils::{http, offset_from_minutes, timestamp_now};

/// Compiled listing selectors.
struct Selectors {
    item: Selector,
    title: Selector,
    price: Selector,
    year: Selector,
}

impl Selectors {
    fn compile(selectors: &ListingSelectors) -> std::result::Result<Self, FetchError> {
        Ok(Self {
            item: parse_selector(&selectors.item_selector)?,
            title: parse_selector(&selectors.title_selector)?,
            price: parse_selector(&selectors.price_selector)?,
            year: parse_selector(&selectors.year_selector)?,
        })
    }
}

/// Service for fetching car prices from the listing page.
pub struct PriceFetcher {
    client: Client,
    url: String,
    selectors: Selectors,
    year_fallback: String,
    offset: FixedOffset,
}

impl PriceFetcher {
    /// Create a new price fetcher with the given configuration.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = http::create_async_client(config)?;
        let selectors = Selectors::compile(&config.selectors)?;
        let offset = offset_from_minutes(config.utc_offset_minutes).ok_or_else(|| {
            AppError::config(format!(
                "scraper.utc_offset_minutes out of range: {}",
                config.utc_offset_minutes
            ))
        })?;

        Ok(Self {
            client,
            url: config.url.clone(),
            selectors,
            year_fallback: config.year_fallback.clone(),
            offset,
        })
    }

    /// Extract every complete listing from a page.
    ///
    /// All records share `fetched_at`. Items missing a title or price are
    /// skipped.
    pub fn parse_listings(&self, html: &str, fetched_at: &str) -> PriceList {
        let document = Html::parse_document(html);
        let mut skipped = 0usize;

        let list: PriceList = document
            .select(&self.selectors.item)
            .filter_map(|item| {
                let record = self.parse_item(&item, fetched_at);
                if record.is_none() {
                    skipped += 1;
                }
                record
            })
            .collect();

        if skipped > 0 {
            log::debug!("Skipped {} incomplete listing(s)", skipped);
        }
        list
    }

    fn parse_item(&self, item: &ElementRef, fetched_at: &str) -> Option<CarRecord> {
        let title = select_text(item, &self.selectors.title)?;
        let price = select_text(item, &self.selectors.price)?;
        let year =
            select_text(item, &self.selectors.year).unwrap_or_else(|| self.year_fallback.clone());

        Some(CarRecord {
            title,
            year,
            price,
            fetched_at: fetched_at.to_string(),
        })
    }
}

#[async_trait]
impl PriceSource for PriceFetcher {
    async fn fetch(&self) -> std::result::Result<PriceList, FetchError> {
        log::info!("Fetching prices from {}", self.url);

        let html = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let fetched_at = timestamp_now(self.offset);
        let list = self.parse_listings(&html, &fetched_at);

        if list.is_empty() {
            log::warn!("No listings matched on {}", self.url);
        } else {
            log::info!("Fetched {} listing(s)", list.len());
        }
        Ok(list)
    }
}

/// Text of the first match with the ends trimmed, if non-empty.
///
/// Interior whitespace is left as the page has it.
fn select_text(item: &ElementRef, selector: &Selector) -> Option<String> {
    let element = item.select(selector).next()?;
    let text = element.text().collect::<String>().trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn parse_selector(s: &str) -> std::result::Result<Selector, FetchError> {
    Selector::parse(s).map_err(|e| FetchError::Selector {
        selector: s.to_string(),
        message: format!("{e:?}"),
    })
}
