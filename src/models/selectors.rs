// src/models/selectors.rs

//! CSS selectors for scraping the price listing page.

use serde::{Deserialize, Serialize};

/// CSS selectors for scraping the price listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSelectors {
    /// Selector for each listing item on the page
    #[serde(default = "default_item")]
    pub item_selector: String,

    /// Selector for the vehicle name within an item
    #[serde(default = "default_title")]
    pub title_selector: String,

    /// Selector for the price within an item
    #[serde(default = "default_price")]
    pub price_selector: String,

    /// Selector for the model year within an item (optional in the markup)
    #[serde(default = "default_year")]
    pub year_selector: String,
}

fn default_item() -> String {
    ".car-price-list .car-price-item".to_string()
}

fn default_title() -> String {
    ".car-name".to_string()
}

fn default_price() -> String {
    ".car-price".to_string()
}

fn default_year() -> String {
    ".car-year".to_string()
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            item_selector: default_item(),
            title_selector: default_title(),
            price_selector: default_price(),
            year_selector: default_year(),
        }
    }
}

impl ListingSelectors {
    /// All selector strings, for validation.
    pub fn all(&self) -> [&str; 4] {
        [
            &self.item_selector,
            &self.title_selector,
            &self.price_selector,
            &self.year_selector,
        ]
    }
}
