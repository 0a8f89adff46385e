//! Car listing data structures.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// One car price entry scraped from the listing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarRecord {
    /// Display name of the vehicle
    pub title: String,

    /// Model year as printed by the site, or the configured fallback
    pub year: String,

    /// Price text, kept exactly as the site formats it
    pub price: String,

    /// Time of the fetch that produced this record
    pub fetched_at: String,
}

/// Records from a single fetch, in document order.
///
/// Read-only once built; a refresh produces a new list.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PriceList(Vec<CarRecord>);

impl PriceList {
    pub fn new(records: Vec<CarRecord>) -> Self {
        Self(records)
    }
}

impl Deref for PriceList {
    type Target = [CarRecord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<CarRecord>> for PriceList {
    fn from(records: Vec<CarRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<CarRecord> for PriceList {
    fn from_iter<I: IntoIterator<Item = CarRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
