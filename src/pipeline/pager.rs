// src/pipeline/pager.rs

//! Fixed-size pagination over a price list.

use crate::models::CarRecord;

/// Listings shown per page.
pub const PAGE_SIZE: usize = 5;

/// One window over a record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    /// Records visible on this page
    pub items: &'a [CarRecord],
    /// Zero-based page index
    pub index: usize,
    /// Total page count, at least 1
    pub total_pages: usize,
}

impl Page<'_> {
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index.saturating_add(1) < self.total_pages
    }
}

/// Number of pages needed for `len` records; an empty list still has one page.
pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

/// Slice out page `index`.
///
/// Indexes past the end yield an empty page rather than panicking.
pub fn paginate(records: &[CarRecord], index: usize) -> Page<'_> {
    let start = index.saturating_mul(PAGE_SIZE).min(records.len());
    let end = start.saturating_add(PAGE_SIZE).min(records.len());

    Page {
        items: &records[start..end],
        index,
        total_pages: total_pages(records.len()),
    }
}
