// src/pipeline/action.rs

//! Callback payloads carried by inline buttons.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

const PAGE_PREFIX: &str = "page_";
const REFRESH: &str = "refresh";

/// Highest page index a payload may name. A list this long is never scraped.
pub const MAX_PAGE: usize = 9_999;

/// What a tapped button asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Show the given zero-based page of the stored list
    GoToPage(usize),
    /// Fetch again and start over at page 0
    Refresh,
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackAction::GoToPage(page) => write!(f, "{PAGE_PREFIX}{page}"),
            CallbackAction::Refresh => f.write_str(REFRESH),
        }
    }
}

impl FromStr for CallbackAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == REFRESH {
            return Ok(CallbackAction::Refresh);
        }
        s.strip_prefix(PAGE_PREFIX)
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|&page| page <= MAX_PAGE)
            .map(CallbackAction::GoToPage)
            .ok_or_else(|| AppError::validation(format!("unknown callback payload '{s}'")))
    }
}
