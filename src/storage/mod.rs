//! Per-conversation session storage.
//!
//! Each conversation owns at most one `PriceList`: the result of its latest
//! successful fetch. Navigation reads it, refresh replaces it wholesale.
//!
//! ```text
//! NoData ──fetch──▶ HasData ──refresh──▶ HasData (replaced)
//!                      └──────navigate──▶ HasData (unchanged)
//! ```

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{ConversationId, PriceList};

// Re-export for convenience
pub use memory::MemorySessionStore;

/// Trait for session storage backends.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The list last stored for `conversation`, if any.
    async fn get(&self, conversation: ConversationId) -> Option<Arc<PriceList>>;

    /// Replace the list stored for `conversation`.
    async fn set(&self, conversation: ConversationId, list: PriceList);
}
