//! In-memory session storage.
//!
//! Sessions live as long as the process. There is no TTL or capacity bound.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{ConversationId, PriceList};
use crate::storage::SessionStore;

/// Session store backed by a map in process memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<ConversationId, Arc<PriceList>>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, conversation: ConversationId) -> Option<Arc<PriceList>> {
        self.sessions.read().await.get(&conversation).cloned()
    }

    async fn set(&self, conversation: ConversationId, list: PriceList) {
        self.sessions
            .write()
            .await
            .insert(conversation, Arc::new(list));
    }
}
