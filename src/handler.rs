// src/handler.rs

//! Command and button handling, independent of the chat transport.
//!
//! Every user-visible outcome is decided here; the bot adapter only delivers
//! the returned [`Reply`].

use std::sync::Arc;

use crate::models::{Config, ConversationId, Messages, PriceList};
use crate::pipeline::{CallbackAction, Controls, RenderedPage, paginate, render};
use crate::services::PriceSource;
use crate::storage::SessionStore;
use crate::utils::get_domain;

/// Outcome of a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A page of listings with its controls
    Page(RenderedPage),
    /// The fetch produced nothing; the session was left untouched
    Unavailable(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Page(page) => &page.text,
            Reply::Unavailable(text) => text,
        }
    }

    pub fn controls(&self) -> Option<&Controls> {
        match self {
            Reply::Page(page) => Some(&page.controls),
            Reply::Unavailable(_) => None,
        }
    }
}

/// Ties the fetcher, the session store and the renderer together.
pub struct PriceHandler {
    source: Arc<dyn PriceSource>,
    sessions: Arc<dyn SessionStore>,
    messages: Messages,
    source_name: String,
}

impl PriceHandler {
    pub fn new(
        source: Arc<dyn PriceSource>,
        sessions: Arc<dyn SessionStore>,
        messages: Messages,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            source,
            sessions,
            messages,
            source_name: source_name.into(),
        }
    }

    /// Build a handler whose attribution is the scraped site's domain.
    pub fn from_config(
        config: &Config,
        source: Arc<dyn PriceSource>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let source_name =
            get_domain(&config.scraper.url).unwrap_or_else(|| config.scraper.url.clone());
        Self::new(source, sessions, config.messages.clone(), source_name)
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn welcome(&self) -> &str {
        &self.messages.welcome
    }

    pub fn help(&self) -> &str {
        &self.messages.help
    }

    /// Fetch fresh prices, store them and show the first page.
    ///
    /// An empty fetch leaves the stored list as it was.
    pub async fn show_prices(&self, conversation: ConversationId) -> Reply {
        let list = self.source.fetch_or_empty().await;
        if list.is_empty() {
            log::warn!("No prices to show for conversation {}", conversation);
            return Reply::Unavailable(self.messages.fetch_failed.clone());
        }

        let reply = Reply::Page(self.render_page(&list, 0));
        self.sessions.set(conversation, list).await;
        reply
    }

    /// React to a tapped button.
    pub async fn handle_action(
        &self,
        conversation: ConversationId,
        action: CallbackAction,
    ) -> Reply {
        match action {
            CallbackAction::Refresh => self.show_prices(conversation).await,
            CallbackAction::GoToPage(index) => {
                log::debug!("Conversation {} -> page {}", conversation, index);
                match self.sessions.get(conversation).await {
                    Some(list) => Reply::Page(self.render_page(&list, index)),
                    None => Reply::Page(self.render_page(&PriceList::default(), index)),
                }
            }
        }
    }

    fn render_page(&self, list: &PriceList, index: usize) -> RenderedPage {
        render(&paginate(list, index), &self.messages, &self.source_name)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::FetchError;
    use crate::models::CarRecord;
    use crate::storage::MemorySessionStore;

    /// Source that returns queued results in order, then empty lists.
    struct ScriptedSource {
        results: Mutex<Vec<Result<PriceList, FetchError>>>,
    }

    impl ScriptedSource {
        fn new(mut results: Vec<Result<PriceList, FetchError>>) -> Arc<Self> {
            results.reverse();
            Arc::new(Self {
                results: Mutex::new(results),
            })
        }
    }

    #[async_trait]
    impl PriceSource for ScriptedSource {
        async fn fetch(&self) -> Result<PriceList, FetchError> {
            self.results
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(PriceList::default()))
        }
    }

    fn records(prefix: &str, n: usize) -> PriceList {
        (0..n)
            .map(|i| CarRecord {
                title: format!("{prefix} {i}"),
                year: "1402".to_string(),
                price: format!("{i}"),
                fetched_at: "2024-01-01 00:00:00".to_string(),
            })
            .collect()
    }

    // reqwest errors can't be built by hand; any variant collapses the same way
    fn failed_fetch() -> FetchError {
        FetchError::Selector {
            selector: ".car-price-list".to_string(),
            message: "simulated failure".to_string(),
        }
    }

    fn handler(source: Arc<ScriptedSource>, store: Arc<MemorySessionStore>) -> PriceHandler {
        PriceHandler::from_config(&Config::default(), source, store)
    }

    const CHAT: ConversationId = ConversationId(42);

    #[tokio::test]
    async fn test_show_prices_stores_and_renders_first_page() {
        let store = Arc::new(MemorySessionStore::new());
        let handler = handler(ScriptedSource::new(vec![Ok(records("car", 12))]), store.clone());

        let reply = handler.show_prices(CHAT).await;

        assert!(reply.text().contains("📄 صفحه 1 از 3"));
        assert!(reply.text().contains("🌐 منبع: mashinbank.com"));
        assert_eq!(store.get(CHAT).await.unwrap().len(), 12);
        let controls = reply.controls().unwrap();
        assert!(controls.find(CallbackAction::GoToPage(1)).is_some());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_session() {
        let store = Arc::new(MemorySessionStore::new());
        let handler = handler(
            ScriptedSource::new(vec![Ok(records("old", 3)), Err(failed_fetch())]),
            store.clone(),
        );

        handler.show_prices(CHAT).await;
        let reply = handler.handle_action(CHAT, CallbackAction::Refresh).await;

        assert_eq!(reply, Reply::Unavailable(Messages::default().fetch_failed));
        assert!(reply.controls().is_none());
        let kept = store.get(CHAT).await.unwrap();
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0].title, "old 0");
    }

    #[tokio::test]
    async fn test_first_fetch_failure_creates_no_session() {
        let store = Arc::new(MemorySessionStore::new());
        let handler = handler(ScriptedSource::new(vec![Err(failed_fetch())]), store.clone());

        let reply = handler.show_prices(CHAT).await;

        assert!(matches!(reply, Reply::Unavailable(_)));
        assert!(store.get(CHAT).await.is_none());
    }

    #[tokio::test]
    async fn test_next_from_first_of_two_pages() {
        let store = Arc::new(MemorySessionStore::new());
        let handler = handler(ScriptedSource::new(vec![Ok(records("car", 8))]), store);

        handler.show_prices(CHAT).await;
        let reply = handler.handle_action(CHAT, CallbackAction::GoToPage(1)).await;

        assert!(reply.text().contains("📄 صفحه 2 از 2"));
        assert!(reply.text().contains("car 7"));
        let controls = reply.controls().unwrap();
        assert!(controls.find(CallbackAction::GoToPage(0)).is_some());
        assert!(controls.find(CallbackAction::GoToPage(2)).is_none());
        assert!(controls.find(CallbackAction::Refresh).is_some());
    }

    #[tokio::test]
    async fn test_navigation_without_session_is_empty_page() {
        let store = Arc::new(MemorySessionStore::new());
        let handler = handler(ScriptedSource::new(vec![]), store.clone());

        let reply = handler.handle_action(CHAT, CallbackAction::GoToPage(0)).await;

        assert!(reply.text().contains("📄 صفحه 1 از 1"));
        assert!(!reply.text().contains("🚗"));
        assert!(store.get(CHAT).await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_replaces_and_resets() {
        let store = Arc::new(MemorySessionStore::new());
        let handler = handler(
            ScriptedSource::new(vec![Ok(records("old", 12)), Ok(records("new", 2))]),
            store.clone(),
        );

        handler.show_prices(CHAT).await;
        handler.handle_action(CHAT, CallbackAction::GoToPage(2)).await;
        let reply = handler.handle_action(CHAT, CallbackAction::Refresh).await;

        assert!(reply.text().contains("new 1"));
        assert!(reply.text().contains("📄 صفحه 1 از 1"));
        assert_eq!(store.get(CHAT).await.unwrap()[0].title, "new 0");
    }

    #[tokio::test]
    async fn test_navigation_does_not_refetch() {
        let store = Arc::new(MemorySessionStore::new());
        let source = ScriptedSource::new(vec![Ok(records("car", 6)), Ok(records("other", 1))]);
        let handler = handler(source.clone(), store);

        handler.show_prices(CHAT).await;
        handler.handle_action(CHAT, CallbackAction::GoToPage(1)).await;

        assert_eq!(source.results.lock().unwrap().len(), 1);
    }
}
