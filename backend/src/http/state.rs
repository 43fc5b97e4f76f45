//! Application state for the HTTP server.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use parking_lot::RwLock;

use crate::chat::{build_provider, chat_base_dataset, ChatProvider, ConversationStore, HistoryFile};
use crate::config::FloatChatConfig;
use crate::error::FloatChatResult;
use crate::models::FloatRecord;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Conversations; never held across an `.await`
    pub store: Arc<RwLock<ConversationStore>>,
    /// Chat completion provider for streamed replies
    pub provider: Arc<dyn ChatProvider>,
    /// History file, when persistence is enabled
    pub history: Option<Arc<HistoryFile>>,
    pub config: Arc<FloatChatConfig>,
}

impl AppState {
    pub fn new(
        store: ConversationStore,
        provider: Arc<dyn ChatProvider>,
        history: Option<HistoryFile>,
        config: FloatChatConfig,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            provider,
            history: history.map(Arc::new),
            config: Arc::new(config),
        }
    }

    /// State built from `config`: provider chosen by the chat settings and the
    /// store loaded from the configured history file.
    pub fn from_config(config: FloatChatConfig) -> Self {
        let provider = build_provider(&config.chat);
        let history = config.chat.history_path.clone().map(HistoryFile::new);
        let store = history
            .as_ref()
            .map(HistoryFile::load_or_default)
            .unwrap_or_default();
        Self::new(store, provider, history, config)
    }

    /// Write the current store to the history file, if there is one. The
    /// store is read while the history lock is held, so the last writer
    /// always saves the latest state.
    ///
    /// Blocking; call it from `spawn_blocking`.
    pub fn persist(&self) -> FloatChatResult<()> {
        if let Some(history) = &self.history {
            history.save_with(|| self.store.read().clone())?;
        }
        Ok(())
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Chat base dataset for the configured regions.
    pub fn chat_base(&self, today: NaiveDate) -> Vec<FloatRecord> {
        chat_base_dataset(&self.config.catalog.chat_regions, today)
    }
}
