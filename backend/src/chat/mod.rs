//! Conversations: the in-memory store, its JSON history file, transcript
//! helpers and the chat completion providers.

pub mod history;
pub mod provider;
pub mod store;
pub mod transcript;

pub use history::{HistoryFile, HistoryLock};
pub use provider::{build_provider, ChatMessage, ChatProvider, EchoProvider, OpenAiProvider};
pub use store::{Conversation, ConversationId, ConversationStore, Message, MessageId, Role};

use chrono::NaiveDate;

use crate::api::{ChatTurn, ConversationSummary};
use crate::models::{FilterSpec, FloatRecord};
use crate::services::catalog::build_filtered_dataset;
use crate::services::responder::respond;

/// Unfiltered catalogs of `regions`, used as the chat base dataset.
pub fn chat_base_dataset<S: AsRef<str>>(regions: &[S], today: NaiveDate) -> Vec<FloatRecord> {
    build_filtered_dataset(regions, &FilterSpec::new(), today)
}

/// Record `text` as a user message in the active conversation, answer it
/// against `base` and record the answer with its sidebar payload.
///
/// Returns `None` (and records nothing) when the sanitized text is blank.
pub fn process_chat_message(
    store: &mut ConversationStore,
    text: &str,
    base: &[FloatRecord],
    today: NaiveDate,
) -> Option<ChatTurn> {
    let message = transcript::sanitize_user_input(text);
    if message.is_empty() {
        return None;
    }

    let user_message_id = store.push_message(Role::User, message.as_str(), None);
    let response = respond(&message, base, today);
    let assistant_message_id =
        store.push_message(Role::Assistant, response.text.as_str(), response.sidebar.clone());
    let conversation_id = store.ensure_active().id;

    Some(ChatTurn {
        conversation_id,
        user_message_id,
        assistant_message_id,
        response,
    })
}

/// Sidebar list of conversations, most recent first.
pub fn list_conversations(store: &ConversationStore) -> Vec<ConversationSummary> {
    store
        .conversations
        .iter()
        .map(|c| ConversationSummary {
            id: c.id,
            title: c.title.clone(),
            message_count: c.messages.len(),
            active: store.active_id == Some(c.id),
        })
        .collect()
}

/// Provider-facing history of a conversation.
pub fn provider_messages(conversation: &Conversation) -> Vec<ChatMessage> {
    conversation
        .messages
        .iter()
        .map(|m| ChatMessage::new(m.role, m.content.as_str()))
        .collect()
}
