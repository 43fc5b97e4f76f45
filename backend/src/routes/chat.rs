use serde::{Deserialize, Serialize};

use super::classify::QueryClassification;
use super::plots::PlotData;
use crate::chat::store::{ConversationId, MessageId};

// =========================================================
// Chat types + routes
// =========================================================

/// Map/sidebar state attached to an assistant message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarPayload {
    pub region: String,
    #[serde(default)]
    pub dropdowns: Vec<(String, String)>,
    pub source_query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<QueryClassification>,
    #[serde(default)]
    pub filtered_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plots: Vec<PlotData>,
}

impl SidebarPayload {
    pub fn dropdown(&self, key: &str) -> Option<&str> {
        self.dropdowns
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Result of answering one chat query against the base dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
    pub classification: QueryClassification,
    pub filtered_count: usize,
    pub map_needed: bool,
    pub plots: Vec<PlotData>,
    pub sidebar: Option<SidebarPayload>,
}

/// One user message and the assistant answer stored for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub conversation_id: ConversationId,
    pub user_message_id: MessageId,
    pub assistant_message_id: MessageId,
    pub response: ChatResponse,
}

/// Sidebar list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub title: String,
    pub message_count: usize,
    pub active: bool,
}

/// Suggested query bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickQuery {
    pub key: &'static str,
    pub label: &'static str,
    pub query: &'static str,
}

pub const POST_CHAT: &str = "post_chat";
pub const STREAM_CHAT: &str = "stream_chat";
pub const LIST_CONVERSATIONS: &str = "list_conversations";
pub const NEW_CONVERSATION: &str = "new_conversation";
pub const SELECT_CONVERSATION: &str = "select_conversation";
pub const CLEAR_CONVERSATIONS: &str = "clear_conversations";
pub const GET_MESSAGE_PAYLOAD: &str = "get_message_payload";
pub const LIST_QUICK_QUERIES: &str = "list_quick_queries";
pub const GET_TRANSCRIPT: &str = "get_transcript";
pub const SEARCH_MESSAGES: &str = "search_messages";
