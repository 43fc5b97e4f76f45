//! Conversation store.
//!
//! Holds every conversation, the active conversation id and the two
//! store-wide counters. Counters only ever grow, so ids stay unique across
//! conversations and across `clear`.

use serde::{Deserialize, Serialize};

use crate::api::SidebarPayload;
use crate::define_id_type;
use crate::error::{FloatChatError, FloatChatResult};

define_id_type!(u64, ConversationId);
define_id_type!(u64, MessageId);

pub const NEW_CHAT_TITLE: &str = "New Chat";
const TITLE_KEEP_CHARS: usize = 33;
const TITLE_MAX_CHARS: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_payload: Option<SidebarPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    fn new(id: ConversationId) -> Self {
        Self {
            id,
            title: NEW_CHAT_TITLE.to_string(),
            messages: Vec::new(),
        }
    }

    /// Retitle from the first user message.
    pub fn refresh_title(&mut self) {
        self.title = derive_title(&self.messages);
    }
}

/// First user message, trimmed and cut to 33 characters, with an ellipsis when
/// the trimmed message is longer than 36 characters.
pub fn derive_title(messages: &[Message]) -> String {
    let first = messages
        .iter()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.trim())
        .filter(|text| !text.is_empty());

    match first {
        None => NEW_CHAT_TITLE.to_string(),
        Some(text) => {
            let head: String = text.chars().take(TITLE_KEEP_CHARS).collect();
            let mut title = head.trim().to_string();
            if text.chars().count() > TITLE_MAX_CHARS {
                title.push('…');
            }
            title
        }
    }
}

/// All conversations, most recently active first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationStore {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    #[serde(default)]
    pub active_id: Option<ConversationId>,
    #[serde(default, alias = "counter")]
    pub conversation_counter: u64,
    #[serde(default)]
    pub message_counter: u64,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation(&self, id: ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active_id.and_then(|id| self.conversation(id))
    }

    fn position(&self, id: ConversationId) -> Option<usize> {
        self.conversations.iter().position(|c| c.id == id)
    }

    fn move_to_front(&mut self, index: usize) {
        if index > 0 {
            let conversation = self.conversations.remove(index);
            self.conversations.insert(0, conversation);
        }
    }

    /// Active conversation, creating an empty one at the front if there is
    /// none (or the active id no longer resolves).
    pub fn ensure_active(&mut self) -> &mut Conversation {
        let index = match self.active_id.and_then(|id| self.position(id)) {
            Some(index) => index,
            None => {
                self.conversation_counter += 1;
                let id = ConversationId::new(self.conversation_counter);
                self.conversations.insert(0, Conversation::new(id));
                self.active_id = Some(id);
                0
            }
        };
        &mut self.conversations[index]
    }

    /// Start a fresh conversation and make it active.
    pub fn new_chat(&mut self) -> ConversationId {
        self.active_id = None;
        let conversation = self.ensure_active();
        conversation.refresh_title();
        conversation.id
    }

    /// Make `id` active and move it to the front.
    pub fn select(&mut self, id: ConversationId) -> FloatChatResult<()> {
        let index = self
            .position(id)
            .ok_or_else(|| FloatChatError::NotFound(format!("conversation {}", id)))?;
        self.move_to_front(index);
        self.active_id = Some(id);
        Ok(())
    }

    fn next_message_id(&mut self) -> MessageId {
        self.message_counter += 1;
        MessageId::new(self.message_counter)
    }

    /// Append a message to the active conversation, retitle it and move it
    /// to the front.
    pub fn push_message(
        &mut self,
        role: Role,
        content: impl Into<String>,
        sidebar_payload: Option<SidebarPayload>,
    ) -> MessageId {
        let id = self.next_message_id();
        let conversation = self.ensure_active();
        conversation.messages.push(Message {
            id,
            role,
            content: content.into(),
            sidebar_payload,
        });
        conversation.refresh_title();
        let conversation_id = conversation.id;

        if let Some(index) = self.position(conversation_id) {
            self.move_to_front(index);
        }
        self.active_id = Some(conversation_id);
        id
    }

    /// Sidebar payload stored on message `id`, searching every conversation.
    pub fn find_message_payload(&self, id: MessageId) -> Option<&SidebarPayload> {
        self.conversations
            .iter()
            .flat_map(|c| c.messages.iter())
            .find(|m| m.id == id)
            .and_then(|m| m.sidebar_payload.as_ref())
    }

    /// Messages whose content contains `keyword`, case-insensitively.
    pub fn search(&self, keyword: &str) -> Vec<&Message> {
        let needle = keyword.to_lowercase();
        self.conversations
            .iter()
            .flat_map(|c| c.messages.iter())
            .filter(|m| m.content.to_lowercase().contains(&needle))
            .collect()
    }

    /// Drop every conversation. Counters are kept so ids are never reused.
    pub fn clear(&mut self) -> usize {
        let removed = self.conversations.len();
        self.conversations.clear();
        self.active_id = None;
        removed
    }
}
