//! Transcript helpers: input sanitizing and conversation export.

use super::store::Message;
use crate::error::FloatChatResult;

/// Replace ASCII control characters with spaces and trim.
pub fn sanitize_user_input(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// One `[role] content` line per message.
pub fn export_as_txt(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("[{}] {}", m.role.as_str(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_as_json(messages: &[Message]) -> FloatChatResult<String> {
    Ok(serde_json::to_string_pretty(messages)?)
}
