//! Chat completion providers.
//!
//! A provider turns a conversation into a lazy stream of text fragments. The
//! stream is finite and cannot be restarted; dropping it stops polling but the
//! remote completion may keep running.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::store::Role;
use super::transcript::sanitize_user_input;
use crate::config::ChatSettings;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider credentials are missing: {0}")]
    MissingCredentials(String),

    #[error("Provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode provider response: {0}")]
    Decode(String),
}

/// One turn of the conversation sent to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

pub type ReplyStream = BoxStream<'static, Result<String, ProviderError>>;

#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Stream the reply to `messages` fragment by fragment.
    fn stream_reply(&self, messages: &[ChatMessage]) -> ReplyStream;

    /// Whole reply, concatenating the streamed fragments.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        let mut stream = self.stream_reply(messages);
        let mut reply = String::new();
        while let Some(fragment) = stream.next().await {
            reply.push_str(&fragment?);
        }
        Ok(reply)
    }
}

/// Deterministic offline provider: echoes the latest user message.
#[derive(Debug, Clone, Default)]
pub struct EchoProvider {
    delay: Duration,
}

impl EchoProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// `"Echo: {latest user message}"`, or `"Echo: "` when there is none.
    pub fn reply_for(messages: &[ChatMessage]) -> String {
        let latest = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| sanitize_user_input(&m.content))
            .unwrap_or_default();
        format!("Echo: {}", latest)
    }
}

#[async_trait]
impl ChatProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn stream_reply(&self, messages: &[ChatMessage]) -> ReplyStream {
        let reply = Self::reply_for(messages);
        let delay = self.delay;
        Box::pin(async_stream::stream! {
            for (i, word) in reply.split_whitespace().enumerate() {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                if i == 0 {
                    yield Ok(word.to_string());
                } else {
                    yield Ok(format!(" {}", word));
                }
            }
        })
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// One line of a server-sent completion stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    Delta(String),
    Done,
    Skip,
}

/// Parse a single `data:` line of an OpenAI-style completion stream.
pub fn parse_sse_line(line: &str) -> Result<SseLine, ProviderError> {
    let line = line.trim();
    let Some(data) = line.strip_prefix("data:") else {
        return Ok(SseLine::Skip);
    };
    let data = data.trim();
    if data == "[DONE]" {
        return Ok(SseLine::Done);
    }
    if data.is_empty() {
        return Ok(SseLine::Skip);
    }

    let chunk: CompletionChunk =
        serde_json::from_str(data).map_err(|e| ProviderError::Decode(e.to_string()))?;
    let text: String = chunk
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();
    if text.is_empty() {
        Ok(SseLine::Skip)
    } else {
        Ok(SseLine::Delta(text))
    }
}

/// Provider for any OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    pub fn from_settings(settings: &ChatSettings) -> Result<Self, ProviderError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProviderError::MissingCredentials("OPENAI_API_KEY is not set".into()))?;
        Ok(Self::new(api_key, &settings.model, &settings.api_base))
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn stream_reply(&self, messages: &[ChatMessage]) -> ReplyStream {
        let request = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: self.model.clone(),
                messages: messages.to_vec(),
                stream: true,
            });

        Box::pin(async_stream::stream! {
            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    yield Err(ProviderError::Http(e));
                    return;
                }
            };

            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Failed to read error body".to_string());
                yield Err(ProviderError::Status { status: status.as_u16(), body });
                return;
            }

            let mut bytes = response.bytes_stream();
            let mut buffer: Vec<u8> = Vec::new();
            while let Some(chunk) = bytes.next().await {
                match chunk {
                    Ok(chunk) => buffer.extend_from_slice(&chunk),
                    Err(e) => {
                        yield Err(ProviderError::Http(e));
                        return;
                    }
                }

                while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                    let line: Vec<u8> = buffer.drain(..=pos).collect();
                    match parse_sse_line(&String::from_utf8_lossy(&line)) {
                        Ok(SseLine::Delta(text)) => yield Ok(text),
                        Ok(SseLine::Done) => return,
                        Ok(SseLine::Skip) => {}
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    }
                }
            }
        })
    }
}

/// Provider named by `settings`, falling back to [`EchoProvider`] when the
/// provider is unknown or cannot be configured.
pub fn build_provider(settings: &ChatSettings) -> Arc<dyn ChatProvider> {
    let echo = || -> Arc<dyn ChatProvider> {
        Arc::new(EchoProvider::with_delay(Duration::from_millis(settings.echo_delay_ms)))
    };

    match settings.provider.trim().to_lowercase().as_str() {
        "echo" | "" => echo(),
        "openai" => match OpenAiProvider::from_settings(settings) {
            Ok(provider) => {
                log::info!("Using OpenAI-compatible provider with model {}", settings.model);
                Arc::new(provider)
            }
            Err(e) => {
                log::warn!("{}; falling back to echo provider", e);
                echo()
            }
        },
        other => {
            log::warn!("Unknown chat provider '{}'; falling back to echo provider", other);
            echo()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_streams_word_by_word() {
        let provider = EchoProvider::new();
        let messages = vec![
            ChatMessage::user("first question"),
            ChatMessage::new(Role::Assistant, "an answer"),
            ChatMessage::user("  salinity   near\tequator "),
        ];
        let fragments: Vec<String> = provider
            .stream_reply(&messages)
            .map(|f| f.unwrap())
            .collect()
            .await;
        assert_eq!(fragments, vec!["Echo:", " salinity", " near", " equator"]);
        assert_eq!(provider.complete(&messages).await.unwrap(), "Echo: salinity near equator");
    }

    #[tokio::test]
    async fn test_echo_without_user_message() {
        let provider = EchoProvider::with_delay(Duration::from_millis(1));
        let reply = provider
            .complete(&[ChatMessage::new(Role::System, "be brief")])
            .await
            .unwrap();
        assert_eq!(reply, "Echo:");
    }

    #[test]
    fn test_parse_sse_lines() {
        let delta = r#"data: {"choices":[{"delta":{"content":"Hel"}}]}"#;
        assert_eq!(parse_sse_line(delta).unwrap(), SseLine::Delta("Hel".into()));
        assert_eq!(parse_sse_line("data: [DONE]").unwrap(), SseLine::Done);
        assert_eq!(parse_sse_line(": keep-alive").unwrap(), SseLine::Skip);
        assert_eq!(parse_sse_line("").unwrap(), SseLine::Skip);
        let role_only = r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert_eq!(parse_sse_line(role_only).unwrap(), SseLine::Skip);
        assert!(matches!(parse_sse_line("data: {oops"), Err(ProviderError::Decode(_))));
    }

    #[test]
    fn test_build_provider_falls_back_to_echo() {
        let settings = ChatSettings {
            provider: "openai".into(),
            api_key: None,
            ..ChatSettings::default()
        };
        assert_eq!(build_provider(&settings).name(), "echo");

        let settings = ChatSettings {
            provider: "mystery".into(),
            ..ChatSettings::default()
        };
        assert_eq!(build_provider(&settings).name(), "echo");

        let settings = ChatSettings {
            provider: "OpenAI".into(),
            api_key: Some("sk-test".into()),
            ..ChatSettings::default()
        };
        assert_eq!(build_provider(&settings).name(), "openai");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = OpenAiProvider::new("k", "m", "http://localhost:1234/v1/");
        assert_eq!(provider.endpoint(), "http://localhost:1234/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_yields_error_item() {
        let provider = OpenAiProvider::new("k", "m", "http://127.0.0.1:9");
        let items: Vec<_> = provider
            .stream_reply(&[ChatMessage::user("hi")])
            .collect()
            .await;
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(ProviderError::Http(_))));
    }
}
