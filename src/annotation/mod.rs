//! Translation and grammar annotations from a chat-completion language model.
//!
//! Each request carries a fixed system instruction and a user message listing the chunk's
//! sentences numbered from 1. The model's reply is returned verbatim; nothing in this crate
//! parses it.

use crate::config::Config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Instruction sent as the system message of every annotation request.
pub const SYSTEM_PROMPT: &str = "You are a French learning assistant. \
First, translate the entire sentence to English. \
Then translate every word to English, giving the genre of nouns and tense of verbs. \
Finally, explain the grammar in the sentence.";

/// Errors surfaced while requesting annotations.
#[derive(Debug, Error)]
pub enum AnnotationClientError {
    /// Provider could not be reached.
    #[error("Annotation provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Annotation request failed: {0}")]
    RequestFailed(String),
    /// Provider response could not be used.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Interface implemented by annotation providers.
#[async_trait]
pub trait AnnotationClient: Send + Sync {
    /// Produce translation and grammar notes for an ordered group of sentences.
    async fn annotate(&self, sentences: &[String]) -> Result<String, AnnotationClientError>;
}

/// Render sentences as the numbered list sent in the user message.
pub fn numbered_sentences(sentences: &[String]) -> String {
    sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| format!("{}. {sentence}", index + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Annotation client for OpenAI-compatible `chat/completions` endpoints.
pub struct OpenAiAnnotationClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAnnotationClient {
    /// Construct a client for the given endpoint, credentials, and model.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, AnnotationClientError> {
        let http = Client::builder()
            .user_agent(concat!("grammar-notes/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| {
                AnnotationClientError::ProviderUnavailable(format!(
                    "failed to construct HTTP client: {error}"
                ))
            })?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Construct a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, AnnotationClientError> {
        Self::new(
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
            config.annotation_model.clone(),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl AnnotationClient for OpenAiAnnotationClient {
    async fn annotate(&self, sentences: &[String]) -> Result<String, AnnotationClientError> {
        let user_message = numbered_sentences(sentences);
        let payload = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_message,
                },
            ],
        };

        tracing::debug!(
            model = %self.model,
            sentences = sentences.len(),
            "Requesting annotations"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                AnnotationClientError::ProviderUnavailable(format!(
                    "failed to reach {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AnnotationClientError::ProviderUnavailable(format!(
                "endpoint {} returned 404",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnnotationClientError::RequestFailed(format!(
                "provider returned {status}: {body}"
            )));
        }

        let body: ChatResponse = response.json().await.map_err(|error| {
            AnnotationClientError::InvalidResponse(format!(
                "failed to decode chat completion: {error}"
            ))
        })?;

        body.choices
            .into_iter()
            .next()
            .ok_or_else(|| AnnotationClientError::InvalidResponse("response has no choices".into()))?
            .message
            .content
            .ok_or_else(|| {
                AnnotationClientError::InvalidResponse("response message has no content".into())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;

    fn sentences(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn client(server: &MockServer) -> OpenAiAnnotationClient {
        OpenAiAnnotationClient::new(server.base_url(), "sk-test", "gpt-4o-mini").expect("client")
    }

    #[test]
    fn numbers_sentences_from_one() {
        let rendered = numbered_sentences(&sentences(&["Bonjour.", "Ça va?"]));
        assert_eq!(rendered, "1. Bonjour.\n2. Ça va?");
    }

    #[test]
    fn numbering_an_empty_chunk_is_empty() {
        assert_eq!(numbered_sentences(&[]), "");
    }

    #[tokio::test]
    async fn sends_system_prompt_and_numbered_sentences() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("authorization", "Bearer sk-test")
                    .json_body(json!({
                        "model": "gpt-4o-mini",
                        "messages": [
                            { "role": "system", "content": SYSTEM_PROMPT },
                            { "role": "user", "content": "1. Bonjour.\n2. Comment ça va?" }
                        ]
                    }));
                then.status(200).json_body(json!({
                    "choices": [
                        { "index": 0, "message": { "role": "assistant", "content": "Hello.\n" } }
                    ]
                }));
            })
            .await;

        let notes = client(&server)
            .annotate(&sentences(&["Bonjour.", "Comment ça va?"]))
            .await
            .expect("annotations");

        mock.assert_async().await;
        assert_eq!(notes, "Hello.\n");
    }

    #[tokio::test]
    async fn error_status_is_reported_with_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(500).body("boom");
            })
            .await;

        let error = client(&server)
            .annotate(&sentences(&["Bonjour."]))
            .await
            .expect_err("error response");

        assert!(
            matches!(&error, AnnotationClientError::RequestFailed(message) if message.contains("500") && message.contains("boom")),
            "{error}"
        );
    }

    #[tokio::test]
    async fn missing_content_is_invalid() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({
                    "choices": [{ "message": { "role": "assistant", "content": null } }]
                }));
            })
            .await;

        let error = client(&server)
            .annotate(&sentences(&["Bonjour."]))
            .await
            .expect_err("null content");

        assert!(matches!(error, AnnotationClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn empty_choices_are_invalid() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({ "choices": [] }));
            })
            .await;

        let error = client(&server)
            .annotate(&sentences(&["Bonjour."]))
            .await
            .expect_err("no choices");

        assert!(matches!(error, AnnotationClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_unavailable() {
        let client = OpenAiAnnotationClient::new("http://127.0.0.1:1", "sk-test", "gpt-4o-mini")
            .expect("client");

        let error = client
            .annotate(&sentences(&["Bonjour."]))
            .await
            .expect_err("connection refused");

        assert!(matches!(error, AnnotationClientError::ProviderUnavailable(_)));
    }
}
