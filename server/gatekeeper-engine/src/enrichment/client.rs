//! Completion backends: "given a prompt, return text or an error".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::EnrichmentError;

#[async_trait]
pub trait Completion: Send + Sync {
  async fn complete(&self, prompt: &str) -> Result<String, EnrichmentError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
  model: &'a str,
  messages: Vec<Message<'a>>,
  max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
  role: &'static str,
  content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
  #[serde(default)]
  choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
  message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
  #[serde(default)]
  content: Option<String>,
}

/// OpenAI-compatible chat-completions client (Groq by default). One attempt per call, no retries.
pub struct GroqClient {
  http: reqwest::Client,
  api_key: String,
  api_url: String,
  model: String,
  max_tokens: u32,
}

impl GroqClient {
  pub fn new(api_key: impl Into<String>, config: &Config) -> Result<Self, EnrichmentError> {
    let http = reqwest::Client::builder().timeout(config.timeout).build()?;
    Ok(Self {
      http,
      api_key: api_key.into(),
      api_url: config.api_url.clone(),
      model: config.model.clone(),
      max_tokens: config.max_tokens,
    })
  }
}

#[async_trait]
impl Completion for GroqClient {
  async fn complete(&self, prompt: &str) -> Result<String, EnrichmentError> {
    let request = ChatRequest {
      model: &self.model,
      messages: vec![Message {
        role: "user",
        content: prompt,
      }],
      max_tokens: self.max_tokens,
    };

    let response = self
      .http
      .post(&self.api_url)
      .bearer_auth(&self.api_key)
      .json(&request)
      .send()
      .await?;

    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
      return Err(EnrichmentError::Status {
        status: status.as_u16(),
        body: text,
      });
    }

    parse_chat_response(&text)
  }
}

/// First choice's message content, trimmed.
fn parse_chat_response(body: &str) -> Result<String, EnrichmentError> {
  let parsed: ChatResponse = serde_json::from_str(body)?;
  parsed
    .choices
    .into_iter()
    .next()
    .and_then(|c| c.message.content)
    .map(|s| s.trim().to_string())
    .ok_or(EnrichmentError::Empty)
}
