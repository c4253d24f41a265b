//! LLM Client: the single point of entry for all provider calls in the optimizer.
//!
//! Handlers never talk to a provider API directly; they go through `ResumeOptimizer`,
//! which `LlmClient` implements over reqwest. Calls are not retried: a provider error is
//! returned to the caller as-is.
//!
//! Models are hardcoded per provider.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

use prompts::{build_system_prompt, build_user_prompt};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Provider
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Claude,
    OpenAI,
    OpenRouter,
    Gemini,
}

#[derive(Debug, Error)]
#[error("Unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl Provider {
    pub fn model(&self) -> &'static str {
        match self {
            Provider::Claude => "claude-sonnet-4-20250514",
            Provider::OpenAI => "gpt-4o",
            Provider::OpenRouter => "anthropic/claude-sonnet-4",
            Provider::Gemini => "gemini-1.5-pro",
        }
    }

    /// Prefix used when a provider failure is surfaced to the client.
    pub fn error_tag(&self) -> &'static str {
        match self {
            Provider::Claude => "Claude API Error",
            Provider::OpenAI => "OpenAI API Error",
            Provider::OpenRouter => "OpenRouter API Error",
            Provider::Gemini => "Gemini API Error",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Claude => "Claude",
            Provider::OpenAI => "OpenAI",
            Provider::OpenRouter => "OpenRouter",
            Provider::Gemini => "Gemini",
        };
        f.write_str(name)
    }
}

/// Accepts short names and the UI display names ("Claude (Anthropic)", "OpenAI (GPT-4)",
/// "Gemini (Google)"), case-insensitively.
impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claude" | "claude (anthropic)" | "anthropic" => Ok(Provider::Claude),
            "openai" | "openai (gpt-4)" => Ok(Provider::OpenAI),
            "openrouter" => Ok(Provider::OpenRouter),
            "gemini" | "gemini (google)" => Ok(Provider::Gemini),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Optimizer seam
// ────────────────────────────────────────────────────────────────────────────

/// Rewrites a resume for a job description. Returns the model's raw markdown,
/// Changes Summary included.
#[async_trait]
pub trait ResumeOptimizer: Send + Sync {
    async fn optimize(
        &self,
        provider: Provider,
        api_key: &str,
        resume: &str,
        job_description: &str,
    ) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Shared by OpenAI and OpenRouter.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}

/// All four providers report errors as `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The production optimizer. Holds the system prompt built once from the rules asset.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    system_prompt: String,
}

impl LlmClient {
    pub fn new(rules: &str, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            system_prompt: build_system_prompt(rules),
        })
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Sends the request and returns the raw body of a successful response.
    async fn send(&self, provider: Provider, request: RequestBuilder) -> Result<String, LlmError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%provider, status = status.as_u16(), "Provider returned an error status");
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    async fn call_claude(&self, api_key: &str, user_prompt: &str) -> Result<String, LlmError> {
        let body = AnthropicRequest {
            model: Provider::Claude.model(),
            max_tokens: MAX_TOKENS,
            system: &self.system_prompt,
            messages: vec![ChatMessage {
                role: "user",
                content: user_prompt,
            }],
        };
        let request = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let raw = self.send(Provider::Claude, request).await?;
        claude_text(&raw)
    }

    async fn call_chat_completion(
        &self,
        provider: Provider,
        url: &str,
        api_key: &str,
        user_prompt: &str,
    ) -> Result<String, LlmError> {
        let body = ChatCompletionRequest {
            model: provider.model(),
            max_tokens: MAX_TOKENS,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
        };
        let request = self.client.post(url).bearer_auth(api_key).json(&body);

        let raw = self.send(provider, request).await?;
        chat_completion_text(&raw)
    }

    async fn call_gemini(&self, api_key: &str, user_prompt: &str) -> Result<String, LlmError> {
        // Gemini gets the system prompt inlined ahead of the user prompt.
        let prompt = format!("{}\n\n{}", self.system_prompt, user_prompt);
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: &prompt }],
            }],
        };
        let url = format!(
            "{GEMINI_API_BASE}/{}:generateContent",
            Provider::Gemini.model()
        );
        let request = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body);

        let raw = self.send(Provider::Gemini, request).await?;
        gemini_text(&raw)
    }
}

#[async_trait]
impl ResumeOptimizer for LlmClient {
    async fn optimize(
        &self,
        provider: Provider,
        api_key: &str,
        resume: &str,
        job_description: &str,
    ) -> Result<String, LlmError> {
        let user_prompt = build_user_prompt(resume, job_description);
        debug!(%provider, model = provider.model(), prompt_bytes = user_prompt.len(), "Calling provider");

        let text = match provider {
            Provider::Claude => self.call_claude(api_key, &user_prompt).await?,
            Provider::OpenAI => {
                self.call_chat_completion(provider, OPENAI_API_URL, api_key, &user_prompt)
                    .await?
            }
            Provider::OpenRouter => {
                self.call_chat_completion(provider, OPENROUTER_API_URL, api_key, &user_prompt)
                    .await?
            }
            Provider::Gemini => self.call_gemini(api_key, &user_prompt).await?,
        };

        debug!(%provider, response_bytes = text.len(), "Provider call succeeded");
        Ok(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response extraction
// ────────────────────────────────────────────────────────────────────────────

fn non_empty(text: String) -> Result<String, LlmError> {
    if text.trim().is_empty() {
        Err(LlmError::EmptyContent)
    } else {
        Ok(text)
    }
}

/// Text of the first `text` content block.
fn claude_text(raw: &str) -> Result<String, LlmError> {
    let response: AnthropicResponse = serde_json::from_str(raw)?;
    if let Some(usage) = &response.usage {
        debug!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "Claude token usage"
        );
    }
    let text = response
        .content
        .into_iter()
        .find(|b| b.block_type == "text")
        .and_then(|b| b.text)
        .ok_or(LlmError::EmptyContent)?;
    non_empty(text)
}

fn chat_completion_text(raw: &str) -> Result<String, LlmError> {
    let response: ChatCompletionResponse = serde_json::from_str(raw)?;
    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(LlmError::EmptyContent)?;
    non_empty(text)
}

/// Concatenates the text parts of the first candidate.
fn gemini_text(raw: &str) -> Result<String, LlmError> {
    let response: GeminiResponse = serde_json::from_str(raw)?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    non_empty(text)
}
