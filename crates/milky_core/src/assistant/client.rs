//! HTTP client for the local generate endpoint.
//!
//! # Responsibility
//! - Send prompts to an Ollama-style `/api/generate` endpoint.
//! - Substitute the offline fallback line for every failure mode.
//!
//! # Invariants
//! - `ask` never surfaces an error; timeouts and retries beyond the built-in
//!   request timeout are a caller concern.
//! - The system instruction is prepended to caller-supplied context on every
//!   call.

use log::warn;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Reply surfaced when the local inference backend cannot be reached.
pub const OFFLINE_FALLBACK: &str = "Milky is offline. Ensure Ollama is running.";

const SYSTEM_PROMPT: &str = "You are Milky, an ADHD focus assistant. \
Your goal is to lower activation energy for tasks. \
Keep responses concise, supportive, and strictly formatted. \
Do NOT use emojis. Use bullet points for lists.";

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the local generate endpoint.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Endpoint root, without the `/api/generate` suffix.
    pub base_url: String,
    /// Model name the endpoint should run.
    pub model: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug)]
enum AskError {
    Http(String),
    BadStatus(u16),
    MalformedResponse(String),
}

impl Display for AskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(message) => write!(f, "http failure: {message}"),
            Self::BadStatus(code) => write!(f, "unexpected status {code}"),
            Self::MalformedResponse(message) => write!(f, "malformed response: {message}"),
        }
    }
}

impl Error for AskError {}

impl From<reqwest::Error> for AskError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.to_string())
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Async client for the assistant boundary.
#[derive(Clone)]
pub struct AssistantClient {
    http: Client,
    config: AssistantConfig,
}

impl AssistantClient {
    /// Builds a client with request and connect timeouts applied.
    pub fn new(config: AssistantConfig) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            http,
            config: AssistantConfig { base_url, ..config },
        }
    }

    /// Asks the assistant, resolving every failure to the offline line.
    ///
    /// `context` is free-form caller context appended to the fixed system
    /// instruction; pass an empty string when there is none.
    pub async fn ask(&self, prompt: &str, context: &str) -> String {
        match self.generate(prompt, context).await {
            Ok(text) => text,
            Err(err) => {
                warn!("event=assistant_ask module=assistant status=fallback error={err}");
                OFFLINE_FALLBACK.to_string()
            }
        }
    }

    async fn generate(&self, prompt: &str, context: &str) -> Result<String, AskError> {
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            system: compose_system(context),
            stream: false,
        };

        let response = self
            .http
            .post(format!("{}/api/generate", self.config.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AskError::BadStatus(status.as_u16()));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|err| AskError::MalformedResponse(err.to_string()))?;
        Ok(payload.response)
    }
}

fn compose_system(context: &str) -> String {
    if context.is_empty() {
        SYSTEM_PROMPT.to_string()
    } else {
        format!("{SYSTEM_PROMPT} {context}")
    }
}
