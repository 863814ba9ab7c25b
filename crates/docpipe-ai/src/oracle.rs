//! Text-generation oracle abstraction and its HTTP implementation.
//!
//! The pipeline depends only on the minimal [`TextOracle`] contract: prompt
//! in, text out. [`HttpOracle`] satisfies it against an Anthropic-style
//! messages API; tests substitute an in-process fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Environment variable holding the oracle API key.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";
const DEFAULT_MAX_TOKENS: u32 = 1024;
/// Low temperature keeps summary decoding near-deterministic.
const DEFAULT_TEMPERATURE: f32 = 0.2;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Error)]
pub enum OracleConfigError {
    #[error("ANTHROPIC_API_KEY is not set")]
    MissingApiKey,
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("oracle returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("oracle response contained no text content")]
    EmptyResponse,
}

/// Configuration for the HTTP oracle client.
///
/// Constructed explicitly and passed into [`HttpOracle::new`], so a missing
/// credential is a construction-time error rather than a process-start
/// crash. No timeout is set here; a single attempt is made per call and the
/// surrounding caller owns any deadline or retry policy.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl OracleConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Read the API key from the environment.
    pub fn from_env() -> Result<Self, OracleConfigError> {
        match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(OracleConfigError::MissingApiKey),
        }
    }
}

/// Minimal oracle contract: one prompt in, one text response out.
#[async_trait]
pub trait TextOracle: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, OracleError>;
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

/// Oracle client for an Anthropic-style messages endpoint.
pub struct HttpOracle {
    client: reqwest::Client,
    config: OracleConfig,
}

impl HttpOracle {
    pub fn new(config: OracleConfig) -> Self {
        let config = OracleConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl TextOracle for HttpOracle {
    async fn generate(&self, prompt: &str) -> Result<String, OracleError> {
        let request = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let url = format!("{}/v1/messages", self.config.base_url);
        info!(model = %self.config.model, prompt_chars = prompt.len(), "calling oracle");

        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OracleError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let response: MessagesResponse = resp.json().await?;

        if let Some(usage) = &response.usage {
            info!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "oracle call complete"
            );
        }

        response
            .content
            .first()
            .map(|block| block.text.clone())
            .ok_or(OracleError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env var is never touched from two threads at once.
    #[test]
    fn from_env_requires_key() {
        unsafe { std::env::remove_var(API_KEY_VAR) };
        assert!(matches!(
            OracleConfig::from_env(),
            Err(OracleConfigError::MissingApiKey)
        ));

        unsafe { std::env::set_var(API_KEY_VAR, "") };
        assert!(matches!(
            OracleConfig::from_env(),
            Err(OracleConfigError::MissingApiKey)
        ));

        unsafe { std::env::set_var(API_KEY_VAR, "test-key") };
        let config = OracleConfig::from_env().expect("key is set");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.model, DEFAULT_MODEL);
        unsafe { std::env::remove_var(API_KEY_VAR) };
    }

    #[test]
    fn oracle_trims_trailing_slash() {
        let mut config = OracleConfig::new("k");
        config.base_url = "http://localhost:8080/".to_string();
        let oracle = HttpOracle::new(config);
        assert_eq!(oracle.config.base_url, "http://localhost:8080");
    }

    #[test]
    fn request_serialises_expected_fields() {
        let request = MessagesRequest {
            model: "m".into(),
            max_tokens: 16,
            temperature: 0.2,
            messages: vec![Message {
                role: "user".into(),
                content: "hello".into(),
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["max_tokens"], 16);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn response_parses_first_content_block() {
        let json = r#"{
            "content": [{"text": "{\"one_liner\": \"x\"}"}],
            "usage": {"input_tokens": 10, "output_tokens": 5}
        }"#;
        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.content[0].text, r#"{"one_liner": "x"}"#);
        assert_eq!(response.usage.unwrap().output_tokens, 5);
    }
}
