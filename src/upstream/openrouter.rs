use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::config::{ApiKey, Config};
use crate::consts::{ANALYZE_TIMEOUT, APP_TITLE, PROBE_MAX_TOKENS, PROBE_TIMEOUT, REFERER};
use crate::prompts::{ANALYSIS_SYSTEM_PROMPT, PROBE_USER_MESSAGE};

use super::{Upstream, UpstreamError};

/// Wait bounds for the two kinds of upstream call.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub analyze: Duration,
    pub probe: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            analyze: ANALYZE_TIMEOUT,
            probe: PROBE_TIMEOUT,
        }
    }
}

/// Upstream backed by an OpenRouter-compatible chat-completion endpoint.
pub struct OpenRouterClient {
    http: reqwest::Client,
    config: Arc<Config>,
    api_key: Option<ApiKey>,
    timeouts: Timeouts,
}

impl OpenRouterClient {
    pub fn new(config: Arc<Config>, api_key: Option<ApiKey>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            api_key,
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    fn api_key(&self) -> Result<&ApiKey, UpstreamError> {
        self.api_key.as_ref().ok_or(UpstreamError::MissingApiKey)
    }

    fn analysis_request<'a>(&'a self, segment: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model_name,
            messages: vec![
                Message {
                    role: "system",
                    content: ANALYSIS_SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: segment,
                },
            ],
            max_tokens: None,
            provider: self.config.provider(),
        }
    }

    fn probe_request(&self) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.config.model_name,
            messages: vec![Message {
                role: "user",
                content: PROBE_USER_MESSAGE,
            }],
            max_tokens: Some(PROBE_MAX_TOKENS),
            provider: self.config.provider(),
        }
    }
}

#[async_trait]
impl Upstream for OpenRouterClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn analyze(&self, segment: &str) -> Result<String, UpstreamError> {
        let api_key = self.api_key()?;
        let body = self.analysis_request(segment);

        info!(
            "Analyzing segment, length: {} characters",
            segment.chars().count()
        );

        let resp = self
            .http
            .post(&self.config.api_endpoint)
            .timeout(self.timeouts.analyze)
            .bearer_auth(api_key.expose())
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", REFERER)
            .header("X-Title", APP_TITLE)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if status != StatusCode::OK {
            return Err(UpstreamError::Status {
                code: status.as_u16(),
                body: text,
            });
        }

        extract_content(&text)
    }

    async fn probe(&self) -> Result<u16, UpstreamError> {
        let api_key = self.api_key()?;

        let resp = self
            .http
            .post(&self.config.api_endpoint)
            .timeout(self.timeouts.probe)
            .bearer_auth(api_key.expose())
            .header("Content-Type", "application/json")
            .json(&self.probe_request())
            .send()
            .await?;

        Ok(resp.status().as_u16())
    }
}

/// Pull the first choice's message text out of a 200 response body.
fn extract_content(body: &str) -> Result<String, UpstreamError> {
    let parsed: Value =
        serde_json::from_str(body).map_err(|_| UpstreamError::Format(body.to_string()))?;

    let first = parsed
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .ok_or_else(|| UpstreamError::Format(body.to_string()))?;

    match first.pointer("/message/content").and_then(Value::as_str) {
        Some(content) => Ok(content.to_string()),
        None => {
            error!("first choice has no message content: {}", first);
            Err(UpstreamError::Decode("missing message content".to_string()))
        }
    }
}

// --- API types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<&'a Value>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(provider: Option<Value>) -> OpenRouterClient {
        let config = Config {
            provider,
            ..Config::default()
        };
        OpenRouterClient::new(Arc::new(config), ApiKey::new("sk-test"))
    }

    #[test]
    fn analysis_request_has_system_then_user() {
        let client = client(None);
        let body = serde_json::to_value(client.analysis_request("学而时习之")).unwrap();

        assert_eq!(body["model"], crate::consts::DEFAULT_MODEL);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], ANALYSIS_SYSTEM_PROMPT);
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "学而时习之");
        assert!(body.get("provider").is_none());
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn provider_forwarded_only_when_truthy() {
        let with = client(Some(json!({"order": ["moonshotai"]})));
        let body = serde_json::to_value(with.analysis_request("x")).unwrap();
        assert_eq!(body["provider"], json!({"order": ["moonshotai"]}));

        let falsy = client(Some(json!(false)));
        let body = serde_json::to_value(falsy.analysis_request("x")).unwrap();
        assert!(body.get("provider").is_none());
    }

    #[test]
    fn probe_request_forwards_provider() {
        let with = client(Some(json!({"only": ["moonshotai"], "allow_fallbacks": false})));
        let body = serde_json::to_value(with.probe_request()).unwrap();
        assert_eq!(body["provider"], json!({"only": ["moonshotai"], "allow_fallbacks": false}));

        let client = client(Some(json!({})));
        let body = serde_json::to_value(client.probe_request()).unwrap();
        assert!(body.get("provider").is_none());
    }

    #[test]
    fn probe_request_is_minimal() {
        let client = client(None);
        let body = serde_json::to_value(client.probe_request()).unwrap();
        assert_eq!(body["max_tokens"], 5);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["content"], "test");
    }

    #[test]
    fn extract_first_choice() {
        let body = r#"{"choices": [{"message": {"content": "first"}}, {"message": {"content": "second"}}]}"#;
        assert_eq!(extract_content(body).unwrap(), "first");
    }

    #[test]
    fn empty_choices_is_format_error() {
        let err = extract_content(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, UpstreamError::Format(_)));
    }

    #[test]
    fn missing_choices_is_format_error() {
        let err = extract_content(r#"{"error": {"message": "nope"}}"#).unwrap_err();
        assert!(matches!(err, UpstreamError::Format(ref raw) if raw.contains("nope")));
    }

    #[test]
    fn non_json_body_is_format_error() {
        let err = extract_content("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, UpstreamError::Format(_)));
    }

    #[test]
    fn null_content_is_decode_error() {
        let err = extract_content(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap_err();
        assert_eq!(err, UpstreamError::Decode("missing message content".to_string()));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let config = Config {
            api_endpoint: "http://127.0.0.1:9/unreachable".to_string(),
            ..Config::default()
        };
        let client = OpenRouterClient::new(Arc::new(config), None);

        assert!(!client.is_configured());
        assert_eq!(client.analyze("x").await, Err(UpstreamError::MissingApiKey));
        assert_eq!(client.probe().await, Err(UpstreamError::MissingApiKey));
    }
}
