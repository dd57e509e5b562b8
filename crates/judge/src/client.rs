//! The text-completion capability and its HTTP implementation.

use async_trait::async_trait;
use serde_json::json;

use stillcut_common::error::{StillcutError, StillcutResult};

/// Capability interface for the external text-completion service.
///
/// The engine only ever needs "prompt in, text out"; everything else
/// (endpoints, auth, model selection) lives behind this trait so tests can
/// inject scripted implementations.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Send one free-form prompt and return the raw text response.
    async fn generate(&self, prompt: &str) -> StillcutResult<String>;
}

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct HttpTextCompletion {
    client: reqwest::Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

impl HttpTextCompletion {
    /// Create a client for the given endpoint and model.
    ///
    /// `api_key` is optional so that local inference servers without auth
    /// keep working; when present it is sent as a bearer token.
    pub fn new(
        api_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            model: model.into(),
            api_key,
        }
    }
}

#[async_trait]
impl TextCompletion for HttpTextCompletion {
    async fn generate(&self, prompt: &str) -> StillcutResult<String> {
        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.2,
        });
        let endpoint = format!("{}/chat/completions", self.api_url.trim_end_matches('/'));

        tracing::debug!(endpoint = %endpoint, model = %self.model, "Sending completion request");

        let mut request = self.client.post(&endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StillcutError::service(format!("completion request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StillcutError::service(format!(
                "completion endpoint returned {status}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StillcutError::service(format!("completion response was not JSON: {e}")))?;

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| StillcutError::service("completion response had no message content"))?;
        Ok(content.to_string())
    }
}
