use serde_json::Value;
use thiserror::Error;

use crate::config::Config;
use crate::models::gemini::GenerateContentRequest;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("API key not configured")]
    MissingCredential,

    #[error("generation API returned {status}")]
    Upstream { status: u16, body: Value },

    #[error("request to generation API failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("generation API returned an unreadable body: {0}")]
    Decode(String),
}

impl GenerationError {
    /// `error.message` of an upstream error body, if there is one.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            GenerationError::Upstream { body, .. } => body.pointer("/error/message")?.as_str(),
            _ => None,
        }
    }
}

/// Where the credential comes from. Looked up on every call.
#[derive(Debug, Clone)]
pub enum ApiKeySource {
    Env(String),
    Fixed(Option<String>),
}

impl ApiKeySource {
    fn resolve(&self) -> Option<String> {
        let key = match self {
            ApiKeySource::Env(var) => std::env::var(var).ok(),
            ApiKeySource::Fixed(key) => key.clone(),
        };
        key.filter(|k| !k.trim().is_empty())
    }
}

pub struct GeminiClient {
    client: reqwest::Client,
    api_base: String,
    api_key: ApiKeySource,
    pub text_model: String,
    pub image_model: String,
}

impl GeminiClient {
    pub fn new(api_base: impl Into<String>, api_key: ApiKeySource) -> Self {
        GeminiClient {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            api_key,
            text_model: crate::config::DEFAULT_TEXT_MODEL.to_string(),
            image_model: crate::config::DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut client = Self::new(
            config.api_base.clone(),
            ApiKeySource::Env(config.api_key_var.clone()),
        );
        client.text_model = config.text_model.clone();
        client.image_model = config.image_model.clone();
        client
    }

    /// Fails fast when no credential is configured, without touching the network.
    pub fn ensure_credential(&self) -> Result<String, GenerationError> {
        self.api_key.resolve().ok_or(GenerationError::MissingCredential)
    }

    /// One `generateContent` call. No retries: a non-success status is returned
    /// as `Upstream` with whatever body the API sent.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value, GenerationError> {
        let api_key = self.ensure_credential()?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            model
        );

        tracing::debug!(%model, parts = request.contents.iter().map(|c| c.parts.len()).sum::<usize>(), "Calling generation API");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let response_text = response.text().await.map_err(transport)?;

        if !status.is_success() {
            // Non-JSON error pages are passed through as a plain string.
            let body = serde_json::from_str(&response_text)
                .unwrap_or_else(|_| Value::String(response_text));
            tracing::error!(status = status.as_u16(), details = %body, "Gemini API error");
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&response_text).map_err(|e| GenerationError::Decode(e.to_string()))
    }
}

// The request URL carries the key as a query parameter; it must not reach responses or logs.
fn transport(e: reqwest::Error) -> GenerationError {
    GenerationError::Transport(e.without_url())
}
