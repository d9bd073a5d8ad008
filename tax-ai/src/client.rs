use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tax_core::{AiAssistant, AiError, SectionData, TaxData};
use tracing::debug;

use crate::{prompts, schema};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Without a key every call fails with [`AiError::NotConfigured`].
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

pub struct GeminiAssistant {
    client: Client,
    config: GeminiConfig,
}

impl GeminiAssistant {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AiError::Http(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_ok()
    }

    fn api_key(&self) -> Result<&str, AiError> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AiError::NotConfigured("no API key set".to_string()))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Send one prompt and return the text of the first candidate.
    async fn generate(
        &self,
        prompt: String,
        generation_config: Option<Value>,
    ) -> Result<String, AiError> {
        let key = self.api_key()?;

        let mut body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        if let Some(generation_config) = generation_config {
            body["generationConfig"] = generation_config;
        }

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Http(e.to_string()))?;

        let status = response.status();
        debug!("Gemini response status: {}", status);

        if !status.is_success() {
            let message = match response.json::<ErrorEnvelope>().await {
                Ok(envelope) => envelope.error.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AiError::Decode(e.to_string()))?;

        payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
            .filter(|text| !text.trim().is_empty())
            .ok_or(AiError::EmptyResponse)
    }
}

#[async_trait]
impl AiAssistant for GeminiAssistant {
    async fn explain(&self, topic: &str) -> Result<String, AiError> {
        self.generate(prompts::explanation(topic), None).await
    }

    async fn suggestions(&self, section: &SectionData, year: i32) -> Result<String, AiError> {
        let data = section
            .to_json()
            .map_err(|e| AiError::Decode(e.to_string()))?;
        self.generate(prompts::suggestions(&data.to_string(), year), None)
            .await
    }

    async fn generate_example_data(&self, year: i32) -> Result<TaxData, AiError> {
        let generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema::tax_data_schema(year),
        });
        let text = self
            .generate(prompts::example_data(year), Some(generation_config))
            .await?;

        let mut document: Value =
            serde_json::from_str(text.trim()).map_err(|e| AiError::Decode(e.to_string()))?;
        schema::normalize_day_counts(&mut document);

        serde_json::from_value(document).map_err(|e| AiError::Decode(e.to_string()))
    }
}

// ── wire types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}
