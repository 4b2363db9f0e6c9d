use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::critique::{
    CritiqueRequest, Critic, CONNECTION_ERROR_MESSAGE, EMPTY_RESPONSE_MESSAGE,
    MISSING_KEY_MESSAGE,
};

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateResponse {
    /// Text of the first candidate, `None` if the model returned nothing.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

/// Google Gemini `generateContent` client.
pub struct GeminiCritic {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiCritic {
    pub fn new(cfg: &Config, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.ai_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: api_key.into(),
            model: cfg.gemini_model.clone(),
            base_url: cfg.gemini_base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn generate(&self, prompt: String) -> Result<Option<String>> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let resp = self
            .client
            .post(url.as_str())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?
            .error_for_status()
            .context("Gemini returned an error status")?;

        let parsed: GenerateResponse = resp
            .json()
            .await
            .context("Failed to decode Gemini response")?;

        Ok(parsed.text())
    }
}

#[async_trait]
impl Critic for GeminiCritic {
    async fn critique(&self, request: &CritiqueRequest) -> String {
        if self.api_key.trim().is_empty() {
            info!("No Gemini API key configured, skipping critique");
            return MISSING_KEY_MESSAGE.to_string();
        }

        debug!("Requesting critique for {} via {}", request.symbol, self.model);
        match self.generate(request.prompt()).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                warn!("Gemini returned no text for {}", request.symbol);
                EMPTY_RESPONSE_MESSAGE.to_string()
            }
            Err(e) => {
                warn!("Gemini API error: {:#}", e);
                CONNECTION_ERROR_MESSAGE.to_string()
            }
        }
    }
}
