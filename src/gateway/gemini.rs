//! Gemini `generateContent` client.
//!
//! Speaks the REST surface directly: JSON request bodies built with
//! `serde_json::json!`, typed response structs for the parts we read.
//! File content travels inline as base64 with its MIME type.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::GatewayConfig;
use crate::gateway::GenerativeModel;

pub struct GeminiModel {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiModel {
    /// Build a client from config. The API key comes from the environment
    /// variable named in config — constructing the model fails fast if the
    /// key is missing, so a misconfigured session errors before any archive
    /// state is touched.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .with_context(|| format!("{} environment variable not set", config.api_key_env))?;
        Self::new(api_key, &config.model, &config.api_base, config.timeout_secs)
    }

    pub fn new(
        api_key: String,
        model: &str,
        api_base: &str,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            api_key,
            model: model.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    async fn generate(&self, parts: Vec<serde_json::Value>) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        );
        let body = json!({ "contents": [{ "parts": parts }] });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("request to Gemini API failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini API error ({status}): {error_text}"));
        }

        let parsed: GenerateContentResponse =
            response.json().await.context("malformed Gemini response")?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
            .ok_or_else(|| anyhow!("empty response from Gemini"))
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.generate(vec![json!({ "text": prompt })]).await
    }

    async fn generate_from_file(
        &self,
        prompt: &str,
        data: &[u8],
        mime_type: &str,
    ) -> Result<String> {
        // File part first, instruction second — the order the service
        // grounds the instruction on.
        let parts = vec![
            json!({
                "inline_data": {
                    "mime_type": mime_type,
                    "data": STANDARD.encode(data),
                }
            }),
            json!({ "text": prompt }),
        ];
        self.generate(parts).await
    }
}

// Response shape — only the fields we read.

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
