//! Generative-language client for study plans.
//!
//! Speaks the `models/{model}:generateContent` REST shape. The base URL is
//! configurable so tests can point it at a local mock server.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::error::PlannerError;
use crate::storage::PlannerConfig;

pub struct PlanClient {
    http: Client,
    url: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl PlanClient {
    pub fn new(config: &PlannerConfig, api_key: impl Into<String>) -> Result<Self, PlannerError> {
        let mut base = config.endpoint.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let url = Url::parse(&base)?.join(&format!(
            "v1beta/models/{}:generateContent",
            config.model
        ))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            http,
            url,
            api_key: api_key.into(),
        })
    }

    /// Build a client with the key read from `config.api_key_env`.
    pub fn from_env(config: &PlannerConfig) -> Result<Self, PlannerError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| PlannerError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(config, api_key)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send one prompt. `Ok(None)` means the service answered without text.
    pub async fn generate(&self, prompt: &str) -> Result<Option<String>, PlannerError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let resp = self
            .http
            .post(self.url.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(PlannerError::Status { status, body });
        }

        let parsed: GenerateResponse = resp.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_model_path() {
        let config = PlannerConfig {
            endpoint: "http://localhost:9000".into(),
            model: "test-model".into(),
            ..PlannerConfig::default()
        };
        let client = PlanClient::new(&config, "key").unwrap();
        assert_eq!(
            client.url().as_str(),
            "http://localhost:9000/v1beta/models/test-model:generateContent"
        );
    }

    #[test]
    fn missing_key_is_reported() {
        let config = PlannerConfig {
            api_key_env: "FOCUSFLOW_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..PlannerConfig::default()
        };
        assert!(matches!(
            PlanClient::from_env(&config),
            Err(PlannerError::MissingApiKey(_))
        ));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let config = PlannerConfig {
            endpoint: "not a url".into(),
            ..PlannerConfig::default()
        };
        assert!(matches!(
            PlanClient::new(&config, "key"),
            Err(PlannerError::InvalidEndpoint(_))
        ));
    }
}
