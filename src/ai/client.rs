use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::{config::GeminiConfig, domain::ClassificationResult};

use super::{
    inference::{build_request, generate_content_url, parse_response},
    SpamClassifier,
};

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
    endpoint: Url,
}

impl GeminiClient {
    pub fn new(http: Client, config: GeminiConfig) -> Result<Self> {
        let endpoint = generate_content_url(&config.api_base, &config.model)?;
        Ok(Self {
            http,
            config,
            endpoint,
        })
    }

    pub async fn request_classification(&self, content: &str) -> Result<ClassificationResult> {
        let request = build_request(content);
        let response = self
            .http
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.endpoint))?
            .error_for_status()?;

        parse_response(response).await
    }
}

#[async_trait]
impl SpamClassifier for GeminiClient {
    async fn classify(&self, content: &str) -> ClassificationResult {
        match self.request_classification(content).await {
            Ok(result) => {
                tracing::debug!(
                    target: "classifier",
                    classification = %result.classification,
                    confidence = result.confidence,
                    "message classified"
                );
                result
            }
            Err(err) => {
                tracing::warn!(
                    target: "classifier",
                    error = %format!("{err:#}"),
                    model = %self.config.model,
                    "classification failed; using fallback"
                );
                ClassificationResult::fallback()
            }
        }
    }
}
