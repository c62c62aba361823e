mod client;
pub mod inference;
#[cfg(test)]
pub(crate) mod stub;

use async_trait::async_trait;

use crate::domain::ClassificationResult;

pub use client::GeminiClient;

/// Never fails: transport and shape errors become [`ClassificationResult::fallback`].
#[async_trait]
pub trait SpamClassifier: Send + Sync {
    async fn classify(&self, content: &str) -> ClassificationResult;
}
