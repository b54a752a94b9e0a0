//! Sentiment classification adapter
//!
//! The model is an external capability: given a string it returns a label
//! and a confidence score. [`SentimentClassifier`] is the seam the request
//! orchestrator depends on, so tests can substitute a fake.

mod inference_client;

pub use inference_client::InferenceClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label and confidence for one input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: String,
    /// Confidence of `label`, as reported by the model (expected 0.0-1.0)
    pub score: f64,
}

/// Classification failures; any of these aborts the whole upload
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// Model is loading or the service is overloaded (503)
    #[error("Inference service unavailable ({0}): {1}")]
    Unavailable(u16, String),

    /// Inference service returned an error response
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Failed to parse inference response JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Response carried no usable prediction for an input
    #[error("Model returned no prediction for input {0}")]
    EmptyPrediction(usize),
}

/// Single-capability interface over the sentiment model
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Classify one text
    async fn classify(&self, text: &str) -> Result<SentimentResult, ClassifierError>;

    /// Classify many texts; output is in input order with one entry per input
    async fn classify_batch(
        &self,
        texts: &[&str],
    ) -> Result<Vec<SentimentResult>, ClassifierError> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.classify(text).await?);
        }
        Ok(results)
    }

    /// Identifier shown in logs and health output
    fn model_name(&self) -> &str;
}
