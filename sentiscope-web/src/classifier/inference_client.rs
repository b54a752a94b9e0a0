//! HTTP client for a Hugging Face compatible text-classification endpoint
//!
//! `POST {endpoint}/{model}` with `{"inputs": ...}` returns, per input, the
//! candidate labels with scores. The highest-scoring candidate is the
//! prediction for that input.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{ClassifierError, SentimentClassifier, SentimentResult};
use sentiscope_common::config::ClassifierConfig;

const USER_AGENT: &str = concat!("sentiscope/", env!("CARGO_PKG_VERSION"));

/// One candidate label in an inference response
#[derive(Debug, Clone, Deserialize)]
struct Prediction {
    label: String,
    score: f64,
}

/// Inference responses come in two shapes depending on the deployment
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    /// One candidate list per input
    Nested(Vec<Vec<Prediction>>),
    /// A single candidate list (one input), or one top prediction per input
    Flat(Vec<Prediction>),
}

#[derive(Debug, Deserialize)]
struct InferenceErrorBody {
    error: String,
}

/// Sentiment classifier backed by a remote inference endpoint
///
/// Built once at startup; the underlying `reqwest::Client` pools connections
/// across requests.
pub struct InferenceClient {
    http_client: reqwest::Client,
    url: String,
    model: String,
    api_token: Option<String>,
    batch_size: usize,
}

impl InferenceClient {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            url: config.model_url(),
            model: config.model.clone(),
            api_token: config.api_token.clone(),
            batch_size: config.batch_size.max(1),
        })
    }

    async fn request(&self, texts: &[&str]) -> Result<Vec<SentimentResult>, ClassifierError> {
        let inputs = match texts {
            [single] => json!(single),
            many => json!(many),
        };
        let body = json!({
            "inputs": inputs,
            "options": { "wait_for_model": true },
        });

        debug!(url = %self.url, inputs = texts.len(), "Querying inference endpoint");

        let mut request = self.http_client.post(&self.url).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<InferenceErrorBody>(&error_text)
                .map(|b| b.error)
                .unwrap_or(error_text);
            if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
                return Err(ClassifierError::Unavailable(status.as_u16(), message));
            }
            return Err(ClassifierError::Api(status.as_u16(), message));
        }

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::Parse(e.to_string()))?;

        select_predictions(parsed, texts.len())
    }
}

/// Reduce an inference response to one top prediction per input
fn select_predictions(
    response: InferenceResponse,
    input_count: usize,
) -> Result<Vec<SentimentResult>, ClassifierError> {
    let candidates: Vec<Vec<Prediction>> = match response {
        InferenceResponse::Nested(lists) => lists,
        InferenceResponse::Flat(list) if input_count == 1 => vec![list],
        InferenceResponse::Flat(list) => list.into_iter().map(|p| vec![p]).collect(),
    };

    if candidates.len() != input_count {
        return Err(ClassifierError::Parse(format!(
            "expected {} predictions, got {}",
            input_count,
            candidates.len()
        )));
    }

    candidates
        .into_iter()
        .enumerate()
        .map(|(i, list)| {
            list.into_iter()
                .max_by(|a, b| a.score.total_cmp(&b.score))
                .map(|p| SentimentResult {
                    label: p.label,
                    score: p.score,
                })
                .ok_or(ClassifierError::EmptyPrediction(i))
        })
        .collect()
}

#[async_trait]
impl SentimentClassifier for InferenceClient {
    async fn classify(&self, text: &str) -> Result<SentimentResult, ClassifierError> {
        self.request(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or(ClassifierError::EmptyPrediction(0))
    }

    async fn classify_batch(
        &self,
        texts: &[&str],
    ) -> Result<Vec<SentimentResult>, ClassifierError> {
        let mut results = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.batch_size) {
            results.extend(self.request(chunk).await?);
        }
        Ok(results)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
