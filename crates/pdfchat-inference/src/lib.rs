//! Reqwest-based [`GenerationBackend`] speaking the Hugging-Face-style
//! `{"inputs", "parameters"}` protocol to a seq2seq inference server.
//!
//! The model is consumed as an opaque encode/generate/decode service: the
//! prompt template and truncation already happened in `pdfchat-core`, and
//! only the decoded top candidate comes back. No retries, no fallback
//! model, no confidence score.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use pdfchat_core::config::ModelConfig;
use pdfchat_core::{GenerationBackend, GenerationError, GenerationParams};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: WireParams,
}

#[derive(Debug, Serialize, Default, PartialEq, Eq)]
struct WireParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_beams: Option<u32>,
    early_stopping: bool,
}

impl From<&GenerationParams> for WireParams {
    fn from(params: &GenerationParams) -> Self {
        Self {
            min_length: params.min_length,
            max_length: params.max_length,
            num_beams: params.num_beams,
            early_stopping: params.early_stopping,
        }
    }
}

/// The server returns one entry per candidate; we only read the top beam.
#[derive(Debug, Deserialize)]
struct GenerateCandidate {
    generated_text: String,
}

/// HTTP implementation of [`GenerationBackend`].
pub struct HttpGenerationBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpGenerationBackend {
    pub fn new(config: &ModelConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::Backend(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/generate", self.endpoint)
    }
}

impl GenerationBackend for HttpGenerationBackend {
    fn name(&self) -> &str {
        "seq2seq-http"
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        params: &'a GenerationParams,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        Box::pin(async move {
            let body = GenerateRequest {
                inputs: prompt,
                parameters: WireParams::from(params),
            };

            let mut request = self.client.post(self.generate_url()).json(&body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = request.send().await.map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    GenerationError::Unavailable(e.to_string())
                } else {
                    GenerationError::Backend(e.to_string())
                }
            })?;

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                return Err(GenerationError::Unavailable(format!("HTTP {status}")));
            }
            if !status.is_success() {
                let detail = response.text().await.unwrap_or_default();
                return Err(GenerationError::Backend(format!("HTTP {status}: {detail}")));
            }

            let candidates: Vec<GenerateCandidate> = response
                .json()
                .await
                .map_err(|e| GenerationError::Backend(format!("undecodable body: {e}")))?;

            tracing::debug!(candidates = candidates.len(), "generation complete");

            candidates
                .into_iter()
                .next()
                .map(|c| c.generated_text)
                .ok_or_else(|| GenerationError::Backend("empty candidate list".to_string()))
        })
    }
}
