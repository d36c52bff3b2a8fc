//! Mock generation backend for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{GenerationBackend, GenerationError, GenerationParams};

/// A configurable mock response for [`MockGenerator`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Return this text.
    Text(String),
    /// Echo the prompt back, letting tests assert on the exact model input.
    EchoPrompt,
    /// Fail as if the inference server were unreachable.
    Unavailable(String),
    /// Fail with a backend error.
    Error(String),
}

/// A hand-rolled mock implementing [`GenerationBackend`] for tests.
///
/// Supports:
/// - A fixed response (used for every call), **or**
/// - A sequence of responses (one per call, cycling the last if exhausted).
/// - Optional per-call latency.
/// - Call counting and capture of the last prompt/params.
pub struct MockGenerator {
    /// If non-empty, each call pops the next response.
    responses: Mutex<Vec<MockResponse>>,
    /// Fallback when the sequence is exhausted (or single-response mode).
    fallback: MockResponse,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
    last_params: Mutex<Option<GenerationParams>>,
}

impl MockGenerator {
    /// Create a mock that always returns `response`.
    pub fn new(response: MockResponse) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback: response,
            delay: None,
            call_count: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_params: Mutex::new(None),
        }
    }

    /// Create a mock that echoes every prompt back as the completion.
    pub fn echo() -> Self {
        Self::new(MockResponse::EchoPrompt)
    }

    /// Create a mock that returns responses in order, repeating the last.
    pub fn with_sequence(mut responses: Vec<MockResponse>) -> Self {
        assert!(
            !responses.is_empty(),
            "sequence must have at least one response"
        );
        // Stored back-to-front so pop() yields the original order.
        responses.reverse();
        let fallback = responses.first().cloned().unwrap();
        Self {
            responses: Mutex::new(responses),
            fallback,
            delay: None,
            call_count: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_params: Mutex::new(None),
        }
    }

    /// Set simulated generation latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times `generate()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The prompt of the most recent call.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    /// The params of the most recent call.
    pub fn last_params(&self) -> Option<GenerationParams> {
        self.last_params.lock().unwrap().clone()
    }

    fn next_response(&self) -> MockResponse {
        let mut seq = self.responses.lock().unwrap();
        if let Some(resp) = seq.pop() {
            resp
        } else {
            self.fallback.clone()
        }
    }
}

impl GenerationBackend for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        params: &'a GenerationParams,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        *self.last_params.lock().unwrap() = Some(params.clone());
        let response = self.next_response();
        let delay = self.delay;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }

            match response {
                MockResponse::Text(text) => Ok(text),
                MockResponse::EchoPrompt => Ok(prompt.to_string()),
                MockResponse::Unavailable(msg) => Err(GenerationError::Unavailable(msg)),
                MockResponse::Error(msg) => Err(GenerationError::Backend(msg)),
            }
        })
    }
}
