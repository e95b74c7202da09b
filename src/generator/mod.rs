//! Content generator boundary
//!
//! A content generator turns a request into a candidate plan payload. The
//! payload is returned untyped: checking it against the plan schema is the
//! orchestrator's job, so a generator that answers with the wrong shape is
//! handled exactly like one that does not answer at all.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::plan::PlanRequest;

pub mod openai;

pub use openai::{GeneratorConfig, OpenAiGenerator};

/// Failures talking to a content generator
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// No generator is available in this environment
    #[error("content generator is not configured: {reason}")]
    NotConfigured { reason: String },

    /// The request never produced a response
    #[error("content generator request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("content generator returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered without any text
    #[error("content generator returned an empty response")]
    EmptyResponse,

    /// The text returned is not JSON
    #[error("content generator returned non-JSON output: {snippet}")]
    NotJson { snippet: String },

    /// The call did not finish in time
    #[error("content generator timed out after {0:?}")]
    Timeout(Duration),
}

/// Produces candidate plans from natural-language requests
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Ask for a plan payload
    async fn generate(&self, request: &PlanRequest) -> Result<Value, GeneratorError>;

    /// Name used in logs
    fn name(&self) -> &str {
        "generator"
    }
}

/// Generator used when no service is configured; every call fails
#[derive(Debug, Clone, Default)]
pub struct UnavailableGenerator {
    reason: String,
}

impl UnavailableGenerator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ContentGenerator for UnavailableGenerator {
    async fn generate(&self, _request: &PlanRequest) -> Result<Value, GeneratorError> {
        Err(GeneratorError::NotConfigured {
            reason: if self.reason.is_empty() {
                "offline".to_string()
            } else {
                self.reason.clone()
            },
        })
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

/// Parse generator output text as JSON
pub(crate) fn parse_output(text: &str) -> Result<Value, GeneratorError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(GeneratorError::EmptyResponse);
    }
    serde_json::from_str(text).map_err(|_| GeneratorError::NotJson {
        snippet: text.chars().take(200).collect(),
    })
}
