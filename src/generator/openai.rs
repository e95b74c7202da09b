//! Content generator backed by the OpenAI Responses API
//!
//! The model is asked for a JSON object in the plan's wire shape. Style mode
//! and template id are pinned in the instructions; whatever comes back is
//! still validated by the orchestrator.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::plan::{CopyLimits, PlanRequest, StyleMode, DEFAULT_HEADLINE};
use crate::stylesheet::{ModeTable, Stylesheet};

use super::{parse_output, ContentGenerator, GeneratorError};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Connection settings for [`OpenAiGenerator`]
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Per-request timeout applied by the HTTP client
    pub request_timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `OPENAI_API_KEY`, `OPENAI_BASE_URL` and `STORY_LAYOUT_MODEL`
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            api_key: var("OPENAI_API_KEY"),
            base_url: var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: var("STORY_LAYOUT_MODEL").unwrap_or(defaults.model),
            request_timeout: defaults.request_timeout,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Generator calling an OpenAI-compatible `/responses` endpoint
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    templates: ModeTable<String>,
    limits: CopyLimits,
}

impl OpenAiGenerator {
    /// Build a generator; fails when no API key is configured
    pub fn new(config: GeneratorConfig, stylesheet: &Stylesheet) -> Result<Self, GeneratorError> {
        let api_key = config
            .api_key
            .ok_or_else(|| GeneratorError::NotConfigured {
                reason: "OPENAI_API_KEY is not set".to_string(),
            })?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/responses", config.base_url.trim_end_matches('/')),
            model: config.model,
            templates: stylesheet.templates.clone(),
            limits: CopyLimits::default(),
        })
    }

    /// Override the copy limits stated in the instructions
    pub fn with_limits(mut self, limits: CopyLimits) -> Self {
        self.limits = limits;
        self
    }

    fn request_body(&self, request: &PlanRequest) -> Value {
        let template_id = self.templates.get(request.style_mode);
        json!({
            "model": self.model,
            "input": [
                {
                    "role": "system",
                    "content": system_prompt(request.style_mode, template_id, &self.limits),
                },
                { "role": "user", "content": user_message(request) },
            ],
            "text": { "format": { "type": "json_object" } },
        })
    }
}

#[async_trait]
impl ContentGenerator for OpenAiGenerator {
    async fn generate(&self, request: &PlanRequest) -> Result<Value, GeneratorError> {
        info!(
            model = %self.model,
            style_mode = %request.style_mode,
            prompt_chars = request.prompt.chars().count(),
            "calling content generator"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let payload: Value = response.json().await?;
        let text = extract_output_text(&payload).ok_or(GeneratorError::EmptyResponse)?;
        debug!(raw = %text.chars().take(200).collect::<String>(), "generator response");
        parse_output(&text)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Instructions pinning the output shape, style mode, template and limits
pub fn system_prompt(mode: StyleMode, template_id: &str, limits: &CopyLimits) -> String {
    format!(
        r##"You generate Instagram Story copy + palette as STRICT JSON ONLY.

Return ONLY valid JSON matching EXACTLY:
{{
  "style_mode": "minimal" | "bold" | "premium",
  "template_id": string,
  "palette": {{ "bg": "#RRGGBB", "text": "#RRGGBB", "accent": "#RRGGBB" }},
  "copy": {{ "headline": string, "subhead": string, "cta": string, "footer": string }}
}}

Rules:
- style_mode MUST be "{mode}"
- template_id MUST be "{template_id}"
- headline max {headline} chars, short + punchy
- subhead max {subhead} chars, one sentence
- cta max {cta} chars (if user provided a CTA, prefer it)
- footer max {footer} chars; if brand provided, use "@brand", else "@yourbrand"
- No extra keys. No markdown. No commentary."##,
        mode = mode,
        template_id = template_id,
        headline = limits.headline,
        subhead = limits.subhead,
        cta = limits.cta,
        footer = limits.footer,
    )
}

/// The request as the JSON user message
pub fn user_message(request: &PlanRequest) -> String {
    let prompt = if request.prompt.is_empty() {
        DEFAULT_HEADLINE
    } else {
        request.prompt.as_str()
    };
    json!({
        "user_prompt": prompt,
        "style_mode": request.style_mode.as_str(),
        "brand": request.brand.as_deref().unwrap_or(""),
        "preferred_cta": request.cta.as_deref().unwrap_or(""),
    })
    .to_string()
}

/// Pull the generated text out of a Responses API payload
///
/// Prefers the top-level `output_text` convenience field and otherwise joins
/// the `output_text` parts of every output message.
pub fn extract_output_text(payload: &Value) -> Option<String> {
    if let Some(text) = payload.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    let parts: Vec<&str> = payload
        .get("output")?
        .as_array()?
        .iter()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|part| part.get("type").and_then(Value::as_str) == Some("output_text"))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.concat())
    }
}
