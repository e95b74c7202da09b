//! Inbound generation requests

use serde::{Deserialize, Serialize};

use super::schema::{SchemaError, StyleMode};

/// A request as submitted by a caller, before its style mode is checked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRequest {
    #[serde(default)]
    pub prompt: String,
    pub style_mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
}

impl StoryRequest {
    pub fn new(prompt: impl Into<String>, style_mode: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            style_mode: style_mode.into(),
            brand: None,
            cta: None,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_cta(mut self, cta: impl Into<String>) -> Self {
        self.cta = Some(cta.into());
        self
    }

    /// Check the style mode and tidy the free-text fields
    pub fn parse(&self) -> Result<PlanRequest, SchemaError> {
        let style_mode = self.style_mode.trim().parse::<StyleMode>()?;
        Ok(PlanRequest {
            prompt: self.prompt.trim().to_string(),
            style_mode,
            brand: non_empty(self.brand.as_deref()),
            cta: non_empty(self.cta.as_deref()),
        })
    }
}

/// A request whose style mode is known to be valid
///
/// Text fields are trimmed; blank brand and CTA values are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRequest {
    pub prompt: String,
    pub style_mode: StyleMode,
    pub brand: Option<String>,
    pub cta: Option<String>,
}

impl PlanRequest {
    pub fn new(prompt: impl Into<String>, style_mode: StyleMode) -> Self {
        let prompt: String = prompt.into();
        Self {
            prompt: prompt.trim().to_string(),
            style_mode,
            brand: None,
            cta: None,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        let brand: String = brand.into();
        self.brand = non_empty(Some(brand.as_str()));
        self
    }

    pub fn with_cta(mut self, cta: impl Into<String>) -> Self {
        let cta: String = cta.into();
        self.cta = non_empty(Some(cta.as_str()));
        self
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
