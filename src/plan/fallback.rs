//! Deterministic plan builder used when the content generator cannot help

use crate::stylesheet::{ModeTable, Stylesheet};

use super::request::PlanRequest;
use super::schema::{Palette, StoryCopy, StoryPlan};

/// Headline used when the prompt is blank (before upper-casing)
pub const DEFAULT_HEADLINE: &str = "New product drop";
pub const DEFAULT_SUBHEAD: &str = "Limited stock. Set a reminder and don’t miss it.";
pub const DEFAULT_CTA: &str = "Shop now";
pub const DEFAULT_HANDLE: &str = "@yourbrand";

/// Builds a plan straight from the request without any external call
#[derive(Debug, Clone)]
pub struct FallbackPlanner {
    palettes: ModeTable<Palette>,
    templates: ModeTable<String>,
}

impl Default for FallbackPlanner {
    fn default() -> Self {
        Self::from_stylesheet(&Stylesheet::default())
    }
}

impl FallbackPlanner {
    pub fn new(palettes: ModeTable<Palette>, templates: ModeTable<String>) -> Self {
        Self {
            palettes,
            templates,
        }
    }

    /// Take the default palettes and template ids from a stylesheet
    pub fn from_stylesheet(stylesheet: &Stylesheet) -> Self {
        Self::new(stylesheet.palettes.clone(), stylesheet.templates.clone())
    }

    /// Build a plan; never fails
    pub fn plan(&self, request: &PlanRequest) -> StoryPlan {
        let mode = request.style_mode;

        let prompt = request.prompt.trim();
        let headline = if prompt.is_empty() {
            DEFAULT_HEADLINE
        } else {
            prompt
        }
        .to_uppercase();

        let cta = request
            .cta
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CTA)
            .to_string();

        let footer = match request.brand.as_deref().map(str::trim) {
            Some(brand) if !brand.is_empty() => format!("@{}", brand),
            _ => DEFAULT_HANDLE.to_string(),
        };

        StoryPlan {
            style_mode: mode,
            template_id: self.templates.get(mode).clone(),
            palette: self.palettes.get(mode).clone(),
            copy: StoryCopy {
                headline,
                subhead: DEFAULT_SUBHEAD.to_string(),
                cta,
                footer,
            },
        }
    }
}
