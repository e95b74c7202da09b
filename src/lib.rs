//! Story Layout - Instagram Story pages from a one-line prompt
//!
//! This library turns a natural-language request into a content plan, picks a
//! template for the requested style mode and scales it onto a concrete page.
//!
//! # Example
//!
//! ```rust
//! use story_layout::{render, StoryRequest};
//!
//! let svg = render(&StoryRequest::new("Hoodie drop", "bold"), 1080.0, 1920.0).unwrap();
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("HOODIE DROP"));
//! ```

pub mod generator;
pub mod host;
pub mod layout;
pub mod orchestrator;
pub mod plan;
pub mod renderer;
pub mod stylesheet;
pub mod template;

pub use generator::{ContentGenerator, GeneratorError, UnavailableGenerator};
pub use host::{FileHost, HostCanvas, HostError, MemoryHost, PageDimensions};
pub use layout::{LayoutConfig, LayoutError, LayoutScaler, RenderElement};
pub use orchestrator::{Generated, Orchestrator, OrchestratorConfig, PlanSource, Stage};
pub use plan::{CopyLimits, PlanRequest, SchemaError, StoryPlan, StoryRequest, StyleMode};
pub use renderer::{render_svg, SvgConfig};
pub use template::{TemplateError, TemplateRegistry};

use std::sync::Arc;

use thiserror::Error;

// Re-export Stylesheet for public API
pub use stylesheet::Stylesheet;

/// Errors that end a story request
#[derive(Debug, Error)]
pub enum StoryError {
    /// The request itself is malformed
    #[error("invalid request: {0}")]
    Request(#[from] SchemaError),

    /// A plan referenced a template the registry does not know
    #[error("internal error: {0}")]
    Template(#[from] TemplateError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// Another request is still in flight
    #[error("a story is already being generated")]
    Busy,
}

impl StoryError {
    /// Whether the failure points at inconsistent bundled data rather than
    /// user input or the environment
    pub fn is_internal(&self) -> bool {
        matches!(self, StoryError::Template(_))
    }
}

/// Configuration for the offline render pipeline
#[derive(Debug, Clone)]
pub struct StoryConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Palettes and template ids per style mode
    pub stylesheet: Stylesheet,
    /// Copy length limits
    pub limits: CopyLimits,
    /// Templates the stylesheet's ids resolve against
    pub registry: Arc<TemplateRegistry>,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            svg: SvgConfig::default(),
            stylesheet: Stylesheet::default(),
            limits: CopyLimits::default(),
            registry: Arc::new(TemplateRegistry::builtin()),
        }
    }
}

impl StoryConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    pub fn with_limits(mut self, limits: CopyLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Resolve template ids against `registry` instead of the built-ins
    pub fn with_registry(mut self, registry: impl Into<Arc<TemplateRegistry>>) -> Self {
        self.registry = registry.into();
        self
    }
}

/// Render a request to SVG using the fallback planner and built-in templates
///
/// No content generator is involved, so the output is deterministic.
pub fn render(request: &StoryRequest, width: f64, height: f64) -> Result<String, StoryError> {
    render_with_config(request, width, height, &StoryConfig::default())
}

/// Render a request to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use story_layout::{render_with_config, LayoutConfig, StoryConfig, StoryRequest, SvgConfig};
/// use story_layout::layout::FontScaling;
///
/// let config = StoryConfig::new()
///     .with_layout(LayoutConfig::default().with_uniform_font_scaling(FontScaling::Horizontal))
///     .with_svg(SvgConfig::default().with_pretty_print(false));
///
/// let svg = render_with_config(&StoryRequest::new("", "minimal"), 540.0, 960.0, &config).unwrap();
/// assert!(svg.contains(r#"viewBox="0 0 540 960""#));
/// ```
pub fn render_with_config(
    request: &StoryRequest,
    width: f64,
    height: f64,
    config: &StoryConfig,
) -> Result<String, StoryError> {
    let request = request.parse()?;
    let plan = plan::FallbackPlanner::from_stylesheet(&config.stylesheet).plan(&request);
    let plan = plan::normalize_with(plan, &config.limits);

    let template = config.registry.get(&plan.template_id)?;
    let elements = LayoutScaler::new(config.layout.clone()).scale(template, &plan, width, height)?;

    let title = format!("Story — {}", request.style_mode);
    Ok(renderer::render_page_svg(
        Some(&title),
        &elements,
        width,
        height,
        &config.svg,
    ))
}
