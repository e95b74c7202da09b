//! Sequencing of one story generation request
//!
//! ```text
//! Idle -> Requesting -> Validating ----> TemplateResolving -> Scaling -> Emitting -> Done
//!                  \            \      /
//!                   `----------> FallingBack
//! ```
//!
//! Any stage before `Done` may end in `Error`. The destination page size is
//! checked while still `Idle`, so a page without one never reaches the
//! generator. A generator that fails, times
//! out or answers with an invalid payload never fails the request: the
//! fallback planner takes over. Everything from template resolution onwards
//! is fatal.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::generator::{ContentGenerator, GeneratorError};
use crate::host::{HostCanvas, PageDimensions};
use crate::layout::{LayoutConfig, LayoutError, LayoutScaler, RenderElement};
use crate::plan::{
    normalize_with, validate, CopyLimits, FallbackPlanner, PlanRequest, SchemaError, StoryPlan,
    StoryRequest, StyleMode,
};
use crate::stylesheet::Stylesheet;
use crate::template::TemplateRegistry;
use crate::StoryError;

/// States of a generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    Requesting,
    Validating,
    FallingBack,
    TemplateResolving,
    Scaling,
    Emitting,
    Done,
    Error,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Requesting => "requesting",
            Stage::Validating => "validating",
            Stage::FallingBack => "falling_back",
            Stage::TemplateResolving => "template_resolving",
            Stage::Scaling => "scaling",
            Stage::Emitting => "emitting",
            Stage::Done => "done",
            Stage::Error => "error",
        };
        f.write_str(name)
    }
}

/// Where the plan of a finished request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    Generator,
    Fallback,
}

/// Why the generator's plan was not used
#[derive(Debug, Error)]
pub enum FallbackReason {
    #[error("content generator failed: {0}")]
    Generator(#[from] GeneratorError),

    #[error("generator payload rejected: {0}")]
    Schema(#[from] SchemaError),

    #[error("template '{template_id}' does not belong to style mode {style_mode}")]
    TemplateFamily {
        template_id: String,
        style_mode: StyleMode,
    },
}

/// Outcome of a successful request
#[derive(Debug)]
pub struct Generated {
    pub plan: StoryPlan,
    pub source: PlanSource,
    pub fallback_reason: Option<FallbackReason>,
    pub title: String,
    pub dimensions: PageDimensions,
    pub elements: Vec<RenderElement>,
    /// Stages visited, starting at `Idle` and ending at `Done`
    pub trace: Vec<Stage>,
}

/// Tuning knobs for [`Orchestrator`]
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Upper bound on a single content generator call
    pub generator_timeout: Duration,

    /// Reject generator plans whose template belongs to another style mode
    pub require_template_family: bool,

    /// Copy limits applied to every plan
    pub limits: CopyLimits,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            generator_timeout: Duration::from_secs(20),
            require_template_family: false,
            limits: CopyLimits::default(),
        }
    }
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator_timeout(mut self, timeout: Duration) -> Self {
        self.generator_timeout = timeout;
        self
    }

    pub fn with_require_template_family(mut self, require: bool) -> Self {
        self.require_template_family = require;
        self
    }

    pub fn with_limits(mut self, limits: CopyLimits) -> Self {
        self.limits = limits;
        self
    }
}

struct Trace {
    stages: Vec<Stage>,
}

impl Trace {
    fn new() -> Self {
        Self {
            stages: vec![Stage::Idle],
        }
    }

    fn current(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::Idle)
    }

    fn enter(&mut self, stage: Stage) {
        debug!(from = %self.current(), to = %stage, "stage transition");
        self.stages.push(stage);
    }

    /// Log the move to `Error` and return the stage that failed
    fn fail(&self) -> Stage {
        let from = self.current();
        debug!(%from, to = %Stage::Error, "stage transition");
        from
    }
}

/// Clears the busy flag when dropped, including on cancellation
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs generation requests for one session, one at a time
pub struct Orchestrator {
    generator: Arc<dyn ContentGenerator>,
    host: Arc<dyn HostCanvas>,
    registry: Arc<TemplateRegistry>,
    fallback: FallbackPlanner,
    scaler: LayoutScaler,
    config: OrchestratorConfig,
    busy: AtomicBool,
}

impl Orchestrator {
    /// Orchestrator with the built-in templates, stylesheet and layout
    pub fn new(generator: Arc<dyn ContentGenerator>, host: Arc<dyn HostCanvas>) -> Self {
        Self {
            generator,
            host,
            registry: Arc::new(TemplateRegistry::builtin()),
            fallback: FallbackPlanner::default(),
            scaler: LayoutScaler::default(),
            config: OrchestratorConfig::default(),
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_registry(mut self, registry: Arc<TemplateRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Take fallback palettes and template ids from a stylesheet
    pub fn with_stylesheet(mut self, stylesheet: &Stylesheet) -> Self {
        self.fallback = FallbackPlanner::from_stylesheet(stylesheet);
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPlanner) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.scaler = LayoutScaler::new(config);
        self
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Whether a request is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Generate one story page and hand it to the host
    ///
    /// Fails with [`StoryError::Busy`] while another request is in flight and
    /// with [`StoryError::Request`] when the style mode is not recognised.
    pub async fn generate(&self, request: &StoryRequest) -> Result<Generated, StoryError> {
        let request = request.parse()?;
        let _guard = BusyGuard::acquire(&self.busy).ok_or(StoryError::Busy)?;

        let mut trace = Trace::new();
        match self.run(&request, &mut trace).await {
            Ok(generated) => Ok(generated),
            Err(err) => {
                let stage = trace.fail();
                warn!(error = %err, %stage, internal = err.is_internal(), "story generation failed");
                Err(err)
            }
        }
    }

    async fn run(&self, request: &PlanRequest, trace: &mut Trace) -> Result<Generated, StoryError> {
        // A page without a usable size fails before the generator is asked
        let dimensions = self.page_dimensions().await?;

        trace.enter(Stage::Requesting);
        let (plan, fallback_reason) = match self.request_payload(request).await {
            Ok(raw) => {
                trace.enter(Stage::Validating);
                match self.accept(&raw) {
                    Ok(plan) => (plan, None),
                    Err(reason) => (self.fall_back(request, &reason, trace), Some(reason)),
                }
            }
            Err(err) => {
                let reason = FallbackReason::from(err);
                (self.fall_back(request, &reason, trace), Some(reason))
            }
        };
        let source = if fallback_reason.is_some() {
            PlanSource::Fallback
        } else {
            PlanSource::Generator
        };

        trace.enter(Stage::TemplateResolving);
        let template = self.registry.get(&plan.template_id)?;

        trace.enter(Stage::Scaling);
        let elements = self
            .scaler
            .scale(template, &plan, dimensions.width, dimensions.height)?;

        trace.enter(Stage::Emitting);
        let title = format!("Story — {}", request.style_mode);
        self.host.add_page(&title, &elements).await?;
        info!(
            template = %template.id,
            source = ?source,
            elements = elements.len(),
            "story page emitted"
        );

        trace.enter(Stage::Done);
        Ok(Generated {
            plan,
            source,
            fallback_reason,
            title,
            dimensions,
            elements,
            trace: std::mem::take(&mut trace.stages),
        })
    }

    async fn page_dimensions(&self) -> Result<PageDimensions, StoryError> {
        let dimensions = self
            .host
            .page_dimensions()
            .await?
            .ok_or_else(LayoutError::missing_dimensions)?;
        if !dimensions.is_usable() {
            return Err(LayoutError::no_dimensions(dimensions.width, dimensions.height).into());
        }
        Ok(dimensions)
    }

    async fn request_payload(&self, request: &PlanRequest) -> Result<Value, GeneratorError> {
        let timeout = self.config.generator_timeout;
        debug!(generator = self.generator.name(), ?timeout, "requesting plan");
        match tokio::time::timeout(timeout, self.generator.generate(request)).await {
            Ok(result) => result,
            Err(_) => Err(GeneratorError::Timeout(timeout)),
        }
    }

    /// Validate and normalize a generator payload
    fn accept(&self, raw: &Value) -> Result<StoryPlan, FallbackReason> {
        let plan = normalize_with(validate(raw)?, &self.config.limits);

        if self.config.require_template_family {
            let belongs = self
                .registry
                .get(&plan.template_id)
                .map(|t| t.style_mode == plan.style_mode)
                .unwrap_or(false);
            if !belongs {
                return Err(FallbackReason::TemplateFamily {
                    template_id: plan.template_id,
                    style_mode: plan.style_mode,
                });
            }
        }

        Ok(plan)
    }

    fn fall_back(
        &self,
        request: &PlanRequest,
        reason: &FallbackReason,
        trace: &mut Trace,
    ) -> StoryPlan {
        warn!(%reason, "using fallback plan");
        trace.enter(Stage::FallingBack);
        normalize_with(self.fallback.plan(request), &self.config.limits)
    }
}
