//! End-to-end request scenarios against an in-memory host

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::sync::Notify;

use story_layout::host::{HostError, Page, PageDimensions};
use story_layout::layout::{LayoutError, RenderElement, TextAlign};
use story_layout::orchestrator::FallbackReason;
use story_layout::plan::PlanRequest;
use story_layout::{
    ContentGenerator, GeneratorError, HostCanvas, MemoryHost, Orchestrator, OrchestratorConfig, PlanSource,
    SchemaError, Stage, StoryError, StoryRequest, StyleMode, UnavailableGenerator,
};

/// Answers every request with the same payload
struct StaticGenerator(Value);

#[async_trait]
impl ContentGenerator for StaticGenerator {
    async fn generate(&self, _request: &PlanRequest) -> Result<Value, GeneratorError> {
        Ok(self.0.clone())
    }
}

/// Answers after a long delay
struct SlowGenerator(Duration);

#[async_trait]
impl ContentGenerator for SlowGenerator {
    async fn generate(&self, _request: &PlanRequest) -> Result<Value, GeneratorError> {
        tokio::time::sleep(self.0).await;
        Ok(bold_payload())
    }
}

/// Answers once the gate is opened
struct GatedGenerator(Arc<Notify>);

#[async_trait]
impl ContentGenerator for GatedGenerator {
    async fn generate(&self, _request: &PlanRequest) -> Result<Value, GeneratorError> {
        self.0.notified().await;
        Ok(bold_payload())
    }
}

/// Counts calls and answers with a valid payload
#[derive(Default)]
struct CountingGenerator(AtomicUsize);

impl CountingGenerator {
    fn calls(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for CountingGenerator {
    async fn generate(&self, _request: &PlanRequest) -> Result<Value, GeneratorError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(bold_payload())
    }
}

/// Host whose page insertion fails until `accept` is set
struct RejectingHost {
    accept: AtomicBool,
    inner: MemoryHost,
}

#[async_trait]
impl HostCanvas for RejectingHost {
    async fn page_dimensions(&self) -> Result<Option<PageDimensions>, HostError> {
        self.inner.page_dimensions().await
    }

    async fn add_page(&self, title: &str, elements: &[RenderElement]) -> Result<(), HostError> {
        if self.accept.load(Ordering::SeqCst) {
            self.inner.add_page(title, elements).await
        } else {
            Err(HostError::AddPage("page limit reached".to_string()))
        }
    }
}

fn bold_payload() -> Value {
    json!({
        "style_mode": "bold",
        "template_id": "t_bold_01",
        "palette": { "bg": "#111111", "text": "#EEEEEE", "accent": "#FF0055" },
        "copy": {
            "headline": "ANNOUNCE OUR NEW HOODIE DROP THIS FRIDAY",
            "subhead": "Limited run.",
            "cta": "Shop the new drop",
            "footer": "@apex"
        }
    })
}

fn story_host() -> Arc<MemoryHost> {
    Arc::new(MemoryHost::new(1080.0, 1920.0))
}

const FULL_RUN: [Stage; 7] = [
    Stage::Idle,
    Stage::Requesting,
    Stage::Validating,
    Stage::TemplateResolving,
    Stage::Scaling,
    Stage::Emitting,
    Stage::Done,
];

#[tokio::test]
async fn test_generator_plan_is_normalized_and_emitted() {
    let host = story_host();
    let orchestrator = Orchestrator::new(Arc::new(StaticGenerator(bold_payload())), host.clone());

    let generated = orchestrator
        .generate(&StoryRequest::new("Hoodie drop", "bold"))
        .await
        .expect("Should generate");

    assert_eq!(generated.source, PlanSource::Generator);
    assert!(generated.fallback_reason.is_none());
    assert_eq!(generated.trace, FULL_RUN.to_vec());
    assert_eq!(generated.plan.copy.headline, "ANNOUNCE OUR NEW HOODIE DRO…");
    assert_eq!(generated.plan.copy.cta, "Shop the…");

    let pages = host.pages().await;
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].title, "Story — bold");
    assert_eq!(pages[0].elements, generated.elements);

    let bar = generated.elements[1].as_rect().expect("accent bar");
    assert_eq!(bar.fill, "#FF0055");
    let cta = generated.elements[5].as_text().expect("cta text");
    assert_eq!(cta.content, "Shop the…");
    assert_eq!(cta.color, "#000000");
    assert_eq!(cta.align, TextAlign::Center);
}

#[tokio::test]
async fn test_generator_failure_falls_back() {
    let host = story_host();
    let orchestrator = Orchestrator::new(
        Arc::new(UnavailableGenerator::new("service down")),
        host.clone(),
    );

    let generated = orchestrator
        .generate(&StoryRequest::new("Summer sale", "premium").with_brand("maison"))
        .await
        .expect("Should generate");

    assert_eq!(generated.source, PlanSource::Fallback);
    assert_eq!(
        generated.trace,
        vec![
            Stage::Idle,
            Stage::Requesting,
            Stage::FallingBack,
            Stage::TemplateResolving,
            Stage::Scaling,
            Stage::Emitting,
            Stage::Done,
        ]
    );
    let reason = generated.fallback_reason.expect("fallback reason");
    assert!(reason.to_string().contains("service down"));

    assert_eq!(generated.plan.template_id, "t_prem_01");
    assert_eq!(generated.plan.palette.accent, "#C8A04D");
    assert_eq!(generated.plan.copy.headline, "SUMMER SALE");
    assert_eq!(generated.plan.copy.footer, "@maison");
    assert_eq!(host.pages().await.len(), 1);
}

#[tokio::test]
async fn test_invalid_payload_falls_back() {
    let mut payload = bold_payload();
    payload["style_mode"] = json!("retro");
    let orchestrator = Orchestrator::new(Arc::new(StaticGenerator(payload)), story_host());

    let generated = orchestrator
        .generate(&StoryRequest::new("Hoodie drop", "bold"))
        .await
        .expect("Should generate");

    assert_eq!(generated.source, PlanSource::Fallback);
    assert!(generated.trace.contains(&Stage::Validating));
    assert!(generated.trace.contains(&Stage::FallingBack));
    assert!(matches!(
        generated.fallback_reason,
        Some(FallbackReason::Schema(SchemaError::InvalidStyleMode { .. }))
    ));
    assert_eq!(generated.plan.template_id, "t_bold_01");
    assert_eq!(generated.plan.palette.accent, "#7C3AED");
}

#[tokio::test]
async fn test_payload_with_extra_keys_falls_back() {
    let mut payload = bold_payload();
    payload["mood"] = json!("happy");
    let orchestrator = Orchestrator::new(Arc::new(StaticGenerator(payload)), story_host());

    let generated = orchestrator
        .generate(&StoryRequest::new("Hoodie drop", "bold"))
        .await
        .expect("Should generate");

    assert!(matches!(
        generated.fallback_reason,
        Some(FallbackReason::Schema(SchemaError::UnexpectedField { .. }))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_slow_generator_times_out() {
    let orchestrator = Orchestrator::new(
        Arc::new(SlowGenerator(Duration::from_secs(120))),
        story_host(),
    )
    .with_config(OrchestratorConfig::new().with_generator_timeout(Duration::from_secs(5)));

    let generated = orchestrator
        .generate(&StoryRequest::new("Hoodie drop", "minimal"))
        .await
        .expect("Should generate");

    assert_eq!(generated.source, PlanSource::Fallback);
    assert!(matches!(
        generated.fallback_reason,
        Some(FallbackReason::Generator(GeneratorError::Timeout(_)))
    ));
    assert_eq!(generated.plan.template_id, "t_min_01");
}

#[tokio::test]
async fn test_second_request_while_busy_is_rejected() {
    let gate = Arc::new(Notify::new());
    let host = story_host();
    let orchestrator = Orchestrator::new(Arc::new(GatedGenerator(gate.clone())), host.clone());
    let request = StoryRequest::new("Hoodie drop", "bold");

    let (first, second) = tokio::join!(orchestrator.generate(&request), async {
        let result = orchestrator.generate(&request).await;
        gate.notify_one();
        result
    });

    assert!(matches!(second, Err(StoryError::Busy)));
    assert_eq!(first.expect("Should generate").source, PlanSource::Generator);
    assert_eq!(host.pages().await.len(), 1);
    assert!(!orchestrator.is_busy());

    // The flag is released once the first request finishes
    gate.notify_one();
    assert!(orchestrator.generate(&request).await.is_ok());
}

#[tokio::test]
async fn test_page_without_dimensions_fails_before_generator() {
    let generator = Arc::new(CountingGenerator::default());
    let host = Arc::new(MemoryHost::without_dimensions());
    let orchestrator = Orchestrator::new(generator.clone(), host.clone());

    let err = orchestrator
        .generate(&StoryRequest::new("Hoodie drop", "bold"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoryError::Layout(LayoutError::NoDimensions { size: None })
    ));
    assert!(!err.to_string().contains("NaN"));
    assert_eq!(generator.calls(), 0);
    assert!(host.pages().await.is_empty());
    assert!(!orchestrator.is_busy());
}

#[tokio::test]
async fn test_zero_sized_page_fails_before_generator() {
    let generator = Arc::new(CountingGenerator::default());
    let host = Arc::new(MemoryHost::new(0.0, 1920.0));
    let orchestrator = Orchestrator::new(generator.clone(), host.clone());

    let err = orchestrator
        .generate(&StoryRequest::new("Hoodie drop", "bold"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoryError::Layout(LayoutError::NoDimensions {
            size: Some((0.0, 1920.0))
        })
    ));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_page_insertion_failure_is_fatal_and_releases_busy() {
    let host = Arc::new(RejectingHost {
        accept: AtomicBool::new(false),
        inner: MemoryHost::new(1080.0, 1920.0),
    });
    let orchestrator = Orchestrator::new(Arc::new(StaticGenerator(bold_payload())), host.clone());
    let request = StoryRequest::new("Hoodie drop", "bold");

    let err = orchestrator.generate(&request).await.unwrap_err();
    assert!(matches!(err, StoryError::Host(HostError::AddPage(_))));
    assert!(!err.is_internal());
    assert!(host.inner.pages().await.is_empty());
    assert!(!orchestrator.is_busy());

    host.accept.store(true, Ordering::SeqCst);
    let generated = orchestrator.generate(&request).await.expect("Should generate");
    let pages: Vec<Page> = host.inner.pages().await;
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].elements, generated.elements);
}

#[tokio::test]
async fn test_unknown_template_from_generator_is_internal_error() {
    let mut payload = bold_payload();
    payload["template_id"] = json!("t_bold_99");
    let host = story_host();
    let orchestrator = Orchestrator::new(Arc::new(StaticGenerator(payload)), host.clone());

    let err = orchestrator
        .generate(&StoryRequest::new("Hoodie drop", "bold"))
        .await
        .unwrap_err();

    assert!(err.is_internal());
    assert_eq!(err.to_string(), "internal error: unknown template_id: t_bold_99");
    assert!(host.pages().await.is_empty());
}

#[tokio::test]
async fn test_template_family_check_falls_back() {
    let mut payload = bold_payload();
    payload["style_mode"] = json!("premium");
    let orchestrator = Orchestrator::new(Arc::new(StaticGenerator(payload)), story_host())
        .with_config(OrchestratorConfig::new().with_require_template_family(true));

    let generated = orchestrator
        .generate(&StoryRequest::new("Hoodie drop", "premium"))
        .await
        .expect("Should generate");

    assert!(matches!(
        generated.fallback_reason,
        Some(FallbackReason::TemplateFamily {
            style_mode: StyleMode::Premium,
            ..
        })
    ));
    assert_eq!(generated.plan.template_id, "t_prem_01");
}

#[tokio::test]
async fn test_template_family_unchecked_by_default() {
    let mut payload = bold_payload();
    payload["style_mode"] = json!("premium");
    let orchestrator = Orchestrator::new(Arc::new(StaticGenerator(payload)), story_host());

    let generated = orchestrator
        .generate(&StoryRequest::new("Hoodie drop", "premium"))
        .await
        .expect("Should generate");

    assert_eq!(generated.source, PlanSource::Generator);
    assert_eq!(generated.plan.template_id, "t_bold_01");
}

#[tokio::test]
async fn test_empty_minimal_request_uses_defaults() {
    let host = story_host();
    let orchestrator = Orchestrator::new(Arc::new(UnavailableGenerator::default()), host.clone());

    let generated = orchestrator
        .generate(&StoryRequest::new("", "minimal"))
        .await
        .expect("Should generate");

    let copy = &generated.plan.copy;
    assert_eq!(copy.headline, "NEW PRODUCT DROP");
    assert_eq!(copy.cta, "Shop now");
    assert_eq!(copy.footer, "@yourbrand");

    let kinds: Vec<&str> = generated
        .elements
        .iter()
        .map(|e| match e {
            RenderElement::Rect(_) => "rect",
            RenderElement::Text(_) => "text",
        })
        .collect();
    assert_eq!(kinds, vec!["rect", "text", "text", "rect", "text", "text"]);

    let background = generated.elements[0].as_rect().expect("background");
    assert_eq!((background.width, background.height), (1080.0, 1920.0));
    assert_eq!(background.fill, "#0B0F1A");

    let headline = generated.elements[1].as_text().expect("headline");
    assert_eq!((headline.top, headline.left, headline.font_size), (307.0, 77.0, 85.0));
    let subhead = generated.elements[2].as_text().expect("subhead");
    assert_eq!(subhead.top, 623.0);
}
