//! Content plans: schema, normalization and the offline fallback
//!
//! A [`StoryPlan`] carries everything a template needs besides geometry: the
//! style mode, the chosen template id, a palette and four copy strings.
//!
//! ```rust
//! use story_layout::plan::{normalize, FallbackPlanner, PlanRequest, StyleMode};
//!
//! let request = PlanRequest::new("Announce our new hoodie drop this Friday", StyleMode::Bold);
//! let plan = normalize(FallbackPlanner::default().plan(&request));
//! assert_eq!(plan.template_id, "t_bold_01");
//! assert_eq!(plan.copy.headline.chars().count(), 28);
//! ```

mod fallback;
mod normalize;
mod request;
mod schema;

pub use fallback::{
    FallbackPlanner, DEFAULT_CTA, DEFAULT_HANDLE, DEFAULT_HEADLINE, DEFAULT_SUBHEAD,
};
pub use normalize::{clamp, normalize, normalize_with, CopyLimits, ELLIPSIS};
pub use request::{PlanRequest, StoryRequest};
pub use schema::{validate, validate_str, Palette, SchemaError, StoryCopy, StoryPlan, StyleMode};
