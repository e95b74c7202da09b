//! Layout scaler for story templates
//!
//! This module converts a [`Template`](crate::template::Template) authored in
//! the virtual canvas, together with a [`StoryPlan`](crate::plan::StoryPlan),
//! into [`RenderElement`]s sized for a concrete page.

pub mod config;
pub mod error;
pub mod scale;
pub mod types;

pub use config::{FontScaling, LayoutConfig, PerTextKind, TextKind};
pub use error::LayoutError;
pub use scale::{scale, LayoutScaler, ScaleFactors};
pub use types::{RectPrimitive, RenderElement, TextAlign, TextPrimitive};
