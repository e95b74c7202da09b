//! Mapping templates from the virtual canvas onto a target page
//!
//! Horizontal positions and widths use the horizontal factor, vertical
//! positions and heights the vertical one. Font sizes follow the policy
//! configured per text kind. The background always covers the whole target
//! page, whatever the aspect ratio.

use tracing::debug;

use crate::plan::StoryPlan;
use crate::renderer::path::ResolvedPath;
use crate::template::{ElementSpec, ShapeSpec, Template, TextSpec};

use super::config::{FontScaling, LayoutConfig, TextKind};
use super::error::LayoutError;
use super::types::{RectPrimitive, RenderElement, TextPrimitive};

/// Scale factors from the virtual canvas to one target page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub sx: f64,
    pub sy: f64,
    pub min_font_size: f64,
}

impl ScaleFactors {
    /// Compute factors for a target page
    ///
    /// Fails with [`LayoutError::NoDimensions`] unless both target sides are
    /// positive and finite.
    pub fn new(
        target_width: f64,
        target_height: f64,
        config: &LayoutConfig,
    ) -> Result<Self, LayoutError> {
        if !is_usable(target_width) || !is_usable(target_height) {
            return Err(LayoutError::no_dimensions(target_width, target_height));
        }
        let (virtual_width, virtual_height) = config.virtual_canvas;
        if !is_usable(virtual_width) || !is_usable(virtual_height) {
            return Err(LayoutError::InvalidVirtualCanvas {
                width: virtual_width,
                height: virtual_height,
            });
        }
        Ok(Self {
            sx: target_width / virtual_width,
            sy: target_height / virtual_height,
            min_font_size: config.min_font_size,
        })
    }

    /// Horizontal position or width
    pub fn x(&self, n: f64) -> f64 {
        (n * self.sx).round()
    }

    /// Vertical position or height
    pub fn y(&self, n: f64) -> f64 {
        (n * self.sy).round()
    }

    /// Font size following the horizontal factor, never below the minimum
    pub fn text(&self, n: f64) -> f64 {
        self.x(n).max(self.min_font_size)
    }

    pub fn font(&self, n: f64, scaling: FontScaling) -> f64 {
        match scaling {
            FontScaling::Horizontal => self.text(n),
            FontScaling::Vertical => self.y(n),
        }
    }
}

fn is_usable(n: f64) -> bool {
    n.is_finite() && n > 0.0
}

/// Turns a template and a plan into page primitives
#[derive(Debug, Clone, Default)]
pub struct LayoutScaler {
    config: LayoutConfig,
}

impl LayoutScaler {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Scale every element of `template`, in template order
    pub fn scale(
        &self,
        template: &Template,
        plan: &StoryPlan,
        target_width: f64,
        target_height: f64,
    ) -> Result<Vec<RenderElement>, LayoutError> {
        let factors = ScaleFactors::new(target_width, target_height, &self.config)?;
        debug!(
            template = %template.id,
            sx = factors.sx,
            sy = factors.sy,
            "scaling template"
        );

        let palette = &plan.palette;
        let copy = &plan.copy;

        let elements = template
            .elements
            .iter()
            .map(|spec| match spec {
                ElementSpec::Background => RenderElement::Rect(RectPrimitive {
                    top: 0.0,
                    left: 0.0,
                    width: target_width,
                    height: target_height,
                    path: ResolvedPath::rect(target_width, target_height).to_svg_d(),
                    fill: palette.background.clone(),
                    corner_radius: 0.0,
                }),
                ElementSpec::AccentBar(shape) | ElementSpec::CtaPill(shape) => {
                    self.rect(shape, &palette.accent, &factors)
                }
                ElementSpec::Headline(text) => self.text(
                    text,
                    TextKind::Headline,
                    &copy.headline,
                    &palette.text,
                    &factors,
                ),
                ElementSpec::Subhead(text) => self.text(
                    text,
                    TextKind::Subhead,
                    &copy.subhead,
                    &palette.text,
                    &factors,
                ),
                ElementSpec::CtaText(text) => self.text(
                    text,
                    TextKind::CtaText,
                    &copy.cta,
                    &self.config.cta_text_color,
                    &factors,
                ),
                ElementSpec::Footer(text) => self.text(
                    text,
                    TextKind::Footer,
                    &copy.footer,
                    &palette.text,
                    &factors,
                ),
            })
            .collect();

        Ok(elements)
    }

    fn rect(&self, shape: &ShapeSpec, fill: &str, factors: &ScaleFactors) -> RenderElement {
        let width = factors.x(shape.width);
        let height = factors.y(shape.height);
        RenderElement::Rect(RectPrimitive {
            top: factors.y(shape.top),
            left: factors.x(shape.left),
            width,
            height,
            path: ResolvedPath::rect(width, height).to_svg_d(),
            fill: fill.to_string(),
            corner_radius: shape.radius.unwrap_or(0.0),
        })
    }

    fn text(
        &self,
        spec: &TextSpec,
        kind: TextKind,
        content: &str,
        color: &str,
        factors: &ScaleFactors,
    ) -> RenderElement {
        RenderElement::Text(TextPrimitive {
            top: factors.y(spec.top),
            left: factors.x(spec.left),
            width: factors.x(spec.width),
            content: content.to_string(),
            font_size: factors.font(spec.font_size, *self.config.font_scaling.get(kind)),
            color: color.to_string(),
            align: *self.config.alignment.get(kind),
        })
    }
}

/// Scale with the default configuration
pub fn scale(
    template: &Template,
    plan: &StoryPlan,
    target_width: f64,
    target_height: f64,
) -> Result<Vec<RenderElement>, LayoutError> {
    LayoutScaler::default().scale(template, plan, target_width, target_height)
}
