//! Drawing primitives produced by the layout scaler

use serde::{Deserialize, Serialize};

/// Horizontal alignment of text inside its box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// A filled rectangle in target canvas pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectPrimitive {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    /// Outline in the rectangle's own coordinate space, e.g. `M 0 0 H 100 V 40 H 0 Z`
    pub path: String,
    pub fill: String,
    pub corner_radius: f64,
}

/// A positioned block of text in target canvas pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPrimitive {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub content: String,
    pub font_size: f64,
    pub color: String,
    pub align: TextAlign,
}

/// One element ready for insertion into a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderElement {
    #[serde(rename = "shape")]
    Rect(RectPrimitive),
    Text(TextPrimitive),
}

impl RenderElement {
    pub fn as_rect(&self) -> Option<&RectPrimitive> {
        match self {
            RenderElement::Rect(rect) => Some(rect),
            RenderElement::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextPrimitive> {
        match self {
            RenderElement::Text(text) => Some(text),
            RenderElement::Rect(_) => None,
        }
    }

    /// Top-left corner as `(left, top)`
    pub fn origin(&self) -> (f64, f64) {
        match self {
            RenderElement::Rect(r) => (r.left, r.top),
            RenderElement::Text(t) => (t.left, t.top),
        }
    }
}
