//! Configuration for the layout scaler

use crate::template::{VIRTUAL_HEIGHT, VIRTUAL_WIDTH};

use super::types::TextAlign;

/// Which scale factor a text element's font size follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontScaling {
    /// Horizontal factor, floored at the minimum font size
    Horizontal,
    /// Vertical factor, no floor
    Vertical,
}

/// The four kinds of text a template can place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    Headline,
    Subhead,
    CtaText,
    Footer,
}

/// One value per text kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerTextKind<T> {
    pub headline: T,
    pub subhead: T,
    pub cta_text: T,
    pub footer: T,
}

impl<T> PerTextKind<T> {
    pub fn get(&self, kind: TextKind) -> &T {
        match kind {
            TextKind::Headline => &self.headline,
            TextKind::Subhead => &self.subhead,
            TextKind::CtaText => &self.cta_text,
            TextKind::Footer => &self.footer,
        }
    }

    pub fn set(&mut self, kind: TextKind, value: T) {
        match kind {
            TextKind::Headline => self.headline = value,
            TextKind::Subhead => self.subhead = value,
            TextKind::CtaText => self.cta_text = value,
            TextKind::Footer => self.footer = value,
        }
    }
}

/// Configuration options for scaling templates onto a page
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Size of the canvas templates are authored in (width, height)
    pub virtual_canvas: (f64, f64),

    /// Smallest font size produced by [`FontScaling::Horizontal`]
    pub min_font_size: f64,

    /// Colour of the CTA label drawn on top of the accent pill
    pub cta_text_color: String,

    /// Font scaling policy per text kind
    pub font_scaling: PerTextKind<FontScaling>,

    /// Alignment per text kind
    pub alignment: PerTextKind<TextAlign>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            virtual_canvas: (VIRTUAL_WIDTH, VIRTUAL_HEIGHT),
            min_font_size: 10.0,
            cta_text_color: "#000000".to_string(),
            // CTA text follows the vertical factor; the other kinds follow width
            font_scaling: PerTextKind {
                headline: FontScaling::Horizontal,
                subhead: FontScaling::Horizontal,
                cta_text: FontScaling::Vertical,
                footer: FontScaling::Horizontal,
            },
            alignment: PerTextKind {
                headline: TextAlign::Start,
                subhead: TextAlign::Start,
                cta_text: TextAlign::Center,
                footer: TextAlign::Start,
            },
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the virtual canvas templates are authored in
    pub fn with_virtual_canvas(mut self, width: f64, height: f64) -> Self {
        self.virtual_canvas = (width, height);
        self
    }

    /// Set the minimum font size
    pub fn with_min_font_size(mut self, size: f64) -> Self {
        self.min_font_size = size;
        self
    }

    /// Set the CTA label colour
    pub fn with_cta_text_color(mut self, color: impl Into<String>) -> Self {
        self.cta_text_color = color.into();
        self
    }

    /// Set the font scaling policy for one text kind
    pub fn with_font_scaling(mut self, kind: TextKind, scaling: FontScaling) -> Self {
        self.font_scaling.set(kind, scaling);
        self
    }

    /// Use the same font scaling policy for every text kind
    pub fn with_uniform_font_scaling(mut self, scaling: FontScaling) -> Self {
        self.font_scaling = PerTextKind {
            headline: scaling,
            subhead: scaling,
            cta_text: scaling,
            footer: scaling,
        };
        self
    }

    /// Set the alignment for one text kind
    pub fn with_alignment(mut self, kind: TextKind, align: TextAlign) -> Self {
        self.alignment.set(kind, align);
        self
    }
}
