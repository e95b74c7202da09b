//! The story templates shipped with the crate
//!
//! All coordinates are in the 1080 x 1920 virtual canvas.

use crate::plan::StyleMode;

use super::registry::{ElementSpec, ShapeSpec, Template, TextSpec};

/// Width of the canvas templates are authored in
pub const VIRTUAL_WIDTH: f64 = 1080.0;
/// Height of the canvas templates are authored in
pub const VIRTUAL_HEIGHT: f64 = 1920.0;

fn shape(top: f64, left: f64, width: f64, height: f64, radius: f64) -> ShapeSpec {
    ShapeSpec {
        top,
        left,
        width,
        height,
        radius: Some(radius),
    }
}

fn text(top: f64, left: f64, width: f64, font_size: f64) -> TextSpec {
    TextSpec {
        top,
        left,
        width,
        font_size,
    }
}

pub(crate) fn builtin_templates() -> Vec<Template> {
    vec![
        Template {
            id: "t_min_01".to_string(),
            style_mode: StyleMode::Minimal,
            name: "Minimal — Top-left stack".to_string(),
            elements: vec![
                ElementSpec::Background,
                ElementSpec::Headline(text(307.0, 77.0, 926.2, 85.0)),
                ElementSpec::Subhead(text(622.7, 61.0, 958.0, 41.0)),
                ElementSpec::CtaPill(shape(940.9, 340.5, 399.0, 123.0, 43.0)),
                ElementSpec::CtaText(text(969.0, 352.0, 376.0, 56.0)),
                ElementSpec::Footer(text(1170.0, 330.4, 420.3, 31.0)),
            ],
        },
        Template {
            id: "t_bold_01".to_string(),
            style_mode: StyleMode::Bold,
            name: "Bold — Accent bar headline".to_string(),
            elements: vec![
                ElementSpec::Background,
                ElementSpec::AccentBar(shape(200.0, 70.0, 940.0, 220.0, 36.0)),
                ElementSpec::Headline(text(240.0, 110.0, 860.0, 108.0)),
                ElementSpec::Subhead(text(470.0, 110.0, 860.0, 48.0)),
                ElementSpec::CtaPill(shape(640.0, 110.0, 320.0, 96.0, 48.0)),
                ElementSpec::CtaText(text(668.0, 110.0, 320.0, 38.0)),
                ElementSpec::Footer(text(1760.0, 110.0, 860.0, 34.0)),
            ],
        },
        Template {
            id: "t_prem_01".to_string(),
            style_mode: StyleMode::Premium,
            name: "Premium — Centered with accent line".to_string(),
            elements: vec![
                ElementSpec::Background,
                ElementSpec::AccentBar(shape(520.0, 240.0, 600.0, 8.0, 4.0)),
                ElementSpec::Headline(text(340.0, 140.0, 800.0, 78.0)),
                ElementSpec::Subhead(text(560.0, 160.0, 760.0, 40.0)),
                ElementSpec::CtaPill(shape(760.0, 380.0, 320.0, 84.0, 42.0)),
                ElementSpec::CtaText(text(784.0, 380.0, 320.0, 34.0)),
                ElementSpec::Footer(text(1760.0, 140.0, 800.0, 30.0)),
            ],
        },
    ]
}
