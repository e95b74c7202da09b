//! SVG renderer for story pages
//!
//! This module takes the scaler's [`RenderElement`](crate::layout::RenderElement)s
//! and produces a standalone SVG document the size of the target page.

pub mod config;
pub mod path;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_page_svg, render_svg};
