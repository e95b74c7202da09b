//! Template system for story layouts
//!
//! A template is an ordered list of abstract elements (background, accent
//! bar, headline, subhead, CTA pill, CTA text, footer) positioned in a fixed
//! virtual canvas. The layout scaler later maps them onto a real page.
//!
//! Extra templates can be supplied as a TOML catalog:
//!
//! ```text
//! [[template]]
//! id = "t_split_01"
//! mode = "bold"
//! name = "Bold split"
//!
//! [[template.elements]]
//! kind = "bg"
//!
//! [[template.elements]]
//! kind = "headline"
//! top = 1000
//! left = 80
//! width = 920
//! font_size = 96
//! ```

mod builtin;
mod registry;

pub use builtin::{VIRTUAL_HEIGHT, VIRTUAL_WIDTH};
pub use registry::{ElementSpec, ShapeSpec, Template, TemplateError, TemplateRegistry, TextSpec};
