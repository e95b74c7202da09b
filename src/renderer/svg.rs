//! SVG generation from render elements
//!
//! Used as a stand-in destination page: one SVG document per story, sized to
//! the target canvas, with elements written in insertion order.

use crate::layout::{RectPrimitive, RenderElement, TextAlign, TextPrimitive};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    title: Option<String>,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            title: None,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Set the document title
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    /// Add the font family rule for text elements
    pub fn add_font_family(&mut self, family: &str) {
        let prefix = self.prefix();
        self.styles.push(format!(
            ".{}text {{ font-family: {}; }}",
            prefix,
            escape_xml(family)
        ));
    }

    /// Add a filled rectangle
    pub fn add_rect(&mut self, rect: &RectPrimitive) {
        let prefix = self.prefix();
        let radius = if rect.corner_radius > 0.0 {
            format!(r#" rx="{}""#, rect.corner_radius)
        } else {
            String::new()
        };

        self.elements.push(format!(
            r#"{}<rect class="{}shape" x="{}" y="{}" width="{}" height="{}"{} fill="{}"/>"#,
            self.indent_str(),
            prefix,
            rect.left,
            rect.top,
            rect.width,
            rect.height,
            radius,
            escape_xml(&rect.fill)
        ));
    }

    /// Add a text element
    ///
    /// `y` is the top of the text box, so the baseline hangs from it.
    pub fn add_text(&mut self, text: &TextPrimitive) {
        let prefix = self.prefix();
        let (x, anchor) = match text.align {
            TextAlign::Start => (text.left, "start"),
            TextAlign::Center => (text.left + text.width / 2.0, "middle"),
            TextAlign::End => (text.left + text.width, "end"),
        };

        self.elements.push(format!(
            r#"{}<text class="{}text" x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{}" dominant-baseline="hanging">{}</text>"#,
            self.indent_str(),
            prefix,
            x,
            text.top,
            text.font_size,
            escape_xml(&text.color),
            anchor,
            escape_xml(&text.content)
        ));
    }

    /// Add any render element
    pub fn add_element(&mut self, element: &RenderElement) {
        match element {
            RenderElement::Rect(rect) => self.add_rect(rect),
            RenderElement::Text(text) => self.add_text(text),
        }
    }

    /// Build the final SVG string
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();
        let indent = self.indent_str();

        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            width, height, width, height
        ));
        svg.push_str(nl);

        if let Some(title) = &self.title {
            svg.push_str(&format!("{}<title>{}</title>", indent, escape_xml(title)));
            svg.push_str(nl);
        }

        if !self.styles.is_empty() {
            svg.push_str(indent);
            svg.push_str("<style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str(indent);
                svg.push_str(indent);
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str(indent);
            svg.push_str("</style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render elements onto a `width` x `height` SVG page
pub fn render_svg(elements: &[RenderElement], width: f64, height: f64, config: &SvgConfig) -> String {
    render_page_svg(None, elements, width, height, config)
}

/// Render elements onto an SVG page with an optional title
pub fn render_page_svg(
    title: Option<&str>,
    elements: &[RenderElement],
    width: f64,
    height: f64,
    config: &SvgConfig,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());

    if let Some(title) = title {
        builder.set_title(title);
    }
    if let Some(family) = &config.font_family {
        builder.add_font_family(family);
    }
    for element in elements {
        builder.add_element(element);
    }

    builder.build(width, height)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(radius: f64) -> RenderElement {
        RenderElement::Rect(RectPrimitive {
            top: 10.0,
            left: 20.0,
            width: 100.0,
            height: 40.0,
            path: "M 0 0 H 100 V 40 H 0 Z".to_string(),
            fill: "#7C3AED".to_string(),
            corner_radius: radius,
        })
    }

    fn text(align: TextAlign, content: &str) -> RenderElement {
        RenderElement::Text(TextPrimitive {
            top: 50.0,
            left: 100.0,
            width: 200.0,
            content: content.to_string(),
            font_size: 24.0,
            color: "#FFFFFF".to_string(),
            align,
        })
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn test_rect_radius_only_when_positive() {
        let svg = render_svg(&[rect(0.0)], 200.0, 200.0, &SvgConfig::default());
        assert!(!svg.contains("rx="));
        let svg = render_svg(&[rect(48.0)], 200.0, 200.0, &SvgConfig::default());
        assert!(svg.contains(r#"rx="48""#));
    }

    #[test]
    fn test_text_anchor_follows_alignment() {
        let config = SvgConfig::default();
        let start = render_svg(&[text(TextAlign::Start, "a")], 400.0, 400.0, &config);
        assert!(start.contains(r#"x="100""#) && start.contains(r#"text-anchor="start""#));
        let center = render_svg(&[text(TextAlign::Center, "a")], 400.0, 400.0, &config);
        assert!(center.contains(r#"x="200""#) && center.contains(r#"text-anchor="middle""#));
        let end = render_svg(&[text(TextAlign::End, "a")], 400.0, 400.0, &config);
        assert!(end.contains(r#"x="300""#) && end.contains(r#"text-anchor="end""#));
    }

    #[test]
    fn test_text_content_is_escaped() {
        let svg = render_svg(
            &[text(TextAlign::Start, "Tees & <Hats>")],
            400.0,
            400.0,
            &SvgConfig::default(),
        );
        assert!(svg.contains("Tees &amp; &lt;Hats&gt;"));
    }

    #[test]
    fn test_compact_page_with_title() {
        let config = SvgConfig::new()
            .with_standalone(false)
            .with_pretty_print(false)
            .without_class_prefix();
        let svg = render_page_svg(Some("Story — bold"), &[rect(0.0)], 200.0, 100.0, &config);
        insta::assert_snapshot!(svg, @r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 200 100"><title>Story — bold</title><rect class="shape" x="20" y="10" width="100" height="40" fill="#7C3AED"/></svg>"##);
    }

    #[test]
    fn test_font_family_style_block() {
        let config = SvgConfig::new().with_font_family("Inter");
        let svg = render_svg(&[text(TextAlign::Start, "a")], 10.0, 10.0, &config);
        assert!(svg.contains(".story-text { font-family: Inter; }"));
        assert!(svg.starts_with("<?xml"));
    }
}
