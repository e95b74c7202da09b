//! Path outline utilities
//!
//! Rectangles are handed to the destination as a closed outline in their own
//! coordinate space. Outlines start with a move and use only straight
//! segments.

/// A segment in a resolved path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(f64, f64),
    /// Horizontal line to x
    HorizontalTo(f64),
    /// Vertical line to y
    VerticalTo(f64),
    /// Close path back to start
    Close,
}

/// A resolved path ready for output
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath {
    pub segments: Vec<PathSegment>,
}

impl ResolvedPath {
    /// Outline of a `width` x `height` rectangle anchored at the origin
    pub fn rect(width: f64, height: f64) -> Self {
        Self {
            segments: vec![
                PathSegment::MoveTo(0.0, 0.0),
                PathSegment::HorizontalTo(width),
                PathSegment::VerticalTo(height),
                PathSegment::HorizontalTo(0.0),
                PathSegment::Close,
            ],
        }
    }

    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        self.segments
            .iter()
            .map(|seg| match seg {
                PathSegment::MoveTo(x, y) => format!("M {} {}", x, y),
                PathSegment::HorizontalTo(x) => format!("H {}", x),
                PathSegment::VerticalTo(y) => format!("V {}", y),
                PathSegment::Close => "Z".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_outline() {
        assert_eq!(ResolvedPath::rect(399.0, 123.0).to_svg_d(), "M 0 0 H 399 V 123 H 0 Z");
    }

    #[test]
    fn test_fractional_sizes_are_kept() {
        assert_eq!(ResolvedPath::rect(10.5, 2.25).to_svg_d(), "M 0 0 H 10.5 V 2.25 H 0 Z");
    }

    #[test]
    fn test_empty_path() {
        let path = ResolvedPath { segments: vec![] };
        assert_eq!(path.to_svg_d(), "");
    }
}
