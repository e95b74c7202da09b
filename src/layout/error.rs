//! Error types for the layout scaler

use thiserror::Error;

/// Errors that can occur while scaling a template onto a page
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The destination page has no usable fixed size
    #[error(
        "destination has no fixed dimensions{}; \
         open a design with a fixed page size, such as a 1080 x 1920 story",
        describe_size(.size)
    )]
    NoDimensions {
        /// Size reported by the destination, `None` when it reported none
        size: Option<(f64, f64)>,
    },

    /// The configured virtual canvas cannot be scaled from
    #[error("invalid virtual canvas {width} x {height}: both sides must be positive")]
    InvalidVirtualCanvas { width: f64, height: f64 },
}

fn describe_size(size: &Option<(f64, f64)>) -> String {
    match size {
        Some((width, height)) => format!(" (got {} x {})", width, height),
        None => String::new(),
    }
}

impl LayoutError {
    /// Destination reported a size that cannot be scaled onto
    pub fn no_dimensions(width: f64, height: f64) -> Self {
        Self::NoDimensions {
            size: Some((width, height)),
        }
    }

    /// Destination without any size at all
    pub fn missing_dimensions() -> Self {
        Self::NoDimensions { size: None }
    }
}
