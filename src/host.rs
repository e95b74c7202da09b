//! Destination page boundary
//!
//! The orchestrator asks the host how big the destination page is and then
//! hands it the finished page in one call. Two hosts ship with the crate: a
//! file host that writes SVG or JSON, and an in-memory host that keeps pages
//! for inspection.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::layout::RenderElement;
use crate::renderer::{render_page_svg, SvgConfig};

/// Failures reported by a host
#[derive(Debug, Error)]
pub enum HostError {
    /// The page context could not be queried
    #[error("failed to query page context: {0}")]
    PageContext(String),

    /// The page could not be inserted
    #[error("failed to add page: {0}")]
    AddPage(String),

    #[error("failed to write page: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize page: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Pixel size of a destination page
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageDimensions {
    pub width: f64,
    pub height: f64,
}

impl PageDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides positive and finite
    pub fn is_usable(&self) -> bool {
        [self.width, self.height]
            .iter()
            .all(|side| side.is_finite() && *side > 0.0)
    }
}

/// A page as handed to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: String,
    pub elements: Vec<RenderElement>,
}

/// The design surface stories are inserted into
#[async_trait]
pub trait HostCanvas: Send + Sync {
    /// Size of the destination page; `None` when it has no fixed size
    async fn page_dimensions(&self) -> Result<Option<PageDimensions>, HostError>;

    /// Insert one page holding `elements` in order
    async fn add_page(&self, title: &str, elements: &[RenderElement]) -> Result<(), HostError>;
}

/// Output format of [`FileHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageFormat {
    #[default]
    Svg,
    Json,
}

/// Host writing each page to a file, or to stdout when no path is set
#[derive(Debug, Clone)]
pub struct FileHost {
    output: Option<PathBuf>,
    dimensions: Option<PageDimensions>,
    format: PageFormat,
    svg: SvgConfig,
}

impl FileHost {
    pub fn new(output: Option<PathBuf>, dimensions: Option<PageDimensions>) -> Self {
        Self {
            output,
            dimensions,
            format: PageFormat::default(),
            svg: SvgConfig::default(),
        }
    }

    pub fn with_format(mut self, format: PageFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_svg_config(mut self, svg: SvgConfig) -> Self {
        self.svg = svg;
        self
    }

    fn render(&self, title: &str, elements: &[RenderElement]) -> Result<String, HostError> {
        match self.format {
            PageFormat::Svg => {
                // Dimensions were checked by the caller before scaling
                let dims = self
                    .dimensions
                    .ok_or_else(|| HostError::AddPage("page has no dimensions".to_string()))?;
                Ok(render_page_svg(
                    Some(title),
                    elements,
                    dims.width,
                    dims.height,
                    &self.svg,
                ))
            }
            PageFormat::Json => {
                let page = Page {
                    title: title.to_string(),
                    elements: elements.to_vec(),
                };
                Ok(serde_json::to_string_pretty(&page)?)
            }
        }
    }
}

#[async_trait]
impl HostCanvas for FileHost {
    async fn page_dimensions(&self) -> Result<Option<PageDimensions>, HostError> {
        Ok(self.dimensions)
    }

    async fn add_page(&self, title: &str, elements: &[RenderElement]) -> Result<(), HostError> {
        let rendered = self.render(title, elements)?;
        match &self.output {
            Some(path) => {
                tokio::fs::write(path, rendered).await?;
                info!(path = %path.display(), elements = elements.len(), "page written");
            }
            None => println!("{}", rendered),
        }
        Ok(())
    }
}

/// Host keeping inserted pages in memory
#[derive(Debug, Default)]
pub struct MemoryHost {
    dimensions: Option<PageDimensions>,
    pages: Mutex<Vec<Page>>,
}

impl MemoryHost {
    /// Host whose page has a fixed size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            dimensions: Some(PageDimensions::new(width, height)),
            pages: Mutex::new(Vec::new()),
        }
    }

    /// Host whose page has no fixed size
    pub fn without_dimensions() -> Self {
        Self::default()
    }

    /// Pages inserted so far
    pub async fn pages(&self) -> Vec<Page> {
        self.pages.lock().await.clone()
    }
}

#[async_trait]
impl HostCanvas for MemoryHost {
    async fn page_dimensions(&self) -> Result<Option<PageDimensions>, HostError> {
        Ok(self.dimensions)
    }

    async fn add_page(&self, title: &str, elements: &[RenderElement]) -> Result<(), HostError> {
        self.pages.lock().await.push(Page {
            title: title.to_string(),
            elements: elements.to_vec(),
        });
        Ok(())
    }
}
