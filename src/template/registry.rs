//! Template registry for storing and retrieving template definitions

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plan::StyleMode;

use super::builtin::builtin_templates;

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found in registry
    #[error("unknown template_id: {id}")]
    NotFound { id: String },

    /// Duplicate template definition
    #[error("duplicate template definition: {id}")]
    Duplicate { id: String },

    /// Error reading a template catalog file
    #[error("error reading template file {path}: {message}")]
    FileReadError { path: PathBuf, message: String },

    /// Template catalog is not valid TOML or has the wrong shape
    #[error("failed to parse template catalog: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Placement of a filled rectangle, in virtual canvas units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    /// Corner radius, carried through to the output unscaled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

/// Placement of a text box, in virtual canvas units
///
/// Text boxes have no height; the destination sizes them from the content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    #[serde(alias = "fontSize")]
    pub font_size: f64,
}

/// One abstract element of a template
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementSpec {
    /// Full-canvas fill in the palette background colour
    #[serde(rename = "bg", alias = "background")]
    Background,
    AccentBar(ShapeSpec),
    Headline(TextSpec),
    Subhead(TextSpec),
    CtaPill(ShapeSpec),
    CtaText(TextSpec),
    Footer(TextSpec),
}

impl ElementSpec {
    /// Short name used in logs and serialized catalogs
    pub fn kind(&self) -> &'static str {
        match self {
            ElementSpec::Background => "bg",
            ElementSpec::AccentBar(_) => "accent_bar",
            ElementSpec::Headline(_) => "headline",
            ElementSpec::Subhead(_) => "subhead",
            ElementSpec::CtaPill(_) => "cta_pill",
            ElementSpec::CtaText(_) => "cta_text",
            ElementSpec::Footer(_) => "footer",
        }
    }
}

/// A named layout authored in the virtual canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    #[serde(rename = "mode", alias = "style_mode")]
    pub style_mode: StyleMode,
    pub name: String,
    /// Drawn in this order, background first
    pub elements: Vec<ElementSpec>,
}

/// TOML structure for template catalogs
#[derive(Deserialize)]
struct TomlCatalog {
    #[serde(default, rename = "template")]
    templates: Vec<Template>,
}

/// Registry for storing template definitions
///
/// Filled once at start-up and read-only afterwards.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
    index: HashMap<String, usize>,
}

impl TemplateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in story templates
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for template in builtin_templates() {
            let registered = registry.register(template);
            debug_assert!(registered.is_ok(), "built-in template ids are unique");
        }
        registry
    }

    /// Built-in templates plus the catalog stored at `path`
    pub fn with_builtin_and(path: &Path) -> Result<Self, TemplateError> {
        let mut registry = Self::builtin();
        registry.load_file(path)?;
        Ok(registry)
    }

    /// Registry holding only the templates of a TOML catalog
    pub fn from_toml_str(content: &str) -> Result<Self, TemplateError> {
        let mut registry = Self::new();
        registry.load_toml_str(content)?;
        Ok(registry)
    }

    /// Register a template
    pub fn register(&mut self, template: Template) -> Result<(), TemplateError> {
        if self.index.contains_key(&template.id) {
            return Err(TemplateError::Duplicate { id: template.id });
        }
        self.index.insert(template.id.clone(), self.templates.len());
        self.templates.push(template);
        Ok(())
    }

    /// Register every template of a TOML catalog
    pub fn load_toml_str(&mut self, content: &str) -> Result<(), TemplateError> {
        let catalog: TomlCatalog = toml::from_str(content)?;
        for template in catalog.templates {
            self.register(template)?;
        }
        Ok(())
    }

    /// Register every template of a TOML catalog file
    pub fn load_file(&mut self, path: &Path) -> Result<(), TemplateError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| TemplateError::FileReadError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        self.load_toml_str(&content)
    }

    /// Get a template by id
    pub fn get(&self, id: &str) -> Result<&Template, TemplateError> {
        self.index
            .get(id)
            .map(|&i| &self.templates[i])
            .ok_or_else(|| TemplateError::NotFound { id: id.to_string() })
    }

    /// Check if a template exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Template ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
