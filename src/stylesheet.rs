//! Stylesheet system for per-mode defaults
//!
//! A stylesheet holds the default palette and the default template id for
//! each style mode. The fallback planner and the content generator prompt both
//! read from it. Stylesheets can be loaded from TOML; any mode a file leaves
//! out keeps the built-in value.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::plan::{Palette, StyleMode};

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// One value per style mode
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModeTable<T> {
    pub minimal: T,
    pub bold: T,
    pub premium: T,
}

impl<T> ModeTable<T> {
    pub fn new(minimal: T, bold: T, premium: T) -> Self {
        Self {
            minimal,
            bold,
            premium,
        }
    }

    pub fn get(&self, mode: StyleMode) -> &T {
        match mode {
            StyleMode::Minimal => &self.minimal,
            StyleMode::Bold => &self.bold,
            StyleMode::Premium => &self.premium,
        }
    }
}

impl<T: Clone> ModeTable<T> {
    /// Same value for every mode
    pub fn uniform(value: T) -> Self {
        Self::new(value.clone(), value.clone(), value)
    }
}

/// Per-mode palettes and template ids
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub palettes: ModeTable<Palette>,
    pub templates: ModeTable<String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    palettes: PartialModeTable<Palette>,
    #[serde(default)]
    templates: PartialModeTable<String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct PartialModeTable<T> {
    minimal: Option<T>,
    bold: Option<T>,
    premium: Option<T>,
}

// Derived Default would require T: Default
impl<T> Default for PartialModeTable<T> {
    fn default() -> Self {
        Self {
            minimal: None,
            bold: None,
            premium: None,
        }
    }
}

impl<T> PartialModeTable<T> {
    fn or(self, defaults: ModeTable<T>) -> ModeTable<T> {
        ModeTable {
            minimal: self.minimal.unwrap_or(defaults.minimal),
            bold: self.bold.unwrap_or(defaults.bold),
            premium: self.premium.unwrap_or(defaults.premium),
        }
    }
}

fn builtin_palettes() -> ModeTable<Palette> {
    ModeTable::new(
        Palette::new("#0B0F1A", "#FFFFFF", "#22C55E"),
        Palette::new("#0B0F1A", "#FFFFFF", "#7C3AED"),
        Palette::new("#0A0A0A", "#F5F5F5", "#C8A04D"),
    )
}

fn builtin_templates() -> ModeTable<String> {
    ModeTable::new(
        "t_min_01".to_string(),
        "t_bold_01".to_string(),
        "t_prem_01".to_string(),
    )
}

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            palettes: parsed.palettes.or(builtin_palettes()),
            templates: parsed.templates.or(builtin_templates()),
        })
    }

    pub fn palette(&self, mode: StyleMode) -> &Palette {
        self.palettes.get(mode)
    }

    pub fn template_id(&self, mode: StyleMode) -> &str {
        self.templates.get(mode)
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            name: Some("default".to_string()),
            description: None,
            palettes: builtin_palettes(),
            templates: builtin_templates(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stylesheet() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.palette(StyleMode::Bold).accent, "#7C3AED");
        assert_eq!(stylesheet.palette(StyleMode::Premium).text, "#F5F5F5");
        assert_eq!(stylesheet.template_id(StyleMode::Minimal), "t_min_01");
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Sunset"
description = "Warm palettes"

[palettes.bold]
bg = "#1A0B0B"
text = "#FFF7ED"
accent = "#F97316"

[templates]
bold = "t_bold_02"
"##;
        let stylesheet = Stylesheet::from_str(toml_str).expect("Should parse");
        assert_eq!(stylesheet.name, Some("Sunset".to_string()));
        assert_eq!(stylesheet.description, Some("Warm palettes".to_string()));
        assert_eq!(stylesheet.palette(StyleMode::Bold).background, "#1A0B0B");
        assert_eq!(stylesheet.template_id(StyleMode::Bold), "t_bold_02");
    }

    #[test]
    fn test_missing_modes_keep_builtin_values() {
        let toml_str = r##"
[palettes.minimal]
bg = "#FFFFFF"
text = "#111111"
accent = "#0EA5E9"
"##;
        let stylesheet = Stylesheet::from_str(toml_str).expect("Should parse");
        let builtin = Stylesheet::default();
        assert_eq!(stylesheet.name, None);
        assert_eq!(stylesheet.palette(StyleMode::Minimal).accent, "#0EA5E9");
        assert_eq!(
            stylesheet.palette(StyleMode::Premium),
            builtin.palette(StyleMode::Premium)
        );
        assert_eq!(stylesheet.templates, builtin.templates);
    }

    #[test]
    fn test_empty_document_equals_builtin_tables() {
        let stylesheet = Stylesheet::from_str("").expect("Should parse");
        assert_eq!(stylesheet.palettes, Stylesheet::default().palettes);
    }

    #[test]
    fn test_palette_missing_color_is_error() {
        let toml_str = r##"
[palettes.bold]
bg = "#000000"
text = "#FFFFFF"
"##;
        assert!(Stylesheet::from_str(toml_str).is_err());
    }

    #[test]
    fn test_invalid_toml_error() {
        let invalid = "this is not valid toml {{{{";
        let result = Stylesheet::from_str(invalid);
        assert!(result.is_err());
    }
}
