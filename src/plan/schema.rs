//! Story plan types and structural validation
//!
//! A plan arrives as untyped JSON (usually from the content generator) and is
//! checked field by field so that a rejection names the exact offending path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Errors raised when a payload does not match the plan schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Payload text could not be parsed as JSON at all
    #[error("payload is not valid JSON: {message}")]
    NotJson { message: String },

    /// A required field is absent
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// A field is present but has the wrong JSON type
    #[error("field '{field}' must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    /// A field outside the schema was supplied
    #[error("unexpected field '{field}'")]
    UnexpectedField { field: String },

    /// Style mode outside the closed enumeration
    #[error("invalid style_mode '{value}' (expected one of: minimal, bold, premium)")]
    InvalidStyleMode { value: String },
}

impl SchemaError {
    /// Path of the offending field, if the error concerns one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::WrongType { field, .. }
            | Self::UnexpectedField { field } => Some(field),
            Self::InvalidStyleMode { .. } => Some("style_mode"),
            Self::NotJson { .. } => None,
        }
    }
}

/// Visual style family of a story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    Minimal,
    Bold,
    Premium,
}

impl StyleMode {
    /// Every supported mode, in declaration order
    pub const ALL: [StyleMode; 3] = [StyleMode::Minimal, StyleMode::Bold, StyleMode::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleMode::Minimal => "minimal",
            StyleMode::Bold => "bold",
            StyleMode::Premium => "premium",
        }
    }
}

impl fmt::Display for StyleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleMode {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimal" => Ok(StyleMode::Minimal),
            "bold" => Ok(StyleMode::Bold),
            "premium" => Ok(StyleMode::Premium),
            other => Err(SchemaError::InvalidStyleMode {
                value: other.to_string(),
            }),
        }
    }
}

/// Three colours used by every template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(rename = "bg")]
    pub background: String,
    pub text: String,
    pub accent: String,
}

impl Palette {
    pub fn new(
        background: impl Into<String>,
        text: impl Into<String>,
        accent: impl Into<String>,
    ) -> Self {
        Self {
            background: background.into(),
            text: text.into(),
            accent: accent.into(),
        }
    }
}

/// The four pieces of text placed on a story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryCopy {
    pub headline: String,
    pub subhead: String,
    pub cta: String,
    pub footer: String,
}

/// A complete content plan for one story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPlan {
    pub style_mode: StyleMode,
    pub template_id: String,
    pub palette: Palette,
    pub copy: StoryCopy,
}

impl StoryPlan {
    /// Convert back to the wire shape accepted by [`validate`]
    pub fn to_json(&self) -> Value {
        json!({
            "style_mode": self.style_mode.as_str(),
            "template_id": self.template_id,
            "palette": {
                "bg": self.palette.background,
                "text": self.palette.text,
                "accent": self.palette.accent,
            },
            "copy": {
                "headline": self.copy.headline,
                "subhead": self.copy.subhead,
                "cta": self.copy.cta,
                "footer": self.copy.footer,
            },
        })
    }
}

const PLAN_FIELDS: &[&str] = &["style_mode", "template_id", "palette", "copy"];
const PALETTE_FIELDS: &[&str] = &["bg", "text", "accent"];
const COPY_FIELDS: &[&str] = &["headline", "subhead", "cta", "footer"];

/// Validate an untyped payload against the plan schema
///
/// Missing, mistyped and unexpected fields are all rejected, as is a
/// `style_mode` outside the closed enumeration. Colour strings are only
/// checked for presence.
pub fn validate(raw: &Value) -> Result<StoryPlan, SchemaError> {
    let root = as_object(raw, "")?;
    reject_unknown(root, PLAN_FIELDS, "")?;

    let style_mode = require_str(root, "style_mode", "")?.parse::<StyleMode>()?;
    let template_id = require_str(root, "template_id", "")?.to_string();

    let palette_obj = as_object(require(root, "palette", "")?, "palette")?;
    reject_unknown(palette_obj, PALETTE_FIELDS, "palette")?;
    let palette = Palette {
        background: require_str(palette_obj, "bg", "palette")?.to_string(),
        text: require_str(palette_obj, "text", "palette")?.to_string(),
        accent: require_str(palette_obj, "accent", "palette")?.to_string(),
    };

    let copy_obj = as_object(require(root, "copy", "")?, "copy")?;
    reject_unknown(copy_obj, COPY_FIELDS, "copy")?;
    let copy = StoryCopy {
        headline: require_str(copy_obj, "headline", "copy")?.to_string(),
        subhead: require_str(copy_obj, "subhead", "copy")?.to_string(),
        cta: require_str(copy_obj, "cta", "copy")?.to_string(),
        footer: require_str(copy_obj, "footer", "copy")?.to_string(),
    };

    Ok(StoryPlan {
        style_mode,
        template_id,
        palette,
        copy,
    })
}

/// Parse JSON text and validate it
pub fn validate_str(text: &str) -> Result<StoryPlan, SchemaError> {
    let value: Value = serde_json::from_str(text).map_err(|e| SchemaError::NotJson {
        message: e.to_string(),
    })?;
    validate(&value)
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaError> {
    value.as_object().ok_or_else(|| SchemaError::WrongType {
        field: if path.is_empty() {
            "<root>".to_string()
        } else {
            path.to_string()
        },
        expected: "an object",
    })
}

fn require<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<&'a Value, SchemaError> {
    match obj.get(key) {
        Some(Value::Null) | None => Err(SchemaError::MissingField {
            field: join_path(parent, key),
        }),
        Some(value) => Ok(value),
    }
}

fn require_str<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<&'a str, SchemaError> {
    require(obj, key, parent)?
        .as_str()
        .ok_or_else(|| SchemaError::WrongType {
            field: join_path(parent, key),
            expected: "a string",
        })
}

fn reject_unknown(
    obj: &Map<String, Value>,
    allowed: &[&str],
    parent: &str,
) -> Result<(), SchemaError> {
    match obj.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(extra) => Err(SchemaError::UnexpectedField {
            field: join_path(parent, extra),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "style_mode": "bold",
            "template_id": "t_bold_01",
            "palette": { "bg": "#0B0F1A", "text": "#FFFFFF", "accent": "#7C3AED" },
            "copy": {
                "headline": "HOODIE DROP",
                "subhead": "Friday at 7PM.",
                "cta": "Shop now",
                "footer": "@apexwear"
            }
        })
    }

    #[test]
    fn test_validate_accepts_well_formed_plan() {
        let plan = validate(&sample()).expect("Should validate");
        assert_eq!(plan.style_mode, StyleMode::Bold);
        assert_eq!(plan.template_id, "t_bold_01");
        assert_eq!(plan.palette.background, "#0B0F1A");
        assert_eq!(plan.copy.footer, "@apexwear");
    }

    #[test]
    fn test_validate_names_missing_nested_field() {
        let mut raw = sample();
        raw["palette"].as_object_mut().unwrap().remove("accent");
        let err = validate(&raw).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingField {
                field: "palette.accent".to_string()
            }
        );
        assert_eq!(err.field(), Some("palette.accent"));
    }

    #[test]
    fn test_validate_rejects_invalid_style_mode() {
        let mut raw = sample();
        raw["style_mode"] = json!("loud");
        let err = validate(&raw).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidStyleMode { ref value } if value == "loud"));
        assert_eq!(err.field(), Some("style_mode"));
    }

    #[test]
    fn test_validate_rejects_mistyped_field() {
        let mut raw = sample();
        raw["copy"]["cta"] = json!(42);
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.field(), Some("copy.cta"));
        assert!(err.to_string().contains("a string"));
    }

    #[test]
    fn test_validate_rejects_extra_field() {
        let mut raw = sample();
        raw["copy"]["emoji"] = json!("🔥");
        let err = validate(&raw).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnexpectedField {
                field: "copy.emoji".to_string()
            }
        );
    }

    #[test]
    fn test_validate_treats_null_as_missing() {
        let mut raw = sample();
        raw["template_id"] = Value::Null;
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.field(), Some("template_id"));
    }

    #[test]
    fn test_validate_rejects_non_object_root() {
        let err = validate(&json!(["not", "a", "plan"])).unwrap_err();
        assert_eq!(err.field(), Some("<root>"));
    }

    #[test]
    fn test_validate_str_rejects_non_json() {
        let err = validate_str("Sure! Here is your plan:").unwrap_err();
        assert!(matches!(err, SchemaError::NotJson { .. }));
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_to_json_round_trips_through_validate() {
        let plan = validate(&sample()).unwrap();
        assert_eq!(validate(&plan.to_json()).unwrap(), plan);
    }

    #[test]
    fn test_style_mode_parse_and_display() {
        for mode in StyleMode::ALL {
            assert_eq!(mode.as_str().parse::<StyleMode>().unwrap(), mode);
            assert_eq!(mode.to_string(), mode.as_str());
        }
        assert!("Minimal".parse::<StyleMode>().is_err());
    }
}
