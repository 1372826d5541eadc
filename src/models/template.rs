use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

use super::config::PlacementDefaults;
use crate::error::TemplateError;

const MAX_CODE_LEN: usize = 32;

/// Template identifier: 1 to 32 ASCII letters or digits, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemplateCode(String);

impl TemplateCode {
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(TemplateError::InvalidParameter(
                "template code is required".to_string(),
            ));
        }
        if code.len() > MAX_CODE_LEN || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TemplateError::InvalidParameter(format!(
                "invalid template code {code:?}: expected 1 to {MAX_CODE_LEN} letters or digits"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bitmap file name: lowercase code plus `.bmp`.
    pub fn file_name(&self) -> String {
        format!("{}.bmp", self.0.to_ascii_lowercase())
    }
}

impl fmt::Display for TemplateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TemplateCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where the bitmap is printed and how much of the source was cropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub position_x: u32,
    pub position_y: u32,
    pub crop_top: u32,
}

impl Placement {
    pub fn from_defaults(defaults: PlacementDefaults) -> Self {
        Self {
            position_x: defaults.x,
            position_y: defaults.y,
            crop_top: 0,
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::from_defaults(PlacementDefaults::default())
    }
}

/// A template found on disk, as shown by the editor UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    /// Uppercase template code
    pub code: String,
    /// Display name: category followed by code
    pub name: String,
    pub category: String,
    /// Bitmap file name relative to the working directory
    pub image_data: String,
    pub position_x: u32,
    pub position_y: u32,
    pub crop_top: u32,
    /// Always true for templates read back from disk
    pub is_existing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_uppercased_and_trimmed() {
        let code = TemplateCode::parse("  bar01 ").unwrap();
        assert_eq!(code.as_str(), "BAR01");
        assert_eq!(code.file_name(), "bar01.bmp");
    }

    #[test]
    fn test_code_rejects_empty() {
        assert!(matches!(
            TemplateCode::parse("   "),
            Err(TemplateError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_code_rejects_punctuation() {
        for raw in ["BAR-01", "../etc", "A B", "PIZ\"1", "É1"] {
            assert!(TemplateCode::parse(raw).is_err(), "{raw} accepted");
        }
    }

    #[test]
    fn test_code_length_limit() {
        assert!(TemplateCode::parse(&"A".repeat(32)).is_ok());
        assert!(TemplateCode::parse(&"A".repeat(33)).is_err());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = TemplateSummary {
            code: "BAR1".to_string(),
            name: "BARBECUE BAR1".to_string(),
            category: "BARBECUE".to_string(),
            image_data: "bar1.bmp".to_string(),
            position_x: 22,
            position_y: 22,
            crop_top: 0,
            is_existing: true,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["imageData"], "bar1.bmp");
        assert_eq!(value["positionX"], 22);
        assert_eq!(value["cropTop"], 0);
        assert_eq!(value["isExisting"], true);
    }
}
