//! Serialized UI descriptions.
//!
//! A [`FieldDescription`] is the declarative way to create a
//! [`FloatingPlaceholderField`]: a frame, the bindable attributes, and an
//! optional map of extra attributes set by key through [`Inspectable`].
//!
//! ```toml
//! placeholder = "Email"
//! placeholderColor = "#999999"
//! underline = false
//!
//! [frame]
//! x = 20.0
//! y = 60.0
//! width = 280.0
//! height = 40.0
//!
//! [attributes]
//! materialPlaceholder = "true"
//! ```

use std::collections::BTreeMap;

pub use floatlabel_macros::Inspectable;
use serde::{Deserialize, Serialize};

use crate::widgets::{Accessory, Color, FloatingPlaceholderField, Font, Rect, Widget};

#[derive(Debug, thiserror::Error)]
pub enum DescriptionError {
    #[error("invalid JSON description: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML description: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown attribute {0:?}")]
    UnknownAttribute(String),
    #[error("invalid value {value:?} for attribute {key:?}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// A value that can be set from, and shown as, an attribute string.
pub trait AttributeValue: Sized {
    fn parse_attribute(value: &str) -> Result<Self, String>;
    /// String form of the value; `None` when unset
    fn format_attribute(&self) -> Option<String>;
}

impl AttributeValue for String {
    fn parse_attribute(value: &str) -> Result<Self, String> {
        Ok(value.to_string())
    }

    fn format_attribute(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl AttributeValue for bool {
    fn parse_attribute(value: &str) -> Result<Self, String> {
        match value.trim() {
            "true" | "YES" | "1" => Ok(true),
            "false" | "NO" | "0" => Ok(false),
            other => Err(format!("expected a boolean, found {other:?}")),
        }
    }

    fn format_attribute(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl AttributeValue for f32 {
    fn parse_attribute(value: &str) -> Result<Self, String> {
        value
            .trim()
            .parse::<f32>()
            .map_err(|err| err.to_string())
    }

    fn format_attribute(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl<T: AttributeValue> AttributeValue for Option<T> {
    fn parse_attribute(value: &str) -> Result<Self, String> {
        T::parse_attribute(value).map(Some)
    }

    fn format_attribute(&self) -> Option<String> {
        self.as_ref().and_then(T::format_attribute)
    }
}

/// Attribute access by string key. Derive it with
/// `#[derive(Inspectable)]`.
pub trait Inspectable {
    /// Every key accepted by [`set_attribute`](Self::set_attribute)
    fn attribute_keys() -> &'static [&'static str];
    fn set_attribute(&mut self, key: &str, value: &str) -> Result<(), DescriptionError>;
    fn attribute(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameDescription {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for FrameDescription {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 280.0,
            height: 40.0,
        }
    }
}

impl From<FrameDescription> for Rect {
    fn from(frame: FrameDescription) -> Self {
        Rect::new(frame.x, frame.y, frame.width, frame.height)
    }
}

impl From<Rect> for FrameDescription {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Inspectable)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldDescription {
    #[serde(default)]
    #[inspectable(skip)]
    pub frame: FrameDescription,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Hex color; malformed values fall back to light gray
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_placeholder: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Width of a trailing accessory view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[inspectable(skip)]
    pub accessory_width: Option<f32>,
    /// Extra attributes applied by key before the field is built
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[inspectable(skip)]
    pub attributes: BTreeMap<String, String>,
}

impl FieldDescription {
    pub fn from_json(source: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_toml(source: &str) -> Result<Self, DescriptionError> {
        Ok(toml::from_str(source)?)
    }

    pub fn to_json(&self) -> Result<String, DescriptionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Describe an existing field
    pub fn from_field(field: &FloatingPlaceholderField) -> Self {
        let color = field.placeholder_color();
        Self {
            frame: field.bounds().into(),
            placeholder: Some(field.placeholder().to_string()).filter(|p| !p.is_empty()),
            placeholder_color: Some(to_hex(color)),
            underline: Some(field.is_underline_enabled()),
            material_placeholder: Some(field.is_material_placeholder_enabled()),
            text: Some(field.text().to_string()).filter(|t| !t.is_empty()),
            font_size: Some(field.font().size),
            accessory_width: field.accessory().map(|a| a.width()),
            attributes: BTreeMap::new(),
        }
    }

    /// Create the field. Attributes from the `attributes` map override the
    /// typed ones; the field is initialized last, so the initial text shows
    /// without animation.
    pub fn build(&self) -> Result<FloatingPlaceholderField, DescriptionError> {
        let mut resolved = self.clone();
        for (key, value) in &self.attributes {
            resolved.set_attribute(key, value)?;
        }

        let mut field = FloatingPlaceholderField::new(resolved.frame.into());

        if let Some(size) = resolved.font_size {
            if !(size.is_finite() && size > 2.0) {
                return Err(DescriptionError::InvalidValue {
                    key: "fontSize".to_string(),
                    value: size.to_string(),
                    reason: "font size must be a finite number above 2".to_string(),
                });
            }
            field.set_font(Font::system(size));
        }
        if let Some(color) = &resolved.placeholder_color {
            field.set_placeholder_color(parse_color_or_default(color));
        }
        if let Some(placeholder) = &resolved.placeholder {
            field.set_placeholder(placeholder.clone());
        }
        if let Some(enabled) = resolved.underline {
            field.enable_underline(enabled);
        }
        if let Some(enabled) = resolved.material_placeholder {
            field.enable_material_placeholder(enabled);
        }
        if let Some(width) = resolved.accessory_width {
            field.set_accessory(Some(Accessory::new(width)));
        }
        if let Some(text) = &resolved.text {
            field.input_mut().set_text(text.clone());
        }

        field.initialize();
        Ok(field)
    }
}

fn parse_color_or_default(value: &str) -> Color {
    Color::parse_hex(value).unwrap_or_else(|err| {
        log::warn!("placeholder color {value:?} ignored: {err}");
        Color::LIGHT_GRAY
    })
}

fn to_hex(color: Color) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    let (r, g, b, a) = (
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a),
    );
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::PlaceholderState;

    #[test]
    fn test_attribute_keys() {
        assert_eq!(
            FieldDescription::attribute_keys(),
            &[
                "placeholder",
                "placeholderColor",
                "underline",
                "materialPlaceholder",
                "text",
                "fontSize"
            ]
        );
    }

    #[test]
    fn test_set_attribute_by_key() {
        let mut description = FieldDescription::default();
        description.set_attribute("underline", "NO").unwrap();
        description.set_attribute("fontSize", "20").unwrap();
        assert_eq!(description.underline, Some(false));
        assert_eq!(description.attribute("fontSize").as_deref(), Some("20"));
        assert_eq!(description.attribute("text"), None);
    }

    #[test]
    fn test_set_attribute_errors() {
        let mut description = FieldDescription::default();
        assert!(matches!(
            description.set_attribute("cornerRadius", "4"),
            Err(DescriptionError::UnknownAttribute(key)) if key == "cornerRadius"
        ));
        assert!(matches!(
            description.set_attribute("underline", "maybe"),
            Err(DescriptionError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_build_from_json() {
        let description = FieldDescription::from_json(
            r#"{
                "frame": { "x": 10, "y": 100, "width": 200, "height": 40 },
                "placeholder": "Email",
                "text": "me@example.com",
                "underline": false
            }"#,
        )
        .unwrap();

        let field = description.build().unwrap();
        assert_eq!(field.placeholder(), "Email");
        assert_eq!(field.state(), PlaceholderState::Filled);
        assert_eq!(field.label().presented_alpha(), 1.0);
        assert_eq!(field.label_vertical_offset(), -19.0);
        assert!(field.underline().is_none());
    }

    #[test]
    fn test_build_from_toml_with_attributes() {
        let description = FieldDescription::from_toml(
            r#"
            placeholder = "Name"
            fontSize = 21.0

            [attributes]
            placeholder = "Full name"
            "#,
        )
        .unwrap();

        let field = description.build().unwrap();
        assert_eq!(field.placeholder(), "Full name");
        assert_eq!(field.font().size, 21.0);
        assert!(field.underline().is_some());
    }

    #[test]
    fn test_malformed_color_falls_back() {
        let description = FieldDescription {
            placeholder_color: Some("not a color".into()),
            ..Default::default()
        };
        let field = description.build().unwrap();
        assert_eq!(field.placeholder_color(), Color::LIGHT_GRAY);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = FieldDescription::from_json(r#"{ "placeholdr": "x" }"#).unwrap_err();
        assert!(matches!(err, DescriptionError::Json(_)));

        let err = FieldDescription::from_toml("underline = \"yes\"").unwrap_err();
        assert!(matches!(err, DescriptionError::Toml(_)));
    }

    #[test]
    fn test_invalid_font_size() {
        let description = FieldDescription {
            font_size: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            description.build(),
            Err(DescriptionError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_describe_field_round_trip() {
        let mut field = FloatingPlaceholderField::new(Rect::new(0.0, 0.0, 100.0, 30.0));
        field.set_placeholder("Email");
        field.set_placeholder_color(Color::GRAY);

        let description = FieldDescription::from_field(&field);
        assert_eq!(description.placeholder_color.as_deref(), Some("#808080"));

        let json = description.to_json().unwrap();
        assert_eq!(FieldDescription::from_json(&json).unwrap(), description);
    }
}
