use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Flat map of CSS property name (camelCase) to raw value.
///
/// Ordered so that identical inputs always serialize identically.
pub type StyleMap = BTreeMap<String, StyleValue>;

/// Every shape a style property value can take.
///
/// Authored content mixes primitives with structured objects in the same
/// property slot. The shape is decided once, when the value is deserialized;
/// downstream stages match on the variant. Variant order matters for the
/// untagged deserializer: the first shape that fits wins, and anything that
/// fits none of them lands in [`StyleValue::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// `{tokenRef, value}`: a token reference with the value it had when
    /// authored.
    TokenRef(TokenRef),
    /// `{type: solid|gradient, value, opacity?}` from the color picker.
    Color(ColorValue),
    /// `{value, unit}` from a dimension input.
    Dimension(Dimension),
    /// Per-corner radius object.
    Corners(Corners),
    Shadows(Vec<Shadow>),
    Filters(Vec<Filter>),
    Transitions(Vec<Transition>),
    Transform(Transform),
    /// Anything else. Never emitted as CSS.
    Unknown(serde_json::Value),
}

impl StyleValue {
    pub fn token(name: impl Into<String>, authored: impl Into<String>) -> Self {
        Self::TokenRef(TokenRef {
            token_ref: name.into(),
            value: authored.into(),
        })
    }

    /// Classify a loose JSON value (for example an inline prop).
    pub fn from_json(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_else(|_| Self::Unknown(value.clone()))
    }

    /// Whether this value counts as "set". Empty and whitespace-only strings,
    /// `null`, and non-finite numbers never do.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Text(s) => !s.trim().is_empty(),
            Self::Number(n) => n.is_finite(),
            Self::Unknown(serde_json::Value::Null) => false,
            _ => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for the primitive shapes that need no further resolution.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Text(_) | Self::Number(_) | Self::Bool(_))
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRef {
    pub token_ref: String,
    /// Value captured at authoring time; used when the token has since been
    /// removed from the registry.
    #[serde(default, deserialize_with = "string_or_number")]
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKind {
    Solid,
    Gradient,
}

/// The color picker's value: either a literal or a nested token reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSource {
    Token(TokenRef),
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorValue {
    #[serde(rename = "type")]
    pub kind: ColorKind,
    pub value: ColorSource,
    /// Percentage, `0..=100`. Absent means fully opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl ColorValue {
    pub fn solid(value: impl Into<String>) -> Self {
        Self {
            kind: ColorKind::Solid,
            value: ColorSource::Literal(value.into()),
            opacity: None,
        }
    }

    pub fn gradient(value: impl Into<String>) -> Self {
        Self {
            kind: ColorKind::Gradient,
            value: ColorSource::Literal(value.into()),
            opacity: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    /// `px`, `%`, `rem`, `auto`, ... An empty or missing unit means `px`.
    #[serde(default)]
    pub unit: String,
}

impl Dimension {
    pub fn new(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }
}

/// Per-corner radius in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Corners {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl Corners {
    pub const fn uniform(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    pub fn is_zero(&self) -> bool {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
        .iter()
        .all(|c| *c == 0.0)
    }

    pub fn is_uniform(&self) -> bool {
        self.top_left == self.top_right
            && self.top_right == self.bottom_right
            && self.bottom_right == self.bottom_left
    }
}

fn enabled() -> bool {
    true
}

fn default_shadow_color() -> String {
    "rgba(0, 0, 0, 0.1)".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    #[serde(alias = "offsetX")]
    pub x: f64,
    #[serde(alias = "offsetY")]
    pub y: f64,
    #[serde(default)]
    pub blur: f64,
    #[serde(default)]
    pub spread: f64,
    #[serde(default = "default_shadow_color")]
    pub color: String,
    /// Percentage applied to a hex `color`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub inset: bool,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    Blur,
    Brightness,
    Contrast,
    Grayscale,
    #[serde(alias = "hueRotate")]
    HueRotate,
    Invert,
    Opacity,
    Saturate,
    Sepia,
}

impl FilterKind {
    pub fn function_name(self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Grayscale => "grayscale",
            Self::HueRotate => "hue-rotate",
            Self::Invert => "invert",
            Self::Opacity => "opacity",
            Self::Saturate => "saturate",
            Self::Sepia => "sepia",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Blur => "px",
            Self::HueRotate => "deg",
            _ => "%",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(rename = "type")]
    pub kind: FilterKind,
    pub value: f64,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

fn default_easing() -> String {
    "ease".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// camelCase property name, or `all`.
    pub property: String,
    /// Milliseconds.
    pub duration: f64,
    #[serde(default = "default_easing")]
    pub easing: String,
    /// Milliseconds.
    #[serde(default)]
    pub delay: f64,
}

/// Structured transform. Translations are pixels, rotation and skew degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Transform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skew_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skew_y: Option<f64>,
}

/// Accept `"10"` and `10` alike.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
