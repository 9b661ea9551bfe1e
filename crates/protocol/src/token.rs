use serde::{Deserialize, Serialize};

/// Which family a design token belongs to.
///
/// The category drives value normalization: font tokens are expanded into a
/// full font stack, spacing tokens pick up an implicit `px` on pixel-sensitive
/// properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    Color,
    Font,
    Border,
    Spacing,
    Shadow,
    Typography,
}

impl std::fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Color => write!(f, "color"),
            Self::Font => write!(f, "font"),
            Self::Border => write!(f, "border"),
            Self::Spacing => write!(f, "spacing"),
            Self::Shadow => write!(f, "shadow"),
            Self::Typography => write!(f, "typography"),
        }
    }
}

/// A named, centrally managed design value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignToken {
    /// Lookup key. Matching is exact and case-sensitive.
    pub name: String,
    pub category: TokenCategory,
    /// Raw value as authored (`#111827`, `Inter`, `16`, ...).
    pub value: String,
    /// Custom property name to expose this token under, e.g. `--brand-primary`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_var: Option<String>,
}

impl DesignToken {
    pub fn new(name: impl Into<String>, category: TokenCategory, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category,
            value: value.into(),
            css_var: None,
        }
    }

    pub fn with_css_var(mut self, css_var: impl Into<String>) -> Self {
        self.css_var = Some(css_var.into());
        self
    }

    /// The custom property this token is published as (`--{name}` unless
    /// overridden by `css_var`).
    pub fn css_var_name(&self) -> String {
        match &self.css_var {
            Some(var) if var.starts_with("--") => var.clone(),
            Some(var) => format!("--{var}"),
            None => format!("--{}", self.name),
        }
    }
}
