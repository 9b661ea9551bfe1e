//! Component default token bindings.
//!
//! Every component type ships with a set of CSS-property → token bindings.
//! New instances are seeded from this table (their `dsTokenRefs`), and the
//! resolver falls back to a binding's `fallback` string when the bound token
//! is missing from the registry. The table is versioned: changing it is a
//! deployment concern, not a runtime one.

use std::collections::{BTreeMap, BTreeSet};

use canvas_style_protocol::{ComponentStyleState, TokenCategory};
use serde::{Deserialize, Serialize};

/// One property → token binding for a component type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultBinding {
    pub property: String,
    pub token: String,
    pub category: TokenCategory,
    /// Human-readable name shown in the inspector.
    pub label: String,
    /// Used verbatim when `token` is not in the registry.
    pub fallback: String,
}

/// Versioned component-type → bindings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDefaults {
    pub version: u32,
    #[serde(default)]
    pub components: BTreeMap<String, Vec<DefaultBinding>>,
}

impl ComponentDefaults {
    pub const BUILTIN_VERSION: u32 = 3;

    pub fn empty() -> Self {
        Self {
            version: 0,
            components: BTreeMap::new(),
        }
    }

    /// The table shipped with the builder.
    pub fn builtin() -> Self {
        let components = BUILTIN
            .iter()
            .map(|(component, bindings)| {
                let bindings = bindings
                    .iter()
                    .map(|&(property, token, category, label, fallback)| DefaultBinding {
                        property: property.to_string(),
                        token: token.to_string(),
                        category,
                        label: label.to_string(),
                        fallback: fallback.to_string(),
                    })
                    .collect();
                (component.to_string(), bindings)
            })
            .collect();
        Self {
            version: Self::BUILTIN_VERSION,
            components,
        }
    }

    pub fn bindings(&self, component_type: &str) -> &[DefaultBinding] {
        self.components
            .get(component_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn binding(&self, component_type: &str, property: &str) -> Option<&DefaultBinding> {
        self.bindings(component_type)
            .iter()
            .find(|b| b.property == property)
    }

    pub fn fallback(&self, component_type: &str, property: &str) -> Option<&str> {
        self.binding(component_type, property)
            .map(|b| b.fallback.as_str())
    }

    /// `dsTokenRefs` for a freshly created instance of `component_type`.
    pub fn seed_token_refs(&self, component_type: &str) -> BTreeMap<String, String> {
        self.bindings(component_type)
            .iter()
            .map(|b| (b.property.clone(), b.token.clone()))
            .collect()
    }

    /// Whether `property` is still driven by its component-default token:
    /// the instance records the link, the link matches this table, and the
    /// user has not locked or overridden the property.
    pub fn is_linked(
        &self,
        component_type: &str,
        state: &ComponentStyleState,
        property: &str,
    ) -> bool {
        let Some(token) = state.ds_token_refs.get(property) else {
            return false;
        };
        let matches_table = self
            .binding(component_type, property)
            .is_some_and(|b| &b.token == token);
        let overridden = state.is_locked(property)
            || state
                .style_overrides
                .get(property)
                .is_some_and(|v| v.is_set());
        matches_table && !overridden
    }

    /// Properties whose recorded link no longer matches the table (token
    /// renamed between table versions, or binding removed).
    pub fn stale_links(
        &self,
        component_type: &str,
        state: &ComponentStyleState,
    ) -> BTreeSet<String> {
        state
            .ds_token_refs
            .iter()
            .filter(|(property, token)| {
                self.binding(component_type, property)
                    .is_none_or(|b| &&b.token != token)
            })
            .map(|(property, _)| property.clone())
            .collect()
    }
}

impl Default for ComponentDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}

type BuiltinBinding = (&'static str, &'static str, TokenCategory, &'static str, &'static str);

const SANS_FALLBACK: &str = "ui-sans-serif, system-ui, sans-serif";
const MONO_FALLBACK: &str = "ui-monospace, SFMono-Regular, Menlo, monospace";

const BUTTON: &[BuiltinBinding] = &[
    ("backgroundColor", "primary", TokenCategory::Color, "Background", "#3b82f6"),
    ("color", "primary-foreground", TokenCategory::Color, "Text", "#ffffff"),
    ("borderRadius", "radius-md", TokenCategory::Border, "Corner radius", "6px"),
    ("fontFamily", "font-body", TokenCategory::Font, "Font", SANS_FALLBACK),
    ("height", "size-control", TokenCategory::Spacing, "Height", "40px"),
    ("paddingLeft", "spacing-md", TokenCategory::Spacing, "Padding left", "16px"),
    ("paddingRight", "spacing-md", TokenCategory::Spacing, "Padding right", "16px"),
];

const CARD: &[BuiltinBinding] = &[
    ("backgroundColor", "surface", TokenCategory::Color, "Background", "#ffffff"),
    ("color", "foreground", TokenCategory::Color, "Text", "#111827"),
    ("borderRadius", "radius-lg", TokenCategory::Border, "Corner radius", "8px"),
    ("boxShadow", "shadow-md", TokenCategory::Shadow, "Shadow", "0 4px 6px -1px rgba(0, 0, 0, 0.1)"),
    ("paddingTop", "spacing-lg", TokenCategory::Spacing, "Padding top", "24px"),
    ("paddingRight", "spacing-lg", TokenCategory::Spacing, "Padding right", "24px"),
    ("paddingBottom", "spacing-lg", TokenCategory::Spacing, "Padding bottom", "24px"),
    ("paddingLeft", "spacing-lg", TokenCategory::Spacing, "Padding left", "24px"),
];

const HEADING: &[BuiltinBinding] = &[
    ("color", "foreground", TokenCategory::Color, "Text", "#111827"),
    ("fontFamily", "font-heading", TokenCategory::Font, "Font", SANS_FALLBACK),
    ("fontWeight", "font-weight-bold", TokenCategory::Typography, "Weight", "700"),
];

const TEXT: &[BuiltinBinding] = &[
    ("color", "foreground", TokenCategory::Color, "Text", "#111827"),
    ("fontFamily", "font-body", TokenCategory::Font, "Font", SANS_FALLBACK),
    ("lineHeight", "line-height-body", TokenCategory::Typography, "Line height", "1.5"),
];

const INPUT: &[BuiltinBinding] = &[
    ("backgroundColor", "input", TokenCategory::Color, "Background", "#ffffff"),
    ("borderColor", "border", TokenCategory::Color, "Border", "#e5e7eb"),
    ("borderRadius", "radius-md", TokenCategory::Border, "Corner radius", "6px"),
    ("color", "foreground", TokenCategory::Color, "Text", "#111827"),
    ("fontFamily", "font-body", TokenCategory::Font, "Font", SANS_FALLBACK),
    ("height", "size-control", TokenCategory::Spacing, "Height", "40px"),
];

const BADGE: &[BuiltinBinding] = &[
    ("backgroundColor", "secondary", TokenCategory::Color, "Background", "#f3f4f6"),
    ("color", "secondary-foreground", TokenCategory::Color, "Text", "#111827"),
    ("borderRadius", "radius-full", TokenCategory::Border, "Corner radius", "9999px"),
];

const LINK: &[BuiltinBinding] = &[
    ("color", "primary", TokenCategory::Color, "Text", "#3b82f6"),
    ("textDecoration", "link-decoration", TokenCategory::Typography, "Decoration", "underline"),
];

const CODE: &[BuiltinBinding] = &[
    ("backgroundColor", "muted", TokenCategory::Color, "Background", "#f3f4f6"),
    ("fontFamily", "font-mono", TokenCategory::Font, "Font", MONO_FALLBACK),
    ("borderRadius", "radius-sm", TokenCategory::Border, "Corner radius", "4px"),
];

const CONTAINER: &[BuiltinBinding] = &[
    ("backgroundColor", "background", TokenCategory::Color, "Background", "#ffffff"),
    ("color", "foreground", TokenCategory::Color, "Text", "#111827"),
];

const BUILTIN: &[(&str, &[BuiltinBinding])] = &[
    ("badge", BADGE),
    ("button", BUTTON),
    ("card", CARD),
    ("code", CODE),
    ("container", CONTAINER),
    ("heading", HEADING),
    ("input", INPUT),
    ("link", LINK),
    ("text", TEXT),
];

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_style_protocol::StyleValue;

    #[test]
    fn builtin_table_is_versioned() {
        let defaults = ComponentDefaults::builtin();
        assert_eq!(defaults.version, ComponentDefaults::BUILTIN_VERSION);
        assert!(!defaults.bindings("button").is_empty());
        assert!(defaults.bindings("unknown-widget").is_empty());
    }

    #[test]
    fn seeds_token_refs_from_bindings() {
        let defaults = ComponentDefaults::builtin();
        let refs = defaults.seed_token_refs("card");
        assert_eq!(refs.get("backgroundColor").map(String::as_str), Some("surface"));
        assert_eq!(refs.get("borderRadius").map(String::as_str), Some("radius-lg"));
    }

    #[test]
    fn fallback_lookup() {
        let defaults = ComponentDefaults::builtin();
        assert_eq!(defaults.fallback("card", "backgroundColor"), Some("#ffffff"));
        assert_eq!(defaults.fallback("card", "letterSpacing"), None);
    }

    #[test]
    fn link_is_broken_by_override_or_lock() {
        let defaults = ComponentDefaults::builtin();
        let state = ComponentStyleState::new("c1").with_token_ref("backgroundColor", "surface");
        assert!(defaults.is_linked("card", &state, "backgroundColor"));

        let overridden = state
            .clone()
            .with_override("backgroundColor", StyleValue::from("#ff0000"));
        assert!(!defaults.is_linked("card", &overridden, "backgroundColor"));

        let locked = state.clone().lock("backgroundColor");
        assert!(!defaults.is_linked("card", &locked, "backgroundColor"));

        // A blank override does not break the link.
        let blank = state.with_override("backgroundColor", StyleValue::from(""));
        assert!(defaults.is_linked("card", &blank, "backgroundColor"));
    }

    #[test]
    fn reports_stale_links() {
        let defaults = ComponentDefaults::builtin();
        let state = ComponentStyleState::new("c1")
            .with_token_ref("backgroundColor", "surface")
            .with_token_ref("color", "old-foreground")
            .with_token_ref("letterSpacing", "tracking");
        let stale = defaults.stale_links("card", &state);
        assert_eq!(
            stale.into_iter().collect::<Vec<_>>(),
            ["color", "letterSpacing"]
        );
    }

    #[test]
    fn deserializes_host_table() {
        let table: ComponentDefaults = serde_json::from_str(
            r##"{
                "version": 7,
                "components": {
                    "tile": [{
                        "property": "backgroundColor",
                        "token": "surface",
                        "category": "color",
                        "label": "Background",
                        "fallback": "#fff"
                    }]
                }
            }"##,
        )
        .unwrap();
        assert_eq!(table.version, 7);
        assert_eq!(table.fallback("tile", "backgroundColor"), Some("#fff"));
    }
}
