//! Token dereferencing: structured and token-bound values → primitive CSS values.

use std::collections::BTreeSet;

use canvas_style_protocol::{
    ColorKind, ColorSource, ColorValue, Corners, DesignToken, Dimension, Rgb, StyleMap,
    StyleValue, TokenCategory, TokenRef,
};
use tracing::{debug, trace};

use crate::effects::css_number;
use crate::properties::{BORDER_RADIUS, accepts_background_image, is_pixel_sensitive};
use crate::registry::{ComponentDefaults, TokenRegistry};

/// Appended to heading/body font tokens.
pub const SANS_STACK: &str = "ui-sans-serif, system-ui, -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif";

/// Appended to mono font tokens.
pub const MONO_STACK: &str = "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, \"Liberation Mono\", \"Courier New\", monospace";

const INTRINSIC_SIZES: [&str; 3] = ["fit-content", "min-content", "max-content"];

/// Keywords a dimension value may carry instead of a number.
const DIMENSION_KEYWORDS: [&str; 5] = ["auto", "none", "inherit", "initial", "unset"];

/// Dereference every property of `styles` against `tokens`.
///
/// Properties that resolve to nothing (blank strings, unsupported shapes,
/// auto dimensions, misplaced gradients) are omitted from the result.
pub fn resolve_tokens(styles: &StyleMap, tokens: &TokenRegistry) -> StyleMap {
    styles
        .iter()
        .filter_map(|(property, value)| {
            resolve_value(property, value, tokens).map(|v| (property.clone(), v))
        })
        .collect()
}

/// Dereference one property value.
///
/// Effect descriptors (shadow/filter/transition lists, transform objects)
/// pass through untouched; they are compiled later.
pub fn resolve_value(
    property: &str,
    value: &StyleValue,
    tokens: &TokenRegistry,
) -> Option<StyleValue> {
    match value {
        StyleValue::Text(s) => non_blank(s).map(StyleValue::Text),
        StyleValue::Number(n) => n.is_finite().then_some(StyleValue::Number(*n)),
        StyleValue::Bool(b) => Some(StyleValue::Bool(*b)),
        StyleValue::TokenRef(token_ref) => {
            resolve_token_ref(property, token_ref, tokens).map(StyleValue::Text)
        }
        StyleValue::Color(color) => resolve_color(property, color, tokens).map(StyleValue::Text),
        StyleValue::Dimension(dimension) => resolve_dimension(dimension).map(StyleValue::Text),
        StyleValue::Corners(corners) => Some(StyleValue::Text(corners_css(corners))),
        StyleValue::Shadows(_)
        | StyleValue::Filters(_)
        | StyleValue::Transitions(_)
        | StyleValue::Transform(_) => Some(value.clone()),
        StyleValue::Unknown(_) => {
            trace!(property, "dropping unrecognized structured value");
            None
        }
    }
}

/// [`resolve_value`] for a property of a `component_type` instance.
///
/// A token reference that yields nothing (token gone, no authored value)
/// falls back to the component-default table's `fallback` for the property;
/// without one the property is omitted.
pub fn resolve_component_value(
    component_type: &str,
    property: &str,
    value: &StyleValue,
    tokens: &TokenRegistry,
    defaults: &ComponentDefaults,
) -> Option<StyleValue> {
    if let Some(resolved) = resolve_value(property, value, tokens) {
        return Some(resolved);
    }
    let token = match value {
        StyleValue::TokenRef(token_ref) => &token_ref.token_ref,
        StyleValue::Color(ColorValue {
            value: ColorSource::Token(token_ref),
            ..
        }) => &token_ref.token_ref,
        _ => return None,
    };
    let fallback = defaults.fallback(component_type, property).and_then(non_blank);
    debug!(
        component_type,
        property,
        token = %token,
        has_fallback = fallback.is_some(),
        "token reference resolved to nothing; trying component default"
    );
    fallback.map(StyleValue::Text)
}

/// Current value of the referenced token, normalized for `property`; the
/// authored value if the token is gone.
pub fn resolve_token_ref(
    property: &str,
    token_ref: &TokenRef,
    tokens: &TokenRegistry,
) -> Option<String> {
    match tokens.get(&token_ref.token_ref) {
        Some(token) => non_blank(&normalize_token_value(token, property)),
        None => {
            debug!(
                property,
                token = %token_ref.token_ref,
                "token not in registry; using authored value"
            );
            non_blank(&token_ref.value)
        }
    }
}

/// Apply category-specific normalization to a token's raw value.
pub fn normalize_token_value(token: &DesignToken, property: &str) -> String {
    match token.category {
        TokenCategory::Font => font_stack(&token.name, &token.value),
        TokenCategory::Spacing if is_pixel_sensitive(property) => with_px_suffix(&token.value),
        _ => token.value.trim().to_string(),
    }
}

/// Expand a font family into a full stack.
///
/// Family names with whitespace are quoted; `mono` tokens get the monospace
/// stack, everything else the sans-serif system stack. A value that is
/// already a stack (contains a comma) is left alone.
pub fn font_stack(token_name: &str, family: &str) -> String {
    let family = family.trim();
    if family.is_empty() || family.contains(',') {
        return family.to_string();
    }
    let quoted = if family.contains(char::is_whitespace) && !family.starts_with(['"', '\'']) {
        format!("\"{family}\"")
    } else {
        family.to_string()
    };
    let fallback = if token_name.contains("mono") {
        MONO_STACK
    } else {
        SANS_STACK
    };
    format!("{quoted}, {fallback}")
}

fn with_px_suffix(raw: &str) -> String {
    let raw = raw.trim();
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        format!("{raw}px")
    } else {
        raw.to_string()
    }
}

fn resolve_color(property: &str, color: &ColorValue, tokens: &TokenRegistry) -> Option<String> {
    let base = match &color.value {
        ColorSource::Literal(s) => non_blank(s)?,
        ColorSource::Token(token_ref) => resolve_token_ref(property, token_ref, tokens)?,
    };

    match color.kind {
        ColorKind::Gradient if accepts_background_image(property) => Some(base),
        ColorKind::Gradient => {
            debug!(property, "gradient on a property without background-image semantics; dropping");
            None
        }
        ColorKind::Solid => match (color.opacity, Rgb::from_hex(&base)) {
            (Some(opacity), Some(rgb)) if opacity < 100.0 => Some(rgb.to_rgba_css(opacity / 100.0)),
            _ => Some(base),
        },
    }
}

/// `{value, unit}` → CSS length.
///
/// An `auto` unit means "leave it to CSS": the property is dropped unless the
/// value names an intrinsic size. Intrinsic sizes and keywords pass through
/// verbatim, non-numeric values are assumed to carry their own unit, and
/// everything else is `value + unit` (unit defaults to `px`).
///
/// Note: under an `auto` unit a numeric value such as `100` is dropped too,
/// and a non-numeric value like `calc(100% - 8px)` is never suffixed.
pub fn resolve_dimension(dimension: &Dimension) -> Option<String> {
    let value = dimension.value.trim();
    let unit = dimension.unit.trim();

    if INTRINSIC_SIZES.contains(&value) {
        return Some(value.to_string());
    }
    if unit == "auto" {
        return None;
    }
    if value.is_empty() {
        return None;
    }
    if DIMENSION_KEYWORDS.contains(&value) || value.parse::<f64>().is_err() {
        return Some(value.to_string());
    }
    let unit = if unit.is_empty() { "px" } else { unit };
    Some(format!("{value}{unit}"))
}

fn corners_css(corners: &Corners) -> String {
    let px = |v: f64| format!("{}px", css_number(v));
    if corners.is_uniform() {
        px(corners.top_left)
    } else {
        format!(
            "{} {} {} {}",
            px(corners.top_left),
            px(corners.top_right),
            px(corners.bottom_right),
            px(corners.bottom_left)
        )
    }
}

/// Whether the component has its own value for `property`, which blocks the
/// component-default binding.
///
/// A locked property always counts, even when locked to nothing. Otherwise
/// blank values never count, and a radius object counts only if some corner
/// is non-zero: an all-zero radius is what a fresh instance carries and stays
/// token-driven.
pub fn has_explicit_value(styles: &StyleMap, property: &str, locked: &BTreeSet<String>) -> bool {
    if locked.contains(property) {
        return true;
    }
    match styles.get(property) {
        None => false,
        Some(StyleValue::Corners(corners)) if property == BORDER_RADIUS => !corners.is_zero(),
        Some(value) => value.is_set(),
    }
}

/// Value for a component-default binding: the bound token's normalized
/// value, or the table's fallback when the token is missing. `None` means the
/// property should be omitted.
pub fn resolve_default_binding(
    component_type: &str,
    property: &str,
    token_name: &str,
    tokens: &TokenRegistry,
    defaults: &ComponentDefaults,
) -> Option<String> {
    if let Some(token) = tokens.get(token_name) {
        return non_blank(&normalize_token_value(token, property));
    }
    let fallback = defaults.fallback(component_type, property);
    debug!(
        component_type,
        property,
        token = token_name,
        has_fallback = fallback.is_some(),
        "default token missing from registry"
    );
    fallback.and_then(non_blank)
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tokens() -> TokenRegistry {
        TokenRegistry::from_tokens([
            DesignToken::new("surface", TokenCategory::Color, "#111827"),
            DesignToken::new("primary", TokenCategory::Color, "#3b82f6"),
            DesignToken::new("font-heading", TokenCategory::Font, "Playfair Display"),
            DesignToken::new("font-body", TokenCategory::Font, "Inter"),
            DesignToken::new("font-mono", TokenCategory::Font, "JetBrains Mono"),
            DesignToken::new("spacing-md", TokenCategory::Spacing, "16"),
            DesignToken::new("spacing-em", TokenCategory::Spacing, "1.5rem"),
        ])
    }

    fn deref(property: &str, value: serde_json::Value) -> Option<StyleValue> {
        resolve_value(property, &StyleValue::from_json(&value), &tokens())
    }

    fn deref_text(property: &str, value: serde_json::Value) -> Option<String> {
        deref(property, value).and_then(|v| v.as_text().map(str::to_string))
    }

    #[test]
    fn token_ref_uses_current_value() {
        assert_eq!(
            deref_text("backgroundColor", json!({"tokenRef": "surface", "value": "#fff"})),
            Some("#111827".into())
        );
    }

    #[test]
    fn missing_token_falls_back_to_authored_value() {
        assert_eq!(
            deref_text("backgroundColor", json!({"tokenRef": "gone", "value": "#fff"})),
            Some("#fff".into())
        );
        assert_eq!(
            deref_text("backgroundColor", json!({"tokenRef": "gone", "value": ""})),
            None
        );
    }

    #[test]
    fn solid_color_with_opacity_becomes_rgba() {
        assert_eq!(
            deref_text("color", json!({"type": "solid", "value": "#3b82f6", "opacity": 50})),
            Some("rgba(59, 130, 246, 0.5)".into())
        );
        assert_eq!(
            deref_text("color", json!({"type": "solid", "value": "#3b82f6", "opacity": 100})),
            Some("#3b82f6".into())
        );
        assert_eq!(
            deref_text("color", json!({"type": "solid", "value": "#3b82f6"})),
            Some("#3b82f6".into())
        );
    }

    #[test]
    fn solid_color_resolves_nested_token() {
        assert_eq!(
            deref_text(
                "color",
                json!({"type": "solid", "value": {"tokenRef": "primary", "value": "#000"}, "opacity": 25})
            ),
            Some("rgba(59, 130, 246, 0.25)".into())
        );
    }

    #[test]
    fn named_color_ignores_opacity() {
        assert_eq!(
            deref_text("color", json!({"type": "solid", "value": "red", "opacity": 50})),
            Some("red".into())
        );
    }

    #[test]
    fn gradient_only_on_background_properties() {
        let gradient = json!({"type": "gradient", "value": "linear-gradient(red, blue)"});
        assert_eq!(
            deref_text("backgroundImage", gradient.clone()),
            Some("linear-gradient(red, blue)".into())
        );
        assert_eq!(
            deref_text("background", gradient.clone()),
            Some("linear-gradient(red, blue)".into())
        );
        assert_eq!(deref_text("color", gradient), None);
    }

    #[test]
    fn dimension_normalization() {
        assert_eq!(
            deref_text("width", json!({"value": "10", "unit": "px"})),
            Some("10px".into())
        );
        assert_eq!(
            deref_text("width", json!({"value": 50, "unit": "%"})),
            Some("50%".into())
        );
        assert_eq!(
            deref_text("width", json!({"value": "12", "unit": ""})),
            Some("12px".into())
        );
        assert_eq!(deref_text("width", json!({"value": "", "unit": "auto"})), None);
        assert_eq!(deref_text("width", json!({"value": "auto", "unit": "auto"})), None);
        assert_eq!(deref_text("width", json!({"value": "none", "unit": "auto"})), None);
        assert_eq!(
            deref_text("width", json!({"value": "fit-content", "unit": "auto"})),
            Some("fit-content".into())
        );
        assert_eq!(
            deref_text("width", json!({"value": "max-content", "unit": "px"})),
            Some("max-content".into())
        );
        assert_eq!(
            deref_text("width", json!({"value": "calc(100% - 8px)", "unit": "px"})),
            Some("calc(100% - 8px)".into())
        );
    }

    #[test]
    fn font_tokens_get_a_stack() {
        assert_eq!(
            deref_text("fontFamily", json!({"tokenRef": "font-heading", "value": ""})),
            Some(format!("\"Playfair Display\", {SANS_STACK}"))
        );
        assert_eq!(
            deref_text("fontFamily", json!({"tokenRef": "font-body", "value": ""})),
            Some(format!("Inter, {SANS_STACK}"))
        );
        assert_eq!(
            deref_text("fontFamily", json!({"tokenRef": "font-mono", "value": ""})),
            Some(format!("\"JetBrains Mono\", {MONO_STACK}"))
        );
        assert_eq!(font_stack("font-body", "Inter, sans-serif"), "Inter, sans-serif");
        assert_eq!(
            font_stack("font-body", "'Open Sans'"),
            format!("'Open Sans', {SANS_STACK}")
        );
    }

    #[test]
    fn spacing_tokens_get_px_on_pixel_sensitive_properties() {
        assert_eq!(
            deref_text("paddingTop", json!({"tokenRef": "spacing-md", "value": ""})),
            Some("16px".into())
        );
        assert_eq!(
            deref_text("height", json!({"tokenRef": "spacing-md", "value": ""})),
            Some("16px".into())
        );
        // Not pixel-sensitive: raw value.
        assert_eq!(
            deref_text("gap", json!({"tokenRef": "spacing-md", "value": ""})),
            Some("16".into())
        );
        // Already carries a unit.
        assert_eq!(
            deref_text("paddingLeft", json!({"tokenRef": "spacing-em", "value": ""})),
            Some("1.5rem".into())
        );
    }

    #[test]
    fn corners_collapse_when_uniform() {
        assert_eq!(corners_css(&Corners::uniform(8.0)), "8px");
        let mixed = Corners {
            top_left: 8.0,
            top_right: 8.0,
            bottom_right: 0.0,
            bottom_left: 0.0,
        };
        assert_eq!(corners_css(&mixed), "8px 8px 0px 0px");
    }

    #[test]
    fn unknown_objects_and_blank_strings_are_dropped() {
        assert_eq!(deref("color", json!({"foo": "bar"})), None);
        assert_eq!(deref("color", json!(null)), None);
        assert_eq!(deref("color", json!("  ")), None);
        assert_eq!(deref("opacity", json!(0.5)), Some(StyleValue::Number(0.5)));
    }

    #[test]
    fn effects_pass_through() {
        let shadows = json!([{"x": 0, "y": 1, "blur": 2, "color": "#000000"}]);
        assert!(matches!(deref("shadows", shadows), Some(StyleValue::Shadows(_))));
    }

    #[test]
    fn resolve_tokens_omits_dropped_properties() {
        let styles: StyleMap = [
            ("width".to_string(), StyleValue::from_json(&json!({"value": "", "unit": "auto"}))),
            ("color".to_string(), StyleValue::token("primary", "#000")),
        ]
        .into_iter()
        .collect();
        let resolved = resolve_tokens(&styles, &tokens());
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.get("color"), Some(&StyleValue::from("#3b82f6")));
    }

    #[test]
    fn zero_radius_is_not_explicit_unless_locked() {
        let mut styles = StyleMap::new();
        styles.insert(BORDER_RADIUS.into(), StyleValue::Corners(Corners::default()));
        let unlocked = BTreeSet::new();
        let locked: BTreeSet<String> = [BORDER_RADIUS.to_string()].into_iter().collect();

        assert!(!has_explicit_value(&styles, BORDER_RADIUS, &unlocked));
        assert!(has_explicit_value(&styles, BORDER_RADIUS, &locked));

        styles.insert(BORDER_RADIUS.into(), StyleValue::Corners(Corners::uniform(4.0)));
        assert!(has_explicit_value(&styles, BORDER_RADIUS, &unlocked));
    }

    #[test]
    fn dimension_without_unit_defaults_to_px() {
        assert_eq!(deref_text("width", json!({"value": "10"})), Some("10px".into()));
        assert_eq!(deref_text("width", json!({"value": 24})), Some("24px".into()));
    }

    #[test]
    fn locked_property_is_explicit_even_when_blank() {
        let mut styles = StyleMap::new();
        let locked: BTreeSet<String> = ["backgroundColor".to_string()].into_iter().collect();
        assert!(has_explicit_value(&styles, "backgroundColor", &locked));

        styles.insert("backgroundColor".into(), StyleValue::from(""));
        assert!(!has_explicit_value(&styles, "backgroundColor", &BTreeSet::new()));
    }

    #[test]
    fn authored_token_ref_falls_back_to_component_default() {
        let defaults = ComponentDefaults::builtin();
        let gone = StyleValue::token("missing-surface", "");
        assert_eq!(
            resolve_component_value("card", "backgroundColor", &gone, &tokens(), &defaults),
            Some(StyleValue::from("#ffffff"))
        );

        // The authored value still comes before the table.
        let authored = StyleValue::token("missing-surface", "#fafafa");
        assert_eq!(
            resolve_component_value("card", "backgroundColor", &authored, &tokens(), &defaults),
            Some(StyleValue::from("#fafafa"))
        );

        // No binding for the property: omitted.
        assert_eq!(
            resolve_component_value("card", "outlineColor", &gone, &tokens(), &defaults),
            None
        );

        // Only token references fall back.
        assert_eq!(
            resolve_component_value("card", "backgroundColor", &StyleValue::from(" "), &tokens(), &defaults),
            None
        );
    }

    #[test]
    fn default_binding_falls_back_to_table() {
        let defaults = ComponentDefaults::builtin();
        let mut registry = tokens();
        assert_eq!(
            resolve_default_binding("card", "backgroundColor", "surface", &registry, &defaults),
            Some("#111827".into())
        );
        registry.remove("surface");
        assert_eq!(
            resolve_default_binding("card", "backgroundColor", "surface", &registry, &defaults),
            Some("#ffffff".into())
        );
        assert_eq!(
            resolve_default_binding("card", "letterSpacing", "tracking", &registry, &defaults),
            None
        );
    }
}
