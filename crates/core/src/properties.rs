//! Fixed property tables shared by the resolver stages.

/// Properties that propagate from ancestor to descendant when unset locally.
/// Everything else is cascade-only.
pub const INHERITABLE: [&str; 13] = [
    "color",
    "fontFamily",
    "fontSize",
    "fontWeight",
    "lineHeight",
    "letterSpacing",
    "textAlign",
    "textTransform",
    "fontStyle",
    "textDecoration",
    "whiteSpace",
    "wordSpacing",
    "direction",
];

/// Legacy alias for `color` used by older text components.
pub const TEXT_COLOR: &str = "textColor";

pub const COLOR: &str = "color";

pub const BORDER_RADIUS: &str = "borderRadius";

/// Properties that receive an implicit `px` from bare-integer spacing tokens.
pub const PIXEL_SENSITIVE: [&str; 6] = [
    "height",
    "minHeight",
    "paddingTop",
    "paddingRight",
    "paddingBottom",
    "paddingLeft",
];

/// Properties that accept `background-image` semantics (gradients).
pub const BACKGROUND_IMAGE: [&str; 2] = ["background", "backgroundImage"];

/// Numeric values on these properties are emitted without a unit.
pub const UNITLESS: [&str; 10] = [
    "opacity",
    "zIndex",
    "fontWeight",
    "lineHeight",
    "flex",
    "flexGrow",
    "flexShrink",
    "order",
    "zoom",
    "aspectRatio",
];

/// Structured effect slots and the literal CSS property each compiles into.
pub const EFFECT_SLOTS: [(&str, &str); 4] = [
    ("shadows", "boxShadow"),
    ("filters", "filter"),
    ("transitions", "transition"),
    ("transforms", "transform"),
];

/// Legacy component props that carry content or behaviour rather than
/// style. Every other prop of a legacy document is an inline style field.
const CONTENT_PROPS: &[&str] = &[
    "alt",
    "appliedClasses",
    "as",
    "checked",
    "children",
    "className",
    "classNames",
    "content",
    "disabled",
    "dsTokenRefs",
    "href",
    "icon",
    "id",
    "items",
    "label",
    "level",
    "lockedProps",
    "name",
    "options",
    "placeholder",
    "rel",
    "size",
    "src",
    "styleOverrides",
    "tag",
    "target",
    "text",
    "title",
    "type",
    "value",
    "variant",
];

pub fn is_inheritable(property: &str) -> bool {
    INHERITABLE.contains(&property)
}

pub fn is_pixel_sensitive(property: &str) -> bool {
    PIXEL_SENSITIVE.contains(&property)
}

pub fn accepts_background_image(property: &str) -> bool {
    BACKGROUND_IMAGE.contains(&property)
}

pub fn is_unitless(property: &str) -> bool {
    UNITLESS.contains(&property)
}

/// The literal property a structured effect slot compiles into.
pub fn effect_target(slot: &str) -> Option<&'static str> {
    EFFECT_SLOTS
        .iter()
        .find(|(name, _)| *name == slot)
        .map(|(_, target)| *target)
}

/// Whether a legacy prop is an inline style field. Content props, event
/// handlers (`onClick`) and `data-`/`aria-` attributes are not.
pub fn is_style_property(property: &str) -> bool {
    if property.is_empty() || CONTENT_PROPS.binary_search(&property).is_ok() {
        return false;
    }
    let handler = property
        .strip_prefix("on")
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()));
    let attribute = property.starts_with("data-") || property.starts_with("aria-");
    !handler && !attribute
}

/// `backgroundColor` → `background-color`.
pub fn kebab_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_prop_table_is_sorted() {
        let mut sorted = CONTENT_PROPS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, CONTENT_PROPS);
    }

    #[test]
    fn recognizes_style_props_and_effect_slots() {
        assert!(is_style_property("backgroundColor"));
        assert!(is_style_property("shadows"));
        assert!(is_style_property("textShadow"));
        assert!(is_style_property("borderTopLeftRadius"));
        assert!(is_style_property("backdropFilter"));
        assert!(!is_style_property("href"));
        assert!(!is_style_property("appliedClasses"));
        assert!(!is_style_property("onClick"));
        assert!(!is_style_property("aria-label"));
    }

    #[test]
    fn background_color_is_not_inheritable() {
        assert!(is_inheritable("color"));
        assert!(!is_inheritable("backgroundColor"));
    }

    #[test]
    fn kebab_cases_camel_names() {
        assert_eq!(kebab_case("backgroundColor"), "background-color");
        assert_eq!(kebab_case("all"), "all");
    }
}
