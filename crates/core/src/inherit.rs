//! Top-down propagation of CSS-inheritable properties.
//!
//! Each node contributes the inheritable subset of its own resolved styles.
//! Children receive their ancestors' values merged with the parent's own,
//! and only use them for properties they leave unset.

use std::collections::BTreeMap;

use canvas_style_protocol::{
    ComponentStyleState, InheritedPropertySource, PropertySource, ResolvedStyles, SourceKind,
    StyleValue,
};
use serde::{Deserialize, Serialize};

use crate::properties::{COLOR, INHERITABLE, TEXT_COLOR};
use crate::registry::TokenRegistry;
use crate::tokens::resolve_value;

/// One inheritable value travelling down the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InheritedValue {
    pub value: StyleValue,
    pub source: InheritedPropertySource,
}

/// Inheritable property → value, as seen by the node receiving the map.
pub type InheritedStyles = BTreeMap<String, InheritedValue>;

/// Result of propagating through one node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Propagation {
    /// The node's own inheritable values (depth 0).
    pub own: InheritedStyles,
    /// What the node's children receive: ancestors overlaid by `own`, with
    /// every depth counted from the children.
    pub merged_for_children: InheritedStyles,
}

fn first_set<'a>(candidates: impl IntoIterator<Item = Option<&'a StyleValue>>) -> Option<&'a StyleValue> {
    candidates.into_iter().flatten().find(|v| v.is_set())
}

/// Own value for `property` from resolved styles, with the `textColor`
/// alias standing in for `color`.
fn from_resolved<'a>(
    property: &str,
    resolved: &'a ResolvedStyles,
) -> Option<(&'a StyleValue, Option<&'a PropertySource>)> {
    let mut keys = vec![property];
    if property == COLOR {
        keys.push(TEXT_COLOR);
    }
    keys.into_iter().find_map(|key| {
        first_set([resolved.get(key)]).map(|value| (value, resolved.source(key)))
    })
}

/// Own value for `property` from the node's inline props, dereferenced.
fn from_props(
    property: &str,
    state: &ComponentStyleState,
    tokens: &TokenRegistry,
) -> Option<StyleValue> {
    let mut keys = vec![property];
    if property == COLOR {
        keys.push(TEXT_COLOR);
    }
    keys.into_iter().find_map(|key| {
        let raw = state.props.get(key)?;
        resolve_value(property, &StyleValue::from_json(raw), tokens)
            .filter(StyleValue::is_set)
    })
}

/// The node's own inheritable values.
///
/// Resolved styles are consulted first, then inline props; the first set
/// value wins. `parentClassName` names the class that supplied the value,
/// falling back to the node's highest-priority class.
pub fn extract_inheritable(
    state: &ComponentStyleState,
    resolved: &ResolvedStyles,
    tokens: &TokenRegistry,
) -> InheritedStyles {
    let classes = state.effective_classes();
    let fallback_class = classes.highest().unwrap_or_default();

    let mut own = InheritedStyles::new();
    for property in INHERITABLE {
        let (value, class_name) = match from_resolved(property, resolved) {
            Some((value, source)) => {
                let class_name = source
                    .filter(|s| s.source == SourceKind::Class)
                    .and_then(|s| s.class_name.as_deref())
                    .unwrap_or(fallback_class);
                (value.clone(), class_name)
            }
            None => match from_props(property, state, tokens) {
                Some(value) => (value, fallback_class),
                None => continue,
            },
        };
        own.insert(
            property.to_string(),
            InheritedValue {
                value,
                source: InheritedPropertySource {
                    parent_class_name: class_name.to_string(),
                    parent_component_id: state.id.clone(),
                    depth: 0,
                },
            },
        );
    }
    own
}

/// Move a map one level further down the tree.
pub fn descend(inherited: &InheritedStyles) -> InheritedStyles {
    inherited
        .iter()
        .map(|(property, entry)| {
            let mut entry = entry.clone();
            entry.source.depth += 1;
            (property.clone(), entry)
        })
        .collect()
}

/// Propagate through one node.
///
/// `from_ancestors` is what this node received from its parent. The node's
/// own values replace ancestor entries for the same property.
pub fn propagate(
    state: &ComponentStyleState,
    resolved: &ResolvedStyles,
    from_ancestors: &InheritedStyles,
    tokens: &TokenRegistry,
) -> Propagation {
    let own = extract_inheritable(state, resolved, tokens);
    let mut merged = from_ancestors.clone();
    merged.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));
    Propagation {
        own,
        merged_for_children: descend(&merged),
    }
}

/// Fill the node's unset inheritable properties from `inherited`.
///
/// An own value always wins; a set `textColor` counts as an own `color`.
pub fn apply_inherited(resolved: &mut ResolvedStyles, inherited: &InheritedStyles) {
    for (property, entry) in inherited {
        let own = resolved.get(property).is_some_and(StyleValue::is_set)
            || (property == COLOR && resolved.get(TEXT_COLOR).is_some_and(StyleValue::is_set));
        if own {
            continue;
        }
        resolved.set(
            property.clone(),
            entry.value.clone(),
            PropertySource::inherited(&entry.source),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_style_protocol::DesignToken;
    use canvas_style_protocol::TokenCategory;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn resolved(pairs: &[(&str, &str, PropertySource)]) -> ResolvedStyles {
        let mut out = ResolvedStyles::new();
        for (property, value, source) in pairs {
            out.set(*property, StyleValue::from(*value), source.clone());
        }
        out
    }

    #[test]
    fn extracts_only_inheritable_properties() {
        let state = ComponentStyleState::new("parent").with_classes(["heading"]);
        let styles = resolved(&[
            ("color", "red", PropertySource::class("heading")),
            ("backgroundColor", "blue", PropertySource::class("heading")),
        ]);
        let own = extract_inheritable(&state, &styles, &TokenRegistry::new());
        assert_eq!(own.keys().collect::<Vec<_>>(), ["color"]);
        assert_eq!(own["color"].source.parent_class_name, "heading");
        assert_eq!(own["color"].source.parent_component_id, "parent");
        assert_eq!(own["color"].source.depth, 0);
    }

    #[test]
    fn text_color_alias_feeds_color() {
        let state = ComponentStyleState::new("p");
        let styles = resolved(&[("textColor", "#333", PropertySource::inline_default())]);
        let own = extract_inheritable(&state, &styles, &TokenRegistry::new());
        assert_eq!(own["color"].value, StyleValue::from("#333"));
        assert_eq!(own["color"].source.parent_class_name, "");
    }

    #[test]
    fn props_are_dereferenced_when_styles_lack_a_value() {
        let tokens = TokenRegistry::from_tokens([DesignToken::new(
            "font-body",
            TokenCategory::Font,
            "Inter",
        )]);
        let state = ComponentStyleState::new("p")
            .with_classes(["body"])
            .with_prop("fontFamily", json!({"tokenRef": "font-body", "value": ""}));
        let own = extract_inheritable(&state, &ResolvedStyles::new(), &tokens);
        let Some(StyleValue::Text(family)) = own.get("fontFamily").map(|e| &e.value) else {
            panic!("fontFamily not extracted");
        };
        assert!(family.starts_with("Inter, "));
        assert_eq!(own["fontFamily"].source.parent_class_name, "body");
    }

    #[test]
    fn blank_values_are_not_inherited() {
        let state = ComponentStyleState::new("p").with_prop("color", json!("  "));
        let styles = resolved(&[("fontSize", "", PropertySource::inline_default())]);
        let own = extract_inheritable(&state, &styles, &TokenRegistry::new());
        assert!(own.is_empty());
    }

    #[test]
    fn own_values_replace_ancestor_values() {
        let grandparent = ComponentStyleState::new("gp");
        let gp_styles = resolved(&[
            ("color", "red", PropertySource::inline_default()),
            ("fontSize", "20px", PropertySource::inline_default()),
        ]);
        let gp = propagate(&grandparent, &gp_styles, &InheritedStyles::new(), &TokenRegistry::new());

        let parent = ComponentStyleState::new("p");
        let p_styles = resolved(&[("color", "blue", PropertySource::inline_default())]);
        let p = propagate(&parent, &p_styles, &gp.merged_for_children, &TokenRegistry::new());

        let to_child = &p.merged_for_children;
        assert_eq!(to_child["color"].value, StyleValue::from("blue"));
        assert_eq!(to_child["color"].source.parent_component_id, "p");
        assert_eq!(to_child["color"].source.depth, 1);
        assert_eq!(to_child["fontSize"].source.parent_component_id, "gp");
        assert_eq!(to_child["fontSize"].source.depth, 2);
    }

    #[test]
    fn child_keeps_its_own_color() {
        let parent = ComponentStyleState::new("p");
        let p_styles = resolved(&[("color", "red", PropertySource::inline_default())]);
        let p = propagate(&parent, &p_styles, &InheritedStyles::new(), &TokenRegistry::new());

        let mut child = resolved(&[("color", "green", PropertySource::class("c"))]);
        apply_inherited(&mut child, &p.merged_for_children);
        assert_eq!(child.get("color"), Some(&StyleValue::from("green")));
        assert_eq!(child.source("color"), Some(&PropertySource::class("c")));

        let mut aliased = resolved(&[("textColor", "green", PropertySource::class("c"))]);
        apply_inherited(&mut aliased, &p.merged_for_children);
        assert!(!aliased.contains("color"));
    }

    #[test]
    fn unset_child_receives_value_with_depth() {
        let parent = ComponentStyleState::new("p").with_classes(["theme"]);
        let p_styles = resolved(&[
            ("color", "red", PropertySource::class("theme")),
            ("backgroundColor", "black", PropertySource::class("theme")),
        ]);
        let p = propagate(&parent, &p_styles, &InheritedStyles::new(), &TokenRegistry::new());

        let mut child = resolved(&[("fontSize", "", PropertySource::inline_default())]);
        apply_inherited(&mut child, &p.merged_for_children);
        assert_eq!(child.get("color"), Some(&StyleValue::from("red")));
        assert_eq!(
            child.source("color"),
            Some(&PropertySource {
                source: SourceKind::Inherited,
                class_name: Some("theme".into()),
                component_id: Some("p".into()),
                token: None,
                depth: Some(1),
            })
        );
        assert!(!child.contains("backgroundColor"));
    }
}
