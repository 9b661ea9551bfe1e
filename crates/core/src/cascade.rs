//! Cascade resolution: applied classes + inline overrides → raw style map.

use std::collections::BTreeSet;

use canvas_style_protocol::component::APPLIED_CLASSES_PROP;
use canvas_style_protocol::{
    Breakpoint, ClassList, ComponentStyleState, PropertySource, PseudoState, ResolvedStyles,
    StyleClass, StyleMap, StyleValue,
};
use tracing::{debug, trace};

use crate::properties::is_style_property;
use crate::registry::ClassStore;

/// Normalized cascade input for one component.
///
/// Both document formats end up here: the current one (`classNames` +
/// `styleOverrides`) and the legacy one (`appliedClasses` prop + inline style
/// fields in `props`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadeInput {
    pub classes: ClassList,
    pub overrides: StyleMap,
    pub locked: BTreeSet<String>,
}

impl CascadeInput {
    pub fn from_component(component: &ComponentStyleState) -> Self {
        // Inline style props are the lowest-priority overrides; styleOverrides
        // take precedence over them.
        let mut overrides: StyleMap = component
            .props
            .iter()
            .filter(|(name, _)| name.as_str() != APPLIED_CLASSES_PROP && is_style_property(name))
            .map(|(name, value)| (name.clone(), StyleValue::from_json(value)))
            .collect();
        overrides.extend(
            component
                .style_overrides
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );

        Self {
            classes: component.effective_classes(),
            overrides,
            locked: component.locked_props.clone(),
        }
    }
}

/// The properties one class contributes for (state, breakpoint).
///
/// If the class has no variant for `state` at any breakpoint, the `none`
/// state is used instead. Within a state the requested breakpoint is layered
/// over the base breakpoint, and a non-resting state is layered over the
/// resting state. Priority, highest first:
///
/// 1. (breakpoint, state)
/// 2. (base, state)
/// 3. (breakpoint, none)
/// 4. (base, none)
///
/// An empty variant map and a missing one behave the same: no contribution.
pub fn class_styles(class: &StyleClass, state: PseudoState, breakpoint: Breakpoint) -> StyleMap {
    let state = if class.has_state(state) {
        state
    } else {
        PseudoState::None
    };

    let mut layers = vec![(breakpoint, state), (Breakpoint::BASE, state)];
    if !state.is_none() {
        layers.push((breakpoint, PseudoState::None));
        layers.push((Breakpoint::BASE, PseudoState::None));
    }
    layers.dedup();

    let mut styles = StyleMap::new();
    for (bp, st) in layers {
        let Some(variant) = class.variant(bp, st) else {
            continue;
        };
        for (property, value) in variant {
            if value.is_set() && !styles.contains_key(property) {
                styles.insert(property.clone(), value.clone());
            }
        }
    }
    styles
}

/// Resolve the raw cascade for one component.
///
/// Classes are applied in priority order (first name wins). Overrides are
/// overlaid afterwards: a locked property always takes the override value;
/// an unlocked one only fills a gap the classes left.
pub fn resolve(
    classes: &ClassList,
    overrides: &StyleMap,
    locked: &BTreeSet<String>,
    store: &ClassStore,
    state: PseudoState,
    breakpoint: Breakpoint,
) -> ResolvedStyles {
    let mut resolved = ResolvedStyles::new();

    for name in classes.by_priority() {
        let Some(class) = store.get(name) else {
            debug!(class = name, "class not found in store; skipping");
            continue;
        };
        for (property, value) in class_styles(class, state, breakpoint) {
            if resolved.contains(&property) {
                continue;
            }
            resolved.set(property, value, PropertySource::class(name));
        }
    }

    for (property, value) in overrides {
        if locked.contains(property) {
            if value.is_set() {
                resolved.set(property.clone(), value.clone(), PropertySource::locked_override());
            } else {
                // Locked to "nothing": the class value must not show through.
                resolved.remove(property);
            }
        } else if value.is_set() && !resolved.contains(property) {
            resolved.set(property.clone(), value.clone(), PropertySource::inline_default());
        } else {
            trace!(property = %property, "unlocked override shadowed by class value");
        }
    }

    resolved
}

/// [`resolve`] for a component in either document format.
pub fn resolve_component(
    component: &ComponentStyleState,
    store: &ClassStore,
    state: PseudoState,
    breakpoint: Breakpoint,
) -> ResolvedStyles {
    let input = CascadeInput::from_component(component);
    resolve(
        &input.classes,
        &input.overrides,
        &input.locked,
        store,
        state,
        breakpoint,
    )
}
