//! End-to-end resolution: cascade → tokens → component defaults →
//! inheritance → effects.

use canvas_style_protocol::{
    Breakpoint, ComponentNode, ComponentStyleState, PropertySource, PseudoState, ResolvedNode,
    ResolvedStyles, StyleValue,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cascade::CascadeInput;
use crate::inherit::{InheritedStyles, apply_inherited, propagate};
use crate::registry::{ClassStore, ComponentDefaults, TokenRegistry};
use crate::{cascade, effects, tokens};

/// Which variant of the classes to resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    pub breakpoint: Breakpoint,
    pub state: PseudoState,
}

impl ResolveOptions {
    pub fn new(breakpoint: Breakpoint, state: PseudoState) -> Self {
        Self { breakpoint, state }
    }
}

/// Read-only inputs for one resolution pass.
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    pub tokens: &'a TokenRegistry,
    pub classes: &'a ClassStore,
    pub defaults: &'a ComponentDefaults,
    pub options: ResolveOptions,
}

impl<'a> StyleContext<'a> {
    pub fn new(
        tokens: &'a TokenRegistry,
        classes: &'a ClassStore,
        defaults: &'a ComponentDefaults,
        options: ResolveOptions,
    ) -> Self {
        Self {
            tokens,
            classes,
            defaults,
            options,
        }
    }

    pub fn with_options(self, options: ResolveOptions) -> Self {
        Self { options, ..self }
    }
}

/// Cascade and dereference one component, then apply its component-default
/// token bindings. Inheritance is not applied here.
pub fn resolve_component(
    ctx: &StyleContext<'_>,
    component_type: &str,
    state: &ComponentStyleState,
) -> ResolvedStyles {
    let input = CascadeInput::from_component(state);
    let raw = cascade::resolve(
        &input.classes,
        &input.overrides,
        &input.locked,
        ctx.classes,
        ctx.options.state,
        ctx.options.breakpoint,
    );

    let mut resolved = raw.filter_map_values(|property, value| {
        tokens::resolve_component_value(component_type, property, value, ctx.tokens, ctx.defaults)
    });

    for (property, token) in &state.ds_token_refs {
        if tokens::has_explicit_value(&raw.styles, property, &input.locked) {
            continue;
        }
        match tokens::resolve_default_binding(
            component_type,
            property,
            token,
            ctx.tokens,
            ctx.defaults,
        ) {
            Some(value) => resolved.set(
                property.clone(),
                StyleValue::Text(value),
                PropertySource::default_token(token.clone()),
            ),
            None => {
                resolved.remove(property);
            }
        }
    }

    resolved
}

/// Resolve a whole tree with nothing inherited at the root.
pub fn resolve_tree(ctx: &StyleContext<'_>, root: &ComponentNode) -> ResolvedNode {
    resolve_tree_with(ctx, root, &InheritedStyles::new())
}

/// Resolve a whole tree, seeding the root with `root_inherited` (for a
/// subtree rendered inside an already-styled host).
///
/// Ancestors are always resolved before their descendants.
pub fn resolve_tree_with(
    ctx: &StyleContext<'_>,
    root: &ComponentNode,
    root_inherited: &InheritedStyles,
) -> ResolvedNode {
    let resolved = resolve_node(ctx, root, root_inherited);
    debug!(
        root = %resolved.id,
        nodes = resolved.node_count(),
        breakpoint = %ctx.options.breakpoint,
        state = %ctx.options.state,
        "resolved component tree"
    );
    resolved
}

fn resolve_node(
    ctx: &StyleContext<'_>,
    node: &ComponentNode,
    inherited: &InheritedStyles,
) -> ResolvedNode {
    let mut styles = resolve_component(ctx, &node.component_type, &node.style);
    let propagation = propagate(&node.style, &styles, inherited, ctx.tokens);
    apply_inherited(&mut styles, inherited);

    let children = node
        .children
        .iter()
        .map(|child| resolve_node(ctx, child, &propagation.merged_for_children))
        .collect();

    ResolvedNode {
        id: node.id().to_string(),
        component_type: node.component_type.clone(),
        css: effects::finalize(&styles.styles),
        styles,
        children,
    }
}
