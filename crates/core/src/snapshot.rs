//! Loading registry snapshots and component documents from host JSON.

use std::collections::BTreeSet;

use canvas_style_protocol::{
    Breakpoint, ComponentNode, DesignToken, PseudoState, StyleClass,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::pipeline::{ResolveOptions, StyleContext};
use crate::registry::{ClassStore, ComponentDefaults, TokenRegistry};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate token: {0}")]
    DuplicateToken(String),
    #[error("duplicate class: {0}")]
    DuplicateClass(String),
    #[error("class {class}: duplicate variant ({breakpoint}, {state})")]
    DuplicateVariant {
        class: String,
        breakpoint: Breakpoint,
        state: PseudoState,
    },
}

/// Serialized workspace as persisted by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotData {
    #[serde(default)]
    pub tokens: Vec<DesignToken>,
    #[serde(default)]
    pub classes: Vec<StyleClass>,
    /// Replaces the built-in component-default table when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_defaults: Option<ComponentDefaults>,
}

/// Validated registries, ready to resolve against.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub tokens: TokenRegistry,
    pub classes: ClassStore,
    pub defaults: ComponentDefaults,
}

impl Workspace {
    pub fn from_snapshot(data: SnapshotData) -> Result<Self, SnapshotError> {
        let tokens = build_tokens(data.tokens)?;
        let classes = build_classes(data.classes)?;
        let defaults = data.component_defaults.unwrap_or_default();
        debug!(
            tokens = tokens.len(),
            classes = classes.len(),
            defaults_version = defaults.version,
            "loaded workspace snapshot"
        );
        Ok(Self {
            tokens,
            classes,
            defaults,
        })
    }

    pub fn context(&self, options: ResolveOptions) -> StyleContext<'_> {
        StyleContext::new(&self.tokens, &self.classes, &self.defaults, options)
    }

    pub fn replace_tokens(&mut self, tokens: TokenRegistry) {
        self.tokens = tokens;
    }

    pub fn replace_classes(&mut self, classes: ClassStore) {
        self.classes = classes;
    }
}

fn build_tokens(tokens: Vec<DesignToken>) -> Result<TokenRegistry, SnapshotError> {
    let mut registry = TokenRegistry::new();
    for token in tokens {
        if registry.contains(&token.name) {
            return Err(SnapshotError::DuplicateToken(token.name));
        }
        registry.insert(token);
    }
    Ok(registry)
}

fn build_classes(classes: Vec<StyleClass>) -> Result<ClassStore, SnapshotError> {
    let mut store = ClassStore::new();
    for class in classes {
        if store.contains(&class.name) {
            return Err(SnapshotError::DuplicateClass(class.name));
        }
        let mut seen = BTreeSet::new();
        for variant in &class.variants {
            if !seen.insert((variant.breakpoint, variant.state)) {
                return Err(SnapshotError::DuplicateVariant {
                    class: class.name.clone(),
                    breakpoint: variant.breakpoint,
                    state: variant.state,
                });
            }
        }
        store.insert(class);
    }
    Ok(store)
}

/// Parse a full workspace snapshot (`{tokens, classes, componentDefaults?}`).
pub fn parse_workspace(data: &[u8]) -> Result<Workspace, SnapshotError> {
    let snapshot: SnapshotData = serde_json::from_slice(data)?;
    Workspace::from_snapshot(snapshot)
}

/// Parse a token list.
pub fn parse_tokens(data: &[u8]) -> Result<TokenRegistry, SnapshotError> {
    build_tokens(serde_json::from_slice(data)?)
}

/// Parse a class list.
pub fn parse_classes(data: &[u8]) -> Result<ClassStore, SnapshotError> {
    build_classes(serde_json::from_slice(data)?)
}

/// Parse a component tree.
pub fn parse_tree(data: &[u8]) -> Result<ComponentNode, SnapshotError> {
    Ok(serde_json::from_slice(data)?)
}

/// Parse a single component; any `children` are discarded.
pub fn parse_component(data: &[u8]) -> Result<ComponentNode, SnapshotError> {
    let mut node: ComponentNode = serde_json::from_slice(data)?;
    node.children.clear();
    Ok(node)
}
