use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::{StyleMap, StyleValue};

/// Final renderer-facing map: CSS property name → CSS value string.
pub type CssMap = BTreeMap<String, String>;

/// Where a resolved property value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Class,
    /// A locked inline override.
    Override,
    /// An unlocked inline value or a component-default token binding.
    Default,
    Inherited,
}

/// Attribution record for one resolved property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySource {
    pub source: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Component the value was inherited from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    /// Token that produced a component-default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

impl PropertySource {
    fn of(source: SourceKind) -> Self {
        Self {
            source,
            class_name: None,
            component_id: None,
            token: None,
            depth: None,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self {
            class_name: Some(name.into()),
            ..Self::of(SourceKind::Class)
        }
    }

    pub fn locked_override() -> Self {
        Self::of(SourceKind::Override)
    }

    pub fn inline_default() -> Self {
        Self::of(SourceKind::Default)
    }

    pub fn default_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::of(SourceKind::Default)
        }
    }

    pub fn inherited(from: &InheritedPropertySource) -> Self {
        Self {
            class_name: (!from.parent_class_name.is_empty()).then(|| from.parent_class_name.clone()),
            component_id: Some(from.parent_component_id.clone()),
            depth: Some(from.depth),
            ..Self::of(SourceKind::Inherited)
        }
    }
}

/// Provenance of an inherited value, for debugging and inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InheritedPropertySource {
    /// Class that supplied the value on the originating component (empty if
    /// it came from an inline value).
    pub parent_class_name: String,
    pub parent_component_id: String,
    /// Levels between the originating component and the consumer; 0 on the
    /// originating component itself.
    pub depth: u32,
}

/// Style values plus per-property attribution.
///
/// Every key in `styles` has a matching entry in `sources`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStyles {
    pub styles: StyleMap,
    pub sources: BTreeMap<String, PropertySource>,
}

impl ResolvedStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: impl Into<String>, value: StyleValue, source: PropertySource) {
        let property = property.into();
        self.sources.insert(property.clone(), source);
        self.styles.insert(property, value);
    }

    pub fn remove(&mut self, property: &str) -> Option<StyleValue> {
        self.sources.remove(property);
        self.styles.remove(property)
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.styles.get(property)
    }

    pub fn source(&self, property: &str) -> Option<&PropertySource> {
        self.sources.get(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.styles.contains_key(property)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Transform every value, keeping its attribution. Values mapped to
    /// `None` are removed together with their source.
    pub fn filter_map_values<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str, &StyleValue) -> Option<StyleValue>,
    {
        let mut out = Self::new();
        for (property, value) in &self.styles {
            let Some(mapped) = f(property, value) else {
                continue;
            };
            let source = self
                .sources
                .get(property)
                .cloned()
                .unwrap_or_else(PropertySource::inline_default);
            out.set(property.clone(), mapped, source);
        }
        out
    }
}

/// A component after full resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedNode {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub styles: ResolvedStyles,
    pub css: CssMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResolvedNode>,
}

impl ResolvedNode {
    /// Depth-first search by component id.
    pub fn find(&self, id: &str) -> Option<&ResolvedNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ResolvedNode::node_count).sum::<usize>()
    }
}
