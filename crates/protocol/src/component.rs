use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

use crate::class::ClassList;
use crate::value::{StyleMap, StyleValue};

/// Legacy prop carrying the applied class list.
pub const APPLIED_CLASSES_PROP: &str = "appliedClasses";

/// Style-relevant state of one component instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStyleState {
    pub id: String,
    #[serde(default)]
    pub class_names: ClassList,
    #[serde(default)]
    pub style_overrides: StyleMap,
    /// Every other prop of the component. Older documents keep their class
    /// list under `appliedClasses` and their styles as inline fields here.
    #[serde(default)]
    pub props: serde_json::Map<String, serde_json::Value>,
    /// Properties still linked to a component default token (property → token name).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ds_token_refs: BTreeMap<String, String>,
    /// Properties the user explicitly overrode. Accepts either a list of
    /// names or a `{name: bool}` map.
    #[serde(
        default,
        deserialize_with = "locked_props",
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub locked_props: BTreeSet<String>,
}

impl ComponentStyleState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_classes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_names = names.into_iter().collect();
        self
    }

    pub fn with_override(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.style_overrides.insert(property.into(), value.into());
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.props.insert(name.into(), value);
        self
    }

    pub fn with_token_ref(mut self, property: impl Into<String>, token: impl Into<String>) -> Self {
        self.ds_token_refs.insert(property.into(), token.into());
        self
    }

    pub fn lock(mut self, property: impl Into<String>) -> Self {
        self.locked_props.insert(property.into());
        self
    }

    pub fn is_locked(&self, property: &str) -> bool {
        self.locked_props.contains(property)
    }

    /// The effective class list: `class_names`, or the legacy
    /// `appliedClasses` prop when `class_names` is empty.
    pub fn effective_classes(&self) -> ClassList {
        if !self.class_names.is_empty() {
            return self.class_names.clone();
        }
        self.props
            .get(APPLIED_CLASSES_PROP)
            .and_then(serde_json::Value::as_array)
            .map(|names| names.iter().filter_map(serde_json::Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// A node of the component tree handed to the resolver.
///
/// Children are owned, so a node can never be its own ancestor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    /// Component type (`button`, `card`, ...), used to look up component defaults.
    #[serde(rename = "type", default)]
    pub component_type: String,
    #[serde(flatten)]
    pub style: ComponentStyleState,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    pub fn new(component_type: impl Into<String>, style: ComponentStyleState) -> Self {
        Self {
            component_type: component_type.into(),
            style,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn id(&self) -> &str {
        &self.style.id
    }
}

fn locked_props<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Flags(BTreeMap<String, bool>),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => BTreeSet::new(),
        Some(Raw::List(names)) => names.into_iter().collect(),
        Some(Raw::Flags(flags)) => flags
            .into_iter()
            .filter_map(|(name, locked)| locked.then_some(name))
            .collect(),
    })
}
