//! Style resolution for the builder canvas.
//!
//! A component's final CSS comes out of a fixed sequence of pure stages:
//! [`cascade`] (classes and overrides), [`tokens`] (token references and
//! structured values), component-default bindings, [`inherit`] (top-down
//! text properties), and [`effects`] (shadow/filter/transition/transform
//! shorthands). [`pipeline`] runs them; [`snapshot`] loads the inputs.

pub mod cascade;
pub mod effects;
pub mod inherit;
pub mod pipeline;
pub mod properties;
pub mod registry;
pub mod snapshot;
pub mod tokens;

pub use inherit::{InheritedStyles, InheritedValue, Propagation};
pub use pipeline::{ResolveOptions, StyleContext, resolve_component, resolve_tree, resolve_tree_with};
pub use registry::{ClassStore, ComponentDefaults, DefaultBinding, TokenRegistry};
pub use snapshot::{SnapshotData, SnapshotError, Workspace};
