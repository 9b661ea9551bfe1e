pub mod class;
pub mod component;
pub mod resolved;
pub mod token;
pub mod types;
pub mod value;
pub mod variant;

pub use class::{ClassList, StyleClass, StyleVariant};
pub use component::{ComponentNode, ComponentStyleState};
pub use resolved::{
    CssMap, InheritedPropertySource, PropertySource, ResolvedNode, ResolvedStyles, SourceKind,
};
pub use token::{DesignToken, TokenCategory};
pub use types::Rgb;
pub use value::{
    ColorKind, ColorSource, ColorValue, Corners, Dimension, Filter, FilterKind, Shadow, StyleMap,
    StyleValue, TokenRef, Transform, Transition,
};
pub use variant::{Breakpoint, ParseBreakpointError, ParseStateError, PseudoState};
