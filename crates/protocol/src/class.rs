use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::value::StyleMap;
use crate::variant::{Breakpoint, PseudoState};

/// Style properties authored for one (breakpoint, state) combination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleVariant {
    #[serde(default)]
    pub breakpoint: Breakpoint,
    #[serde(default)]
    pub state: PseudoState,
    #[serde(default)]
    pub styles: StyleMap,
}

/// A named, globally addressable style class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleClass {
    pub name: String,
    #[serde(default)]
    pub variants: Vec<StyleVariant>,
}

impl StyleClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    /// Set the styles for one variant, replacing any existing entry for the
    /// same (breakpoint, state).
    pub fn with_variant(
        mut self,
        breakpoint: Breakpoint,
        state: PseudoState,
        styles: StyleMap,
    ) -> Self {
        match self
            .variants
            .iter_mut()
            .find(|v| v.breakpoint == breakpoint && v.state == state)
        {
            Some(existing) => existing.styles = styles,
            None => self.variants.push(StyleVariant {
                breakpoint,
                state,
                styles,
            }),
        }
        self
    }

    /// Shorthand for the base (desktop, none) variant.
    pub fn with_base(self, styles: StyleMap) -> Self {
        self.with_variant(Breakpoint::BASE, PseudoState::None, styles)
    }

    /// The exact variant for (breakpoint, state), if authored.
    pub fn variant(&self, breakpoint: Breakpoint, state: PseudoState) -> Option<&StyleMap> {
        self.variants
            .iter()
            .find(|v| v.breakpoint == breakpoint && v.state == state)
            .map(|v| &v.styles)
    }

    /// Whether any breakpoint carries a variant for `state`.
    pub fn has_state(&self, state: PseudoState) -> bool {
        self.variants.iter().any(|v| v.state == state)
    }
}

/// The ordered list of class names applied to a component.
///
/// **Order encodes priority: the first entry wins.** When two classes set the
/// same property, the one closer to the front of the list provides the value.
/// Everything that needs to compare class priority goes through
/// [`ClassList::compare`] / [`ClassList::outranks`] so the direction is
/// defined in exactly one place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Class names from highest to lowest priority.
    pub fn by_priority(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The dominant class, if any.
    pub fn highest(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Rank of `name` (0 = highest priority).
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rank(name).is_some()
    }

    /// `Greater` when `a` takes precedence over `b`. Names not in the list
    /// rank below every listed name.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let rank = |name: &str| self.rank(name).unwrap_or(usize::MAX);
        rank(b).cmp(&rank(a))
    }

    pub fn outranks(&self, a: &str, b: &str) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for ClassList {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl<S: Into<String>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
