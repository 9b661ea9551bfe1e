use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A responsive layout tier.
///
/// `Desktop` is the base tier: every other breakpoint degrades to it for any
/// property it does not define itself.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    pub const BASE: Self = Self::Desktop;

    pub fn is_base(self) -> bool {
        self == Self::BASE
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Desktop => write!(f, "desktop"),
            Self::Tablet => write!(f, "tablet"),
            Self::Mobile => write!(f, "mobile"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown breakpoint: {0}")]
pub struct ParseBreakpointError(pub String);

impl FromStr for Breakpoint {
    type Err = ParseBreakpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" | "base" => Ok(Self::Desktop),
            "tablet" => Ok(Self::Tablet),
            "mobile" => Ok(Self::Mobile),
            _ => Err(ParseBreakpointError(s.to_string())),
        }
    }
}

/// An interaction state selecting which class variant applies.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PseudoState {
    /// The resting state. Every other state falls back to it.
    #[default]
    None,
    Hover,
    Focus,
    Active,
    Disabled,
}

impl PseudoState {
    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

impl std::fmt::Display for PseudoState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Hover => write!(f, "hover"),
            Self::Focus => write!(f, "focus"),
            Self::Active => write!(f, "active"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pseudo-state: {0}")]
pub struct ParseStateError(pub String);

impl FromStr for PseudoState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "hover" => Ok(Self::Hover),
            "focus" => Ok(Self::Focus),
            "active" => Ok(Self::Active),
            "disabled" => Ok(Self::Disabled),
            _ => Err(ParseStateError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_display() {
        for bp in [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile] {
            assert_eq!(bp.to_string().parse::<Breakpoint>(), Ok(bp));
        }
        for state in [
            PseudoState::None,
            PseudoState::Hover,
            PseudoState::Focus,
            PseudoState::Active,
            PseudoState::Disabled,
        ] {
            assert_eq!(state.to_string().parse::<PseudoState>(), Ok(state));
        }
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("widescreen".parse::<Breakpoint>().is_err());
        assert!("visited".parse::<PseudoState>().is_err());
    }

    #[test]
    fn defaults_are_base() {
        assert!(Breakpoint::default().is_base());
        assert!(PseudoState::default().is_none());
    }
}
