//! Core types for ladder representation.

use std::fmt;

/// A stable identifier for a component in the ladder.
///
/// Ids are handed out in insertion order and never reused, so they survive
/// edits and removals of other components.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub usize);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a component connects to the impedance accumulated before it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    /// Head of the ladder; only valid at position 0
    First,
    /// In series with everything before it
    Series,
    /// In parallel with the immediately preceding block
    Parallel,
}

impl Link {
    /// Parse a link keyword (`first`, `series`, `parallel` or `f`/`s`/`p`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "first" | "f" => Some(Self::First),
            "series" | "s" => Some(Self::Series),
            "parallel" | "p" => Some(Self::Parallel),
            _ => None,
        }
    }

    /// Whether this link opens a new series block.
    pub fn starts_block(&self) -> bool {
        matches!(self, Self::First | Self::Series)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::First => "first",
            Self::Series => "series",
            Self::Parallel => "parallel",
        };
        f.pad(name)
    }
}
