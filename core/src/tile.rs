use core::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound for the number of distinct tile kinds a game may use.
pub const MAX_KINDS: u8 = 26;

/// Identity of a tile, an index into the game's fixed set of colors or pictures.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileKind(pub u8);

impl TileKind {
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Single letter used by text renderings, `A` for kind 0.
    pub fn symbol(self) -> char {
        char::from(b'A' + self.0.min(MAX_KINDS - 1))
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// State of a single grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Filled(TileKind),
}

impl Cell {
    pub const fn kind(self) -> Option<TileKind> {
        match self {
            Self::Empty => None,
            Self::Filled(kind) => Some(kind),
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<Option<TileKind>> for Cell {
    fn from(kind: Option<TileKind>) -> Self {
        kind.map_or(Self::Empty, Self::Filled)
    }
}
