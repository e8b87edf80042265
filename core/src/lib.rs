#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use cluster::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod cluster;
mod engine;
mod error;
mod generator;
mod grid;
mod snapshot;
mod tile;
mod types;

/// Smallest cluster a click is allowed to clear.
pub const MIN_CLUSTER_SIZE: CellCount = 3;

/// Score awarded per cleared tile.
pub const POINTS_PER_TILE: u32 = 10;

/// A board needs at least two kinds to be a puzzle.
pub const MIN_KINDS: u8 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: Coord2,
    pub kinds: u8,
    pub target_score: u32,
    pub max_moves: u16,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, kinds: u8, target_score: u32, max_moves: u16) -> Self {
        Self {
            size,
            kinds,
            target_score,
            max_moves,
        }
    }

    pub fn new((size_x, size_y): Coord2, kinds: u8, target_score: u32, max_moves: u16) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let kinds = kinds.clamp(MIN_KINDS, MAX_KINDS);
        let max_moves = max_moves.max(1);
        Self::new_unchecked((size_x, size_y), kinds, target_score, max_moves)
    }

    /// Re-applies the clamping of [`GameConfig::new`], for values that came from a file.
    pub fn sanitized(self) -> Self {
        Self::new(self.size, self.kinds, self.target_score, self.max_moves)
    }

    pub fn total_cells(&self) -> CellCount {
        // 255 * 255 still fits a `CellCount`
        CellCount::from(self.size.0) * CellCount::from(self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((8, 8), 5, 500, 10)
    }
}

/// Result of clicking a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The game already ended, nothing changed.
    GameOver,
    /// The clicked cell holds no tile, nothing changed.
    EmptyCell,
    /// The cluster was smaller than [`MIN_CLUSTER_SIZE`], nothing changed.
    TooSmall(CellCount),
    Cleared,
    Won,
    Lost,
}

impl MoveOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            GameOver => false,
            EmptyCell => false,
            TooSmall(_) => false,
            Cleared => true,
            Won => true,
            Lost => true,
        }
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}
