use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a front end needs to draw one frame of the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub tiles: Array2<Option<TileKind>>,
    pub state: GameState,
    pub moves_left: u16,
    pub target_score: u32,
}

impl Snapshot {
    pub fn new(
        size: Coord2,
        tiles: Array2<Option<TileKind>>,
        state: GameState,
        moves_left: u16,
        target_score: u32,
    ) -> Result<Self> {
        let snapshot = Self {
            size,
            tiles,
            state,
            moves_left,
            target_score,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_engine<G: TileGenerator>(engine: &PlayEngine<G>) -> Self {
        let grid = engine.grid();
        Self {
            size: grid.size(),
            tiles: grid.cells().map(|cell| cell.kind()),
            state: engine.state(),
            moves_left: engine.moves_left(),
            target_score: engine.config().target_score,
        }
    }

    /// Checks that `tiles` matches `size` and holds no kind past [`MAX_KINDS`].
    pub fn validate(&self) -> Result<()> {
        let expected = (usize::from(self.size.0), usize::from(self.size.1));
        if self.tiles.dim() != expected {
            return Err(GameError::InvalidBoardShape);
        }
        if self.tiles.iter().flatten().any(|kind| kind.index() >= MAX_KINDS) {
            return Err(GameError::InvalidTileKind);
        }
        Ok(())
    }

    /// Rebuilds the grid this snapshot was taken from.
    pub fn to_grid(&self) -> Result<Grid> {
        self.validate()?;
        Grid::from_kinds(&self.tiles)
    }
}
