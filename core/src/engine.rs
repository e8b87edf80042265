use alloc::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::*;

/// How many times [`PlayEngine::reshuffle_if_stuck`] regenerates before giving up on a dead board.
pub const MAX_RESHUFFLE_ATTEMPTS: usize = 16;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Score and move budget of a single game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub moves_used: u16,
    pub status: GameStatus,
}

impl GameState {
    pub const fn new() -> Self {
        Self {
            score: 0,
            moves_used: 0,
            status: GameStatus::InProgress,
        }
    }

    pub const fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn moves_left(&self, config: &GameConfig) -> u16 {
        config.max_moves.saturating_sub(self.moves_used)
    }

    /// Win is checked before the move limit, so reaching both at once is a win.
    fn update_status(&mut self, config: &GameConfig) {
        self.status = if self.score >= config.target_score {
            GameStatus::Won
        } else if self.moves_used >= config.max_moves {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };
    }
}

/// What a click did, along with the coordinates to animate and the state after it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveResult {
    pub outcome: MoveOutcome,
    pub cleared: BTreeSet<Coord2>,
    pub state: GameState,
}

impl MoveResult {
    fn rejected(outcome: MoveOutcome, state: GameState) -> Self {
        Self {
            outcome,
            cleared: BTreeSet::new(),
            state,
        }
    }
}

/// Points awarded for clearing a cluster of `size` tiles.
pub fn points_for(size: CellCount) -> u32 {
    u32::from(size) * POINTS_PER_TILE
}

/// Fresh state and grid for a new game.
pub fn reset<G: TileGenerator + ?Sized>(
    config: &GameConfig,
    generator: &mut G,
) -> (GameState, Grid) {
    (GameState::new(), Grid::generate(config.size, generator))
}

/// Clears the cluster at `origin`, applies gravity and refill, then updates score and status.
///
/// Rejected clicks leave `state` and `grid` untouched. Coordinates outside the grid are an error.
pub fn apply_move<G: TileGenerator + ?Sized>(
    config: &GameConfig,
    state: &mut GameState,
    grid: &mut Grid,
    generator: &mut G,
    origin: Coord2,
) -> Result<MoveResult> {
    let origin = grid.validate_coords(origin)?;

    if state.is_finished() {
        log::debug!("Ignoring move at {:?}, game already ended", origin);
        return Ok(MoveResult::rejected(MoveOutcome::GameOver, *state));
    }

    let cluster = grid.find_cluster(origin)?;
    if cluster.is_empty() {
        return Ok(MoveResult::rejected(MoveOutcome::EmptyCell, *state));
    }
    if !cluster.is_match() {
        log::trace!(
            "Cluster at {:?} has {} cells, need {}",
            origin,
            cluster.len(),
            MIN_CLUSTER_SIZE
        );
        return Ok(MoveResult::rejected(
            MoveOutcome::TooSmall(cluster.len()),
            *state,
        ));
    }

    state.score = state.score.saturating_add(points_for(cluster.len()));
    state.moves_used = state.moves_used.saturating_add(1);
    grid.clear(&cluster);
    let refilled = grid.collapse_and_refill(generator);
    state.update_status(config);

    log::debug!(
        "Cleared {} tiles at {:?}, refilled {}, score {}, moves {}/{}",
        cluster.len(),
        origin,
        refilled,
        state.score,
        state.moves_used,
        config.max_moves
    );

    let outcome = match state.status {
        GameStatus::InProgress => MoveOutcome::Cleared,
        GameStatus::Won => {
            log::debug!("Game won with score {}", state.score);
            MoveOutcome::Won
        }
        GameStatus::Lost => {
            log::debug!("Game lost with score {}", state.score);
            MoveOutcome::Lost
        }
    };

    Ok(MoveResult {
        outcome,
        cleared: cluster.into_coords(),
        state: *state,
    })
}

/// Owns everything one game needs so a front end can hold a single value.
#[derive(Clone, Debug)]
pub struct PlayEngine<G = RandomTileGenerator> {
    config: GameConfig,
    state: GameState,
    grid: Grid,
    generator: G,
}

impl PlayEngine<RandomTileGenerator> {
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        let generator = RandomTileGenerator::for_config(seed, &config);
        Self::new(config, generator)
    }
}

impl<G: TileGenerator> PlayEngine<G> {
    pub fn new(config: GameConfig, mut generator: G) -> Self {
        if generator.kinds() != config.kinds {
            log::warn!(
                "Generator produces {} kinds but config declares {}",
                generator.kinds(),
                config.kinds
            );
        }
        let (state, grid) = reset(&config, &mut generator);
        Self {
            config,
            state,
            grid,
            generator,
        }
    }

    /// Starts from an explicit grid, which must match the configured size and kinds.
    pub fn with_grid(config: GameConfig, grid: Grid, generator: G) -> Result<Self> {
        if grid.size() != config.size {
            return Err(GameError::InvalidBoardShape);
        }
        grid.check_kinds(config.kinds)?;
        Ok(Self {
            config,
            state: GameState::new(),
            grid,
            generator,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn moves_used(&self) -> u16 {
        self.state.moves_used
    }

    pub fn moves_left(&self) -> u16 {
        self.state.moves_left(&self.config)
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        self.grid.cell_at(coords)
    }

    pub fn apply_move(&mut self, origin: Coord2) -> Result<MoveResult> {
        apply_move(
            &self.config,
            &mut self.state,
            &mut self.grid,
            &mut self.generator,
            origin,
        )
    }

    pub fn has_any_valid_move(&self) -> bool {
        self.grid.has_any_valid_move()
    }

    pub fn hint(&self) -> Option<Coord2> {
        hint(&self.grid)
    }

    /// Starts a new game, the generator keeps its position so the new board differs.
    pub fn reset(&mut self) {
        let (state, grid) = reset(&self.config, &mut self.generator);
        self.state = state;
        self.grid = grid;
        log::debug!("Game reset");
    }

    /// Regenerates the grid when no cluster can be cleared, keeping score and moves.
    ///
    /// Returns whether the grid was replaced. Never runs on its own after a move.
    pub fn reshuffle_if_stuck(&mut self) -> bool {
        if self.is_finished() || self.grid.has_any_valid_move() {
            return false;
        }

        for attempt in 1..=MAX_RESHUFFLE_ATTEMPTS {
            self.grid = Grid::generate(self.config.size, &mut self.generator);
            if self.grid.has_any_valid_move() {
                log::debug!("Reshuffled dead board after {} attempt(s)", attempt);
                return true;
            }
        }

        log::warn!(
            "Board still has no valid move after {} reshuffles",
            MAX_RESHUFFLE_ATTEMPTS
        );
        true
    }
}
