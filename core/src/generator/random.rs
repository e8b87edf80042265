use rand::prelude::*;

use super::*;

/// Draws every tile independently and uniformly from `0..kinds`.
#[derive(Clone, Debug)]
pub struct RandomTileGenerator {
    rng: SmallRng,
    kinds: u8,
}

impl RandomTileGenerator {
    pub fn new(seed: u64, kinds: u8) -> Self {
        let clamped = kinds.clamp(MIN_KINDS, MAX_KINDS);
        if clamped != kinds {
            log::warn!(
                "Requested {} tile kinds, using {} instead",
                kinds,
                clamped
            );
        }
        Self {
            rng: SmallRng::seed_from_u64(seed),
            kinds: clamped,
        }
    }

    pub fn for_config(seed: u64, config: &GameConfig) -> Self {
        Self::new(seed, config.kinds)
    }
}

impl TileGenerator for RandomTileGenerator {
    fn kinds(&self) -> u8 {
        self.kinds
    }

    fn next_kind(&mut self) -> TileKind {
        TileKind(self.rng.random_range(0..self.kinds))
    }
}
