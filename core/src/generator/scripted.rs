use alloc::vec::Vec;

use super::*;

/// Replays a fixed sequence of kinds, cycling when it runs out.
///
/// Makes refills predictable, which is what tests and replays need.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedTileGenerator {
    script: Vec<TileKind>,
    position: usize,
    kinds: u8,
}

impl ScriptedTileGenerator {
    pub fn new(script: impl IntoIterator<Item = TileKind>) -> Self {
        let script: Vec<_> = script.into_iter().collect();
        let kinds = script
            .iter()
            .map(|kind| kind.index().saturating_add(1))
            .max()
            .unwrap_or(1)
            .max(MIN_KINDS);
        Self {
            script,
            position: 0,
            kinds,
        }
    }

    pub fn from_indices(indices: &[u8]) -> Self {
        Self::new(indices.iter().copied().map(TileKind))
    }
}

impl TileGenerator for ScriptedTileGenerator {
    fn kinds(&self) -> u8 {
        self.kinds
    }

    fn next_kind(&mut self) -> TileKind {
        if self.script.is_empty() {
            return TileKind(0);
        }
        let kind = self.script[self.position];
        self.position = (self.position + 1) % self.script.len();
        kind
    }
}
