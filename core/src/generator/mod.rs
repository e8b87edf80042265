use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Source of fresh tiles, used both for the initial fill and for the refill after gravity.
pub trait TileGenerator {
    /// Number of distinct kinds this generator may produce, kinds are always `0..kinds()`.
    fn kinds(&self) -> u8;

    fn next_kind(&mut self) -> TileKind;
}

impl<G: TileGenerator + ?Sized> TileGenerator for &mut G {
    fn kinds(&self) -> u8 {
        (**self).kinds()
    }

    fn next_kind(&mut self) -> TileKind {
        (**self).next_kind()
    }
}
