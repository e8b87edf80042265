use clap::ValueEnum;
use tilepop_core::{Cluster, Coord2, Grid, hint};

/// How the driver picks the next click.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Policy {
    /// Largest cluster on the board
    #[default]
    Greedy,
    /// First clearable cluster in scan order
    First,
}

impl Policy {
    pub(crate) fn choose(self, grid: &Grid) -> Option<Coord2> {
        match self {
            Self::Greedy => hint(grid),
            Self::First => grid
                .clusters()
                .iter()
                .find(|cluster| cluster.is_match())
                .and_then(Cluster::anchor),
        }
    }
}
