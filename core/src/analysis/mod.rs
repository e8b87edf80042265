use alloc::vec::Vec;

use ndarray::Array2;

use crate::*;

impl Grid {
    /// Partitions every filled cell into its maximal cluster, in scan order.
    pub fn clusters(&self) -> Vec<Cluster> {
        let mut visited = Array2::from_elem(self.size().to_nd_index(), false);
        let mut clusters = Vec::new();
        let (width, height) = self.size();
        for x in 0..width {
            for y in 0..height {
                let coords = (x, y);
                if visited[coords.to_nd_index()] {
                    continue;
                }
                if let Cell::Filled(kind) = self[coords] {
                    clusters.push(self.flood(coords, kind, &mut visited));
                }
            }
        }
        clusters
    }

    /// Clusters that can be cleared, largest first with ties broken by anchor.
    pub fn valid_moves(&self) -> Vec<Cluster> {
        let mut moves: Vec<_> = self
            .clusters()
            .into_iter()
            .filter(Cluster::is_match)
            .collect();
        moves.sort_by(|a, b| b.len().cmp(&a.len()).then(a.anchor().cmp(&b.anchor())));
        moves
    }
}

/// Coordinates to click for the largest available cluster.
pub fn hint(grid: &Grid) -> Option<Coord2> {
    grid.valid_moves().first().and_then(Cluster::anchor)
}
