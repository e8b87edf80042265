use alloc::collections::{BTreeSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Maximal set of orthogonally connected cells sharing one tile kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    kind: Option<TileKind>,
    coords: BTreeSet<Coord2>,
}

impl Cluster {
    /// Kind shared by every member, `None` for the empty cluster.
    pub fn kind(&self) -> Option<TileKind> {
        self.kind
    }

    pub fn len(&self) -> CellCount {
        CellCount::try_from(self.coords.len()).unwrap_or(CellCount::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Whether clearing this cluster counts as a move.
    pub fn is_match(&self) -> bool {
        self.len() >= MIN_CLUSTER_SIZE
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.coords.contains(&coords)
    }

    /// Smallest member coordinate, a stable handle for the whole cluster.
    pub fn anchor(&self) -> Option<Coord2> {
        self.coords.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coord2> {
        self.coords.iter()
    }

    pub fn coords(&self) -> &BTreeSet<Coord2> {
        &self.coords
    }

    pub fn into_coords(self) -> BTreeSet<Coord2> {
        self.coords
    }
}

impl Grid {
    /// Flood fill from `origin` over same-kind orthogonal neighbors.
    ///
    /// An empty origin yields an empty cluster, out of bounds coordinates are an error.
    pub fn find_cluster(&self, origin: Coord2) -> Result<Cluster> {
        let origin = self.validate_coords(origin)?;
        let Cell::Filled(kind) = self[origin] else {
            return Ok(Cluster::default());
        };

        let mut visited = Array2::from_elem(self.size().to_nd_index(), false);
        let cluster = self.flood(origin, kind, &mut visited);
        log::trace!(
            "Cluster at {:?} of kind {} has {} cells",
            origin,
            kind,
            cluster.len()
        );
        Ok(cluster)
    }

    /// Whether at least one cluster is large enough to be cleared.
    ///
    /// Every cell is flooded at most once and the scan stops at the first match.
    pub fn has_any_valid_move(&self) -> bool {
        let mut visited = Array2::from_elem(self.size().to_nd_index(), false);
        let (width, height) = self.size();
        for x in 0..width {
            for y in 0..height {
                let coords = (x, y);
                if visited[coords.to_nd_index()] {
                    continue;
                }
                if let Cell::Filled(kind) = self[coords] {
                    if self.flood(coords, kind, &mut visited).is_match() {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Collects the component of `kind` around `origin`, marking members in `visited`.
    pub(crate) fn flood(
        &self,
        origin: Coord2,
        kind: TileKind,
        visited: &mut Array2<bool>,
    ) -> Cluster {
        let mut coords = BTreeSet::from([origin]);
        let mut to_visit = VecDeque::from([origin]);
        visited[origin.to_nd_index()] = true;

        while let Some(visit_coords) = to_visit.pop_front() {
            for neighbor in self.cells().iter_neighbors(visit_coords) {
                if visited[neighbor.to_nd_index()] || self[neighbor] != Cell::Filled(kind) {
                    continue;
                }
                visited[neighbor.to_nd_index()] = true;
                coords.insert(neighbor);
                to_visit.push_back(neighbor);
            }
        }

        Cluster {
            kind: Some(kind),
            coords,
        }
    }
}
