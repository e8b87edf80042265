use ndarray::Array2;

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for cluster sizes and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`, `x` is the column and `y` the row, row 0 is the top.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (x_len, y_len) = self.dim();
        let size = (
            Coord::try_from(x_len).unwrap_or(Coord::MAX),
            Coord::try_from(y_len).unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, size)
    }
}

/// Orthogonal steps only, diagonal tiles never belong to the same cluster.
const DISPLACEMENTS: [(i8, i8); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_two_neighbors() {
        let grid: Array2<u8> = Array2::default([3, 3]);

        let neighbors: Vec<_> = grid.iter_neighbors((0, 0)).collect();

        assert_eq!(neighbors, [(1, 0), (0, 1)]);
    }

    #[test]
    fn center_has_four_orthogonal_neighbors() {
        let grid: Array2<u8> = Array2::default([3, 3]);

        let neighbors: Vec<_> = grid.iter_neighbors((1, 1)).collect();

        assert_eq!(neighbors, [(1, 0), (0, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn far_edge_stays_in_bounds() {
        let grid: Array2<u8> = Array2::default([2, 4]);

        let neighbors: Vec<_> = grid.iter_neighbors((1, 3)).collect();

        assert_eq!(neighbors, [(1, 2), (0, 3)]);
    }
}
