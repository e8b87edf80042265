use core::fmt;
use core::ops::{Index, IndexMut};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Character used for empty cells in the text form of a grid.
pub const EMPTY_SYMBOL: char = '.';

/// Fixed-size board of cells, indexed by `(x, y)` with row 0 at the top.
///
/// Deserialized grids go through [`Grid::from_cells`], so every axis is `1..=Coord::MAX` long.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<Cell>", into = "Array2<Cell>")]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// A grid with every cell [`Cell::Empty`].
    pub fn empty(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    /// Fills every cell with an independently drawn kind, no adjacency rules apply.
    pub fn generate<G: TileGenerator + ?Sized>(size: Coord2, generator: &mut G) -> Self {
        let mut grid = Self::empty(size);
        // row by row from the top so a seed always produces the same board
        for y in 0..size.1 {
            for x in 0..size.0 {
                grid[(x, y)] = Cell::Filled(generator.next_kind());
            }
        }
        log::trace!("Generated {}x{} grid", size.0, size.1);
        grid
    }

    pub fn from_cells(cells: Array2<Cell>) -> Result<Self> {
        let (x_len, y_len) = cells.dim();
        let max_len = usize::from(Coord::MAX);
        if x_len == 0 || y_len == 0 || x_len > max_len || y_len > max_len {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { cells })
    }

    /// Builds a grid from optional kinds, rejecting kinds no game can use.
    pub fn from_kinds(kinds: &Array2<Option<TileKind>>) -> Result<Self> {
        let grid = Self::from_cells(kinds.map(|&kind| Cell::from(kind)))?;
        grid.check_kinds(MAX_KINDS)?;
        Ok(grid)
    }

    /// Parses rows given top to bottom, letters `A..` are kinds and `.` is an empty cell.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let max_len = usize::from(Coord::MAX);
        if width == 0 || width > max_len || height > max_len {
            return Err(GameError::InvalidBoardShape);
        }

        let mut cells = Array2::default([width, height]);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(GameError::InvalidBoardShape);
            }
            for (x, symbol) in row.chars().enumerate() {
                cells[[x, y]] = parse_symbol(symbol)?;
            }
        }

        Ok(Self { cells })
    }

    pub fn size(&self) -> Coord2 {
        let (x_len, y_len) = self.cells.dim();
        // constructors never allow an axis longer than `Coord::MAX`
        (x_len as Coord, y_len as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        CellCount::from(width) * CellCount::from(height)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn empty_count(&self) -> CellCount {
        let count = self.cells.iter().filter(|cell| cell.is_empty()).count();
        CellCount::try_from(count).unwrap_or(CellCount::MAX)
    }

    /// Fails when any tile holds a kind outside `0..kinds`.
    pub fn check_kinds(&self, kinds: u8) -> Result<()> {
        let out_of_range = self
            .cells
            .iter()
            .filter_map(|cell| cell.kind())
            .any(|kind| kind.index() >= kinds);
        if out_of_range {
            Err(GameError::InvalidTileKind)
        } else {
            Ok(())
        }
    }

    /// Empties every cell of `cluster`.
    pub fn clear(&mut self, cluster: &Cluster) {
        for &coords in cluster.iter() {
            self[coords] = Cell::Empty;
        }
    }

    /// Drops tiles to the bottom of every column without refilling, returns how many cells are left empty.
    pub fn collapse(&mut self) -> CellCount {
        (0..self.width())
            .map(|x| CellCount::from(self.collapse_column(x)))
            .sum()
    }

    /// Applies gravity to every column then refills the empty run at the top of each one.
    ///
    /// Returns the number of freshly generated tiles.
    pub fn collapse_and_refill<G: TileGenerator + ?Sized>(&mut self, generator: &mut G) -> CellCount {
        let mut refilled: CellCount = 0;
        for x in 0..self.width() {
            let empty_run = self.collapse_column(x);
            for y in 0..empty_run {
                self[(x, y)] = Cell::Filled(generator.next_kind());
            }
            if empty_run > 0 {
                log::trace!("Refilled {} cells in column {}", empty_run, x);
            }
            refilled += CellCount::from(empty_run);
        }
        refilled
    }

    /// Stable single pass compaction from the bottom row upwards.
    ///
    /// Returns the length of the empty run left at the top of the column.
    fn collapse_column(&mut self, x: Coord) -> Coord {
        let mut write = self.height();
        for y in (0..self.height()).rev() {
            if let Cell::Filled(kind) = self[(x, y)] {
                write -= 1;
                if write != y {
                    self[(x, write)] = Cell::Filled(kind);
                    self[(x, y)] = Cell::Empty;
                }
            }
        }
        write
    }
}

impl TryFrom<Array2<Cell>> for Grid {
    type Error = GameError;

    fn try_from(cells: Array2<Cell>) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl From<Grid> for Array2<Cell> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

fn parse_symbol(symbol: char) -> Result<Cell> {
    match symbol {
        EMPTY_SYMBOL => Ok(Cell::Empty),
        'A'..='Z' => Ok(Cell::Filled(TileKind(symbol as u8 - b'A'))),
        _ => Err(GameError::InvalidTileKind),
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.cells[(x as usize, y as usize)]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, (x, y): Coord2) -> &mut Self::Output {
        &mut self.cells[(x as usize, y as usize)]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.size();
        for y in 0..height {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..width {
                match self[(x, y)] {
                    Cell::Empty => write!(f, "{}", EMPTY_SYMBOL)?,
                    Cell::Filled(kind) => write!(f, "{}", kind)?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn from_rows_maps_letters_and_dots() {
        let grid = grid(&["AB", ".C"]);

        assert_eq!(grid.size(), (2, 2));
        assert_eq!(grid[(0, 0)], Cell::Filled(TileKind(0)));
        assert_eq!(grid[(1, 0)], Cell::Filled(TileKind(1)));
        assert_eq!(grid[(0, 1)], Cell::Empty);
        assert_eq!(grid[(1, 1)], Cell::Filled(TileKind(2)));
        assert_eq!(grid.to_string(), "AB\n.C");
    }

    #[test]
    fn from_rows_rejects_ragged_and_unknown_input() {
        assert_eq!(Grid::from_rows(&["AB", "A"]), Err(GameError::InvalidBoardShape));
        assert_eq!(Grid::from_rows::<&str>(&[]), Err(GameError::InvalidBoardShape));
        assert_eq!(Grid::from_rows(&["A?"]), Err(GameError::InvalidTileKind));
    }

    #[test]
    fn generate_fills_every_cell() {
        let mut generator = ScriptedTileGenerator::from_indices(&[0, 1, 2]);

        let grid = Grid::generate((8, 8), &mut generator);

        assert_eq!(grid.size(), (8, 8));
        assert_eq!(grid.empty_count(), 0);
        assert!(grid.check_kinds(3).is_ok());
    }

    #[test]
    fn out_of_bounds_coords_are_invalid() {
        let grid = grid(&["AB", "CD"]);

        assert_eq!(grid.cell_at((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(grid.cell_at((0, 2)), Err(GameError::InvalidCoords));
        assert_eq!(grid.cell_at((1, 1)), Ok(Cell::Filled(TileKind(3))));
    }

    #[test]
    fn collapse_keeps_relative_order() {
        let mut grid = grid(&["A.", ".B", "C.", "..", "D."]);

        let empty = grid.collapse();

        assert_eq!(grid.to_string(), "..\n..\nA.\nC.\nDB");
        assert_eq!(empty, 2 + 4);
    }

    #[test]
    fn refill_fills_top_run_from_top_to_bottom() {
        let mut grid = grid(&["AB", "..", "..", "CB"]);
        let mut generator = ScriptedTileGenerator::from_indices(&[3, 4, 0, 2, 1, 2]);

        let refilled = grid.collapse_and_refill(&mut generator);

        assert_eq!(refilled, 4);
        assert_eq!(grid.to_string(), "DA\nEC\nAB\nCB");
        assert_eq!(grid.empty_count(), 0);
    }

    #[test]
    fn full_column_is_left_untouched() {
        let mut grid = grid(&["AB", "CD"]);
        let mut generator = ScriptedTileGenerator::from_indices(&[4]);

        assert_eq!(grid.collapse_and_refill(&mut generator), 0);
        assert_eq!(grid.to_string(), "AB\nCD");
    }

    #[test]
    fn total_cells_fits_the_largest_board() {
        let grid = Grid::empty((Coord::MAX, Coord::MAX));

        assert_eq!(grid.total_cells(), 65025);
        assert_eq!(grid.empty_count(), 65025);
    }

    #[test]
    fn json_keeps_cells() {
        let grid = grid(&["AB", ".C"]);

        let json = serde_json::to_string(&grid).unwrap();

        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);
    }

    #[test]
    fn json_with_unusable_shape_is_rejected() {
        let too_wide = serde_json::to_string(&Array2::<Cell>::default([256, 2])).unwrap();
        let no_rows = serde_json::to_string(&Array2::<Cell>::default([3, 0])).unwrap();

        assert!(serde_json::from_str::<Grid>(&too_wide).is_err());
        assert!(serde_json::from_str::<Grid>(&no_rows).is_err());
    }

    #[test]
    fn from_kinds_rejects_unknown_kinds() {
        let mut kinds = Array2::from_elem([2, 2], Some(TileKind(1)));
        assert_eq!(Grid::from_kinds(&kinds).unwrap().to_string(), "BB\nBB");

        kinds[[1, 0]] = Some(TileKind(MAX_KINDS));
        assert_eq!(Grid::from_kinds(&kinds), Err(GameError::InvalidTileKind));

        kinds[[1, 0]] = None;
        assert_eq!(Grid::from_kinds(&kinds).unwrap().to_string(), "B.\nBB");
    }

    #[test]
    fn check_kinds_flags_out_of_range_tiles() {
        let grid = grid(&["AE"]);

        assert!(grid.check_kinds(5).is_ok());
        assert_eq!(grid.check_kinds(4), Err(GameError::InvalidTileKind));
    }
}
