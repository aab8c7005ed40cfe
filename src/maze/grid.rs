use std::fmt;

use super::{Position, cell::GridCell};

/// Row-major rectangle of wall/path cells, indexed by `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[GridCell]>,
    width: u16,
    height: u16,
}

impl Grid {
    pub fn new(width: u16, height: u16, cell: GridCell) -> Self {
        let data = vec![cell; width as usize * height as usize].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    /// Build a grid from ASCII rows, `#` for walls and anything else for paths.
    #[cfg(test)]
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len() as u16;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u16;
        let mut grid = Grid::new(width, height, GridCell::Wall);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), width as usize, "ragged test grid");
            for (x, c) in row.chars().enumerate() {
                if c != '#' {
                    grid.set((x as u16, y as u16), GridCell::Path);
                }
            }
        }
        grid
    }

    /// Number of columns.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_in_bounds(&self, coord: Position) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    /// True if `coord` is inside the grid and holds a path cell.
    pub fn is_open(&self, coord: Position) -> bool {
        self.is_in_bounds(coord) && self[coord].is_path()
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.data
    }

    pub fn count(&self, cell: GridCell) -> usize {
        self.data.iter().filter(|&&c| c == cell).count()
    }

    fn ravel_index(&self, x: u16, y: u16) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        y as usize * self.width as usize + x as usize
    }

    /// Overwrite a cell. Returns the previous value.
    pub fn set(&mut self, coord: Position, cell: GridCell) -> GridCell {
        let idx = self.ravel_index(coord.0, coord.1);
        std::mem::replace(&mut self.data[idx], cell)
    }
}

impl std::ops::Index<Position> for Grid {
    type Output = GridCell;

    fn index(&self, index: Position) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self[(x, y)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
