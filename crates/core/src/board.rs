//! Board module - the fixed-size playfield geometry
//!
//! The board holds no cell contents; occupancy lives with the snake. It only
//! answers geometric questions: is a cell inside, where does a cell wrap to,
//! where is the center, which cells are still free.
//! Coordinates: (x, y) where x ranges 0..width (left to right), y ranges
//! 0..height (top to bottom).

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::types::Cell;

/// Playfield dimensions, immutable for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
}

impl Board {
    /// Create a board; both dimensions must be non-zero
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidBoard { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Starting cell of the snake
    pub fn center(&self) -> Cell {
        Cell::new(self.width as i32 / 2, self.height as i32 / 2)
    }

    /// Check if position is within bounds
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width as i32 && cell.y >= 0 && cell.y < self.height as i32
    }

    /// Wrap an out-of-bounds cell to the opposite edge.
    ///
    /// Only a single step past an edge is expected, which is all a move can
    /// produce; in-bounds cells are returned unchanged.
    pub fn wrap(&self, cell: Cell) -> Cell {
        let w = self.width as i32;
        let h = self.height as i32;
        let x = if cell.x < 0 {
            w - 1
        } else if cell.x >= w {
            0
        } else {
            cell.x
        };
        let y = if cell.y < 0 {
            h - 1
        } else if cell.y >= h {
            0
        } else {
            cell.y
        };
        Cell::new(x, y)
    }

    /// Row-major iterator over every cell
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let w = self.width as i32;
        (0..self.height as i32).flat_map(move |y| (0..w).map(move |x| Cell::new(x, y)))
    }

    /// Row-major list of cells not in `occupied`
    pub fn free_cells(&self, occupied: &HashSet<Cell>) -> Vec<Cell> {
        self.cells().filter(|c| !occupied.contains(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimensions() {
        assert_eq!(
            Board::new(0, 5),
            Err(ConfigError::InvalidBoard { width: 0, height: 5 })
        );
        assert!(Board::new(5, 0).is_err());
        assert!(Board::new(1, 1).is_ok());
    }

    #[test]
    fn test_center() {
        assert_eq!(Board::new(5, 5).unwrap().center(), Cell::new(2, 2));
        assert_eq!(Board::new(25, 25).unwrap().center(), Cell::new(12, 12));
        assert_eq!(Board::new(4, 6).unwrap().center(), Cell::new(2, 3));
    }

    #[test]
    fn test_contains_edges() {
        let board = Board::new(10, 8).unwrap();
        assert!(board.contains(Cell::new(0, 0)));
        assert!(board.contains(Cell::new(9, 7)));
        assert!(!board.contains(Cell::new(-1, 0)));
        assert!(!board.contains(Cell::new(10, 0)));
        assert!(!board.contains(Cell::new(0, 8)));
        assert!(!board.contains(Cell::new(0, -1)));
    }

    #[test]
    fn test_wrap_each_edge() {
        let board = Board::new(10, 8).unwrap();
        assert_eq!(board.wrap(Cell::new(-1, 3)), Cell::new(9, 3));
        assert_eq!(board.wrap(Cell::new(10, 3)), Cell::new(0, 3));
        assert_eq!(board.wrap(Cell::new(4, -1)), Cell::new(4, 7));
        assert_eq!(board.wrap(Cell::new(4, 8)), Cell::new(4, 0));
        assert_eq!(board.wrap(Cell::new(4, 4)), Cell::new(4, 4));
    }

    #[test]
    fn test_free_cells_excludes_occupied() {
        let board = Board::new(3, 2).unwrap();
        let occupied: HashSet<Cell> = [Cell::new(0, 0), Cell::new(2, 1)].into_iter().collect();
        let free = board.free_cells(&occupied);
        assert_eq!(free.len(), 4);
        assert_eq!(free[0], Cell::new(1, 0));
        assert!(!free.contains(&Cell::new(2, 1)));
        assert_eq!(board.cells().count(), board.area());
    }
}
