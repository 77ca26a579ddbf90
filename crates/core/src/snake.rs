//! Snake body: ordered cells plus an occupancy set.
//!
//! The deque gives O(1) head insert and tail removal; the set gives O(1)
//! collision lookups. Both are always updated together.

use std::collections::{HashSet, VecDeque};

use crate::types::Cell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
    occupied: HashSet<Cell>,
}

impl Snake {
    /// A one-cell snake at `start`
    pub fn new(start: Cell) -> Self {
        let mut body = VecDeque::with_capacity(64);
        body.push_back(start);
        let mut occupied = HashSet::with_capacity(64);
        occupied.insert(start);
        Self { body, occupied }
    }

    pub fn head(&self) -> Cell {
        // Length is never below one.
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    /// Membership set of every body cell
    pub fn occupied(&self) -> &HashSet<Cell> {
        &self.occupied
    }

    /// Cells from head to tail
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Prepend a new head. Returns false (and changes nothing) if the cell is
    /// already part of the body.
    pub fn push_head(&mut self, cell: Cell) -> bool {
        if !self.occupied.insert(cell) {
            return false;
        }
        self.body.push_front(cell);
        true
    }

    /// Drop the tail cell, keeping at least one cell
    pub fn pop_tail(&mut self) -> Option<Cell> {
        if self.body.len() <= 1 {
            return None;
        }
        let tail = self.body.pop_back()?;
        self.occupied.remove(&tail);
        Some(tail)
    }
}
