//! Board state: cell occupancy owned by the rule engine

use crate::error::GameError;
use crate::grid::{Grid, Hex};
use serde::{Deserialize, Serialize};

/// One of the two competing parties
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }
}

/// Cell-to-piece mapping over a fixed grid.
///
/// Occupancy lives in an arena parallel to the grid's cell list, so `clone()`
/// is a cheap deep copy; the AI simulates candidate moves on clones and never
/// touches the live board. All mutations go through `place`/`remove`/
/// `reassign` (or `apply_move` in `moves`); a failed precondition leaves the
/// board unchanged.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    occupancy: Vec<Option<Side>>,
}

impl Board {
    /// Empty board over the given grid
    pub fn new(grid: Grid) -> Self {
        let occupancy = vec![None; grid.slot_count()];
        Self { grid, occupancy }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Piece at the cell, if any. Invalid cells read as empty.
    pub fn get(&self, hex: Hex) -> Option<Side> {
        self.grid.index_of(hex).and_then(|i| self.occupancy[i])
    }

    /// Put a new piece on an empty, valid cell
    pub fn place(&mut self, hex: Hex, side: Side) -> Result<(), GameError> {
        let i = self.valid_slot(hex)?;
        if self.occupancy[i].is_some() {
            return Err(GameError::OccupiedCell(hex));
        }
        self.occupancy[i] = Some(side);
        Ok(())
    }

    /// Remove the piece at a cell
    pub fn remove(&mut self, hex: Hex) -> Result<Side, GameError> {
        let i = self.valid_slot(hex)?;
        self.occupancy[i].take().ok_or(GameError::EmptyCell(hex))
    }

    /// Change ownership in place (conversion). The cell must hold a piece.
    pub fn reassign(&mut self, hex: Hex, side: Side) -> Result<(), GameError> {
        let i = self.valid_slot(hex)?;
        match self.occupancy[i] {
            Some(_) => {
                self.occupancy[i] = Some(side);
                Ok(())
            }
            None => Err(GameError::EmptyCell(hex)),
        }
    }

    /// Number of pieces owned by a side
    pub fn count(&self, side: Side) -> usize {
        self.occupancy
            .iter()
            .filter(|&&o| o == Some(side))
            .count()
    }

    /// True iff every valid, non-blocked cell holds a piece
    pub fn is_full(&self) -> bool {
        self.grid.cells().all(|h| self.get(h).is_some())
    }

    /// All pieces in ascending (q, r) cell order
    pub fn pieces(&self) -> impl Iterator<Item = (Hex, Side)> + '_ {
        self.occupancy
            .iter()
            .enumerate()
            .filter_map(|(i, &o)| o.map(|side| (self.grid.cell_at(i), side)))
    }

    fn valid_slot(&self, hex: Hex) -> Result<usize, GameError> {
        match self.grid.index_of(hex) {
            Some(i) if !self.grid.is_blocked(hex) => Ok(i),
            _ => Err(GameError::InvalidCell(hex)),
        }
    }
}
