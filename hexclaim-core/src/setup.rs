//! Initial piece placement

use crate::board::{Board, Side};
use crate::error::GameError;
use crate::grid::{corner_cells, Grid, Hex};

/// Starting cells for a side: three alternating corners, plus `multiplier - 1`
/// extra pieces per corner stepped toward the center (difficulty handicap for
/// a stronger opponent). Pure function of its inputs; the match controller
/// never learns how pieces were seeded.
pub fn initial_placement(side: Side, radius: i8, multiplier: u8) -> Vec<Hex> {
    let corners = corner_cells(radius);
    let own: &[Hex] = match side {
        Side::Red => &corners[..3],
        Side::Blue => &corners[3..],
    };

    let mut cells: Vec<Hex> = own.to_vec();

    // Extra handicap pieces walk inward so the two sides never collide
    let extras = i8::try_from(multiplier.saturating_sub(1))
        .unwrap_or(i8::MAX)
        .min(radius - 1);
    for step in 1..=extras {
        for &corner in own {
            cells.push(Hex::new(
                corner.q - corner.q.signum() * step,
                corner.r - corner.r.signum() * step,
            ));
        }
    }

    cells
}

impl Board {
    /// Board seeded with both sides' starting pieces
    pub fn with_initial_pieces(
        grid: Grid,
        red_multiplier: u8,
        blue_multiplier: u8,
    ) -> Result<Self, GameError> {
        let radius = grid.radius();
        let mut board = Board::new(grid);
        for (side, multiplier) in [(Side::Red, red_multiplier), (Side::Blue, blue_multiplier)] {
            for hex in initial_placement(side, radius, multiplier) {
                board.place(hex, side)?;
            }
        }
        Ok(board)
    }
}
