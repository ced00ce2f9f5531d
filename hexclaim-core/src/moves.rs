//! Move generation and execution

use crate::board::{Board, Side};
use crate::error::GameError;
use crate::grid::Hex;
use serde::{Deserialize, Serialize};

/// How a move reaches its destination
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Distance-1: spawn a new piece, origin stays
    Propagate,
    /// Distance-2: the origin piece jumps, vacating its cell
    Relocate,
}

/// A move descriptor. This is the only payload a transport needs to carry to
/// replicate a move on a remote engine copy; `apply_move` re-validates it in
/// full so replay never trusts the sender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Hex,
    pub to: Hex,
    pub kind: MoveKind,
}

impl Board {
    /// Legal moves for the piece at `from`: every valid, non-blocked, empty
    /// cell within distance 2, in ascending (q, r) order so downstream
    /// tie-breaking is reproducible.
    pub fn legal_moves_for(&self, from: Hex) -> Result<Vec<Move>, GameError> {
        if !self.grid().is_valid(from) {
            return Err(GameError::InvalidCell(from));
        }
        if self.get(from).is_none() {
            return Err(GameError::EmptyCell(from));
        }

        let mut moves = Vec::new();
        self.collect_moves_from(from, &mut moves);
        Ok(moves)
    }

    /// Union of legal moves over every piece the side owns, piece cells in
    /// ascending (q, r) order
    pub fn all_legal_moves(&self, side: Side) -> Vec<Move> {
        let mut moves = Vec::new();
        let origins: Vec<Hex> = self
            .pieces()
            .filter(|&(_, s)| s == side)
            .map(|(h, _)| h)
            .collect();
        for from in origins {
            self.collect_moves_from(from, &mut moves);
        }
        moves
    }

    /// Mobility test without materializing the move list (stalemate checks)
    pub fn has_any_legal_move(&self, side: Side) -> bool {
        self.pieces()
            .filter(|&(_, s)| s == side)
            .any(|(from, _)| {
                self.grid()
                    .cells_within(from, 2)
                    .any(|to| to != from && self.get(to).is_none())
            })
    }

    /// Apply a move for `side`: placement, origin removal for relocates, then
    /// the conversion pass. The move and its conversions are one transaction;
    /// a rejected move leaves the board untouched.
    ///
    /// Moves may arrive from a remote peer, so membership in the generated
    /// legal set is re-checked here rather than trusted.
    pub fn apply_move(&mut self, mv: Move, side: Side) -> Result<(), GameError> {
        if self.get(mv.from) != Some(side) {
            return Err(GameError::IllegalMove {
                from: mv.from,
                to: mv.to,
            });
        }

        let mut legal = Vec::new();
        self.collect_moves_from(mv.from, &mut legal);
        if !legal.contains(&mv) {
            return Err(GameError::IllegalMove {
                from: mv.from,
                to: mv.to,
            });
        }

        // Validation passed: from here on nothing can fail, so the
        // transaction cannot be observed half-applied.
        if mv.kind == MoveKind::Relocate {
            self.remove(mv.from)?;
        }
        self.place(mv.to, side)?;

        // Conversion runs from the new location, after placement
        let enemy = side.opponent();
        for neighbor in mv.to.neighbors() {
            if self.get(neighbor) == Some(enemy) {
                self.reassign(neighbor, side)?;
            }
        }

        Ok(())
    }

    fn collect_moves_from(&self, from: Hex, out: &mut Vec<Move>) {
        for to in self.grid().cells_within(from, 2) {
            if to == from || self.get(to).is_some() {
                continue;
            }
            let kind = match from.distance_to(to) {
                1 => MoveKind::Propagate,
                _ => MoveKind::Relocate,
            };
            out.push(Move { from, to, kind });
        }
    }
}
