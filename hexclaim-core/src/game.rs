//! Match state machine: turns, skip/forfeit, termination, host interfaces

use crate::ai::HeuristicAi;
use crate::board::{Board, Side};
use crate::error::GameError;
use crate::grid::{Grid, Hex};
use crate::moves::Move;
use serde::{Deserialize, Serialize};

/// Why a match ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    BoardFull,
    SideEliminated,
    Stalemate,
    Forfeit,
}

/// Match lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Ended(EndReason),
}

/// Who controls a side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Participant {
    Human,
    Ai,
}

/// One placed piece, as seen by renderers and transports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub cell: Hex,
    pub side: Side,
}

/// Authoritative state snapshot: everything a renderer needs to draw the
/// board and a transport needs to resynchronize a peer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub pieces: Vec<Placement>,
    pub current_side: Side,
}

/// Outcome notification surfaced after each submitted move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub ended: bool,
    pub reason: Option<EndReason>,
    pub winner: Option<Side>,
}

/// Turn/termination state machine. Owns the one authoritative `Board`;
/// everything else receives it explicitly. `submit_move` is the sole mutation
/// entry point for gameplay and must be called serially by the host.
#[derive(Clone, Debug)]
pub struct Match {
    board: Board,
    current: Side,
    status: Status,
    red_controller: Participant,
    blue_controller: Participant,
    winner: Option<Side>,
    moves_played: u32,
}

impl Match {
    /// Match with an explicit first mover (player 1 in multiplayer)
    pub fn new(board: Board, first: Side, red: Participant, blue: Participant) -> Self {
        Self {
            board,
            current: first,
            status: Status::InProgress,
            red_controller: red,
            blue_controller: blue,
            winner: None,
            moves_played: 0,
        }
    }

    /// Single-player match: the human side moves first
    pub fn single_player(board: Board, human: Side) -> Self {
        let (red, blue) = match human {
            Side::Red => (Participant::Human, Participant::Ai),
            Side::Blue => (Participant::Ai, Participant::Human),
        };
        Self::new(board, human, red, blue)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_side(&self) -> Side {
        self.current
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::InProgress
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    fn controller(&self, side: Side) -> Participant {
        match side {
            Side::Red => self.red_controller,
            Side::Blue => self.blue_controller,
        }
    }

    /// Apply the current side's move. An illegal move (stale or forged, e.g.
    /// from a remote peer) is rejected with the board untouched; the host may
    /// answer with `snapshot()` to resynchronize the sender.
    pub fn submit_move(&mut self, mv: Move) -> Result<Outcome, GameError> {
        if self.is_over() {
            return Err(GameError::MatchOver);
        }

        self.board.apply_move(mv, self.current)?;
        self.moves_played += 1;

        self.evaluate_termination();
        if !self.is_over() {
            self.current = self.current.opponent();
        }
        Ok(self.outcome())
    }

    /// Pass the turn without touching the board. A human side may always
    /// pass; an AI side only when it genuinely has no legal move.
    pub fn skip_turn(&mut self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::MatchOver);
        }
        if self.controller(self.current) == Participant::Ai
            && self.board.has_any_legal_move(self.current)
        {
            return Err(GameError::InvalidTransition(
                "an AI side may only skip when it has no legal move",
            ));
        }
        self.current = self.current.opponent();
        Ok(())
    }

    /// The current side concedes; the opponent wins immediately.
    pub fn forfeit(&mut self) -> Outcome {
        if !self.is_over() {
            self.status = Status::Ended(EndReason::Forfeit);
            self.winner = Some(self.current.opponent());
            tracing::info!(loser = ?self.current, "match forfeited");
        }
        self.outcome()
    }

    /// Drive one AI turn: decide, apply, or pass when the engine reports no
    /// move. A `None` decision is the expected immobility case, not an error.
    pub fn take_ai_turn(&mut self, ai: &mut HeuristicAi) -> Result<Option<Move>, GameError> {
        if self.is_over() {
            return Err(GameError::MatchOver);
        }

        match ai.decide_move(&self.board, self.current) {
            Some(mv) => {
                self.submit_move(mv)?;
                Ok(Some(mv))
            }
            None => {
                // Immobile: mutual immobility ends the match, otherwise the
                // turn passes to the side that can still act.
                self.evaluate_termination();
                if !self.is_over() {
                    self.current = self.current.opponent();
                }
                Ok(None)
            }
        }
    }

    /// Fixed precedence: elimination over board-full over stalemate. A board
    /// that is simultaneously full and one-sided reports `SideEliminated`.
    fn evaluate_termination(&mut self) {
        let red = self.board.count(Side::Red);
        let blue = self.board.count(Side::Blue);

        let reason = if red == 0 || blue == 0 {
            EndReason::SideEliminated
        } else if self.board.is_full() {
            EndReason::BoardFull
        } else if !self.board.has_any_legal_move(Side::Red)
            && !self.board.has_any_legal_move(Side::Blue)
        {
            // Mutual stalemate only; a single immobile side skips instead
            EndReason::Stalemate
        } else {
            return;
        };

        self.status = Status::Ended(reason);
        self.winner = if red > blue {
            Some(Side::Red)
        } else if blue > red {
            Some(Side::Blue)
        } else {
            None
        };
        tracing::info!(?reason, red, blue, winner = ?self.winner, "match ended");
    }

    pub fn outcome(&self) -> Outcome {
        Outcome {
            ended: self.is_over(),
            reason: match self.status {
                Status::Ended(reason) => Some(reason),
                Status::InProgress => None,
            },
            winner: self.winner,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pieces: self
                .board
                .pieces()
                .map(|(cell, side)| Placement { cell, side })
                .collect(),
            current_side: self.current,
        }
    }

    /// Replace the whole board state from an authoritative snapshot
    /// (reconnection). All-or-nothing: a snapshot that does not fit the grid
    /// leaves the match unchanged.
    pub fn load_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), GameError> {
        let mut board = Board::new(self.board.grid().clone());
        for placement in &snapshot.pieces {
            board.place(placement.cell, placement.side)?;
        }

        self.board = board;
        self.current = snapshot.current_side;
        self.status = Status::InProgress;
        self.winner = None;
        self.evaluate_termination();
        Ok(())
    }

    /// Deterministically regenerate the blocked-cell layout from a shared
    /// seed and re-seed starting pieces, so two peers converge on an
    /// identical board without transmitting the cell list. Only allowed
    /// before the first move; the valid-cell set is replaced atomically.
    pub fn regenerate_board(
        &mut self,
        seed: u64,
        blocked_cells: usize,
        red_multiplier: u8,
        blue_multiplier: u8,
    ) -> Result<(), GameError> {
        if self.moves_played > 0 {
            return Err(GameError::InvalidTransition(
                "board regeneration is only valid before the first move",
            ));
        }

        let grid = Grid::with_blocked_cells(self.board.grid().radius(), seed, blocked_cells);
        self.board = Board::with_initial_pieces(grid, red_multiplier, blue_multiplier)?;
        tracing::debug!(seed, blocked_cells, "board regenerated");
        Ok(())
    }
}
