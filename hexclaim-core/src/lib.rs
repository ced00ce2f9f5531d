//! HEXCLAIM Core - Rule engine and heuristic AI
//!
//! This crate provides the core game logic for HEXCLAIM, a two-player
//! territory-conquest game on a hexagonal grid:
//! - Board geometry (hex grid with axial coordinates, blocked cells)
//! - Board state with arena-style occupancy for cheap AI cloning
//! - Move generation (distance-1 propagate, distance-2 relocate)
//! - Move execution with the adjacency conversion pass
//! - Match state machine (turns, skip, forfeit, termination)
//! - One-ply heuristic AI with difficulty weight profiles
//!
//! Rendering, input handling, persistence, and transport are host concerns;
//! the engine exposes only data (snapshots, move descriptors, outcomes).

pub mod ai;
pub mod board;
pub mod error;
pub mod eval;
pub mod game;
pub mod grid;
pub mod moves;
pub mod setup;

// Re-exports for convenient access
pub use ai::HeuristicAi;
pub use board::{Board, Side};
pub use error::GameError;
pub use eval::{score_position, Difficulty, Weights};
pub use game::{EndReason, Match, Outcome, Participant, Placement, Snapshot, Status};
pub use grid::{corner_cells, Grid, Hex, DIRECTIONS};
pub use moves::{Move, MoveKind};
pub use setup::initial_placement;
