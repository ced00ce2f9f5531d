//! Integration tests for the HEXCLAIM engine
//!
//! Tests the full stack the way a host would drive it: complete AI self-play
//! games, transport-style move replication, and peer resynchronization.

use hexclaim_core::{
    Board, Difficulty, EndReason, Grid, Hex, HeuristicAi, Match, Move, Participant, Side,
    Snapshot, Status,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Standard two-AI match on an open board
fn two_ai_match(radius: i8, first: Side) -> Match {
    let board = Board::with_initial_pieces(Grid::new(radius), 1, 1).expect("seeding failed");
    Match::new(board, first, Participant::Ai, Participant::Ai)
}

/// Drive a match with two AIs until it ends (or a safety cap trips).
/// Returns the move history in play order.
fn drive_to_completion(game: &mut Match, red_seed: u64, blue_seed: u64) -> Vec<Move> {
    let mut red = HeuristicAi::from_difficulty(Difficulty::Normal, red_seed);
    let mut blue = HeuristicAi::from_difficulty(Difficulty::Hard, blue_seed);
    let mut history = Vec::new();
    let cap = game.board().grid().cell_count() * 4;
    let mut passes = 0;

    while !game.is_over() && history.len() + passes < cap {
        let ai = match game.current_side() {
            Side::Red => &mut red,
            Side::Blue => &mut blue,
        };
        match game.take_ai_turn(ai).expect("ai turn failed") {
            Some(mv) => history.push(mv),
            None => passes += 1,
        }
    }
    history
}

// ============================================================================
// FULL GAMES
// ============================================================================

#[test]
fn test_self_play_game_reaches_verdict() {
    let mut game = two_ai_match(3, Side::Red);
    let history = drive_to_completion(&mut game, 1, 2);

    assert!(!history.is_empty());
    if game.is_over() {
        let outcome = game.outcome();
        assert!(outcome.ended);
        assert!(outcome.reason.is_some());

        // winner consistent with final piece counts
        let red = game.board().count(Side::Red);
        let blue = game.board().count(Side::Blue);
        match outcome.winner {
            Some(Side::Red) => assert!(red > blue),
            Some(Side::Blue) => assert!(blue > red),
            None => {
                if outcome.reason != Some(EndReason::Forfeit) {
                    assert_eq!(red, blue);
                }
            }
        }
    }
}

#[test]
fn test_self_play_on_blocked_board() {
    let grid = Grid::with_blocked_cells(3, 77, 6);
    let board = Board::with_initial_pieces(grid, 1, 1).expect("seeding failed");
    let mut game = Match::new(board, Side::Red, Participant::Ai, Participant::Ai);
    let history = drive_to_completion(&mut game, 5, 6);

    assert!(!history.is_empty());
    // no move ever lands on a blocked cell
    for mv in &history {
        assert!(Grid::with_blocked_cells(3, 77, 6).is_valid(mv.to));
    }
}

#[test]
fn test_handicapped_expert_start() {
    let board = Board::with_initial_pieces(
        Grid::new(4),
        1,
        Difficulty::Expert.handicap_multiplier(),
    )
    .expect("seeding failed");
    assert_eq!(board.count(Side::Red), 3);
    assert_eq!(board.count(Side::Blue), 6);
}

// ============================================================================
// TRANSPORT-STYLE REPLICATION
// ============================================================================

#[test]
fn test_move_replay_is_deterministic() {
    // Engine A plays a full game; a remote peer applies the same move
    // descriptors (through a serialization round-trip, as a transport would)
    // and must land on an identical state.
    let mut host = two_ai_match(3, Side::Red);
    let history = drive_to_completion(&mut host, 10, 11);

    let mut peer = two_ai_match(3, Side::Red);
    let mut idle = HeuristicAi::from_difficulty(Difficulty::Normal, 0);
    for mv in &history {
        // pass for sides the host passed for; an immobile AI turn is a pass
        while !peer.is_over() && !peer.board().has_any_legal_move(peer.current_side()) {
            peer.take_ai_turn(&mut idle).expect("pass failed");
        }
        let wire = serde_json::to_string(mv).expect("serialize move");
        let replayed: Move = serde_json::from_str(&wire).expect("deserialize move");
        peer.submit_move(replayed).expect("replay rejected a relayed move");
    }
    // trailing passes, e.g. a stalemate the host reached after its last move
    while host.is_over()
        && !peer.is_over()
        && !peer.board().has_any_legal_move(peer.current_side())
    {
        peer.take_ai_turn(&mut idle).expect("pass failed");
    }

    assert_eq!(peer.snapshot(), host.snapshot());
    assert_eq!(peer.status(), host.status());
    assert_eq!(peer.winner(), host.winner());
}

#[test]
fn test_forged_remote_move_rejected_and_resynced() {
    let mut host = two_ai_match(4, Side::Red);
    let before = host.snapshot();

    // a stale/forged descriptor from a peer: relocate onto its own piece
    let forged = Move {
        from: Hex::new(-4, 0),
        to: Hex::new(0, -4),
        kind: hexclaim_core::MoveKind::Relocate,
    };
    assert!(host.submit_move(forged).is_err());

    // host state is unchanged; the rejected peer resyncs from a snapshot
    assert_eq!(host.snapshot(), before);
    let mut peer = Match::new(
        Board::new(Grid::new(4)),
        Side::Red,
        Participant::Ai,
        Participant::Ai,
    );
    peer.load_snapshot(&before).expect("resync failed");
    assert_eq!(peer.snapshot(), before);
}

#[test]
fn test_peers_converge_on_seeded_board() {
    let mut a = two_ai_match(4, Side::Red);
    let mut b = two_ai_match(4, Side::Red);
    a.regenerate_board(0xC0FFEE, 10, 1, 1).expect("regen a");
    b.regenerate_board(0xC0FFEE, 10, 1, 1).expect("regen b");

    assert_eq!(a.snapshot(), b.snapshot());
    let cells_a: Vec<Hex> = a.board().grid().cells().collect();
    let cells_b: Vec<Hex> = b.board().grid().cells().collect();
    assert_eq!(cells_a, cells_b);
}

#[test]
fn test_snapshot_wire_roundtrip() {
    let mut game = two_ai_match(3, Side::Red);
    drive_to_completion(&mut game, 21, 22);

    let wire = serde_json::to_string(&game.snapshot()).expect("serialize snapshot");
    let back: Snapshot = serde_json::from_str(&wire).expect("deserialize snapshot");
    assert_eq!(back, game.snapshot());
}

#[test]
fn test_match_is_terminal_after_end() {
    let mut game = two_ai_match(2, Side::Red);
    let outcome = game.forfeit();
    assert_eq!(outcome.reason, Some(EndReason::Forfeit));
    assert_eq!(game.status(), Status::Ended(EndReason::Forfeit));

    let mut ai = HeuristicAi::from_difficulty(Difficulty::Normal, 1);
    assert!(game.take_ai_turn(&mut ai).is_err());
    assert!(game.skip_turn().is_err());
}
