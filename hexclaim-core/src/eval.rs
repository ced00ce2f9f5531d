//! Position evaluation for the heuristic AI

use crate::board::{Board, Side};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Heuristic weights for move scoring
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Weights {
    /// Own minus enemy piece count after the move resolves
    pub piece_diff: f32,
    /// Penalty per legal move left to the opponent
    pub opp_mobility: f32,
    /// Penalty on the average distance of own pieces from the center
    pub center_control: f32,
    /// Penalty per own-piece/enemy-neighbor adjacency
    pub risk: f32,
    /// Uniform(-0.5, 0.5) noise scale for variety
    pub jitter: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Difficulty::Normal.weights()
    }
}

/// Named weight profiles. Aggression (piece differential, opponent mobility
/// denial, center control) rises with difficulty while risk tolerance and
/// jitter shrink; the search itself never changes shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn weights(self) -> Weights {
        match self {
            Difficulty::Normal => Weights {
                piece_diff: 4.0,
                opp_mobility: 2.5,
                center_control: 1.2,
                risk: 1.5,
                jitter: 0.3,
            },
            Difficulty::Hard => Weights {
                piece_diff: 5.0,
                opp_mobility: 3.25,
                center_control: 1.6,
                risk: 1.0,
                jitter: 0.15,
            },
            Difficulty::Expert => Weights {
                piece_diff: 6.0,
                opp_mobility: 4.0,
                center_control: 2.0,
                risk: 0.6,
                jitter: 0.05,
            },
        }
    }

    /// Starting-piece multiplier granted to the AI side at this difficulty
    pub fn handicap_multiplier(self) -> u8 {
        match self {
            Difficulty::Normal | Difficulty::Hard => 1,
            Difficulty::Expert => 2,
        }
    }
}

/// Scalar score of a position from `side`'s perspective. Higher is better.
pub fn score_position<R: Rng>(board: &Board, side: Side, weights: &Weights, rng: &mut R) -> f32 {
    let enemy = side.opponent();

    let own = board.count(side) as f32;
    let opp = board.count(enemy) as f32;

    let opp_moves = board.all_legal_moves(enemy).len() as f32;

    let mut dist_sum = 0.0f32;
    let mut exposure = 0usize;
    for (hex, s) in board.pieces() {
        if s != side {
            continue;
        }
        dist_sum += hex.distance_to_center() as f32;
        exposure += hex
            .neighbors()
            .filter(|&n| board.get(n) == Some(enemy))
            .count();
    }
    let avg_dist = if own > 0.0 { dist_sum / own } else { 0.0 };

    weights.piece_diff * (own - opp)
        - weights.opp_mobility * opp_moves
        - weights.center_control * avg_dist
        - weights.risk * exposure as f32
        + weights.jitter * (rng.gen::<f32>() - 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Hex};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(1)
    }

    #[test]
    fn test_profiles_monotonic() {
        let n = Difficulty::Normal.weights();
        let h = Difficulty::Hard.weights();
        let e = Difficulty::Expert.weights();

        assert!(n.piece_diff < h.piece_diff && h.piece_diff < e.piece_diff);
        assert!(n.opp_mobility < h.opp_mobility && h.opp_mobility < e.opp_mobility);
        assert!(n.center_control < h.center_control && h.center_control < e.center_control);
        assert!(n.risk > h.risk && h.risk > e.risk);
        assert!(n.jitter > h.jitter && h.jitter > e.jitter);
    }

    #[test]
    fn test_material_advantage_scores_higher() {
        let mut even = Board::new(Grid::new(3));
        even.place(Hex::new(-3, 0), Side::Red).unwrap();
        even.place(Hex::new(3, 0), Side::Blue).unwrap();

        let mut ahead = even.clone();
        ahead.place(Hex::new(-2, 0), Side::Red).unwrap();

        let weights = Weights {
            jitter: 0.0,
            ..Difficulty::Normal.weights()
        };
        let s_even = score_position(&even, Side::Red, &weights, &mut rng());
        let s_ahead = score_position(&ahead, Side::Red, &weights, &mut rng());
        assert!(s_ahead > s_even);
    }

    #[test]
    fn test_exposure_penalized() {
        let weights = Weights {
            piece_diff: 0.0,
            opp_mobility: 0.0,
            center_control: 0.0,
            risk: 1.0,
            jitter: 0.0,
        };

        let mut safe = Board::new(Grid::new(3));
        safe.place(Hex::new(-3, 0), Side::Red).unwrap();
        safe.place(Hex::new(3, 0), Side::Blue).unwrap();

        let mut contact = Board::new(Grid::new(3));
        contact.place(Hex::new(0, 0), Side::Red).unwrap();
        contact.place(Hex::new(1, 0), Side::Blue).unwrap();

        let s_safe = score_position(&safe, Side::Red, &weights, &mut rng());
        let s_contact = score_position(&contact, Side::Red, &weights, &mut rng());
        assert!(s_safe > s_contact);
    }

    #[test]
    fn test_zero_jitter_is_deterministic() {
        let mut b = Board::new(Grid::new(2));
        b.place(Hex::new(0, 0), Side::Red).unwrap();
        b.place(Hex::new(2, 0), Side::Blue).unwrap();
        let weights = Weights {
            jitter: 0.0,
            ..Difficulty::Expert.weights()
        };
        let a = score_position(&b, Side::Red, &weights, &mut rng());
        let c = score_position(&b, Side::Red, &weights, &mut ChaCha8Rng::seed_from_u64(999));
        assert_eq!(a, c);
    }
}
