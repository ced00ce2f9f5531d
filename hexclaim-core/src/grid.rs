//! Hex board geometry with axial coordinates

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i8,
    pub r: i8,
}

impl Hex {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Distance from center (0,0)
    pub fn distance_to_center(&self) -> i8 {
        (self.q.abs() + self.r.abs() + (self.q + self.r).abs()) / 2
    }

    /// Cube-coordinate distance between two hexes
    pub fn distance_to(&self, other: Hex) -> i8 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = ((self.q + self.r) - (other.q + other.r)).abs();
        (dq + dr + ds) / 2
    }

    /// The six adjacent hexes (not validity-checked)
    pub fn neighbors(self) -> impl Iterator<Item = Hex> {
        DIRECTIONS
            .iter()
            .map(move |&(dq, dr)| Hex::new(self.q + dq, self.r + dr))
    }
}

/// Direction vectors in axial coordinates (dq, dr)
pub const DIRECTIONS: [(i8, i8); 6] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, -1),
    (-1, 1),
];

/// The six corner cells of a board of the given radius.
///
/// First three belong to the first-configured side's start, last three to the
/// other; initial placement and blocked-layout generation both rely on these.
pub fn corner_cells(radius: i8) -> [Hex; 6] {
    [
        Hex::new(-radius, 0),
        Hex::new(0, -radius),
        Hex::new(-radius, radius),
        Hex::new(radius, 0),
        Hex::new(0, radius),
        Hex::new(radius, -radius),
    ]
}

/// Cells reserved for starting pieces: each corner plus the inward path a
/// handicap multiplier may step along (up to `radius - 1` steps).
pub(crate) fn seed_cells(radius: i8) -> Vec<Hex> {
    let mut cells = Vec::new();
    for corner in corner_cells(radius) {
        for step in 0..radius {
            cells.push(Hex::new(
                corner.q - corner.q.signum() * step,
                corner.r - corner.r.signum() * step,
            ));
        }
    }
    cells
}

/// Hexagonal board layout: radius, valid-cell set, and blocked cells.
///
/// Cells are stored in ascending (q, r) order; the index map gives each
/// in-radius cell a stable arena slot shared with `Board` occupancy.
#[derive(Clone, Debug)]
pub struct Grid {
    radius: i8,
    cells: Vec<Hex>,
    index: FxHashMap<Hex, usize>,
    blocked: Vec<bool>,
}

impl Grid {
    /// Open board of the given radius (no blocked cells). Radius must be in
    /// 1..=60; larger boards would overflow the i8 coordinate arithmetic.
    pub fn new(radius: i8) -> Self {
        assert!(
            (1..=60).contains(&radius),
            "board radius must be between 1 and 60"
        );

        let mut cells = Vec::new();
        for q in -radius..=radius {
            for r in -radius..=radius {
                if (q + r).abs() <= radius {
                    cells.push(Hex::new(q, r));
                }
            }
        }

        let index = cells.iter().enumerate().map(|(i, &h)| (h, i)).collect();
        let blocked = vec![false; cells.len()];

        Self {
            radius,
            cells,
            index,
            blocked,
        }
    }

    /// Board with `count` blocked cells chosen deterministically from `seed`.
    ///
    /// Two engine instances given the same (radius, seed, count) converge on
    /// an identical layout, which is how networked peers sync boards without
    /// shipping the cell list. Corner cells and their inward handicap paths
    /// are never blocked so initial placement always has somewhere to go, at
    /// any multiplier.
    pub fn with_blocked_cells(radius: i8, seed: u64, count: usize) -> Self {
        let mut grid = Self::new(radius);
        let exempt = seed_cells(radius);

        let candidates: Vec<usize> = grid
            .cells
            .iter()
            .enumerate()
            .filter(|(_, h)| !exempt.contains(h))
            .map(|(i, _)| i)
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for &i in candidates.choose_multiple(&mut rng, count.min(candidates.len())) {
            grid.blocked[i] = true;
        }

        grid
    }

    /// Board with an explicit blocked layout (hosts with fixed maps, tests)
    pub fn with_blocked(radius: i8, blocked: &[Hex]) -> Self {
        let mut grid = Self::new(radius);
        for hex in blocked {
            if let Some(i) = grid.index.get(hex) {
                grid.blocked[*i] = true;
            }
        }
        grid
    }

    pub fn radius(&self) -> i8 {
        self.radius
    }

    /// True iff the hex is within radius and not blocked
    pub fn is_valid(&self, hex: Hex) -> bool {
        match self.index.get(&hex) {
            Some(&i) => !self.blocked[i],
            None => false,
        }
    }

    pub fn is_blocked(&self, hex: Hex) -> bool {
        self.index
            .get(&hex)
            .map(|&i| self.blocked[i])
            .unwrap_or(false)
    }

    /// Arena slot for an in-radius hex (blocked cells keep their slot)
    pub(crate) fn index_of(&self, hex: Hex) -> Option<usize> {
        self.index.get(&hex).copied()
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn cell_at(&self, slot: usize) -> Hex {
        self.cells[slot]
    }

    /// All valid (non-blocked) cells in ascending (q, r) order
    pub fn cells(&self) -> impl Iterator<Item = Hex> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(i, _)| !self.blocked[i])
            .map(|(_, &h)| h)
    }

    /// Number of valid cells
    pub fn cell_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| !b).count()
    }

    /// Valid cells at distance <= k from center, ascending (q, r), center included
    pub fn cells_within(&self, center: Hex, k: i8) -> impl Iterator<Item = Hex> + '_ {
        (-k..=k)
            .flat_map(move |dq| (-k..=k).map(move |dr| Hex::new(center.q + dq, center.r + dr)))
            .filter(move |&h| center.distance_to(h) <= k && self.is_valid(h))
    }
}
