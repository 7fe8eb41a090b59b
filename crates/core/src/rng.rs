//! RNG module - bag randomizer over a piece catalog
//!
//! Implements the "bag" randomization used in modern falling-block games,
//! generalized to any catalog size: each bag holds every catalog index once,
//! shuffled, and is drawn until empty before a new bag is made.
//!
//! Also provides a simple LCG so a seed reproduces the whole sequence,
//! including the optional random spawn rotation.

use log::trace;

use crate::piece::{Piece, PieceError};
use crate::pieces::PieceDef;
use crate::types::GridPos;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // High bits: the low bits of a power-of-two LCG have short periods.
        (self.next_u32() >> 16) % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Bag-randomized piece spawner over a catalog of definitions.
#[derive(Debug, Clone)]
pub struct Spawner {
    defs: Vec<PieceDef>,
    /// Current bag of catalog indices
    bag: Vec<usize>,
    /// Index into current bag
    bag_index: usize,
    rng: SimpleRng,
    random_rotation: bool,
}

impl Spawner {
    /// Create a spawner; the catalog must not be empty.
    pub fn new(seed: u32, defs: Vec<PieceDef>) -> Result<Self, PieceError> {
        if defs.is_empty() {
            return Err(PieceError::EmptyCatalog);
        }
        let mut spawner = Self {
            bag: Vec::with_capacity(defs.len()),
            defs,
            bag_index: 0,
            rng: SimpleRng::new(seed),
            random_rotation: false,
        };
        spawner.refill_bag();
        Ok(spawner)
    }

    /// Spawn pieces in a random rotation instead of rotation 0.
    pub fn with_random_rotation(mut self, enabled: bool) -> Self {
        self.random_rotation = enabled;
        self
    }

    pub fn catalog(&self) -> &[PieceDef] {
        &self.defs
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag.clear();
        self.bag.extend(0..self.defs.len());
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Peek at the next definition without consuming it.
    pub fn peek(&self) -> &PieceDef {
        if let Some(&i) = self.bag.get(self.bag_index) {
            return &self.defs[i];
        }

        // Preview the next bag with a copy of the RNG so the later refill
        // produces the same order.
        let mut preview_rng = self.rng.clone();
        let mut next_bag: Vec<usize> = (0..self.defs.len()).collect();
        preview_rng.shuffle(&mut next_bag);
        &self.defs[next_bag[0]]
    }

    fn draw_index(&mut self) -> usize {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        let i = self.bag[self.bag_index];
        self.bag_index += 1;
        i
    }

    /// Draw the next definition from the bag.
    pub fn next_def(&mut self) -> &PieceDef {
        let i = self.draw_index();
        &self.defs[i]
    }

    /// Draw the next definition and create its piece at `position`.
    pub fn spawn(&mut self, position: GridPos) -> Result<Piece, PieceError> {
        let i = self.draw_index();
        let rotation = if self.random_rotation {
            self.rng.next_range(self.defs[i].rotation_count() as u32) as usize
        } else {
            0
        };
        let def = &self.defs[i];
        trace!("spawning {} in rotation {}", def.name, rotation);
        def.spawn_rotated(position, rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::standard_pieces;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_next_range_zero_is_zero() {
        let mut rng = SimpleRng::new(7);
        assert_eq!(rng.next_range(0), 0);
        for _ in 0..50 {
            assert!(rng.next_range(3) < 3);
        }
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            Spawner::new(1, Vec::new()),
            Err(PieceError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_bag_draws_every_piece_once() {
        let mut spawner = Spawner::new(1, standard_pieces()).unwrap();

        let mut drawn: Vec<String> = (0..7).map(|_| spawner.next_def().name.clone()).collect();
        drawn.sort();
        assert_eq!(drawn, vec!["I", "J", "L", "O", "S", "T", "Z"]);
    }

    #[test]
    fn test_peek_matches_next_across_bags() {
        let mut spawner = Spawner::new(3, standard_pieces()).unwrap();
        for _ in 0..20 {
            let peeked = spawner.peek().name.clone();
            let drawn = spawner.next_def().name.clone();
            assert_eq!(peeked, drawn);
        }
    }

    #[test]
    fn test_spawn_rotation_defaults_to_zero() {
        let mut spawner = Spawner::new(9, standard_pieces()).unwrap();
        for _ in 0..14 {
            let piece = spawner.spawn(GridPos::new(4, 0)).unwrap();
            assert_eq!(piece.current_rotation(), 0);
        }
    }

    #[test]
    fn test_random_rotation_stays_in_range() {
        let mut spawner = Spawner::new(9, standard_pieces())
            .unwrap()
            .with_random_rotation(true);
        for _ in 0..28 {
            let piece = spawner.spawn(GridPos::new(4, 0)).unwrap();
            assert!(piece.current_rotation() < piece.rotation_count());
        }
    }
}
