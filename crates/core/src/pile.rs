//! Pile module - the multiset of tiles dealt onto a map
//!
//! The pile is kept as a sequence of pairs. Each pair is assigned to two positions
//! that the generator removes together, so every pair must satisfy [`fits`].

use std::fmt;

use crate::rng::RandomSource;
use crate::rules::fits;
use crate::types::{Category, Tile, PILE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PileError {
    /// Pair `index` does not satisfy the matching rule.
    UnmatchedPair { index: usize, first: Tile, second: Tile },
}

impl fmt::Display for PileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileError::UnmatchedPair {
                index,
                first,
                second,
            } => write!(
                f,
                "pile pair {index} does not match: {:#04x} / {:#04x}",
                first.raw(),
                second.raw()
            ),
        }
    }
}

impl std::error::Error for PileError {}

/// Ordered pairs of tile values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pile {
    pairs: Vec<[Tile; 2]>,
}

impl Pile {
    /// The standard 144-tile pile in canonical order
    ///
    /// ```
    /// use tui_mahjong_core::Pile;
    ///
    /// let pile = Pile::standard();
    /// assert_eq!(pile.len(), 144);
    /// assert_eq!(pile.pairs().len(), 72);
    /// ```
    pub fn standard() -> Self {
        let mut tiles = Vec::with_capacity(PILE_SIZE);

        // Simples
        for rank in 1..=9 {
            for category in [Category::Character, Category::Dots, Category::Bamboo] {
                for _ in 0..4 {
                    tiles.push(Tile::new(category, rank));
                }
            }
        }
        // Honors
        for rank in 1..=4 {
            for _ in 0..4 {
                tiles.push(Tile::new(Category::Winds, rank));
            }
        }
        for rank in 1..=3 {
            for _ in 0..4 {
                tiles.push(Tile::new(Category::Dragons, rank));
            }
        }
        // Bonus
        for rank in 1..=4 {
            tiles.push(Tile::new(Category::Seasons, rank));
        }
        for rank in 1..=4 {
            tiles.push(Tile::new(Category::Flowers, rank));
        }

        let pairs = tiles.chunks_exact(2).map(|c| [c[0], c[1]]).collect();
        Self { pairs }
    }

    /// Build a pile from explicit pairs; every pair must match
    pub fn from_pairs(pairs: Vec<[Tile; 2]>) -> Result<Self, PileError> {
        for (index, &[first, second]) in pairs.iter().enumerate() {
            if !fits(first, second) {
                return Err(PileError::UnmatchedPair {
                    index,
                    first,
                    second,
                });
            }
        }
        Ok(Self { pairs })
    }

    /// Number of tiles (twice the number of pairs)
    pub fn len(&self) -> usize {
        self.pairs.len() * 2
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[[Tile; 2]] {
        &self.pairs
    }

    /// Tiles in pile order
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.pairs.iter().flat_map(|pair| pair.iter().copied())
    }

    /// Shuffle seasons among themselves, flowers among themselves, then the pairs.
    ///
    /// Pair membership is preserved by the last step, so consecutive tiles stay a
    /// matching pair.
    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        for category in [Category::Seasons, Category::Flowers] {
            self.shuffle_category(category, rng);
        }
        rng.shuffle(&mut self.pairs);
    }

    pub fn shuffled<R: RandomSource>(mut self, rng: &mut R) -> Self {
        self.shuffle(rng);
        self
    }

    fn shuffle_category<R: RandomSource>(&mut self, category: Category, rng: &mut R) {
        let slots: Vec<(usize, usize)> = self
            .pairs
            .iter()
            .enumerate()
            .flat_map(|(i, pair)| {
                pair.iter()
                    .enumerate()
                    .filter(move |(_, tile)| tile.category() == Some(category))
                    .map(move |(j, _)| (i, j))
            })
            .collect();

        let mut tiles: Vec<Tile> = slots.iter().map(|&(i, j)| self.pairs[i][j]).collect();
        rng.shuffle(&mut tiles);
        for (&(i, j), tile) in slots.iter().zip(tiles) {
            self.pairs[i][j] = tile;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use std::collections::HashMap;

    fn histogram(pile: &Pile) -> HashMap<Tile, usize> {
        let mut counts = HashMap::new();
        for tile in pile.tiles() {
            *counts.entry(tile).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn standard_pile_composition() {
        let pile = Pile::standard();
        assert_eq!(pile.len(), PILE_SIZE);

        let counts = histogram(&pile);
        for category in [Category::Character, Category::Dots, Category::Bamboo] {
            for rank in 1..=9 {
                assert_eq!(counts[&Tile::new(category, rank)], 4);
            }
        }
        for rank in 1..=4 {
            assert_eq!(counts[&Tile::new(Category::Winds, rank)], 4);
            assert_eq!(counts[&Tile::new(Category::Seasons, rank)], 1);
            assert_eq!(counts[&Tile::new(Category::Flowers, rank)], 1);
        }
        for rank in 1..=3 {
            assert_eq!(counts[&Tile::new(Category::Dragons, rank)], 4);
        }
        assert_eq!(counts.values().sum::<usize>(), 144);
    }

    #[test]
    fn standard_pairs_all_match() {
        assert!(Pile::from_pairs(Pile::standard().pairs().to_vec()).is_ok());
    }

    #[test]
    fn shuffle_keeps_composition_and_pair_matching() {
        let before = histogram(&Pile::standard());
        let mut rng = SimpleRng::new(31337);
        for _ in 0..20 {
            let pile = Pile::standard().shuffled(&mut rng);
            assert_eq!(histogram(&pile), before);
            for pair in pile.pairs() {
                assert!(fits(pair[0], pair[1]), "{:?}", pair);
            }
        }
    }

    #[test]
    fn shuffle_changes_order() {
        let mut rng = SimpleRng::new(5);
        let shuffled = Pile::standard().shuffled(&mut rng);
        assert_ne!(shuffled, Pile::standard());
    }

    #[test]
    fn from_pairs_rejects_mismatch() {
        let err = Pile::from_pairs(vec![
            [Tile::new(Category::Dots, 1), Tile::new(Category::Dots, 1)],
            [Tile::new(Category::Dots, 1), Tile::new(Category::Dots, 2)],
        ])
        .unwrap_err();
        assert!(matches!(err, PileError::UnmatchedPair { index: 1, .. }));
    }
}
