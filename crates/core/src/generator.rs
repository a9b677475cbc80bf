//! Layout generator - reverse deal with backtracking
//!
//! The scratch board starts with a placeholder at every tile slot. The search
//! repeatedly removes a pair of currently selectable placeholders and recurses; on
//! the way back out of a successful branch the pair at depth `d` receives pile pair
//! `d`. Replaying the removal order from the first entry therefore plays the
//! generated board down to its blockers.
//!
//! A failed branch restores both placeholders before the next candidate is tried,
//! so the scratch board is bit-identical to its state before the branch.

use std::fmt;

use crate::board::Board;
use crate::exposure::selectable_positions;
use crate::map::Map;
use crate::pile::Pile;
use crate::rng::RandomSource;
use crate::types::{Position, Tile};

/// Default candidate-pair budget for one generation run.
pub const DEFAULT_MAX_STEPS: u64 = 2_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationError {
    /// Every candidate ordering was exhausted at the top level.
    NoSolvableLayout,
    /// The pile does not have one tile per map slot.
    PileMismatch { slots: usize, tiles: usize },
    /// The search tried more candidate pairs than allowed.
    StepLimitExceeded { limit: u64 },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::NoSolvableLayout => write!(f, "no solvable layout found"),
            GenerationError::PileMismatch { slots, tiles } => {
                write!(f, "pile has {tiles} tiles but the map has {slots} slots")
            }
            GenerationError::StepLimitExceeded { limit } => {
                write!(f, "generation gave up after {limit} candidate pairs")
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// Search bounds for [`generate_with_limits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorLimits {
    /// Maximum number of candidate pairs tried; `None` means unbounded.
    pub max_steps: Option<u64>,
}

impl GeneratorLimits {
    pub const fn unlimited() -> Self {
        Self { max_steps: None }
    }

    pub const fn steps(max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
        }
    }
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        Self::steps(DEFAULT_MAX_STEPS)
    }
}

/// A generated board plus the removal order that clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub board: Board,
    /// Matched pairs in play order; entry 0 is removable on the fresh board.
    pub removal_order: Vec<[Position; 2]>,
}

/// Deal `pile` onto `map` with the default limits.
///
/// ```
/// use tui_mahjong_core::types::{Category, Position, Tile};
/// use tui_mahjong_core::{fits, generate, FixedOrder, Map, Pile};
///
/// let a = Position::new(0, 0, 0);
/// let b = Position::new(0, 4, 0);
/// let map = Map::new("pair", 3, 6, vec![a, b], vec![]).unwrap();
/// let one = Tile::new(Category::Character, 1);
/// let pile = Pile::from_pairs(vec![[one, one]]).unwrap();
///
/// let deal = generate(&map, &pile, &mut FixedOrder).unwrap();
/// assert!(fits(deal.board.get(a), deal.board.get(b)));
/// assert_eq!(deal.board.tile_count(), 2);
/// ```
pub fn generate<R: RandomSource>(
    map: &Map,
    pile: &Pile,
    rng: &mut R,
) -> Result<Deal, GenerationError> {
    generate_with_limits(map, pile, rng, GeneratorLimits::default())
}

/// Deal `pile` onto `map`, bounding the search by `limits`.
pub fn generate_with_limits<R: RandomSource>(
    map: &Map,
    pile: &Pile,
    rng: &mut R,
    limits: GeneratorLimits,
) -> Result<Deal, GenerationError> {
    if pile.len() != map.slots().len() {
        return Err(GenerationError::PileMismatch {
            slots: map.slots().len(),
            tiles: pile.len(),
        });
    }

    let mut scratch = Board::with_dimensions(map.rows(), map.cols());
    for &pos in map.slots() {
        scratch.set(pos, Tile::PLACEHOLDER);
    }
    for &pos in map.blockers() {
        scratch.set(pos, Tile::BLOCKER);
    }

    let mut search = Search {
        scratch,
        result: Board::with_dimensions(map.rows(), map.cols()),
        pairs: pile.pairs(),
        order: Vec::with_capacity(pile.pairs().len()),
        steps: 0,
        limit: limits.max_steps,
        rng,
    };

    if !search.colorize(0)? {
        return Err(GenerationError::NoSolvableLayout);
    }

    let mut board = search.result;
    for &pos in map.blockers() {
        board.set(pos, Tile::BLOCKER);
    }
    board.set_tile_count(pile.len() + map.blockers().len());

    Ok(Deal {
        board,
        removal_order: search.order,
    })
}

struct Search<'a, R> {
    scratch: Board,
    result: Board,
    pairs: &'a [[Tile; 2]],
    order: Vec<[Position; 2]>,
    steps: u64,
    limit: Option<u64>,
    rng: &'a mut R,
}

impl<R: RandomSource> Search<'_, R> {
    fn step(&mut self) -> Result<(), GenerationError> {
        self.steps += 1;
        match self.limit {
            Some(limit) if self.steps > limit => Err(GenerationError::StepLimitExceeded { limit }),
            _ => Ok(()),
        }
    }

    /// Assign pile pairs `depth..` to the remaining placeholders.
    fn colorize(&mut self, depth: usize) -> Result<bool, GenerationError> {
        let mut candidates = selectable_positions(&self.scratch);
        if candidates.len() < 2 {
            return Ok(false);
        }
        self.rng.shuffle(&mut candidates);
        let pair = self.pairs[depth];

        if depth + 1 == self.pairs.len() {
            self.step()?;
            let (a, b) = (candidates[0], candidates[1]);
            self.scratch.set(a, Tile::EMPTY);
            self.scratch.set(b, Tile::EMPTY);
            self.result.set(a, pair[0]);
            self.result.set(b, pair[1]);
            self.order.push([a, b]);
            return Ok(true);
        }

        for i in 0..candidates.len() {
            for j in i + 1..candidates.len() {
                self.step()?;
                let (a, b) = (candidates[i], candidates[j]);
                self.scratch.set(a, Tile::EMPTY);
                self.scratch.set(b, Tile::EMPTY);
                self.order.push([a, b]);

                if self.colorize(depth + 1)? {
                    self.result.set(a, pair[0]);
                    self.result.set(b, pair[1]);
                    return Ok(true);
                }

                self.order.pop();
                self.scratch.set(a, Tile::PLACEHOLDER);
                self.scratch.set(b, Tile::PLACEHOLDER);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exposure::is_selectable;
    use crate::rng::{FixedOrder, SimpleRng};
    use crate::rules::fits;
    use crate::types::Category;

    fn p(row: u8, col: u8, height: u8) -> Position {
        Position::new(row, col, height)
    }

    fn one_pair(tile: Tile) -> Pile {
        Pile::from_pairs(vec![[tile, tile]]).unwrap()
    }

    fn small_pile(pairs: usize) -> Pile {
        let pairs = (0..pairs)
            .map(|i| {
                let t = Tile::new(Category::Dots, (i % 9) as u8 + 1);
                [t, t]
            })
            .collect();
        Pile::from_pairs(pairs).unwrap()
    }

    /// Remove every pair in order, checking each is legal at that point.
    fn replay_order(deal: &Deal) -> Board {
        let mut board = deal.board.clone();
        for &[a, b] in &deal.removal_order {
            assert!(is_selectable(&board, a), "{a:?} not selectable");
            assert!(is_selectable(&board, b), "{b:?} not selectable");
            assert!(fits(board.get(a), board.get(b)));
            board.set(a, Tile::EMPTY);
            board.set(b, Tile::EMPTY);
        }
        board
    }

    #[test]
    fn two_slot_map_deals_a_matching_pair() {
        let a = p(0, 0, 0);
        let b = p(0, 4, 0);
        let map = Map::new("pair", 3, 6, vec![a, b], vec![]).unwrap();
        let one = Tile::new(Category::Character, 1);

        let deal = generate(&map, &one_pair(one), &mut SimpleRng::new(1)).unwrap();
        assert_eq!(deal.board.get(a), one);
        assert_eq!(deal.board.get(b), one);
        assert!(is_selectable(&deal.board, a));
        assert!(is_selectable(&deal.board, b));
        assert_eq!(deal.board.tile_count(), 2);
    }

    #[test]
    fn three_by_three_map_deals_an_exposed_pair() {
        let a = p(1, 0, 0);
        let b = p(1, 2, 0);
        let map = Map::new("three", 3, 3, vec![a, b], vec![]).unwrap();
        let season = Tile::new(Category::Seasons, 1);
        let pile = Pile::from_pairs(vec![[season, Tile::new(Category::Seasons, 3)]]).unwrap();

        let deal = generate(&map, &pile, &mut FixedOrder).unwrap();
        assert!(is_selectable(&deal.board, a));
        assert!(is_selectable(&deal.board, b));
        assert!(fits(deal.board.get(a), deal.board.get(b)));
        assert_eq!(deal.removal_order.len(), 1);
    }

    #[test]
    fn boxed_in_slot_fails() {
        // Centre slot walled in on both sides and capped by a blocker; its
        // partner slot is free but can never be paired with it.
        let centre = p(2, 4, 0);
        let free = p(0, 10, 0);
        let blockers = vec![p(1, 2, 0), p(2, 2, 0), p(3, 6, 0), p(2, 6, 0), p(2, 4, 1)];
        let map = Map::new("boxed", 5, 12, vec![centre, free], blockers).unwrap();
        let pile = one_pair(Tile::new(Category::Bamboo, 2));

        assert_eq!(
            generate(&map, &pile, &mut FixedOrder).unwrap_err(),
            GenerationError::NoSolvableLayout
        );
    }

    #[test]
    fn stacked_pair_cannot_be_dealt() {
        let map = Map::new("stack", 2, 2, vec![p(0, 0, 0), p(0, 0, 1)], vec![]).unwrap();
        let pile = one_pair(Tile::new(Category::Winds, 1));
        assert_eq!(
            generate(&map, &pile, &mut FixedOrder).unwrap_err(),
            GenerationError::NoSolvableLayout
        );
    }

    #[test]
    fn pile_size_must_match_slots() {
        let map = Map::new("pair", 3, 6, vec![p(0, 0, 0), p(0, 4, 0)], vec![]).unwrap();
        assert_eq!(
            generate(&map, &small_pile(2), &mut FixedOrder).unwrap_err(),
            GenerationError::PileMismatch { slots: 2, tiles: 4 }
        );
    }

    #[test]
    fn removal_order_clears_the_board() {
        // Two stacked rows of three; only the ends and the top are exposed.
        let mut slots = Vec::new();
        for col in [0, 2, 4, 6] {
            slots.push(p(0, col, 0));
            slots.push(p(2, col, 0));
        }
        slots.push(p(1, 3, 1));
        slots.push(p(1, 5, 1));
        let map = Map::new("rows", 4, 8, slots, vec![p(3, 0, 0)]).unwrap();

        for seed in 0..10 {
            let deal = generate(&map, &small_pile(5), &mut SimpleRng::new(seed)).unwrap();
            assert_eq!(deal.removal_order.len(), 5);
            assert_eq!(deal.board.tile_count(), 11);
            assert_eq!(deal.board.get(p(3, 0, 0)), Tile::BLOCKER);

            let cleared = replay_order(&deal);
            assert!(!cleared.has_playable_tiles());
        }
    }

    #[test]
    fn same_seed_same_deal() {
        let slots = (0..6).map(|c| p(0, c * 2, 0)).collect();
        let map = Map::new("row", 2, 12, slots, vec![]).unwrap();
        let a = generate(&map, &small_pile(3), &mut SimpleRng::new(77)).unwrap();
        let b = generate(&map, &small_pile(3), &mut SimpleRng::new(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn step_limit_is_reported() {
        let slots = (0..6).map(|c| p(0, c * 2, 0)).collect();
        let map = Map::new("row", 2, 12, slots, vec![]).unwrap();
        let err = generate_with_limits(
            &map,
            &small_pile(3),
            &mut FixedOrder,
            GeneratorLimits::steps(1),
        )
        .unwrap_err();
        assert_eq!(err, GenerationError::StepLimitExceeded { limit: 1 });
    }
}
