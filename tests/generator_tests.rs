//! Layout generator scenarios on the built-in maps

use tui_mahjong::core::{
    generate, generate_with_limits, maps, FixedOrder, GenerationError, GeneratorLimits, Map, Pile,
    SimpleRng,
};
use tui_mahjong::engine::replay;
use tui_mahjong::types::{Category, Position, Tile};

fn p(row: u8, col: u8, height: u8) -> Position {
    Position::new(row, col, height)
}

fn sorted_tiles(board: &tui_mahjong::core::Board) -> Vec<u8> {
    let mut tiles: Vec<u8> = board
        .cells()
        .iter()
        .filter(|t| t.is_playable())
        .map(|t| t.raw())
        .collect();
    tiles.sort_unstable();
    tiles
}

#[test]
fn every_builtin_map_deals_a_solvable_board() {
    for (i, name) in maps::BUILTIN_NAMES.iter().enumerate() {
        let map = maps::builtin(name).unwrap().unwrap();
        let mut rng = SimpleRng::new(1000 + i as u32);
        let pile = Pile::standard().shuffled(&mut rng);
        let deal = generate(&map, &pile, &mut rng).unwrap();

        assert_eq!(deal.removal_order.len(), 72, "{name}");
        assert_eq!(
            deal.board.tile_count(),
            144 + map.blockers().len(),
            "{name}"
        );
        for &pos in map.slots() {
            assert!(deal.board.get(pos).is_playable(), "{name}: {pos:?} empty");
        }
        for &pos in map.blockers() {
            assert!(deal.board.get(pos).is_blocker());
        }

        let cleared = replay(&deal.board, &deal.removal_order).unwrap();
        assert!(!cleared.has_playable_tiles(), "{name}");
        assert_eq!(cleared.tile_count(), map.blockers().len());
    }
}

#[test]
fn deal_uses_exactly_the_pile() {
    let map = maps::pyramid().unwrap();
    let mut rng = SimpleRng::new(77);
    let pile = Pile::standard().shuffled(&mut rng);
    let deal = generate(&map, &pile, &mut rng).unwrap();

    let mut expected: Vec<u8> = pile.tiles().map(|t| t.raw()).collect();
    expected.sort_unstable();
    assert_eq!(sorted_tiles(&deal.board), expected);
}

#[test]
fn same_seed_same_deal() {
    let map = maps::turtle().unwrap();
    let run = |seed| {
        let mut rng = SimpleRng::new(seed);
        let pile = Pile::standard().shuffled(&mut rng);
        generate(&map, &pile, &mut rng).unwrap()
    };
    assert_eq!(run(31), run(31));
    assert_ne!(run(31).board, run(32).board);
}

#[test]
fn unshuffled_source_takes_the_first_candidates() {
    let slots = vec![p(1, 0, 0), p(1, 4, 0), p(1, 8, 0), p(1, 12, 0)];
    let map = Map::new("row", 4, 16, slots, vec![]).unwrap();
    let one = Tile::new(Category::Dots, 1);
    let two = Tile::new(Category::Dots, 2);
    let pile = Pile::from_pairs(vec![[one, one], [two, two]]).unwrap();

    let deal = generate(&map, &pile, &mut FixedOrder).unwrap();
    assert_eq!(deal.removal_order, vec![[p(1, 0, 0), p(1, 4, 0)], [p(1, 8, 0), p(1, 12, 0)]]);
    assert_eq!(deal.board.get(p(1, 0, 0)), one);
    assert_eq!(deal.board.get(p(1, 12, 0)), two);
}

#[test]
fn small_map_with_stacks() {
    // Two stacks of two plus a loose pair.
    let slots = vec![
        p(1, 0, 0),
        p(1, 0, 1),
        p(1, 6, 0),
        p(1, 6, 1),
        p(1, 12, 0),
        p(1, 16, 0),
    ];
    let map = Map::new("stacks", 4, 20, slots, vec![]).unwrap();
    let tile = Tile::new(Category::Winds, 2);
    let pile = Pile::from_pairs(vec![[tile, tile]; 3]).unwrap();

    let deal = generate(&map, &pile, &mut SimpleRng::new(5)).unwrap();
    let cleared = replay(&deal.board, &deal.removal_order).unwrap();
    assert!(!cleared.has_playable_tiles());
}

#[test]
fn mismatched_pile_is_rejected() {
    let map = maps::turtle().unwrap();
    let tile = Tile::new(Category::Dots, 1);
    let pile = Pile::from_pairs(vec![[tile, tile]]).unwrap();
    assert_eq!(
        generate(&map, &pile, &mut FixedOrder),
        Err(GenerationError::PileMismatch {
            slots: 144,
            tiles: 2
        })
    );
}

#[test]
fn unsolvable_map_is_reported() {
    // Two slots stacked in one column can never be exposed together.
    let map = Map::new("tower", 3, 4, vec![p(1, 1, 0), p(1, 1, 1)], vec![]).unwrap();
    let tile = Tile::new(Category::Bamboo, 9);
    let pile = Pile::from_pairs(vec![[tile, tile]]).unwrap();
    assert_eq!(
        generate(&map, &pile, &mut FixedOrder),
        Err(GenerationError::NoSolvableLayout)
    );
}

#[test]
fn step_limit_is_distinct_from_exhaustion() {
    let map = maps::turtle().unwrap();
    let mut rng = SimpleRng::new(3);
    let pile = Pile::standard().shuffled(&mut rng);
    let err = generate_with_limits(&map, &pile, &mut rng, GeneratorLimits::steps(10)).unwrap_err();
    assert_eq!(err, GenerationError::StepLimitExceeded { limit: 10 });
    assert!(err.to_string().contains("10"));
}
