//! Paint-order sort
//!
//! Tiles are drawn back to front: lower levels first, and within a level tiles to
//! the right before their left-hand neighbours, so every tile's left edge overlaps
//! the one it shingles.
//!
//! The covering relation is not a strict partial order in general, so this is a
//! best-effort topological sort. Unconstrained tiles keep their input order, and a
//! constraint cycle is broken at its earliest input element instead of looping.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::board::Board;
use crate::types::Position;

/// Whether `b` must be painted after `a`.
pub fn is_covered_by(a: Position, b: Position) -> bool {
    if a.height != b.height {
        return a.height < b.height;
    }
    let (ar, br) = (a.row as i32, b.row as i32);
    if br >= ar + 2 {
        return false;
    }
    if (br - ar).abs() <= 1 {
        return b.col < a.col;
    }
    // b is two rows above a: the band [a.col - 2, a.col - 2) is empty.
    false
}

/// Occupied positions of `board` in back-to-front paint order.
///
/// ```
/// use tui_mahjong_core::types::{Position, Tile};
/// use tui_mahjong_core::{paint_order, Board};
///
/// let mut board = Board::with_dimensions(4, 8);
/// let left = Position::new(1, 0, 0);
/// let right = Position::new(1, 2, 0);
/// let top = Position::new(0, 1, 1);
/// for pos in [top, left, right] {
///     board.set(pos, Tile::BLOCKER);
/// }
/// assert_eq!(paint_order(&board), vec![right, left, top]);
/// ```
pub fn paint_order(board: &Board) -> Vec<Position> {
    topological_sort(&board.occupied_positions(), |a, b| is_covered_by(*a, *b))
}

/// Stable best-effort topological sort.
///
/// `covered_by(a, b)` means `a` must come before `b`. Among the items whose
/// predecessors have all been emitted the lowest input index goes first. If no
/// item is ready (a cycle), the lowest unemitted index is forced out.
pub fn topological_sort<T: Clone>(items: &[T], covered_by: impl Fn(&T, &T) -> bool) -> Vec<T> {
    let n = items.len();
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut indegree = vec![0usize; n];
    for i in 0..n {
        for j in 0..n {
            if i != j && covered_by(&items[i], &items[j]) {
                successors[i].push(j);
                indegree[j] += 1;
            }
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = (0..n)
        .filter(|&i| indegree[i] == 0)
        .map(Reverse)
        .collect();
    let mut emitted = vec![false; n];
    let mut out = Vec::with_capacity(n);
    let mut next_forced = 0;

    while out.len() < n {
        let i = match ready.pop() {
            Some(Reverse(i)) if emitted[i] => continue,
            Some(Reverse(i)) => i,
            None => {
                while emitted[next_forced] {
                    next_forced += 1;
                }
                next_forced
            }
        };
        emitted[i] = true;
        out.push(items[i].clone());
        for &j in &successors[i] {
            indegree[j] = indegree[j].saturating_sub(1);
            if indegree[j] == 0 && !emitted[j] {
                ready.push(Reverse(j));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tile;

    fn p(row: u8, col: u8, height: u8) -> Position {
        Position::new(row, col, height)
    }

    fn index_of(order: &[Position], pos: Position) -> usize {
        order.iter().position(|&q| q == pos).unwrap()
    }

    #[test]
    fn lower_levels_paint_first() {
        assert!(is_covered_by(p(5, 5, 0), p(0, 0, 1)));
        assert!(!is_covered_by(p(0, 0, 1), p(5, 5, 0)));
    }

    #[test]
    fn left_neighbour_in_adjacent_rows_paints_later() {
        assert!(is_covered_by(p(4, 6, 0), p(4, 4, 0)));
        assert!(is_covered_by(p(4, 6, 0), p(3, 4, 0)));
        assert!(is_covered_by(p(4, 6, 0), p(5, 4, 0)));
        assert!(!is_covered_by(p(4, 4, 0), p(4, 6, 0)));
        assert!(!is_covered_by(p(4, 6, 0), p(6, 0, 0)));
    }

    #[test]
    fn two_rows_above_never_covers() {
        // The narrow band two rows up is empty for every column offset.
        for col in 0..12 {
            assert!(!is_covered_by(p(4, 6, 0), p(2, col, 0)), "col {col}");
        }
    }

    #[test]
    fn sort_respects_covering_on_a_board() {
        let mut board = Board::with_dimensions(8, 12);
        let positions = [
            p(0, 0, 0),
            p(0, 2, 0),
            p(0, 4, 0),
            p(1, 2, 0),
            p(2, 0, 0),
            p(2, 2, 0),
            p(1, 1, 1),
            p(1, 3, 1),
            p(1, 2, 2),
        ];
        for pos in positions {
            board.set(pos, Tile::BLOCKER);
        }
        let order = paint_order(&board);
        assert_eq!(order.len(), positions.len());

        for &a in &positions {
            for &b in &positions {
                if is_covered_by(a, b) && !is_covered_by(b, a) {
                    assert!(index_of(&order, a) < index_of(&order, b), "{a:?} vs {b:?}");
                }
            }
        }
    }

    #[test]
    fn unconstrained_items_keep_input_order() {
        let items = [3, 1, 4, 1, 5];
        assert_eq!(topological_sort(&items, |_, _| false), items.to_vec());
    }

    #[test]
    fn cycles_degrade_gracefully() {
        // Every item claims to precede every other one.
        let items = ['a', 'b', 'c'];
        let order = topological_sort(&items, |_, _| true);
        assert_eq!(order, vec!['a', 'b', 'c']);

        // A three-cycle plus an independent item.
        let items = [0, 1, 2, 3];
        let order = topological_sort(&items, |a, b| matches!((a, b), (0, 1) | (1, 2) | (2, 0)));
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
        assert_eq!(order[0], 3);
    }

    #[test]
    fn empty_board_has_no_paint_order() {
        assert!(paint_order(&Board::with_dimensions(4, 4)).is_empty());
    }
}
