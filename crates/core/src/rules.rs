//! Matching rule - decides whether two tiles may be removed together.

use crate::types::{Tile, BONUS_GROUP, BONUS_GROUP_MASK, CATEGORY_MASK};

/// Whether `a` and `b` form a removable pair.
///
/// - Blockers never match.
/// - Seasons match any season and flowers match any flower (rank ignored).
/// - Every other tile matches only an identical tile.
///
/// ```
/// use tui_mahjong_core::fits;
/// use tui_mahjong_core::types::{Category, Tile};
///
/// let season = |rank| Tile::new(Category::Seasons, rank);
/// assert!(fits(season(1), season(3)));
/// assert!(!fits(season(1), Tile::new(Category::Flowers, 1)));
/// assert!(!fits(Tile::BLOCKER, Tile::BLOCKER));
/// ```
pub fn fits(a: Tile, b: Tile) -> bool {
    if a.is_blocker() || b.is_blocker() {
        return false;
    }

    if a.raw() & BONUS_GROUP_MASK == BONUS_GROUP {
        a.raw() & CATEGORY_MASK == b.raw() & CATEGORY_MASK
    } else {
        a == b
    }
}
