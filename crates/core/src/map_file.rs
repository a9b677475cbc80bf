//! Map text format
//!
//! ```text
//! <cols> <rows>
//! <col> <row> <height>      x 144 tile slots
//! <col> <row> <height>      any number of blockers until end of input
//! ```
//!
//! Blank lines are ignored. Parsing never touches the filesystem; callers read the
//! text and hand it over.

use std::fmt::Write as _;

use crate::map::{Map, MapError};
use crate::types::{Position, PILE_SIZE};

/// Parse a map; the slot count must equal the standard pile size.
pub fn parse(name: &str, text: &str) -> Result<Map, MapError> {
    parse_with_slots(name, text, PILE_SIZE)
}

/// Parse a map with an explicit tile-slot count.
pub fn parse_with_slots(name: &str, text: &str, slot_count: usize) -> Result<Map, MapError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (line_no, header) = lines.next().ok_or(MapError::Parse {
        line: 1,
        reason: "missing dimensions".to_string(),
    })?;
    let [cols, rows] = numbers::<2>(line_no, header)?;
    if cols > u8::MAX as u32 || rows > u8::MAX as u32 {
        return Err(MapError::BadDimensions { rows, cols });
    }

    let mut slots = Vec::with_capacity(slot_count);
    let mut blockers = Vec::new();
    for (line_no, line) in lines {
        let [col, row, height] = numbers::<3>(line_no, line)?;
        let pos = position(line_no, row, col, height)?;
        if slots.len() < slot_count {
            slots.push(pos);
        } else {
            blockers.push(pos);
        }
    }

    if slots.len() != slot_count {
        return Err(MapError::WrongSlotCount {
            expected: slot_count,
            found: slots.len(),
        });
    }

    Map::new(name, rows as u8, cols as u8, slots, blockers)
}

/// Render a map in the text format accepted by [`parse_with_slots`].
pub fn encode(map: &Map) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", map.cols(), map.rows());
    for pos in map.slots().iter().chain(map.blockers()) {
        let _ = writeln!(out, "{} {} {}", pos.col, pos.row, pos.height);
    }
    out
}

fn numbers<const N: usize>(line: usize, text: &str) -> Result<[u32; N], MapError> {
    let mut out = [0u32; N];
    let mut fields = text.split_whitespace();
    for slot in out.iter_mut() {
        let field = fields.next().ok_or_else(|| MapError::Parse {
            line,
            reason: format!("expected {} numbers", N),
        })?;
        *slot = field.parse().map_err(|_| MapError::Parse {
            line,
            reason: format!("invalid number: {field}"),
        })?;
    }
    if fields.next().is_some() {
        return Err(MapError::Parse {
            line,
            reason: format!("expected {} numbers", N),
        });
    }
    Ok(out)
}

fn position(line: usize, row: u32, col: u32, height: u32) -> Result<Position, MapError> {
    let narrow = |v: u32| {
        u8::try_from(v).map_err(|_| MapError::Parse {
            line,
            reason: format!("coordinate out of range: {v}"),
        })
    };
    Ok(Position::new(narrow(row)?, narrow(col)?, narrow(height)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "6 3\n0 0 0\n4 0 0\n\n2 1 0\n";

    #[test]
    fn parses_slots_then_blockers() {
        let map = parse_with_slots("small", SMALL, 2).unwrap();
        assert_eq!(map.name(), "small");
        assert_eq!((map.cols(), map.rows()), (6, 3));
        assert_eq!(
            map.slots(),
            &[Position::new(0, 0, 0), Position::new(0, 4, 0)]
        );
        assert_eq!(map.blockers(), &[Position::new(1, 2, 0)]);
    }

    #[test]
    fn encode_then_parse_is_identity() {
        let map = parse_with_slots("small", SMALL, 2).unwrap();
        let again = parse_with_slots("small", &encode(&map), 2).unwrap();
        assert_eq!(map, again);
    }

    #[test]
    fn too_few_slots_is_rejected() {
        let err = parse("short", SMALL).unwrap_err();
        assert_eq!(
            err,
            MapError::WrongSlotCount {
                expected: 144,
                found: 3
            }
        );
    }

    #[test]
    fn garbage_is_reported_with_line_number() {
        let err = parse_with_slots("bad", "6 3\n0 0 0\n4 x 0\n", 2).unwrap_err();
        assert!(matches!(err, MapError::Parse { line: 3, .. }), "{err}");

        let err = parse_with_slots("bad", "6 3\n0 0\n", 2).unwrap_err();
        assert!(matches!(err, MapError::Parse { line: 2, .. }), "{err}");

        let err = parse_with_slots("bad", "", 2).unwrap_err();
        assert!(matches!(err, MapError::Parse { line: 1, .. }), "{err}");
    }

    #[test]
    fn out_of_map_coordinates_are_rejected() {
        let err = parse_with_slots("bad", "6 3\n0 0 0\n6 0 0\n", 2).unwrap_err();
        assert_eq!(
            err,
            MapError::OutOfBounds {
                pos: Position::new(0, 6, 0)
            }
        );
    }
}
