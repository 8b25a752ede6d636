/// A single board cell: `None` when empty, otherwise the tile value (2, 4, 8, ...).
pub type Cell = Option<u32>;

/// One row or column, read in the direction tiles slide towards index 0.
pub type Line = [Cell; 4];

/// Compact a line towards index 0, returning the new line and the merge points.
///
/// Empty cells are dropped first, then equal neighbours merge once per pass:
/// a freshly merged tile is never merged again in the same call.
///
/// ```
/// use council_2048::engine::compact;
/// assert_eq!(compact([Some(2), Some(2), Some(2), Some(2)]), ([Some(4), Some(4), None, None], 8));
/// ```
pub fn compact(line: Line) -> (Line, u32) {
    let mut tiles = [0u32; 4];
    let mut len = 0;
    for value in line.iter().flatten() {
        tiles[len] = *value;
        len += 1;
    }

    let mut out: Line = [None; 4];
    let mut points = 0;
    let mut write = 0;
    let mut i = 0;
    while i < len {
        if i + 1 < len && tiles[i] == tiles[i + 1] {
            let merged = tiles[i] * 2;
            out[write] = Some(merged);
            points += merged;
            i += 2;
        } else {
            out[write] = Some(tiles[i]);
            i += 1;
        }
        write += 1;
    }
    (out, points)
}

/// True if compacting the line would change it.
#[inline]
pub fn compactable(line: Line) -> bool { compact(line).0 != line }

#[inline]
pub(crate) fn reversed(mut line: Line) -> Line {
    line.reverse();
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Cell = None;

    fn l(vals: [u32; 4]) -> Line { vals.map(|v| if v == 0 { None } else { Some(v) }) }

    #[test]
    fn it_compacts_pairs() {
        assert_eq!(compact([Some(2), Some(2), E, E]), ([Some(4), E, E, E], 4));
        assert_eq!(compact(l([2, 2, 2, 2])), (l([4, 4, 0, 0]), 8));
        assert_eq!(compact(l([4, 4, 8, 8])), (l([8, 16, 0, 0]), 24));
    }

    #[test]
    fn it_strips_gaps_before_merging() {
        assert_eq!(compact(l([4, 0, 2, 2])), (l([4, 4, 0, 0]), 4));
        assert_eq!(compact(l([2, 0, 0, 2])), (l([4, 0, 0, 0]), 4));
        assert_eq!(compact(l([0, 0, 0, 8])), (l([8, 0, 0, 0]), 0));
    }

    #[test]
    fn it_never_cascades() {
        // 2+2 makes a 4, which must not merge with the existing 4 in the same pass
        assert_eq!(compact(l([2, 2, 4, 0])), (l([4, 4, 0, 0]), 4));
        assert_eq!(compact(l([4, 2, 2, 0])), (l([4, 4, 0, 0]), 4));
        assert_eq!(compact(l([2, 2, 2, 0])), (l([4, 2, 0, 0]), 4));
    }

    #[test]
    fn it_leaves_settled_lines_alone() {
        assert_eq!(compact(l([0, 0, 0, 0])), (l([0, 0, 0, 0]), 0));
        assert_eq!(compact(l([2, 4, 2, 4])), (l([2, 4, 2, 4]), 0));
    }

    #[test]
    fn it_detects_compactable_lines() {
        assert!(compactable(l([2, 2, 4, 8])));
        assert!(!compactable(l([2, 4, 8, 16])));
        assert!(compactable(l([0, 2, 4, 8])));
        assert!(!compactable(l([2, 4, 0, 0])));
        assert!(!compactable(l([0, 0, 0, 0])));
    }

    #[test]
    fn compactability_ignores_scan_direction_on_full_lines() {
        for vals in [[2, 4, 8, 16], [2, 2, 4, 8], [8, 4, 4, 8], [2, 4, 2, 4]] {
            let line = l(vals);
            assert_eq!(compactable(line), compactable(reversed(line)));
        }
    }
}
