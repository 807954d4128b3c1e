//! # Chord Placements
//!
//! A placement binds a chord name to a lyric line and a grid slot on that
//! line. Every operation here is a pure function: collections are taken by
//! reference and new collections are returned, so the owning UI or
//! persistence layer decides when state actually changes.
//!
//! ## Slot semantics
//! - Editing (`upsert_placement`) keeps at most one chord per
//!   `(line_index, grid_position)` slot; the newest wins.
//! - Reading (`placements_for_line`) renders everything it finds, sorted
//!   left to right. Duplicate slots from older data keep their stored order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chord::SEPARATOR;
use crate::grid::GRID_WIDTH;
use crate::transpose::transpose;

/// A chord anchored to a grid slot above a lyric line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordPlacement {
    pub name: String,
    pub line_index: usize,
    pub grid_position: usize,
}

impl ChordPlacement {
    /// Create a placement, clamping the slot into `[0, GRID_WIDTH)`.
    pub fn new(name: impl Into<String>, line_index: usize, grid_position: usize) -> Self {
        ChordPlacement {
            name: name.into(),
            line_index,
            grid_position: grid_position.min(GRID_WIDTH - 1),
        }
    }

    fn occupies(&self, line_index: usize, grid_position: usize) -> bool {
        self.line_index == line_index && self.grid_position == grid_position
    }
}

/// Chords that render above `line_index`, left to right.
///
/// The sort is stable, so chords sharing a slot keep their relative order.
///
/// # Examples
/// ```
/// use chordsheet::placement::{placements_for_line, ChordPlacement};
///
/// let chords = vec![
///     ChordPlacement::new("G", 0, 5),
///     ChordPlacement::new("Am", 0, 1),
///     ChordPlacement::new("F", 1, 0),
///     ChordPlacement::new("C", 0, 9),
/// ];
/// let names: Vec<&str> = placements_for_line(&chords, 0)
///     .iter()
///     .map(|p| p.name.as_str())
///     .collect();
/// assert_eq!(names, vec!["Am", "G", "C"]);
/// assert!(placements_for_line(&chords, 7).is_empty());
/// ```
pub fn placements_for_line(all: &[ChordPlacement], line_index: usize) -> Vec<&ChordPlacement> {
    let mut line: Vec<&ChordPlacement> = all
        .iter()
        .filter(|placement| placement.line_index == line_index)
        .collect();
    line.sort_by_key(|placement| placement.grid_position);
    line
}

/// The chord occupying a slot, if any.
pub fn chord_at(
    all: &[ChordPlacement],
    line_index: usize,
    grid_position: usize,
) -> Option<&ChordPlacement> {
    all.iter()
        .find(|placement| placement.occupies(line_index, grid_position))
}

/// Place a chord, replacing whatever occupied the same slot.
pub fn upsert_placement(all: &[ChordPlacement], new: ChordPlacement) -> Vec<ChordPlacement> {
    let mut updated: Vec<ChordPlacement> = all
        .iter()
        .filter(|placement| !placement.occupies(new.line_index, new.grid_position))
        .cloned()
        .collect();
    updated.push(new);
    updated
}

/// Remove the chord at a slot. Removing from an empty slot is a no-op.
pub fn remove_placement(
    all: &[ChordPlacement],
    line_index: usize,
    grid_position: usize,
) -> Vec<ChordPlacement> {
    all.iter()
        .filter(|placement| !placement.occupies(line_index, grid_position))
        .cloned()
        .collect()
}

/// Drop placements whose line no longer exists after a lyrics edit.
///
/// Surviving placements are kept verbatim. Grid positions are not
/// recomputed: the grid does not depend on line length.
pub fn reindex_after_lyrics_edit(
    all: &[ChordPlacement],
    new_line_count: usize,
) -> Vec<ChordPlacement> {
    let kept: Vec<ChordPlacement> = all
        .iter()
        .filter(|placement| placement.line_index < new_line_count)
        .cloned()
        .collect();
    if kept.len() != all.len() {
        debug!(
            "dropped {} placement(s) beyond line {}",
            all.len() - kept.len(),
            new_line_count
        );
    }
    kept
}

/// Distinct chord names after transposition, in first-seen order.
///
/// The separator token is left out.
pub fn unique_chord_names(all: &[ChordPlacement], pitch: i32) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for placement in all {
        let name = transpose(&placement.name, pitch);
        if name != SEPARATOR && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grids(placements: &[&ChordPlacement]) -> Vec<usize> {
        placements.iter().map(|p| p.grid_position).collect()
    }

    #[test]
    fn test_placements_sorted_by_grid() {
        let chords = vec![
            ChordPlacement::new("A", 2, 5),
            ChordPlacement::new("B", 2, 1),
            ChordPlacement::new("C", 2, 9),
        ];
        assert_eq!(grids(&placements_for_line(&chords, 2)), vec![1, 5, 9]);
    }

    #[test]
    fn test_placements_ties_keep_order() {
        let chords = vec![
            ChordPlacement::new("first", 0, 4),
            ChordPlacement::new("other", 0, 2),
            ChordPlacement::new("second", 0, 4),
        ];
        let names: Vec<&str> = placements_for_line(&chords, 0)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["other", "first", "second"]);
    }

    #[test]
    fn test_new_clamps_grid() {
        assert_eq!(ChordPlacement::new("C", 0, 99).grid_position, GRID_WIDTH - 1);
    }

    #[test]
    fn test_upsert_replaces_occupied_slot() {
        let chords = vec![
            ChordPlacement::new("Am", 0, 3),
            ChordPlacement::new("G", 0, 8),
        ];
        let updated = upsert_placement(&chords, ChordPlacement::new("F", 0, 3));

        let at_slot: Vec<&ChordPlacement> = updated
            .iter()
            .filter(|p| p.line_index == 0 && p.grid_position == 3)
            .collect();
        assert_eq!(at_slot.len(), 1);
        assert_eq!(at_slot[0].name, "F");
        assert_eq!(updated.len(), 2);

        // Input untouched
        assert_eq!(chords[0].name, "Am");
    }

    #[test]
    fn test_upsert_appends_to_free_slot() {
        let chords = vec![ChordPlacement::new("Am", 0, 3)];
        let updated = upsert_placement(&chords, ChordPlacement::new("Am", 1, 3));
        assert_eq!(updated.len(), 2);
        assert_eq!(updated[1], ChordPlacement::new("Am", 1, 3));
    }

    #[test]
    fn test_remove_placement() {
        let chords = vec![
            ChordPlacement::new("Am", 0, 3),
            ChordPlacement::new("G", 0, 8),
        ];
        let removed = remove_placement(&chords, 0, 3);
        assert_eq!(removed, vec![ChordPlacement::new("G", 0, 8)]);

        let unchanged = remove_placement(&chords, 4, 4);
        assert_eq!(unchanged, chords);
    }

    #[test]
    fn test_reindex_drops_orphans() {
        let chords: Vec<ChordPlacement> = (0..4)
            .map(|line| ChordPlacement::new("C", line, line * 2))
            .collect();
        let kept = reindex_after_lyrics_edit(&chords, 2);
        assert_eq!(kept, chords[..2].to_vec());

        assert!(reindex_after_lyrics_edit(&chords, 0).is_empty());
        assert_eq!(reindex_after_lyrics_edit(&chords, 10), chords);
    }

    #[test]
    fn test_chord_at() {
        let chords = vec![ChordPlacement::new("Em", 1, 6)];
        assert_eq!(chord_at(&chords, 1, 6).map(|p| p.name.as_str()), Some("Em"));
        assert!(chord_at(&chords, 1, 7).is_none());
    }

    #[test]
    fn test_unique_chord_names() {
        let chords = vec![
            ChordPlacement::new("Am", 0, 0),
            ChordPlacement::new("/", 0, 4),
            ChordPlacement::new("G", 0, 8),
            ChordPlacement::new("Am", 1, 0),
        ];
        assert_eq!(unique_chord_names(&chords, 0), vec!["Am", "G"]);
        assert_eq!(unique_chord_names(&chords, 2), vec!["Bm", "A"]);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&ChordPlacement::new("D", 3, 7)).unwrap();
        assert_eq!(json, r#"{"name":"D","lineIndex":3,"gridPosition":7}"#);
    }
}
