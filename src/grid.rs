//! # Chord Grid
//!
//! Chords are anchored to a lyric line on a fixed-resolution horizontal grid
//! instead of raw character offsets. A line is divided into [`GRID_WIDTH`]
//! slots no matter how long it is, so small lyric edits and different fonts
//! or line lengths do not move chords around.
//!
//! ## Mapping
//! ```text
//! chars_per_slot = max(1, line_length / GRID_WIDTH)
//! slot           = round(char_offset / chars_per_slot), clamped to [0, GRID_WIDTH)
//! ```
//!
//! Line length is counted in `char`s so that non-Latin lyrics map the same
//! way they are displayed.
//!
//! ## Related Modules
//! - `placement` - Stores chords by `(line_index, grid_position)`
//! - `song` - Migrates legacy character offsets onto the grid

/// Number of horizontal slots per lyric line.
///
/// Every editor and renderer must agree on this value, otherwise chords
/// visually misalign.
pub const GRID_WIDTH: usize = 24;

/// Average number of characters covered by one grid slot (never below 1).
fn chars_per_slot(line: &str) -> f64 {
    let len = line.chars().count() as f64;
    (len / GRID_WIDTH as f64).max(1.0)
}

/// Map a character offset within `line` to a grid slot.
///
/// The result is always in `[0, GRID_WIDTH)` and is monotonic in
/// `char_offset`.
///
/// # Examples
/// ```
/// use chordsheet::grid::to_grid_position;
///
/// // Short lines map one character per slot
/// assert_eq!(to_grid_position("Hello", 3), 3);
///
/// // 48 characters: two characters per slot
/// let line = "a".repeat(48);
/// assert_eq!(to_grid_position(&line, 10), 5);
///
/// // Clamped to the last slot
/// assert_eq!(to_grid_position("", 40), 23);
/// ```
pub fn to_grid_position(line: &str, char_offset: usize) -> usize {
    let slot = (char_offset as f64 / chars_per_slot(line)).round();
    (slot as usize).min(GRID_WIDTH - 1)
}

/// Map a grid slot back to the character offset it anchors to.
///
/// Clamped to the line length. For any slot the line is long enough to
/// resolve, `to_grid_position(line, to_char_offset(line, slot)) == slot`.
pub fn to_char_offset(line: &str, grid_position: usize) -> usize {
    let len = line.chars().count();
    let slot = grid_position.min(GRID_WIDTH - 1);
    let offset = (slot as f64 * chars_per_slot(line)).round() as usize;
    offset.min(len)
}

/// Clamp a stored grid position into range.
///
/// Stale or partially migrated records may carry negative or oversized
/// positions; those are pulled to the nearest valid slot rather than
/// rejected.
pub fn clamp_grid_position(raw: i64) -> usize {
    raw.clamp(0, GRID_WIDTH as i64 - 1) as usize
}

/// Horizontal anchor of a slot as a percentage of the line width.
pub fn slot_offset_percent(grid_position: usize) -> f64 {
    grid_position.min(GRID_WIDTH - 1) as f64 / GRID_WIDTH as f64 * 100.0
}
