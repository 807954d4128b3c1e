//! # Rendering
//!
//! Resolves a song into what a renderer draws, with every chord name already
//! transposed by the session pitch offset:
//! - the intro sequence
//! - for each lyric line: the bridge that precedes it, and its chords in
//!   left-to-right order with their horizontal anchor
//! - the distinct chord names used (for chord diagrams)
//!
//! [`to_text`] lays the same view out as a plain-text chord sheet.

use serde::Serialize;

use crate::grid::{slot_offset_percent, GRID_WIDTH};
use crate::placement::placements_for_line;
use crate::song::Song;
use crate::transpose::transpose;

/// Separator shown between chords of an intro or bridge
pub const SECTION_SEPARATOR: &str = " / ";

/// Widest text line [`to_text`] will lay out; larger widths are clamped.
pub const MAX_WIDTH: usize = 4096;

/// A chord positioned above a line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedChord {
    pub name: String,
    pub grid_position: usize,
    pub offset_percent: f64,
}

/// One lyric line and everything drawn with it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge: Option<String>,
    pub chords: Vec<PlacedChord>,
    pub text: String,
}

/// A whole song ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    pub pitch: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    pub lines: Vec<LineView>,
    pub unique_chords: Vec<String>,
}

/// Join a chord sequence as `A / B / C`, transposed.
///
/// # Examples
/// ```
/// use chordsheet::render::format_section;
///
/// let intro = vec!["Am".to_string(), "F".to_string(), "G".to_string()];
/// assert_eq!(format_section(&intro, 0), "Am / F / G");
/// assert_eq!(format_section(&intro, 2), "Bm / G / A");
/// ```
pub fn format_section(chords: &[String], pitch: i32) -> String {
    chords
        .iter()
        .map(|chord| transpose(chord, pitch))
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

fn non_empty_section(chords: &[String], pitch: i32) -> Option<String> {
    if chords.is_empty() {
        None
    } else {
        Some(format_section(chords, pitch))
    }
}

/// Resolve a song for display at the given pitch offset.
pub fn view(song: &Song, pitch: i32) -> SongView {
    let lines = song
        .lines()
        .into_iter()
        .enumerate()
        .map(|(line_index, text)| LineView {
            bridge: song
                .bridge_before(line_index)
                .and_then(|bridge| non_empty_section(&bridge.chords, pitch)),
            chords: placements_for_line(&song.chords, line_index)
                .into_iter()
                .map(|placement| PlacedChord {
                    name: transpose(&placement.name, pitch),
                    grid_position: placement.grid_position,
                    offset_percent: slot_offset_percent(placement.grid_position),
                })
                .collect(),
            text: text.to_string(),
        })
        .collect();

    SongView {
        title: song.title.clone(),
        artist: song.artist.clone(),
        pitch,
        intro: non_empty_section(&song.intro, pitch),
        lines,
        unique_chords: song.unique_chords(pitch),
    }
}

/// Lay out a chord line on a ruler of `width` columns.
///
/// Each chord starts at its slot's column; a chord that would overlap the
/// previous one is pushed right, keeping one space between them.
fn layout_chord_line(chords: &[PlacedChord], width: usize) -> String {
    let mut out = String::new();
    let mut end: Option<usize> = None;
    for chord in chords {
        let column = chord.grid_position * width / GRID_WIDTH;
        let (cursor, start) = match end {
            Some(end) => (end, column.max(end + 1)),
            None => (0, column),
        };
        out.extend(std::iter::repeat(' ').take(start - cursor));
        out.push_str(&chord.name);
        end = Some(start + chord.name.chars().count());
    }
    out
}

/// Render a song as a plain-text chord sheet.
///
/// # Examples
/// ```
/// use chordsheet::{render::to_text, Song};
///
/// let mut song = Song::new("Hello darkness my old friend");
/// song.place_chord("Am", 0, 0);
/// song.place_chord("G", 0, 12);
///
/// let text = to_text(&song, 2, 24);
/// assert_eq!(text, "Bm          A\nHello darkness my old friend\n");
/// ```
pub fn to_text(song: &Song, pitch: i32, width: usize) -> String {
    let width = width.min(MAX_WIDTH);
    let view = view(song, pitch);
    let mut text = String::new();

    let mut header = true;
    match (&view.title, &view.artist) {
        (Some(title), Some(artist)) => text.push_str(&format!("{} - {}\n", title, artist)),
        (Some(title), None) => text.push_str(&format!("{}\n", title)),
        (None, Some(artist)) => text.push_str(&format!("{}\n", artist)),
        (None, None) => header = false,
    }
    if let Some(intro) = &view.intro {
        text.push_str(&format!("[Intro] {}\n", intro));
        header = true;
    }
    if header {
        text.push('\n');
    }

    for line in &view.lines {
        if let Some(bridge) = &line.bridge {
            text.push_str(&format!("[Bridge] {}\n", bridge));
        }
        if !line.chords.is_empty() {
            text.push_str(&layout_chord_line(&line.chords, width));
            text.push('\n');
        }
        text.push_str(&line.text);
        text.push('\n');
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(name: &str, grid_position: usize) -> PlacedChord {
        PlacedChord {
            name: name.to_string(),
            grid_position,
            offset_percent: slot_offset_percent(grid_position),
        }
    }

    #[test]
    fn test_view_orders_and_transposes() {
        let mut song = Song::new("one\ntwo");
        song.place_chord("G", 0, 9);
        song.place_chord("Am", 0, 1);
        song.place_chord("C/E", 1, 5);

        let view = view(&song, 3);
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines[0].chords, vec![placed("Cm", 1), placed("A#", 9)]);
        assert_eq!(view.lines[1].chords, vec![placed("D#/G", 5)]);
        assert_eq!(view.unique_chords, vec!["A#", "Cm", "D#/G"]);
    }

    #[test]
    fn test_view_sections() {
        let mut song = Song::new("a\nb\nc");
        song.push_intro_chord("C");
        song.push_intro_chord("G");
        let bridge = song.add_bridge(2);
        song.push_bridge_chord(bridge, "F");
        song.add_bridge(1); // empty bridges are not shown

        let view = view(&song, 0);
        assert_eq!(view.intro.as_deref(), Some("C / G"));
        assert_eq!(view.lines[1].bridge, None);
        assert_eq!(view.lines[2].bridge.as_deref(), Some("F"));
    }

    #[test]
    fn test_layout_pushes_colliding_chords() {
        let chords = vec![placed("Cmaj7", 0), placed("G", 1), placed("D", 20)];
        assert_eq!(layout_chord_line(&chords, 24), "Cmaj7 G             D");
    }

    #[test]
    fn test_layout_scales_to_width() {
        let chords = vec![placed("A", 6), placed("B", 12)];
        assert_eq!(layout_chord_line(&chords, 48), "            A           B");
    }

    #[test]
    fn test_to_text_clamps_huge_width() {
        let mut song = Song::new("la la");
        song.place_chord("C", 0, 0);
        song.place_chord("G", 0, 12);

        let text = to_text(&song, 0, usize::MAX / 4);
        let chord_line = text.lines().next().unwrap();
        assert_eq!(chord_line.len(), MAX_WIDTH / 2 + 1);
        assert!(chord_line.ends_with('G'));
        assert_eq!(text, to_text(&song, 0, MAX_WIDTH));
    }

    #[test]
    fn test_to_text_with_header_and_bridge() {
        let mut song = Song::new("first\nsecond");
        song.title = Some("Song".to_string());
        song.artist = Some("Artist".to_string());
        song.push_intro_chord("Em");
        let bridge = song.add_bridge(1);
        song.push_bridge_chord(bridge, "C");
        song.push_bridge_chord(bridge, "D");
        song.place_chord("Em", 1, 0);

        let expected = "Song - Artist\n[Intro] Em\n\nfirst\n[Bridge] C / D\nEm\nsecond\n";
        assert_eq!(to_text(&song, 0, 48), expected);
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let mut song = Song::new("x");
        song.place_chord("C", 0, 12);
        let json = serde_json::to_string(&view(&song, 0)).unwrap();
        assert!(json.contains(r#""gridPosition":12"#));
        assert!(json.contains(r#""offsetPercent":50.0"#));
        assert!(json.contains(r#""uniqueChords":["C"]"#));
        assert!(!json.contains("intro"));
    }
}
