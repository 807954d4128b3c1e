//! # Song Model
//!
//! A song is lyrics plus the chords attached to them: grid placements above
//! lyric lines, an intro chord sequence, and bridges that sit before a given
//! line.
//!
//! ## Storage boundary
//! Stored records use a loose shape:
//! ```text
//! { lyrics, chords: [{name, position|lineIndex, gridPosition?, char?}],
//!   intro: [..], bridges: [[..], ..], bridgePositions: [..] }
//! ```
//! [`RawSong`] mirrors that shape and [`Song::from_raw`] normalizes it once:
//! - legacy placements without `gridPosition` are migrated from their `char`
//!   offset onto the grid
//! - out-of-range grid positions are clamped
//! - placements pointing at missing lines, or without a name, are dropped
//! - the parallel `bridges` / `bridgePositions` arrays become [`Bridge`]s
//!
//! Everything past the boundary works with the strict types only.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SheetError;
use crate::grid::{clamp_grid_position, to_grid_position};
use crate::placement::{
    reindex_after_lyrics_edit, remove_placement, unique_chord_names, upsert_placement,
    ChordPlacement,
};

/// A chord sequence played before a lyric line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bridge {
    pub line_index: usize,
    pub chords: Vec<String>,
}

/// Song with normalized chord data
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Song {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub lyrics: String,
    pub chords: Vec<ChordPlacement>,
    pub intro: Vec<String>,
    pub bridges: Vec<Bridge>,
}

/// Placement as found in stored records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlacement {
    pub name: String,
    #[serde(alias = "position", alias = "line")]
    pub line_index: i64,
    #[serde(default, alias = "grid", skip_serializing_if = "Option::is_none")]
    pub grid_position: Option<i64>,
    #[serde(default, rename = "char", skip_serializing_if = "Option::is_none")]
    pub char_offset: Option<i64>,
}

/// Song record as stored by the persistence layer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSong {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    pub lyrics: Option<String>,
    pub chords: Option<Vec<Option<RawPlacement>>>,
    pub intro: Option<Vec<String>>,
    pub bridges: Option<Vec<Vec<String>>>,
    pub bridge_positions: Option<Vec<i64>>,
}

/// Split lyrics into lines. Always yields at least one (possibly empty) line.
pub fn split_lines(lyrics: &str) -> Vec<&str> {
    lyrics
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Normalize stored placements against the lyric lines they belong to.
pub(crate) fn normalize_placements(
    raw: Vec<Option<RawPlacement>>,
    lines: &[&str],
) -> Vec<ChordPlacement> {
    let total = raw.len();
    let chords: Vec<ChordPlacement> = raw
        .into_iter()
        .flatten()
        .filter_map(|placement| normalize_placement(placement, lines))
        .collect();
    if chords.len() != total {
        debug!("dropped {} invalid placement(s) at load", total - chords.len());
    }
    chords
}

fn normalize_placement(raw: RawPlacement, lines: &[&str]) -> Option<ChordPlacement> {
    if raw.name.is_empty() || raw.line_index < 0 {
        return None;
    }
    let line_index = raw.line_index as usize;
    let line = lines.get(line_index)?;

    let grid_position = match (raw.grid_position, raw.char_offset) {
        (Some(grid), _) => clamp_grid_position(grid),
        (None, Some(offset)) => to_grid_position(line, offset.max(0) as usize),
        (None, None) => 0,
    };

    Some(ChordPlacement {
        name: raw.name,
        line_index,
        grid_position,
    })
}

fn zip_bridges(bridges: Vec<Vec<String>>, positions: Vec<i64>) -> Vec<Bridge> {
    if bridges.len() != positions.len() {
        debug!(
            "{} bridge(s) but {} bridge position(s); extras dropped",
            bridges.len(),
            positions.len()
        );
    }
    bridges
        .into_iter()
        .zip(positions)
        .filter(|(_, position)| *position >= 0)
        .map(|(chords, position)| Bridge {
            line_index: position as usize,
            chords,
        })
        .collect()
}

impl Song {
    /// Build a song from lyrics alone.
    pub fn new(lyrics: impl Into<String>) -> Self {
        Song {
            lyrics: lyrics.into(),
            ..Song::default()
        }
    }

    /// Normalize a stored record.
    pub fn from_raw(raw: RawSong) -> Self {
        let lyrics = raw.lyrics.unwrap_or_default();
        let chords = {
            let lines = split_lines(&lyrics);
            normalize_placements(raw.chords.unwrap_or_default(), &lines)
        };
        Song {
            title: raw.title,
            artist: raw.artist,
            chords,
            intro: raw.intro.unwrap_or_default(),
            bridges: zip_bridges(
                raw.bridges.unwrap_or_default(),
                raw.bridge_positions.unwrap_or_default(),
            ),
            lyrics,
        }
    }

    /// Convert back to the stored shape.
    pub fn to_raw(&self) -> RawSong {
        RawSong {
            title: self.title.clone(),
            artist: self.artist.clone(),
            lyrics: Some(self.lyrics.clone()),
            chords: Some(
                self.chords
                    .iter()
                    .map(|placement| {
                        Some(RawPlacement {
                            name: placement.name.clone(),
                            line_index: placement.line_index as i64,
                            grid_position: Some(placement.grid_position as i64),
                            char_offset: None,
                        })
                    })
                    .collect(),
            ),
            intro: Some(self.intro.clone()),
            bridges: Some(self.bridges.iter().map(|b| b.chords.clone()).collect()),
            bridge_positions: Some(self.bridges.iter().map(|b| b.line_index as i64).collect()),
        }
    }

    /// Parse a stored JSON record.
    ///
    /// # Examples
    /// ```
    /// use chordsheet::Song;
    ///
    /// let json = r#"{
    ///     "lyrics": "first line\nsecond line",
    ///     "chords": [
    ///         {"name": "Am", "position": 0, "gridPosition": 30},
    ///         {"name": "G", "position": 5, "gridPosition": 2}
    ///     ],
    ///     "intro": ["Am", "G"],
    ///     "bridges": [["C", "G"]],
    ///     "bridgePositions": [1]
    /// }"#;
    /// let song = Song::from_json(json)?;
    /// assert_eq!(song.chords.len(), 1);          // line 5 does not exist
    /// assert_eq!(song.chords[0].grid_position, 23); // clamped
    /// assert_eq!(song.bridges[0].line_index, 1);
    /// # Ok::<(), chordsheet::SheetError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SheetError> {
        let raw: RawSong =
            serde_json::from_str(json).map_err(|e| SheetError::MetadataError(e.to_string()))?;
        Ok(Song::from_raw(raw))
    }

    /// Serialize in the stored shape.
    pub fn to_json(&self) -> Result<String, SheetError> {
        serde_json::to_string(&self.to_raw()).map_err(|e| SheetError::MetadataError(e.to_string()))
    }

    pub fn lines(&self) -> Vec<&str> {
        split_lines(&self.lyrics)
    }

    pub fn line_count(&self) -> usize {
        self.lines().len()
    }

    /// Replace the lyrics, dropping chords whose line disappeared.
    pub fn set_lyrics(&mut self, lyrics: impl Into<String>) {
        self.lyrics = lyrics.into();
        self.chords = reindex_after_lyrics_edit(&self.chords, self.line_count());
    }

    /// Attach a chord to a slot, replacing any chord already there.
    pub fn place_chord(&mut self, name: impl Into<String>, line_index: usize, grid_position: usize) {
        let placement = ChordPlacement::new(name, line_index, grid_position);
        self.chords = upsert_placement(&self.chords, placement);
    }

    pub fn remove_chord(&mut self, line_index: usize, grid_position: usize) {
        self.chords = remove_placement(&self.chords, line_index, grid_position);
    }

    pub fn push_intro_chord(&mut self, name: impl Into<String>) {
        self.intro.push(name.into());
    }

    pub fn remove_intro_chord(&mut self, index: usize) {
        if index < self.intro.len() {
            self.intro.remove(index);
        }
    }

    /// Add an empty bridge before `line_index` and return its index.
    ///
    /// A line holds at most one bridge; asking again returns the existing one.
    pub fn add_bridge(&mut self, line_index: usize) -> usize {
        if let Some(existing) = self.bridges.iter().position(|b| b.line_index == line_index) {
            return existing;
        }
        self.bridges.push(Bridge {
            line_index,
            chords: Vec::new(),
        });
        self.bridges.len() - 1
    }

    pub fn remove_bridge(&mut self, index: usize) {
        if index < self.bridges.len() {
            self.bridges.remove(index);
        }
    }

    pub fn push_bridge_chord(&mut self, bridge_index: usize, name: impl Into<String>) {
        if let Some(bridge) = self.bridges.get_mut(bridge_index) {
            bridge.chords.push(name.into());
        }
    }

    pub fn remove_bridge_chord(&mut self, bridge_index: usize, chord_index: usize) {
        if let Some(bridge) = self.bridges.get_mut(bridge_index) {
            if chord_index < bridge.chords.len() {
                bridge.chords.remove(chord_index);
            }
        }
    }

    /// The bridge rendered before `line_index`, if any.
    pub fn bridge_before(&self, line_index: usize) -> Option<&Bridge> {
        self.bridges.iter().find(|b| b.line_index == line_index)
    }

    /// Distinct transposed chord names placed in the lyrics.
    pub fn unique_chords(&self, pitch: i32) -> Vec<String> {
        unique_chord_names(&self.chords, pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\nb\n"), vec!["a", "b", ""]);
    }

    #[test]
    fn test_legacy_char_offsets_migrate_to_grid() {
        let line = "x".repeat(48);
        let json = format!(
            r#"{{"lyrics": "{}", "chords": [{{"name": "D", "position": 0, "char": 10}}]}}"#,
            line
        );
        let song = Song::from_json(&json).unwrap();
        assert_eq!(song.chords, vec![ChordPlacement::new("D", 0, 5)]);
    }

    #[test]
    fn test_missing_position_data_defaults_to_first_slot() {
        let json = r#"{"lyrics": "la la", "chords": [{"name": "D", "lineIndex": 0}]}"#;
        let song = Song::from_json(json).unwrap();
        assert_eq!(song.chords[0].grid_position, 0);
    }

    #[test]
    fn test_boundary_drops_bad_records() {
        let json = r#"{
            "lyrics": "one\ntwo",
            "chords": [
                null,
                {"name": "", "position": 0, "gridPosition": 1},
                {"name": "C", "position": -1, "gridPosition": 1},
                {"name": "G", "position": 2, "gridPosition": 1},
                {"name": "F", "position": 1, "gridPosition": -4}
            ]
        }"#;
        let song = Song::from_json(json).unwrap();
        assert_eq!(song.chords, vec![ChordPlacement::new("F", 1, 0)]);
    }

    #[test]
    fn test_null_collections() {
        let json = r#"{"lyrics": null, "chords": null, "intro": null, "bridges": null}"#;
        let song = Song::from_json(json).unwrap();
        assert_eq!(song, Song::default());
        assert_eq!(song.line_count(), 1);
    }

    #[test]
    fn test_invalid_json_is_metadata_error() {
        assert!(matches!(
            Song::from_json("{not json"),
            Err(SheetError::MetadataError(_))
        ));
    }

    #[test]
    fn test_bridges_zip_with_positions() {
        let json = r#"{
            "lyrics": "a\nb\nc",
            "bridges": [["C"], ["G", "D"], ["E"]],
            "bridgePositions": [2, 0]
        }"#;
        let song = Song::from_json(json).unwrap();
        assert_eq!(
            song.bridges,
            vec![
                Bridge { line_index: 2, chords: vec!["C".to_string()] },
                Bridge { line_index: 0, chords: vec!["G".to_string(), "D".to_string()] },
            ]
        );
    }

    #[test]
    fn test_json_round_trip_keeps_storage_shape() {
        let mut song = Song::new("one\ntwo");
        song.place_chord("Am", 0, 3);
        song.push_intro_chord("Am");
        let bridge = song.add_bridge(1);
        song.push_bridge_chord(bridge, "G");

        let json = song.to_json().unwrap();
        assert!(json.contains(r#""bridgePositions":[1]"#));
        assert!(json.contains(r#""gridPosition":3"#));
        assert_eq!(Song::from_json(&json).unwrap(), song);
    }

    #[test]
    fn test_set_lyrics_reindexes() {
        let mut song = Song::new("a\nb\nc\nd");
        for line in 0..4 {
            song.place_chord("C", line, 0);
        }
        song.set_lyrics("a\nb");
        let lines: Vec<usize> = song.chords.iter().map(|p| p.line_index).collect();
        assert_eq!(lines, vec![0, 1]);
    }

    #[test]
    fn test_place_chord_replaces_slot() {
        let mut song = Song::new("line");
        song.place_chord("C", 0, 4);
        song.place_chord("G", 0, 4);
        assert_eq!(song.chords, vec![ChordPlacement::new("G", 0, 4)]);
        song.remove_chord(0, 4);
        assert!(song.chords.is_empty());
    }

    #[test]
    fn test_section_edits() {
        let mut song = Song::new("a\nb");
        song.push_intro_chord("Am");
        song.push_intro_chord("G");
        song.remove_intro_chord(0);
        song.remove_intro_chord(9);
        assert_eq!(song.intro, vec!["G"]);

        let first = song.add_bridge(1);
        assert_eq!(song.add_bridge(1), first);
        song.push_bridge_chord(first, "C");
        song.push_bridge_chord(first, "D");
        song.push_bridge_chord(5, "X");
        song.remove_bridge_chord(first, 0);
        assert_eq!(song.bridge_before(1).map(|b| b.chords.clone()), Some(vec!["D".to_string()]));

        song.remove_bridge(first);
        assert!(song.bridges.is_empty());
        assert!(song.bridge_before(1).is_none());
    }

    #[test]
    fn test_unique_chords() {
        let mut song = Song::new("a\nb");
        song.place_chord("C", 0, 0);
        song.place_chord("/", 0, 2);
        song.place_chord("C", 1, 0);
        song.place_chord("C/E", 1, 6);
        assert_eq!(song.unique_chords(2), vec!["D", "D/F#"]);
    }
}
