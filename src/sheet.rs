//! # Sheet Source Format
//!
//! Songs on disk are plain text with an optional YAML frontmatter block
//! holding the chords and song metadata. Everything after the block is the
//! lyrics, one lyric line per source line.
//!
//! ```text
//! ---
//! title: Amazing Song
//! artist: Somebody
//! pitch: 2
//! intro: [Am, G]
//! chords:
//!   - { name: Am, line: 0, grid: 0 }
//!   - { name: G, line: 0, grid: 12 }
//! bridges:
//!   - { line: 1, chords: [F, G] }
//! ---
//! first lyric line
//! second lyric line
//! ```
//!
//! `pitch` is the stored default transposition; callers add their own
//! offset on top of it (see [`RenderOptions`]).
//!
//! ## Related Modules
//! - `song` - Shares the placement normalization with stored JSON records
//! - `render` - Turns the parsed sheet into a chord sheet

use serde::Deserialize;

use crate::error::SheetError;
use crate::song::{normalize_placements, split_lines, Bridge, RawPlacement, Song};

/// Default width of a rendered text line, in columns.
pub const DEFAULT_WIDTH: usize = 48;

/// Raw frontmatter for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawSheetMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub pitch: Option<i32>,
    pub intro: Option<Vec<String>>,
    pub chords: Option<Vec<RawPlacement>>,
    pub bridges: Option<Vec<RawSheetBridge>>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct RawSheetBridge {
    pub line: usize,
    #[serde(default)]
    pub chords: Vec<String>,
}

/// A parsed sheet: the song plus its stored default pitch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub song: Song,
    pub pitch: i32,
}

/// Rendering options chosen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Semitones added on top of the sheet's own `pitch`
    pub pitch: i32,
    /// Columns per rendered line
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            pitch: 0,
            width: DEFAULT_WIDTH,
        }
    }
}

impl Sheet {
    /// Total transposition for the given options.
    pub fn effective_pitch(&self, options: &RenderOptions) -> i32 {
        self.pitch.wrapping_add(options.pitch)
    }
}

/// Split a source into (frontmatter, lyrics).
///
/// Frontmatter is only recognized when the first line is `---`. Returns a
/// `ParseError` if it is never closed.
fn extract_frontmatter(source: &str) -> Result<(Option<String>, String), SheetError> {
    let lines = split_lines(source);
    if lines.first().map(|line| line.trim()) != Some("---") {
        return Ok((None, trim_trailing_newlines(source)));
    }

    let end = lines
        .iter()
        .skip(1)
        .position(|line| line.trim() == "---")
        .map(|i| i + 1)
        .ok_or_else(|| SheetError::ParseError {
            line: 1,
            message: "Frontmatter block is not closed with '---'".to_string(),
        })?;

    let metadata = lines[1..end].join("\n");
    let lyrics = lines[end + 1..].join("\n");
    Ok((Some(metadata), trim_trailing_newlines(&lyrics)))
}

fn trim_trailing_newlines(text: &str) -> String {
    text.trim_end_matches(['\n', '\r']).to_string()
}

fn parse_metadata(content: &str) -> Result<RawSheetMetadata, SheetError> {
    if content.trim().is_empty() {
        return Ok(RawSheetMetadata::default());
    }
    serde_yaml::from_str(content).map_err(|e| SheetError::MetadataError(e.to_string()))
}

/// Parse a sheet source.
///
/// # Examples
/// ```
/// use chordsheet::parse_sheet;
///
/// let source = "---\npitch: -1\nchords:\n  - { name: C, line: 0, grid: 4 }\n---\nla la la\n";
/// let sheet = parse_sheet(source)?;
/// assert_eq!(sheet.pitch, -1);
/// assert_eq!(sheet.song.lyrics, "la la la");
/// assert_eq!(sheet.song.chords[0].grid_position, 4);
/// # Ok::<(), chordsheet::SheetError>(())
/// ```
pub fn parse_sheet(source: &str) -> Result<Sheet, SheetError> {
    let (metadata, lyrics) = extract_frontmatter(source)?;
    let raw = match metadata {
        Some(content) => parse_metadata(&content)?,
        None => RawSheetMetadata::default(),
    };

    let chords = {
        let lines = split_lines(&lyrics);
        let placements = raw.chords.unwrap_or_default().into_iter().map(Some).collect();
        normalize_placements(placements, &lines)
    };

    let song = Song {
        title: raw.title,
        artist: raw.artist,
        chords,
        intro: raw.intro.unwrap_or_default(),
        bridges: raw
            .bridges
            .unwrap_or_default()
            .into_iter()
            .map(|bridge| Bridge {
                line_index: bridge.line,
                chords: bridge.chords,
            })
            .collect(),
        lyrics,
    };

    Ok(Sheet {
        song,
        pitch: raw.pitch.unwrap_or(0),
    })
}
