use serde::Serialize;
use wasm_bindgen::prelude::*;

use chordsheet::{ChordPlacement, RenderOptions, SheetError, Song};

#[derive(Serialize)]
struct BindingError {
    message: String,
    line: Option<usize>,
}

fn error_to_binding_error(e: SheetError) -> BindingError {
    match e {
        SheetError::ParseError { line, message } => BindingError {
            message,
            line: Some(line),
        },
        SheetError::MetadataError(msg) => BindingError {
            message: msg,
            line: None,
        },
        SheetError::InvalidChord { .. } => BindingError {
            message: e.to_string(),
            line: None,
        },
    }
}

fn to_js_error(e: SheetError) -> JsValue {
    let error = error_to_binding_error(e);
    let json = serde_json::to_string(&error).unwrap_or_else(|_| error.message.clone());
    JsValue::from_str(&json)
}

fn parse_chords(chords_json: &str) -> Result<Vec<ChordPlacement>, JsValue> {
    serde_json::from_str(chords_json)
        .map_err(|e| to_js_error(SheetError::MetadataError(e.to_string())))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js_error(SheetError::MetadataError(e.to_string())))
}

/// Number of grid slots per lyric line
#[wasm_bindgen]
pub fn grid_width() -> usize {
    chordsheet::GRID_WIDTH
}

/// Transpose a chord symbol by a number of semitones
#[wasm_bindgen]
pub fn transpose_chord(chord: &str, semitones: i32) -> String {
    chordsheet::transpose(chord, semitones)
}

/// Map a character offset in a lyric line to a grid slot
#[wasm_bindgen]
pub fn to_grid_position(line: &str, char_offset: usize) -> usize {
    chordsheet::to_grid_position(line, char_offset)
}

/// Chords above a line, sorted left to right, as a JSON array
#[wasm_bindgen]
pub fn placements_for_line(chords_json: &str, line_index: usize) -> Result<String, JsValue> {
    let chords = parse_chords(chords_json)?;
    to_json(&chordsheet::placements_for_line(&chords, line_index))
}

/// Place a chord in a slot, replacing any chord already there
#[wasm_bindgen]
pub fn upsert_placement(
    chords_json: &str,
    name: &str,
    line_index: usize,
    grid_position: usize,
) -> Result<String, JsValue> {
    let chords = parse_chords(chords_json)?;
    let placement = ChordPlacement::new(name, line_index, grid_position);
    to_json(&chordsheet::upsert_placement(&chords, placement))
}

/// Remove the chord in a slot
#[wasm_bindgen]
pub fn remove_placement(
    chords_json: &str,
    line_index: usize,
    grid_position: usize,
) -> Result<String, JsValue> {
    let chords = parse_chords(chords_json)?;
    to_json(&chordsheet::remove_placement(&chords, line_index, grid_position))
}

/// Drop chords whose line no longer exists
#[wasm_bindgen]
pub fn reindex_after_lyrics_edit(chords_json: &str, new_line_count: usize) -> Result<String, JsValue> {
    let chords = parse_chords(chords_json)?;
    to_json(&chordsheet::reindex_after_lyrics_edit(&chords, new_line_count))
}

/// Normalize a stored song record (legacy offsets, clamping, orphan chords)
/// and return it in the stored shape
#[wasm_bindgen]
pub fn normalize_song(song_json: &str) -> Result<String, JsValue> {
    let song = Song::from_json(song_json).map_err(to_js_error)?;
    song.to_json().map_err(to_js_error)
}

/// Resolve a stored song for display at a pitch offset
#[wasm_bindgen]
pub fn song_view(song_json: &str, pitch: i32) -> Result<String, JsValue> {
    let song = Song::from_json(song_json).map_err(to_js_error)?;
    to_json(&chordsheet::view(&song, pitch))
}

/// Render a sheet source as plain text
#[wasm_bindgen]
pub fn render_sheet(source: &str, pitch: i32, width: usize) -> Result<String, JsValue> {
    chordsheet::render_with_options(source, &RenderOptions { pitch, width }).map_err(to_js_error)
}

/// Fingering for a chord diagram as JSON
#[wasm_bindgen]
pub fn chord_fingering(name: &str) -> Result<String, JsValue> {
    to_json(chordsheet::diagram::fingering(name))
}
