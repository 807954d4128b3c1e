pub mod chord;
pub mod diagram;
pub mod error;
pub mod grid;
pub mod placement;
pub mod playlist;
pub mod render;
pub mod sheet;
pub mod song;
pub mod transpose;

pub use chord::{parse_chord, ChordSymbol};
pub use error::*;
pub use grid::{to_grid_position, GRID_WIDTH};
pub use placement::{
    placements_for_line, reindex_after_lyrics_edit, remove_placement, upsert_placement,
    ChordPlacement,
};
pub use playlist::{Playlist, PlaylistEntry};
pub use render::{to_text, view, SongView};
pub use sheet::{parse_sheet, RenderOptions, Sheet};
pub use song::{Bridge, Song};
pub use transpose::{transpose, PITCH_NOTES};

/// Render a sheet source as a plain-text chord sheet.
/// This is the main entry point for the library.
pub fn render(source: &str) -> Result<String, SheetError> {
    render_with_options(source, &RenderOptions::default())
}

/// Render with an extra pitch offset and a custom line width.
///
/// The offset is added to the sheet's own `pitch`.
pub fn render_with_options(source: &str, options: &RenderOptions) -> Result<String, SheetError> {
    let sheet = parse_sheet(source)?;
    let pitch = sheet.effective_pitch(options);
    Ok(to_text(&sheet.song, pitch, options.width))
}

/// Resolve a sheet source into a render-ready view.
pub fn render_view(source: &str, options: &RenderOptions) -> Result<SongView, SheetError> {
    let sheet = parse_sheet(source)?;
    let pitch = sheet.effective_pitch(options);
    Ok(view(&sheet.song, pitch))
}
