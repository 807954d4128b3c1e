//! # Playlists
//!
//! A playlist is an ordered list of songs, each with its own pitch offset so
//! a song can be played in a different key within a given set.
//!
//! Older stored playlists list bare song ids instead of `{id, pitch}`
//! objects. [`RawPlaylistEntry`] accepts both and the bare form normalizes to
//! pitch 0 when the playlist is loaded.

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// A song reference inside a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    #[serde(rename = "id")]
    pub song_id: String,
    pub pitch: i32,
}

/// Entry as found in stored records
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPlaylistEntry {
    Id(String),
    Entry {
        id: String,
        #[serde(default)]
        pitch: Option<i32>,
    },
}

impl From<RawPlaylistEntry> for PlaylistEntry {
    fn from(raw: RawPlaylistEntry) -> Self {
        match raw {
            RawPlaylistEntry::Id(song_id) => PlaylistEntry { song_id, pitch: 0 },
            RawPlaylistEntry::Entry { id, pitch } => PlaylistEntry {
                song_id: id,
                pitch: pitch.unwrap_or(0),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawPlaylist {
    name: String,
    description: Option<String>,
    is_public: Option<bool>,
    songs: Option<Vec<RawPlaylistEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Playlist {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_public: bool,
    pub songs: Vec<PlaylistEntry>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Playlist {
            name: name.into(),
            is_public: true,
            ..Playlist::default()
        }
    }

    /// Parse a stored JSON playlist.
    ///
    /// # Examples
    /// ```
    /// use chordsheet::Playlist;
    ///
    /// let json = r#"{"name": "Friday", "songs": ["abc", {"id": "def", "pitch": -2}]}"#;
    /// let playlist = Playlist::from_json(json)?;
    /// assert_eq!(playlist.pitch_for("abc"), 0);
    /// assert_eq!(playlist.pitch_for("def"), -2);
    /// # Ok::<(), chordsheet::SheetError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SheetError> {
        let raw: RawPlaylist =
            serde_json::from_str(json).map_err(|e| SheetError::MetadataError(e.to_string()))?;
        Ok(Playlist {
            name: raw.name,
            description: raw.description,
            is_public: raw.is_public.unwrap_or(true),
            songs: raw
                .songs
                .unwrap_or_default()
                .into_iter()
                .map(PlaylistEntry::from)
                .collect(),
        })
    }

    pub fn to_json(&self) -> Result<String, SheetError> {
        serde_json::to_string(self).map_err(|e| SheetError::MetadataError(e.to_string()))
    }

    pub fn contains(&self, song_id: &str) -> bool {
        self.songs.iter().any(|entry| entry.song_id == song_id)
    }

    /// Remove the song if present, otherwise append it at pitch 0.
    pub fn toggle_song(&mut self, song_id: &str) {
        if self.contains(song_id) {
            self.songs.retain(|entry| entry.song_id != song_id);
        } else {
            self.songs.push(PlaylistEntry {
                song_id: song_id.to_string(),
                pitch: 0,
            });
        }
    }

    /// Shift a song's pitch by `delta`. Unknown songs are ignored.
    pub fn adjust_pitch(&mut self, song_id: &str, delta: i32) {
        if let Some(entry) = self.songs.iter_mut().find(|entry| entry.song_id == song_id) {
            entry.pitch = entry.pitch.saturating_add(delta);
        }
    }

    /// Pitch offset for a song, 0 if it is not in the playlist.
    pub fn pitch_for(&self, song_id: &str) -> i32 {
        self.songs
            .iter()
            .find(|entry| entry.song_id == song_id)
            .map(|entry| entry.pitch)
            .unwrap_or(0)
    }

    pub fn song_ids(&self) -> Vec<&str> {
        self.songs.iter().map(|entry| entry.song_id.as_str()).collect()
    }
}
