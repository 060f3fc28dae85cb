//! Flat metadata record built from a matched [`Track`].

use crate::track::Track;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNKNOWN_YEAR: &str = "Unknown Year";
pub const UNKNOWN_GENRE: &str = "Unknown Genre";
pub const UNKNOWN_LABEL: &str = "Unknown Label";
pub const NO_COVER: &str = "No Cover";

/// The record printed for a recognized song.
///
/// Field order is the key order of the emitted JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub genre: String,
    pub label: String,
    /// Cover art URL.
    pub cover: String,
    /// Link to the track page; empty when the service gave none.
    pub link: String,
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({}, {})", self.artist, self.title, self.album, self.year)
    }
}

impl Metadata {
    /// Build the record from a matched track.
    ///
    /// Direct fields fall back to their `Unknown ...` defaults. Album, year
    /// and label come from the `Album`, `Released` and `Label` entries of
    /// every `SONG` section, scanned in order; a later entry overwrites an
    /// earlier one, and an entry without `text` resets the field to its
    /// default.
    ///
    /// Fails only when a value that is read has the wrong shape: the
    /// `metadata` list of a `SONG` section, or the `text` of a used entry.
    pub fn from_track(track: &Track) -> Result<Self, serde_json::Error> {
        let mut metadata = Metadata {
            title: or_default(&track.title, UNKNOWN_TITLE),
            artist: or_default(&track.subtitle, UNKNOWN_ARTIST),
            album: UNKNOWN_ALBUM.to_string(),
            year: UNKNOWN_YEAR.to_string(),
            genre: track
                .genres
                .as_ref()
                .and_then(|g| g.primary.clone())
                .unwrap_or_else(|| UNKNOWN_GENRE.to_string()),
            label: UNKNOWN_LABEL.to_string(),
            cover: track
                .images
                .as_ref()
                .and_then(|i| i.coverart.clone())
                .unwrap_or_else(|| NO_COVER.to_string()),
            link: track.url.clone().unwrap_or_default(),
        };

        for section in track.sections.iter().filter(|s| s.is_song()) {
            for entry in section.entries()? {
                match entry.title() {
                    Some("Album") => metadata.album = entry.text_or(UNKNOWN_ALBUM)?,
                    Some("Label") => metadata.label = entry.text_or(UNKNOWN_LABEL)?,
                    Some("Released") => metadata.year = entry.text_or(UNKNOWN_YEAR)?,
                    _ => {}
                }
            }
        }

        Ok(metadata)
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value.clone().unwrap_or_else(|| default.to_string())
}
