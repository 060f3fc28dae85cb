//! Partial schema of a recognition response.
//!
//! Only the keys that end up in [`crate::Metadata`] are modeled; everything
//! else in the response is ignored. Direct track fields are optional, so a
//! missing key falls back to a default later, while a key of the wrong type
//! fails deserialization. Section contents are kept as raw JSON and only
//! type-checked where a value is actually used.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top level of the recognizer's answer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognitionResponse {
    /// Present only when the audio was matched. A `null` track is an error,
    /// not a missing one.
    #[serde(default, deserialize_with = "present")]
    pub track: Option<Track>,
}

/// A key that may be absent but must not be `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A matched song.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Track {
    pub title: Option<String>,
    /// The artist line.
    pub subtitle: Option<String>,
    pub genres: Option<Genres>,
    pub images: Option<Images>,
    pub url: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Genres {
    pub primary: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Images {
    pub coverart: Option<String>,
}

/// A tab of extra track data ("SONG", "LYRICS", "VIDEO", ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Section {
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub metadata: Option<Value>,
}

impl Section {
    pub fn is_song(&self) -> bool {
        self.kind.as_ref().and_then(Value::as_str) == Some("SONG")
    }

    /// The `{title, text}` lines of this section. A missing list is empty;
    /// anything but a list of objects is an error.
    pub fn entries(&self) -> Result<Vec<MetadataEntry>, serde_json::Error> {
        match &self.metadata {
            None => Ok(Vec::new()),
            Some(value) => Vec::<MetadataEntry>::deserialize(value),
        }
    }
}

/// One line of a section, e.g. `{"title": "Album", "text": "..."}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataEntry {
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub text: Option<Value>,
}

impl MetadataEntry {
    pub fn title(&self) -> Option<&str> {
        self.title.as_ref().and_then(Value::as_str)
    }

    /// The entry's text, or `default` when it is missing or `null`.
    pub fn text_or(&self, default: &str) -> Result<String, serde_json::Error> {
        let text = match &self.text {
            None => None,
            Some(value) => Option::<String>::deserialize(value)?,
        };
        Ok(text.unwrap_or_else(|| default.to_string()))
    }
}

impl RecognitionResponse {
    /// Interpret a raw recognizer response.
    pub fn from_json(raw: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(raw)
    }
}
