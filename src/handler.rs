//! Recognize one audio file and turn the answer into a [`Metadata`] record.

use crate::error::RecognitionError;
use crate::metadata::Metadata;
use crate::recognizer::{Recognizer, SongrecRecognizer};
use crate::track::RecognitionResponse;
use std::path::Path;

/// Submit `path` to `recognizer` once and build the metadata record.
///
/// A response without a track is [`RecognitionError::NoMatch`]; a `null`
/// track is an invalid response.
pub fn recognize_with<R: Recognizer + ?Sized>(
    recognizer: &R,
    path: &Path,
) -> Result<Metadata, RecognitionError> {
    let raw = recognizer.recognize(path)?;
    let response = RecognitionResponse::from_json(raw)?;
    let track = response.track.ok_or(RecognitionError::NoMatch)?;
    Ok(Metadata::from_track(&track)?)
}

/// Construct a songrec client and recognize `path` with it.
///
/// Failing to construct the client is reported like any other recognition
/// failure.
pub fn recognize(songrec: &str, path: &Path) -> Result<Metadata, RecognitionError> {
    let result = SongrecRecognizer::new(songrec).and_then(|r| recognize_with(&r, path));

    match &result {
        Ok(metadata) => tracing::info!(audio_file = %path.display(), "Recognized: {}", metadata),
        Err(RecognitionError::NoMatch) => {
            tracing::info!(audio_file = %path.display(), "No song recognized")
        }
        Err(e) => tracing::warn!(
            audio_file = %path.display(),
            program = songrec,
            "Recognition failed: {}",
            e
        ),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{UNKNOWN_ALBUM, UNKNOWN_LABEL, UNKNOWN_YEAR};
    use crate::output::{to_json_line, Outcome};
    use serde_json::{json, Value};
    use std::cell::{Cell, RefCell};
    use std::path::PathBuf;

    /// Test double answering with a fixed response or error message.
    struct StubRecognizer {
        answer: Result<Value, String>,
        calls: Cell<usize>,
        last_path: RefCell<Option<PathBuf>>,
    }

    impl StubRecognizer {
        fn answering(value: Value) -> Self {
            Self {
                answer: Ok(value),
                calls: Cell::new(0),
                last_path: Default::default(),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                answer: Err(message.to_string()),
                calls: Cell::new(0),
                last_path: Default::default(),
            }
        }
    }

    impl Recognizer for StubRecognizer {
        fn recognize(&self, path: &Path) -> Result<Value, RecognitionError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_path.borrow_mut() = Some(path.to_path_buf());
            self.answer.clone().map_err(RecognitionError::Service)
        }
    }

    fn line_for(stub: &StubRecognizer) -> String {
        to_json_line(&Outcome::from(recognize_with(stub, Path::new("song.mp3")))).unwrap()
    }

    fn keys(line: &str) -> Vec<String> {
        let value: Value = serde_json::from_str(line).unwrap();
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_recognizer_called_once_with_path() {
        let stub = StubRecognizer::answering(json!({"track": {"title": "T"}}));
        recognize_with(&stub, Path::new("/tmp/a b.flac")).unwrap();
        assert_eq!(stub.calls.get(), 1);
        assert_eq!(
            stub.last_path.borrow().as_deref(),
            Some(Path::new("/tmp/a b.flac"))
        );
    }

    #[test]
    fn test_matched_track() {
        let stub = StubRecognizer::answering(json!({
            "matches": [{"id": "1", "offset": 12.3}],
            "track": {
                "title": "Teardrop",
                "subtitle": "Massive Attack",
                "genres": {"primary": "Alternative"},
                "images": {"coverart": "https://example.com/cover.jpg"},
                "url": "https://www.shazam.com/track/1/teardrop",
                "sections": [{
                    "type": "SONG",
                    "metadata": [
                        {"title": "Album", "text": "Mezzanine"},
                        {"title": "Label", "text": "Circa"},
                        {"title": "Released", "text": "1998"}
                    ]
                }]
            }
        }));

        let m = recognize_with(&stub, Path::new("song.mp3")).unwrap();
        assert_eq!(m.title, "Teardrop");
        assert_eq!(m.artist, "Massive Attack");
        assert_eq!(m.album, "Mezzanine");
        assert_eq!(m.year, "1998");
        assert_eq!(m.label, "Circa");

        let line = line_for(&stub);
        assert_eq!(
            keys(&line),
            vec!["album", "artist", "cover", "genre", "label", "link", "title", "year"]
        );
    }

    #[test]
    fn test_track_without_song_section() {
        let stub = StubRecognizer::answering(json!({
            "track": {"title": "T", "sections": [{"type": "LYRICS", "text": []}]}
        }));
        let m = recognize_with(&stub, Path::new("song.mp3")).unwrap();
        assert_eq!(m.album, UNKNOWN_ALBUM);
        assert_eq!(m.year, UNKNOWN_YEAR);
        assert_eq!(m.label, UNKNOWN_LABEL);
    }

    #[test]
    fn test_missing_track_is_no_match() {
        let stub = StubRecognizer::answering(json!({"matches": []}));
        let err = recognize_with(&stub, Path::new("song.mp3")).unwrap_err();
        assert!(err.is_no_match());
        assert_eq!(line_for(&stub), r#"{"error": "No song recognized"}"#);
    }

    #[test]
    fn test_null_track_is_failure() {
        let stub = StubRecognizer::answering(json!({"track": null}));
        let err = recognize_with(&stub, Path::new("song.mp3")).unwrap_err();
        assert!(matches!(err, RecognitionError::InvalidResponse(_)));
        assert_eq!(keys(&line_for(&stub)), vec!["detail", "error"]);
    }

    #[test]
    fn test_unread_section_shapes_still_match() {
        for sections in [
            json!([{"type": "VIDEO", "metadata": null}]),
            json!([{"type": 7}]),
            json!([{"type": "SONG", "metadata": [{"title": "Track", "text": 3}]}]),
        ] {
            let stub = StubRecognizer::answering(json!({
                "track": {"title": "T", "sections": sections}
            }));
            let m = recognize_with(&stub, Path::new("song.mp3")).unwrap();
            assert_eq!(m.title, "T");
            assert_eq!(m.album, UNKNOWN_ALBUM);
        }
    }

    #[test]
    fn test_timeout_failure() {
        let stub = StubRecognizer::failing("timeout");
        let line = line_for(&stub);
        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["error"], "timeout");
        assert!(!value["detail"].as_str().unwrap().is_empty());
        assert_eq!(keys(&line), vec!["detail", "error"]);
    }

    #[test]
    fn test_unexpected_type_is_failure() {
        let stub = StubRecognizer::answering(json!({
            "track": {"title": "T", "images": 42}
        }));
        let err = recognize_with(&stub, Path::new("song.mp3")).unwrap_err();
        assert!(matches!(err, RecognitionError::InvalidResponse(_)));

        let line = line_for(&stub);
        assert!(!line.contains('\n'));
        assert_eq!(keys(&line), vec!["detail", "error"]);
    }

    #[test]
    fn test_missing_songrec_is_failure() {
        let err = recognize("/nonexistent/dir/songrec", Path::new("song.mp3")).unwrap_err();
        assert!(matches!(err, RecognitionError::BinaryNotFound(_)));
    }
}
