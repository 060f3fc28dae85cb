//! Song recognition backends.
//!
//! Fingerprinting and the conversation with the recognition service are left
//! to an external tool. The default backend runs
//! [songrec](https://github.com/marin-m/SongRec), which prints the raw Shazam
//! response for an audio file as JSON:
//!
//! ```text
//! songrec audio-file-to-recognized-song song.mp3
//! ```

use crate::error::RecognitionError;
use std::io;
use std::path::Path;
use std::process::Command;

/// Default name of the songrec binary, looked up in `PATH`.
pub const DEFAULT_SONGREC: &str = "songrec";

const RECOGNIZE_SUBCOMMAND: &str = "audio-file-to-recognized-song";

/// Something that can identify the song in an audio file.
pub trait Recognizer {
    /// Recognize `path` and return the service's raw response.
    fn recognize(&self, path: &Path) -> Result<serde_json::Value, RecognitionError>;
}

/// Recognizer backed by the `songrec` command-line client.
#[derive(Debug, Clone)]
pub struct SongrecRecognizer {
    program: String,
}

impl SongrecRecognizer {
    /// Create a client for the given songrec binary.
    ///
    /// The binary is probed with `--version` so a missing installation is
    /// reported before any audio is submitted.
    pub fn new(program: &str) -> Result<Self, RecognitionError> {
        tracing::debug!(program, "Probing recognizer binary");

        match Command::new(program).arg("--version").output() {
            Ok(_) => Ok(Self {
                program: program.to_string(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(RecognitionError::BinaryNotFound(program.to_string()))
            }
            Err(e) => Err(RecognitionError::Launch {
                program: program.to_string(),
                source: e,
            }),
        }
    }
}

impl Recognizer for SongrecRecognizer {
    fn recognize(&self, path: &Path) -> Result<serde_json::Value, RecognitionError> {
        tracing::debug!(
            program = %self.program,
            audio_file = %path.display(),
            "Running songrec"
        );

        let output = Command::new(&self.program)
            .arg(RECOGNIZE_SUBCOMMAND)
            .arg(path)
            .output()
            .map_err(|e| RecognitionError::Launch {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RecognitionError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr,
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}
