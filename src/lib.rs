pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod metadata;
pub mod output;
pub mod recognizer;
pub mod track;

pub use config::Config;
pub use error::RecognitionError;
pub use handler::{recognize, recognize_with};
pub use metadata::Metadata;
pub use output::{emit, ErrorRecord, Outcome};
pub use recognizer::{Recognizer, SongrecRecognizer};
pub use track::{RecognitionResponse, Track};
