//! The single JSON line written to standard output.
//!
//! Lines use `", "` and `": "` separators and escape every non-ASCII
//! character as `\uXXXX`, so the output is plain ASCII whatever the console
//! encoding is.

use crate::error::RecognitionError;
use crate::metadata::Metadata;
use serde::Serialize;
use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt::Write as _;
use std::io::{self, Write};

/// Message printed when no audio path was given.
pub const NO_AUDIO_FILE: &str = "No audio file provided";

/// An error line: `{"error": ...}` or `{"error": ..., "detail": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorRecord {
    /// An error line without detail.
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
        }
    }

    pub fn no_audio_file() -> Self {
        Self::message(NO_AUDIO_FILE)
    }
}

impl From<&RecognitionError> for ErrorRecord {
    fn from(err: &RecognitionError) -> Self {
        if err.is_no_match() {
            return Self::message(err.to_string());
        }
        Self {
            error: err.to_string(),
            detail: Some(trace(err)),
        }
    }
}

/// What one invocation prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Recognized(Metadata),
    Error(ErrorRecord),
}

impl From<Result<Metadata, RecognitionError>> for Outcome {
    fn from(result: Result<Metadata, RecognitionError>) -> Self {
        match result {
            Ok(metadata) => Outcome::Recognized(metadata),
            Err(err) => Outcome::Error(ErrorRecord::from(&err)),
        }
    }
}

/// Diagnostic text for an error: its debug form, the `source()` chain, and
/// the stack at the point of reporting.
pub fn trace(err: &(dyn Error + 'static)) -> String {
    let mut text = format!("{:?}", err);

    let mut source = err.source();
    if source.is_some() {
        text.push_str("\n\nCaused by:");
    }
    let mut depth = 0;
    while let Some(cause) = source {
        let _ = write!(text, "\n    {}: {}", depth, cause);
        depth += 1;
        source = cause.source();
    }

    let _ = write!(text, "\n\nStack backtrace:\n{}", Backtrace::force_capture());
    text
}

/// `serde_json` formatter producing `{"a": 1, "b": [1, 2]}` with ASCII-only
/// strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiLineFormatter;

impl serde_json::ser::Formatter for AsciiLineFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Serialize `value` as one JSON line (without the trailing newline).
pub fn to_json_line<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, AsciiLineFormatter);
    value.serialize(&mut ser)?;
    // The formatter only ever writes ASCII
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `value` as one JSON line to `writer` and flush it.
pub fn write_line<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> io::Result<()> {
    let line = to_json_line(value)?;
    writeln!(writer, "{}", line)?;
    writer.flush()
}

/// Write `value` as one JSON line to standard output.
pub fn emit<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_line(&mut lock, value)
}
