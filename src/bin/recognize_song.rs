//! Identify the song in an audio file and print its metadata as one JSON line.
//!
//! ```bash
//! recognize_song song.mp3
//! ```
//!
//! Recognition failures are reported in the JSON line with exit code 0; only
//! a missing audio path (or unusable command line) exits with 1.

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use songid::{logging, output, Config, ErrorRecord, Outcome};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process;

/// Identify a song with songrec and print its metadata as JSON
#[derive(Parser, Debug)]
#[command(name = "recognize_song", version)]
struct Args {
    /// Audio file to recognize
    #[arg(value_name = "AUDIO_FILE", allow_hyphen_values = true)]
    audio_file: Option<OsString>,

    /// Anything after the audio file is ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    extra: Vec<OsString>,

    /// songrec binary to run (default: songrec from PATH)
    #[arg(long, value_name = "PATH")]
    songrec: Option<String>,

    /// Defaults file (default: ~/.state/songid/defaults.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log more to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Print one JSON line and exit with `code`.
fn exit_with(record: &ErrorRecord, code: i32) -> ! {
    if let Err(e) = output::emit(record) {
        eprintln!("Error writing output: {}", e);
    }
    process::exit(code);
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let rendered = e.to_string();
            let message = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string();
            exit_with(&ErrorRecord::message(message), 1);
        }
    };

    // Built-in defaults, then the defaults file, then the command line
    let saved = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = Config::builtin();
    let load_error = match saved {
        Ok(saved) => {
            config.merge(&saved);
            None
        }
        Err(e) => Some(e.to_string()),
    };
    config.merge(&Config {
        songrec: args.songrec.clone(),
        log_level: None,
    });

    logging::init(&logging::level_for_verbosity(args.verbose, config.log_level()));
    if let Some(e) = load_error {
        tracing::warn!("Ignoring unusable defaults file: {}", e);
    }

    let Some(audio_file) = args.audio_file else {
        exit_with(&ErrorRecord::no_audio_file(), 1);
    };
    if !args.extra.is_empty() {
        tracing::debug!(ignored = args.extra.len(), "Extra arguments ignored");
    }

    let outcome = Outcome::from(songid::recognize(config.songrec(), Path::new(&audio_file)));
    if let Err(e) = output::emit(&outcome) {
        tracing::error!("Error writing output: {}", e);
        process::exit(1);
    }
}
