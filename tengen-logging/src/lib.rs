//! tengen-logging: append-only NDJSON events for run post-mortems.
//!
//! Contract: each write emits exactly one JSON object followed by a
//! newline, so a crash can tear at most the final line and lenient readers
//! recover everything before it.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Schema versioning fields stamped into every event.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfoV1 {
    pub engine_version: &'static str,
    pub ruleset_id: &'static str,
}

impl VersionInfoV1 {
    pub fn current() -> Self {
        Self {
            engine_version: VERSION,
            ruleset_id: "area-scoring-simple-ko-v1",
        }
    }
}

/// One search decision inside a self-play game.
#[derive(Debug, Clone, Serialize)]
pub struct MoveChosenEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub ply: u32,
    pub to_play: &'static str,
    pub chosen: String,
    pub iterations: u32,

    pub node_count: usize,
    pub expansions: u32,
    pub playouts: u32,
    pub playout_moves: u64,
}

/// Terminal summary of one self-play game.
#[derive(Debug, Clone, Serialize)]
pub struct GameFinishedEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub plies: u32,
    /// Final area score from Black's point of view (komi included).
    pub score_black: f32,
    pub winner: &'static str,
}

#[derive(Debug)]
pub enum NdjsonError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl From<io::Error> for NdjsonError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for NdjsonError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Append-only NDJSON writer.
pub struct NdjsonWriter {
    w: BufWriter<File>,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        Ok(())
    }
}
