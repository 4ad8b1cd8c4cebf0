//! mc-logging: append-only NDJSON game events.
//!
//! Every move, advisor decision, and game result is one JSON object per
//! line, suitable for post-mortems of self-play runs. Writers are append-
//! only and tolerate partial trailing lines left by a crash.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use mc_core::{Outcome, Square, Team};
use serde::Serialize;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

/// One applied move.
#[derive(Debug, Clone, Serialize)]
pub struct MoveEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,

    pub game_id: u64,
    pub ply: u32,
    pub team: Team,
    pub from: Square,
    pub to: Square,
    /// Three-letter code of the captured piece, if any.
    pub captured: Option<String>,
    /// Material score after the move.
    pub score: i32,
}

/// One advisor decision.
#[derive(Debug, Clone, Serialize)]
pub struct AdviceEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,

    pub game_id: u64,
    pub ply: u32,
    pub team: Team,

    pub depth: u32,
    pub trials: u32,
    pub seed: u64,

    pub candidates: usize,
    pub trials_run: u64,
    pub from: Square,
    pub to: Square,
    pub expected_score: f64,
    pub elapsed_ms: u64,
}

/// Final state of one game.
#[derive(Debug, Clone, Serialize)]
pub struct GameResultEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,

    pub game_id: u64,
    /// `Ongoing` means the ply cap was reached before a decision.
    pub outcome: Outcome,
    pub plies: u32,
    pub final_score: i32,
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

impl std::fmt::Display for NdjsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NdjsonError::Io(e) => write!(f, "io error: {e}"),
            NdjsonError::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl std::error::Error for NdjsonError {}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new()
            .create(true)
            .append(true)
            .write(true)
            .open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use serde_json::Value;

    fn read_ndjson_lenient(path: &Path) -> Vec<Value> {
        let s = fs::read_to_string(path).expect("read");
        let mut out = Vec::new();
        for line in s.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(v) = serde_json::from_str::<Value>(line) {
                out.push(v);
            }
        }
        out
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn writes_one_valid_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append(&path).unwrap();

        let e1 = MoveEventV1 {
            event: "move",
            ts_ms: now_ms(),
            game_id: 0,
            ply: 0,
            team: Team::White,
            from: Square { row: 6, col: 4 },
            to: Square { row: 5, col: 4 },
            captured: None,
            score: 0,
        };
        let e2 = GameResultEventV1 {
            event: "game_result",
            ts_ms: now_ms(),
            game_id: 0,
            outcome: Outcome::Draw,
            plies: 1,
            final_score: 0,
        };
        w.write_event(&e1).unwrap();
        w.write_event(&e2).unwrap();
        w.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 2);
        assert_eq!(vals[0]["event"], "move");
        assert_eq!(vals[0]["team"], "white");
        assert_eq!(vals[1]["event"], "game_result");
        assert_eq!(vals[1]["outcome"], "draw");
    }

    #[test]
    fn lenient_reader_tolerates_trailing_partial_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");

        {
            let mut w = NdjsonWriter::open_append(&path).unwrap();
            let e = GameResultEventV1 {
                event: "game_result",
                ts_ms: now_ms(),
                game_id: 7,
                outcome: Outcome::WhiteWins,
                plies: 9,
                final_score: 4,
            };
            w.write_event(&e).unwrap();
            w.flush().unwrap();
        }

        // Simulate a crash: append a partial JSON line (no newline).
        let mut f = OpenOptions::new().append(true).open(&path).unwrap();
        f.write_all(br#"{"event":"move","ply":"#).unwrap();
        f.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 1);
        assert_eq!(vals[0]["game_id"], 7);
    }

    #[test]
    fn periodic_flush_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append_with_flush(&path, 1).unwrap();

        let e = GameResultEventV1 {
            event: "game_result",
            ts_ms: now_ms(),
            game_id: 1,
            outcome: Outcome::BlackWins,
            plies: 12,
            final_score: -3,
        };
        w.write_event(&e).unwrap();

        // Flushed without an explicit flush() call.
        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 1);
        assert_eq!(vals[0]["outcome"], "black_wins");
    }
}
