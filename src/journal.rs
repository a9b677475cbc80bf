//! Append-only event journal (JSON lines).
//!
//! Enabled by `MAHJONG_LOG_PATH`. Every record is written as one object with a
//! running `seq` number and a `type` tag. The first failed write turns the
//! journal off; the game keeps running.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::GameStatus;
use crate::types::Position;

/// A board cell as written to the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
    pub height: u8,
}

impl From<Position> for Cell {
    fn from(pos: Position) -> Self {
        Self {
            row: pos.row,
            col: pos.col,
            height: pos.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalRecord {
    Deal {
        map: String,
        seed: u32,
        tiles: usize,
    },
    Match {
        first: Cell,
        second: Cell,
        tiles_left: usize,
        moves_left: usize,
    },
    Undo {
        tiles_left: usize,
    },
    Hint {
        first: Cell,
        second: Cell,
    },
    Finish {
        status: String,
        tiles_left: usize,
    },
    Save {
        path: String,
        tiles_left: usize,
    },
    Load {
        path: String,
        map: String,
        tiles_left: usize,
    },
}

impl JournalRecord {
    pub fn finish(status: GameStatus, tiles_left: usize) -> Self {
        JournalRecord::Finish {
            status: status.as_str().to_string(),
            tiles_left,
        }
    }
}

#[derive(Serialize)]
struct Entry<'a> {
    seq: u64,
    #[serde(flatten)]
    record: &'a JournalRecord,
}

pub struct Journal<W: Write = File> {
    out: Option<W>,
    seq: u64,
    buf: Vec<u8>,
}

impl Journal<File> {
    /// Open `path` for appending; `None` or an open failure gives a disabled journal.
    pub fn open(path: Option<&Path>) -> Self {
        let file = path.and_then(|path| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });
        Self::with_output(file)
    }

    pub fn disabled() -> Self {
        Self::with_output(None)
    }
}

impl<W: Write> Journal<W> {
    pub fn from_writer(out: W) -> Self {
        Self::with_output(Some(out))
    }

    fn with_output(out: Option<W>) -> Self {
        Self {
            out,
            seq: 0,
            buf: Vec::with_capacity(256),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record(&mut self, record: &JournalRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        let entry = Entry {
            seq: self.seq,
            record,
        };
        if serde_json::to_writer(&mut self.buf, &entry).is_err() {
            return;
        }
        self.buf.push(b'\n');

        if out.write_all(&self.buf).and_then(|_| out.flush()).is_err() {
            self.out = None;
            return;
        }
        self.seq += 1;
    }

    /// The underlying writer, if the journal is still enabled.
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}
