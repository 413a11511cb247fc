//! Replay of recorded landmark streams
//!
//! A recording is JSON Lines, one [`FrameInput`] per line:
//!
//! ```text
//! {"timestamp_ms": 0, "landmarks": [{"x": 0.5, "y": 0.9, "z": 0.0}, ...]}
//! {"timestamp_ms": 33, "landmarks": []}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Lines that are not
//! valid UTF-8 or not a valid frame are replayed as frames without a hand.

use std::fs::File;
use std::io::{BufRead, BufReader, Split};
use std::path::Path;

use anyhow::Context;

use super::FrameSource;
use crate::domain::FrameInput;

pub struct ReplaySource<R> {
    lines: Split<R>,
    line_no: usize,
    last_timestamp_ms: u64,
}

impl ReplaySource<BufReader<File>> {
    /// Open a recording file
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open recording: {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.split(b'\n'),
            line_no: 0,
            last_timestamp_ms: 0,
        }
    }
}

impl<R: BufRead> FrameSource for ReplaySource<R> {
    fn next_frame(&mut self) -> anyhow::Result<Option<FrameInput>> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let bytes = line.with_context(|| format!("Failed to read line {}", self.line_no))?;
            let text = match std::str::from_utf8(&bytes) {
                Ok(text) => text.trim(),
                Err(err) => {
                    log::warn!("Skipping non-UTF-8 frame on line {}: {}", self.line_no, err);
                    return Ok(Some(no_hand(self.last_timestamp_ms)));
                }
            };
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let frame = match serde_json::from_str::<FrameInput>(text) {
                Ok(frame) => frame,
                Err(err) => {
                    // Keep the stream going; a bad frame is a frame without a hand
                    log::warn!("Skipping malformed frame on line {}: {}", self.line_no, err);
                    no_hand(self.last_timestamp_ms)
                }
            };
            self.last_timestamp_ms = frame.timestamp_ms;
            return Ok(Some(frame));
        }
        Ok(None)
    }
}

fn no_hand(timestamp_ms: u64) -> FrameInput {
    FrameInput {
        timestamp_ms,
        landmarks: Vec::new(),
    }
}
