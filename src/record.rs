//! Frontier records.
//!
//! Flattened snapshots of frontier states, written one JSON object per line
//! so downstream tooling can stream them. The record carries the raw
//! history bytes alongside the resource totals; `game::history::Action`
//! decodes them.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::state::State;

/// Errors surfaced while writing or reading record files.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed frontier record: {0}")]
    Json(#[from] serde_json::Error),
}

/// One frontier state, flattened for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontierRecord {
    pub time: f64,
    pub clips: f64,
    pub ops: f64,
    pub creat: f64,
    pub dollars: f64,
    pub trust: i32,
    pub processors: i32,
    pub memory: i32,
    pub auto_clippers: i32,
    pub mlvl: i32,
    /// Raw project bitmask.
    pub projects: u32,
    pub win: bool,
    #[serde(default)]
    pub history: Vec<u8>,
}

impl From<&State> for FrontierRecord {
    fn from(state: &State) -> FrontierRecord {
        FrontierRecord {
            time: state.time(),
            clips: state.clips(),
            ops: state.ops(),
            creat: state.creat(),
            dollars: state.dollars(),
            trust: state.trust(),
            processors: state.processors(),
            memory: state.memory(),
            auto_clippers: state.auto_clippers(),
            mlvl: state.mlvl(),
            projects: state.projects().bits(),
            win: state.win(),
            history: state.history().bytes().to_vec(),
        }
    }
}

/// Writes the pool as JSONL, one record per line.
pub fn write_jsonl<W: Write>(states: &[State], out: &mut W) -> Result<(), RecordError> {
    for state in states {
        let record = FrontierRecord::from(state);
        serde_json::to_writer(&mut *out, &record)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Reads a JSONL record file back. Blank lines are skipped.
pub fn read_jsonl<R: BufRead>(input: R) -> Result<Vec<FrontierRecord>, RecordError> {
    let mut records = Vec::new();
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}
