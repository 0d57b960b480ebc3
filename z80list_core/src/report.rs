//! Line-oriented report emission and parsing.
//!
//! One JSON array per reportable statement, four elements in fixed order:
//! `[line, line_text, end_addr, bytes]`. The stream carries no header, no
//! trailing metadata and no separators; downstream tools consume it line
//! by line.

use std::io::{BufRead, Write};

use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::resolve;
use crate::statement::{Reportable, Statement};

/// One report record: the serialized form of a single reportable statement.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Record {
  /// 1-based source line number.
  pub line: u32,
  /// The original source line, unmodified.
  pub line_text: String,
  /// First address past the statement (for `org`, the target itself).
  pub end_addr: u32,
  /// Literal encoding, or synthesized zero padding for `org`.
  pub bytes: Vec<u8>,
}

impl Record {
  /// Derive the record for one reportable statement.
  pub fn resolve(stmt: Reportable<'_>) -> Result<Record, Error> {
    Ok(Record {
      line: stmt.line(),
      line_text: stmt.line_text().to_string(),
      end_addr: resolve::end_addr(stmt),
      bytes: resolve::effective_bytes(stmt)?,
    })
  }

  /// Serialize as one report line (no trailing newline).
  pub fn to_json_line(&self) -> Result<String, Error> {
    Ok(serde_json::to_string(self)?)
  }

  /// Parse one report line. Anything other than a well-formed four-element
  /// array is an error.
  pub fn from_json_line(line: &str) -> Result<Record, Error> {
    Ok(serde_json::from_str(line)?)
  }
}

// The wire shape is a bare four-element array, not a keyed object.
impl Serialize for Record {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    (self.line, &self.line_text, self.end_addr, &self.bytes).serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for Record {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let (line, line_text, end_addr, bytes) =
      <(u32, String, u32, Vec<u8>)>::deserialize(deserializer)?;
    Ok(Record {
      line,
      line_text,
      end_addr,
      bytes,
    })
  }
}

/// Streams report records to a sink, one line per reportable statement.
///
/// Records go out in the order statements come in; the reporter keeps no
/// state beyond the sink and a running count.
pub struct Reporter<W: Write> {
  out: W,
  emitted: usize,
}

impl<W: Write> Reporter<W> {
  pub fn new(out: W) -> Self {
    Reporter { out, emitted: 0 }
  }

  /// Emit the record for one statement. Labels and comments are skipped
  /// silently; `Ok(false)` means nothing was written.
  pub fn emit(&mut self, stmt: &Statement) -> Result<bool, Error> {
    let Some(reportable) = stmt.as_reportable() else {
      debug!("skipping non-reportable statement at line {}", stmt.line());
      return Ok(false);
    };
    let record = Record::resolve(reportable)?;
    writeln!(self.out, "{}", record.to_json_line()?)?;
    self.emitted += 1;
    Ok(true)
  }

  /// Emit records for a finalized program, in source order. The first
  /// failing statement aborts the emission; records already written stay
  /// in the sink. Returns the number of records written by this call.
  pub fn emit_program(&mut self, program: &[Statement]) -> Result<usize, Error> {
    let before = self.emitted;
    for stmt in program {
      self.emit(stmt)?;
    }
    Ok(self.emitted - before)
  }

  /// Total number of records written so far.
  pub fn emitted(&self) -> usize {
    self.emitted
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}

/// Write the report for a finalized program; returns the record count.
pub fn write_report<W: Write>(program: &[Statement], out: W) -> Result<usize, Error> {
  Reporter::new(out).emit_program(program)
}

/// Read back a previously emitted report. Whitespace-only lines are
/// ignored (shell redirection artifacts); anything else must be a
/// well-formed record.
pub fn read_report<R: BufRead>(input: R) -> Result<Vec<Record>, Error> {
  let mut records = Vec::new();
  for line in input.lines() {
    let line = line?;
    if line.trim().is_empty() {
      continue;
    }
    records.push(Record::from_json_line(&line)?);
  }
  Ok(records)
}
