//! The assembler engine contract and the pipeline driver.
//!
//! Parsing, address layout and instruction encoding happen upstream; this
//! crate only defines the seams it consumes them through, so the report
//! stage runs against any engine - including hand-built fixtures in tests.

use std::io::{Read, Write};

use log::{debug, info};

use crate::error::Error;
use crate::report;
use crate::statement::Statement;

/// Turns raw source text into statements with `line` and `line_text`
/// populated.
pub trait Parse {
  fn parse(&mut self, source: &str) -> Result<Vec<Statement>, Error>;
}

/// Assigns `addr` and `size` to every statement in place. The address
/// resolution strategy (single- or two-pass) is the engine's business.
pub trait Layout {
  fn layout(&mut self, program: &mut [Statement]) -> Result<(), Error>;
}

/// Assigns `encoded` to every non-origin instruction and directive.
pub trait Compile {
  fn compile(&mut self, program: &mut [Statement]) -> Result<(), Error>;
}

/// The three engine stages run in order, followed by report emission.
pub struct Pipeline<P, L, C> {
  parser: P,
  layouter: L,
  compiler: C,
}

impl<P: Parse, L: Layout, C: Compile> Pipeline<P, L, C> {
  pub fn new(parser: P, layouter: L, compiler: C) -> Self {
    Pipeline {
      parser,
      layouter,
      compiler,
    }
  }

  /// Run parse, layout and compile over the source and hand back the
  /// finalized statement sequence. The first failing stage aborts.
  pub fn assemble_source(&mut self, source: &str) -> Result<Vec<Statement>, Error> {
    let mut program = self.parser.parse(source)?;
    info!("parsed {} statements", program.len());
    self.layouter.layout(&mut program)?;
    debug!("addresses assigned");
    self.compiler.compile(&mut program)?;
    debug!("encodings assigned");
    Ok(program)
  }

  /// Assemble a whole input stream and write the report.
  ///
  /// The input is read in full before any output is produced; layout needs
  /// a whole-program view. Returns the number of records written.
  pub fn assemble_stream<R: Read, W: Write>(
    &mut self,
    mut input: R,
    out: W,
  ) -> Result<usize, Error> {
    let mut source = String::new();
    input.read_to_string(&mut source)?;
    let program = self.assemble_source(&source)?;
    let emitted = report::write_report(&program, out)?;
    info!("report complete: {} records", emitted);
    Ok(emitted)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::statement::Instruction;

  /// Every non-empty line is a one-byte `nop`.
  struct NopEngine;

  impl Parse for NopEngine {
    fn parse(&mut self, source: &str) -> Result<Vec<Statement>, Error> {
      let mut program = Vec::new();
      for (idx, text) in source.lines().enumerate() {
        if text.trim().is_empty() {
          continue;
        }
        program.push(Statement::Instruction(Instruction {
          line: idx as u32 + 1,
          line_text: text.to_string(),
          addr: 0,
          size: 0,
          encoded: Vec::new(),
        }));
      }
      Ok(program)
    }
  }

  impl Layout for NopEngine {
    fn layout(&mut self, program: &mut [Statement]) -> Result<(), Error> {
      let mut cursor = 0u32;
      for stmt in program {
        if let Statement::Instruction(inst) = stmt {
          inst.addr = cursor;
          inst.size = 1;
          cursor += 1;
        }
      }
      Ok(())
    }
  }

  impl Compile for NopEngine {
    fn compile(&mut self, program: &mut [Statement]) -> Result<(), Error> {
      for stmt in program {
        if let Statement::Instruction(inst) = stmt {
          inst.encoded = vec![0x00];
        }
      }
      Ok(())
    }
  }

  struct FailingParse;

  impl Parse for FailingParse {
    fn parse(&mut self, _source: &str) -> Result<Vec<Statement>, Error> {
      Err(Error::source("unknown mnemonic", 2, 1))
    }
  }

  struct MustNotRun;

  impl Layout for MustNotRun {
    fn layout(&mut self, _program: &mut [Statement]) -> Result<(), Error> {
      panic!("layout ran after a parse failure");
    }
  }

  impl Compile for MustNotRun {
    fn compile(&mut self, _program: &mut [Statement]) -> Result<(), Error> {
      panic!("compile ran after a parse failure");
    }
  }

  #[test]
  fn stages_run_in_order_and_finalize_the_program() {
    let mut pipeline = Pipeline::new(NopEngine, NopEngine, NopEngine);
    let program = pipeline.assemble_source("nop\nnop\n").unwrap();
    assert_eq!(program.len(), 2);
    match &program[1] {
      Statement::Instruction(inst) => {
        assert_eq!(inst.addr, 1);
        assert_eq!(inst.size, 1);
        assert_eq!(inst.encoded, vec![0x00]);
      }
      other => panic!("expected instruction, got {other:?}"),
    }
  }

  #[test]
  fn assemble_stream_reads_everything_then_reports() {
    let mut pipeline = Pipeline::new(NopEngine, NopEngine, NopEngine);
    let mut out = Vec::new();
    let emitted = pipeline
      .assemble_stream("nop\n\nnop\n".as_bytes(), &mut out)
      .unwrap();
    assert_eq!(emitted, 2);
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "[1,\"nop\",1,[0]]\n[3,\"nop\",2,[0]]\n");
  }

  #[test]
  fn a_failing_stage_stops_the_pipeline() {
    let mut pipeline = Pipeline::new(FailingParse, MustNotRun, MustNotRun);
    let mut out = Vec::new();
    let err = pipeline
      .assemble_stream("halt\n".as_bytes(), &mut out)
      .unwrap_err();
    assert!(matches!(err, Error::Source { line: 2, .. }));
    assert!(out.is_empty());
  }
}
