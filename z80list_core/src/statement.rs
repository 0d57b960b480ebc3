//! Finalized program statements, as handed over by the assembler engine.
//!
//! The engine owns parse, layout and compile; by the time statements reach
//! this crate all fields are populated and the sequence is read-only.

/// One parsed, laid-out, optionally-encoded unit of the source program.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Statement {
  Instruction(Instruction),
  Directive(Directive),
  Label(Label),
  Comment(Comment),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Instruction {
  /// 1-based source line number.
  pub line: u32,
  /// The original source line, unmodified.
  pub line_text: String,
  /// Absolute address assigned by the layout pass.
  pub addr: u32,
  /// Footprint in bytes assigned by the layout pass.
  pub size: u32,
  /// Encoded bytes assigned by the compile pass; empty until compiled.
  pub encoded: Vec<u8>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Directive {
  pub kind: DirectiveKind,
  pub line: u32,
  pub line_text: String,
  /// For [`DirectiveKind::Origin`] the target address the layout cursor
  /// jumps to; for every other kind, the address the directive sits at.
  pub addr: u32,
  /// For [`DirectiveKind::Origin`] the layout cursor before the jump; for
  /// every other kind, the directive's footprint in bytes.
  pub size: u32,
  /// Encoded bytes. `Origin` carries none; its encoding is the gap it
  /// creates, synthesized at report time.
  pub encoded: Vec<u8>,
}

/// The closed set of directive kinds the engine emits.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DirectiveKind {
  /// `org` - relocates the assembly address cursor.
  Origin,
  /// `db` - literal data bytes.
  Byte,
  /// `dw` - little-endian data words.
  Word,
  /// `ds` - reserved space.
  Space,
  /// `equ` - named constant, no footprint.
  Equ,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Label {
  pub line: u32,
  pub line_text: String,
  pub name: String,
  pub addr: u32,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Comment {
  pub line: u32,
  pub line_text: String,
}

impl Statement {
  /// Narrow to the statement kinds that produce report records. Labels and
  /// comments yield `None`.
  pub fn as_reportable(&self) -> Option<Reportable<'_>> {
    match self {
      Statement::Instruction(inst) => Some(Reportable::Instruction(inst)),
      Statement::Directive(dir) => Some(Reportable::Directive(dir)),
      Statement::Label(_) | Statement::Comment(_) => None,
    }
  }

  pub fn is_reportable(&self) -> bool {
    self.as_reportable().is_some()
  }

  /// 1-based source line number; present on every statement kind.
  pub fn line(&self) -> u32 {
    match self {
      Statement::Instruction(inst) => inst.line,
      Statement::Directive(dir) => dir.line,
      Statement::Label(label) => label.line,
      Statement::Comment(comment) => comment.line,
    }
  }

  /// The original source line; present on every statement kind.
  pub fn line_text(&self) -> &str {
    match self {
      Statement::Instruction(inst) => &inst.line_text,
      Statement::Directive(dir) => &dir.line_text,
      Statement::Label(label) => &label.line_text,
      Statement::Comment(comment) => &comment.line_text,
    }
  }
}

/// A borrowed view over the two statement kinds that appear in the report.
#[derive(Debug, Clone, Copy)]
pub enum Reportable<'a> {
  Instruction(&'a Instruction),
  Directive(&'a Directive),
}

impl<'a> Reportable<'a> {
  pub fn line(self) -> u32 {
    match self {
      Reportable::Instruction(inst) => inst.line,
      Reportable::Directive(dir) => dir.line,
    }
  }

  pub fn line_text(self) -> &'a str {
    match self {
      Reportable::Instruction(inst) => &inst.line_text,
      Reportable::Directive(dir) => &dir.line_text,
    }
  }
}
