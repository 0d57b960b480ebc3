//! Report stage of a Z80 assembler pipeline.
//!
//! An external engine parses source text, lays out addresses and compiles
//! encodings; this crate takes the finalized statements and serializes
//! them into a line-oriented report - one JSON `[line, line_text,
//! end_addr, bytes]` array per instruction or directive. `org` directives
//! report the address they establish plus zero padding for the range they
//! skip, so the record stream describes a gap-free image.

pub mod engine;
pub mod error;
pub mod report;
pub mod resolve;
pub mod statement;
pub mod util;

pub use engine::{Compile, Layout, Parse, Pipeline};
pub use error::Error;
pub use report::{Record, Reporter, read_report, write_report};
pub use statement::{
  Comment, Directive, DirectiveKind, Instruction, Label, Reportable, Statement,
};
