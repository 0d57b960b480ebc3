//! End-address and effective-byte derivation for report records.
//!
//! For ordinary statements both values fall straight out of the layout
//! fields: the end address is `addr + size` and the bytes are the compiled
//! encoding. `org` directives diverge: their end address is the target
//! address itself, and their bytes are zero padding for the range the
//! cursor skipped over.

use crate::error::Error;
use crate::statement::{DirectiveKind, Reportable};

/// First address past the statement's footprint.
///
/// An `org` directive occupies no space at its target; its end address
/// coincides with the address it establishes.
pub fn end_addr(stmt: Reportable<'_>) -> u32 {
  match stmt {
    Reportable::Instruction(inst) => inst.addr + inst.size,
    Reportable::Directive(dir) => match dir.kind {
      DirectiveKind::Origin => dir.addr,
      _ => dir.addr + dir.size,
    },
  }
}

/// The byte sequence the report carries for the statement.
///
/// Ordinary statements pass their compiled encoding through unchanged. An
/// `org` directive materializes the skipped range as `target - cursor`
/// zero bytes, keeping the reported image gap-free. A target behind the
/// cursor fails with [`Error::BackwardOrigin`].
pub fn effective_bytes(stmt: Reportable<'_>) -> Result<Vec<u8>, Error> {
  match stmt {
    Reportable::Instruction(inst) => Ok(inst.encoded.clone()),
    Reportable::Directive(dir) => match dir.kind {
      DirectiveKind::Origin => {
        let Some(padding) = dir.addr.checked_sub(dir.size) else {
          return Err(Error::BackwardOrigin {
            line: dir.line,
            target: dir.addr,
            cursor: dir.size,
          });
        };
        Ok(vec![0u8; padding as usize])
      }
      _ => Ok(dir.encoded.clone()),
    },
  }
}
