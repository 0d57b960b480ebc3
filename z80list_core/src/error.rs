use thiserror::Error;

/// Errors raised while finalizing a program or emitting its report.
///
/// Every variant is fatal to the run; there is no partial report.
#[derive(Debug, Error)]
pub enum Error {
  /// Malformed input surfaced by an engine stage (parser, layouter or
  /// compiler), carrying the upstream message and the 1-based source
  /// position it refers to.
  #[error("assembly error at line {line}, column {column}: {message}")]
  Source {
    message: String,
    line: u32,
    column: u32,
  },

  /// An `org` directive whose target lies behind the current location.
  /// Backward jumps cannot be materialized as padding, so the run fails
  /// instead of emitting a truncated image.
  #[error("org at line {line}: target address {target:#06x} is behind the current location {cursor:#06x}")]
  BackwardOrigin {
    line: u32,
    target: u32,
    cursor: u32,
  },

  /// A report record could not be serialized or parsed.
  #[error("malformed report record: {0}")]
  Report(#[from] serde_json::Error),

  #[error(transparent)]
  Io(#[from] std::io::Error),
}

impl Error {
  /// Shorthand for engine-stage errors.
  pub fn source(message: impl Into<String>, line: u32, column: u32) -> Self {
    Error::Source {
      message: message.into(),
      line,
      column,
    }
  }
}
