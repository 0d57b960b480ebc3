use log::debug;
use thiserror::Error;
use z80list_core::Record;

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("image capacity exceeded: block ends at {end} but capacity is {capacity}")]
  Overflow { end: usize, capacity: usize },
}

/// An annotated span of the image: which source line produced which bytes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MemoryBlock {
  /// Source line the block came from; padding blocks have none.
  pub line: Option<u32>,
  /// Original source text of that line, empty for padding.
  pub line_text: String,
  /// Absolute address of the first byte in the block.
  pub start_addr: u32,
  /// End address reported for the block (the next free address).
  pub end_addr: u32,
  buf_start: usize,
  buf_end: usize,
}

impl MemoryBlock {
  pub fn len(&self) -> usize {
    self.buf_end - self.buf_start
  }

  pub fn is_empty(&self) -> bool {
    self.buf_start == self.buf_end
  }
}

/// A fixed-capacity program image rebuilt from report records.
///
/// The report materializes origin padding as zero bytes, so the image is
/// gap-free and a buffer offset is also an absolute address.
pub struct Memory {
  buf: Vec<u8>,
  blocks: Vec<MemoryBlock>,
  cursor: usize,
}

impl Memory {
  pub fn with_capacity(capacity: usize) -> Self {
    Memory {
      buf: vec![0u8; capacity],
      blocks: Vec::new(),
      cursor: 0,
    }
  }

  /// An image that is one full-capacity empty block.
  pub fn blank(capacity: usize) -> Self {
    let mut memory = Memory::with_capacity(capacity);
    memory.pad_to_capacity();
    memory
  }

  /// Appends `bytes` at the cursor and records the annotation for the span.
  ///
  /// Zero-length blocks are kept: an origin that jumps to the current address
  /// still shows up in the annotations.
  pub fn add_block(
    &mut self,
    line: Option<u32>,
    line_text: &str,
    end_addr: u32,
    bytes: &[u8],
  ) -> Result<(), MemoryError> {
    let end = self.cursor + bytes.len();
    if end > self.buf.len() {
      return Err(MemoryError::Overflow {
        end,
        capacity: self.buf.len(),
      });
    }

    self.buf[self.cursor..end].copy_from_slice(bytes);
    self.blocks.push(MemoryBlock {
      line,
      line_text: line_text.to_string(),
      start_addr: self.cursor as u32,
      end_addr,
      buf_start: self.cursor,
      buf_end: end,
    });
    debug!("Placed {} bytes at 0x{:04x}", bytes.len(), self.cursor);
    self.cursor = end;
    Ok(())
  }

  pub fn add_record(&mut self, record: &Record) -> Result<(), MemoryError> {
    self.add_block(
      Some(record.line),
      &record.line_text,
      record.end_addr,
      &record.bytes,
    )
  }

  /// Covers the remaining space with one unannotated zero block, if any.
  pub fn pad_to_capacity(&mut self) {
    if self.cursor == self.buf.len() {
      return;
    }
    // everything past the cursor is still zeroed, nothing to copy
    self.blocks.push(MemoryBlock {
      line: None,
      line_text: String::new(),
      start_addr: self.cursor as u32,
      end_addr: self.buf.len() as u32,
      buf_start: self.cursor,
      buf_end: self.buf.len(),
    });
    debug!(
      "Padded {} bytes at 0x{:04x}",
      self.buf.len() - self.cursor,
      self.cursor
    );
    self.cursor = self.buf.len();
  }

  pub fn clear(&mut self) {
    self.buf.fill(0);
    self.blocks.clear();
    self.cursor = 0;
  }

  /// The whole backing buffer, including space past the cursor.
  pub fn bytes(&self) -> &[u8] {
    &self.buf
  }

  /// The occupied prefix of the buffer.
  pub fn used(&self) -> &[u8] {
    &self.buf[..self.cursor]
  }

  pub fn blocks(&self) -> &[MemoryBlock] {
    &self.blocks
  }

  pub fn block_bytes(&self, block: &MemoryBlock) -> &[u8] {
    &self.buf[block.buf_start..block.buf_end]
  }

  pub fn cursor(&self) -> usize {
    self.cursor
  }

  pub fn capacity(&self) -> usize {
    self.buf.len()
  }
}
