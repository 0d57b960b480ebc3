//! Memory-image construction from assembler report records.
//!
//! `Memory` rebuilds the contiguous program image from a report and keeps
//! per-line annotations; `ImageFile` persists it as a checksummed,
//! annotated binary. The CLI in this package drives both from the command
//! line; they are exposed as a library so downstream tooling can build
//! and load images directly.

pub mod config;
pub mod image;
pub mod memory;

pub use config::{ConfigError, ImageConfig, parse_image_config};
pub use image::{ImageError, ImageFile};
pub use memory::{Memory, MemoryBlock, MemoryError};
