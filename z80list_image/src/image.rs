use std::io::{Read, Write};

use bincode::{Decode, Encode};
use log::info;
use thiserror::Error;

use crate::memory::Memory;

pub const IMAGE_MAGIC: [u8; 4] = *b"ZLI\0";
pub const IMAGE_VERSION: u16 = 1;

#[derive(Debug, Error)]
pub enum ImageError {
  #[error("failed to encode image: {0}")]
  Encode(#[from] bincode::error::EncodeError),
  #[error("failed to decode image: {0}")]
  Decode(#[from] bincode::error::DecodeError),
  #[error("not an annotated image file (bad magic)")]
  BadMagic,
  #[error("unsupported image version {0}")]
  UnsupportedVersion(u16),
  #[error("image checksum mismatch: stored {stored}, computed {computed}")]
  ChecksumMismatch { stored: u32, computed: u32 },
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

#[derive(Debug, Eq, PartialEq, Clone, Encode, Decode)]
pub struct ImageHeader {
  pub magic: [u8; 4],
  pub version: u16,
  pub reserved: u16,
  pub checksum: u32,
}

/// One annotation carried alongside the image bytes.
#[derive(Debug, Eq, PartialEq, Clone, Encode, Decode)]
pub struct BlockEntry {
  /// Source line the span came from; padding spans have none.
  pub line: Option<u32>,
  pub line_text: String,
  pub start_addr: u32,
  pub end_addr: u32,
}

/// The persisted form of a built image: header, occupied bytes, annotations.
#[derive(Debug, Eq, PartialEq, Clone, Encode, Decode)]
pub struct ImageFile {
  pub header: ImageHeader,
  pub bytes: Vec<u8>,
  pub blocks: Vec<BlockEntry>,
}

impl ImageFile {
  pub fn from_memory(memory: &Memory) -> Self {
    ImageFile {
      header: ImageHeader {
        magic: IMAGE_MAGIC,
        version: IMAGE_VERSION,
        reserved: 0,
        checksum: 0,
      },
      bytes: memory.used().to_vec(),
      blocks: memory
        .blocks()
        .iter()
        .map(|block| BlockEntry {
          line: block.line,
          line_text: block.line_text.clone(),
          start_addr: block.start_addr,
          end_addr: block.end_addr,
        })
        .collect(),
    }
  }

  /// Stamps the checksum and writes the encoded file.
  ///
  /// The checksum is crc32 over the encoding with the checksum field zeroed,
  /// so the stamped value never feeds into itself.
  pub fn write_to(&self, writer: &mut dyn Write) -> Result<(), ImageError> {
    let config = bincode::config::standard();

    let mut file_with_zero_checksum = self.clone();
    file_with_zero_checksum.header.checksum = 0;
    let encoded_without_checksum = bincode::encode_to_vec(&file_with_zero_checksum, config)?;

    let checksum = crc32fast::hash(&encoded_without_checksum);
    info!("Checksum generated: {}, writing image...", checksum);

    let mut final_file = self.clone();
    final_file.header.checksum = checksum;

    let final_encoded = bincode::encode_to_vec(&final_file, config)?;
    writer.write_all(&final_encoded)?;
    Ok(())
  }

  /// Decodes an image file and verifies magic, version and checksum.
  pub fn read_from(reader: &mut dyn Read) -> Result<Self, ImageError> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    let config = bincode::config::standard();
    let (file, _): (ImageFile, usize) = bincode::decode_from_slice(&buffer, config)?;

    if file.header.magic != IMAGE_MAGIC {
      return Err(ImageError::BadMagic);
    }
    if file.header.version != IMAGE_VERSION {
      return Err(ImageError::UnsupportedVersion(file.header.version));
    }

    let mut file_with_zero_checksum = file.clone();
    file_with_zero_checksum.header.checksum = 0;
    let encoded_without_checksum = bincode::encode_to_vec(&file_with_zero_checksum, config)?;
    let computed = crc32fast::hash(&encoded_without_checksum);
    if computed != file.header.checksum {
      return Err(ImageError::ChecksumMismatch {
        stored: file.header.checksum,
        computed,
      });
    }

    Ok(file)
  }

  pub fn write_to_path<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ImageError> {
    let mut file = std::fs::File::create(path)?;
    self.write_to(&mut file)
  }

  pub fn read_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ImageError> {
    let mut file = std::fs::File::open(path)?;
    Self::read_from(&mut file)
  }
}
