//! The image crate's library surface, driven the way downstream tooling
//! would use it: rebuild an image from report records, persist it
//! annotated, load and inspect it.

use z80list_core::Record;
use z80list_image::image::{IMAGE_MAGIC, IMAGE_VERSION, ImageError, ImageFile};
use z80list_image::memory::Memory;

fn monitor_records() -> Vec<Record> {
  vec![
    Record {
      line: 3,
      line_text: "ld a, 5".to_string(),
      end_addr: 2,
      bytes: vec![0x3E, 0x05],
    },
    Record {
      line: 4,
      line_text: "org 0x0010".to_string(),
      end_addr: 16,
      bytes: vec![0u8; 14],
    },
    Record {
      line: 5,
      line_text: "halt".to_string(),
      end_addr: 17,
      bytes: vec![0x76],
    },
  ]
}

#[test]
fn records_round_trip_through_an_annotated_image() {
  let mut memory = Memory::with_capacity(32);
  for record in &monitor_records() {
    memory.add_record(record).unwrap();
  }

  let mut buffer = Vec::new();
  ImageFile::from_memory(&memory).write_to(&mut buffer).unwrap();
  let loaded = ImageFile::read_from(&mut buffer.as_slice()).unwrap();

  assert_eq!(loaded.header.magic, IMAGE_MAGIC);
  assert_eq!(loaded.header.version, IMAGE_VERSION);
  assert_eq!(loaded.bytes.len(), 17);
  assert_eq!(loaded.bytes[0], 0x3E);
  assert_eq!(loaded.bytes[16], 0x76);
  assert_eq!(loaded.blocks.len(), 3);
  assert_eq!(loaded.blocks[1].line, Some(4));
  assert_eq!(loaded.blocks[1].line_text, "org 0x0010");
  assert_eq!(loaded.blocks[1].start_addr, 2);
  assert_eq!(loaded.blocks[1].end_addr, 16);
}

#[test]
fn a_blank_image_is_one_zeroed_span() {
  let memory = Memory::blank(64);

  assert_eq!(memory.capacity(), 64);
  assert_eq!(memory.bytes(), &[0u8; 64]);

  let blocks = memory.blocks();
  assert_eq!(blocks.len(), 1);
  assert_eq!(blocks[0].line, None);
  assert_eq!(blocks[0].len(), 64);
  assert!(!blocks[0].is_empty());
  assert_eq!(memory.block_bytes(&blocks[0]), &[0u8; 64]);
}

#[test]
fn clearing_lets_one_memory_build_two_images() {
  let records = monitor_records();
  let mut memory = Memory::with_capacity(32);

  memory.add_record(&records[0]).unwrap();
  memory.clear();
  assert_eq!(memory.cursor(), 0);
  assert_eq!(memory.bytes(), &[0u8; 32]);

  for record in &records {
    memory.add_record(record).unwrap();
  }
  assert_eq!(memory.blocks().len(), 3);
  assert_eq!(memory.used().len(), 17);
}

#[test]
fn a_tampered_image_fails_to_load() {
  // 0xAA shows up only in the payload or the stamped checksum; flipping
  // either occurrence breaks the stored/computed agreement
  let mut memory = Memory::with_capacity(8);
  memory
    .add_record(&Record {
      line: 1,
      line_text: "db 0".to_string(),
      end_addr: 1,
      bytes: vec![0xAA],
    })
    .unwrap();

  let mut buffer = Vec::new();
  ImageFile::from_memory(&memory).write_to(&mut buffer).unwrap();
  let position = buffer.iter().position(|&b| b == 0xAA).unwrap();
  buffer[position] ^= 0xFF;

  let err = ImageFile::read_from(&mut buffer.as_slice()).unwrap_err();
  assert!(matches!(err, ImageError::ChecksumMismatch { .. }));
}
