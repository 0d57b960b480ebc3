//! Small hex helpers shared by the report tools.

/// Parse a hexadecimal string, with or without a leading `0x`.
pub fn parse_hex(s: &str) -> Option<u32> {
  let digits = s.strip_prefix("0x").unwrap_or(s);
  if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
    return None;
  }
  u32::from_str_radix(digits, 16).ok()
}

/// Format `value` as lower-case hex, zero-padded to at least `width`
/// digits.
pub fn to_hex(value: u32, width: usize) -> String {
  format!("{value:0width$x}")
}
