use std::fs;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file: {0}")]
  Io(#[from] std::io::Error),
  #[error("failed to parse config file: {0}")]
  Parse(#[from] toml::de::Error),
}

/// Run settings for the image tool, as an alternative to command-line flags.
#[derive(Debug, Deserialize)]
pub struct ImageConfig {
  pub report_file: String,
  pub output_file: String,
  /// Image capacity in bytes; defaults to the full 64K address space.
  pub capacity: Option<u32>,
  pub pad: Option<bool>,
  pub annotated: Option<bool>,
}

pub fn parse_image_config<P: AsRef<std::path::Path>>(path: P) -> Result<ImageConfig, ConfigError> {
  let content = fs::read_to_string(path)?;
  Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn full_config_parses() {
    let config: ImageConfig = toml::from_str(
      r#"
      report_file = "monitor.report"
      output_file = "monitor.bin"
      capacity = 0x8000
      pad = true
      annotated = true
      "#,
    )
    .unwrap();

    assert_eq!(config.report_file, "monitor.report");
    assert_eq!(config.output_file, "monitor.bin");
    assert_eq!(config.capacity, Some(0x8000));
    assert_eq!(config.pad, Some(true));
    assert_eq!(config.annotated, Some(true));
  }

  #[test]
  fn optional_settings_may_be_omitted() {
    let config: ImageConfig = toml::from_str(
      r#"
      report_file = "monitor.report"
      output_file = "monitor.bin"
      "#,
    )
    .unwrap();

    assert_eq!(config.capacity, None);
    assert_eq!(config.pad, None);
    assert_eq!(config.annotated, None);
  }

  #[test]
  fn missing_output_file_is_rejected() {
    let result: Result<ImageConfig, _> = toml::from_str(r#"report_file = "monitor.report""#);
    assert!(result.is_err());
  }
}
