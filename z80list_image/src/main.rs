use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use clap::Parser as ClapParser;
use log::{error, info};

use z80list_core::read_report;
use z80list_core::util::{parse_hex, to_hex};
use z80list_image::{config, image, memory};

const DEFAULT_CAPACITY: u32 = 0x10000;

#[derive(ClapParser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Input report file (one JSON record per line)
  #[arg(short, long, required_unless_present = "config", conflicts_with = "config")]
  report: Option<String>,

  /// Output image file
  #[arg(short, long, required_unless_present = "config", conflicts_with = "config")]
  output: Option<String>,

  /// Image capacity in hex, e.g. 0x8000 (default 0x10000)
  #[arg(long, conflicts_with = "config")]
  capacity: Option<String>,

  /// Pad the image with zeroes up to capacity
  #[arg(long, conflicts_with = "config")]
  pad: bool,

  /// Write a checksummed annotated image instead of raw bytes
  #[arg(long, conflicts_with = "config")]
  annotated: bool,

  /// TOML file supplying the run settings
  #[arg(short, long)]
  config: Option<String>,

  /// Increase logging verbosity (-v, -vv, etc.)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

#[derive(Debug)]
struct Settings {
  report_file: String,
  output_file: String,
  capacity: usize,
  pad: bool,
  annotated: bool,
}

fn settings_from(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
  if let Some(path) = &cli.config {
    let config = config::parse_image_config(path)?;
    return Ok(Settings {
      report_file: config.report_file,
      output_file: config.output_file,
      capacity: config.capacity.unwrap_or(DEFAULT_CAPACITY) as usize,
      pad: config.pad.unwrap_or(false),
      annotated: config.annotated.unwrap_or(false),
    });
  }

  let capacity = match &cli.capacity {
    Some(text) => parse_hex(text).ok_or_else(|| format!("invalid capacity value: {text}"))?,
    None => DEFAULT_CAPACITY,
  };

  Ok(Settings {
    report_file: cli.report.clone().ok_or("missing report file")?,
    output_file: cli.output.clone().ok_or("missing output file")?,
    capacity: capacity as usize,
    pad: cli.pad,
    annotated: cli.annotated,
  })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let cli = Cli::parse();

  let log_level = match cli.verbose {
    0 => "info",
    1 => "debug",
    _ => "trace",
  };

  unsafe {
    std::env::set_var("RUST_LOG", log_level);
  }

  env_logger::init();

  let settings = match settings_from(&cli) {
    Ok(s) => s,
    Err(e) => {
      error!("Failed to resolve run settings: {}", e);
      return Err(e);
    }
  };

  info!("Building {} from {}", settings.output_file, settings.report_file);

  let report = match File::open(&settings.report_file) {
    Ok(f) => f,
    Err(e) => {
      error!("Failed to open report file: {}", e);
      return Err(e.into());
    }
  };

  let records = match read_report(BufReader::new(report)) {
    Ok(r) => r,
    Err(e) => {
      error!("Failed to read report: {}", e);
      return Err(e.into());
    }
  };

  let mut memory = memory::Memory::with_capacity(settings.capacity);
  for record in &records {
    if let Err(e) = memory.add_record(record) {
      error!("Failed to place line {} into the image: {}", record.line, e);
      return Err(e.into());
    }
  }

  if settings.pad {
    memory.pad_to_capacity();
  }

  if settings.annotated {
    let image = image::ImageFile::from_memory(&memory);
    if let Err(e) = image.write_to_path(&settings.output_file) {
      error!("Failed to write annotated image: {}", e);
      return Err(e.into());
    }
  } else {
    let mut out = match File::create(Path::new(&settings.output_file)) {
      Ok(f) => f,
      Err(e) => {
        error!("Failed to create output file: {}", e);
        return Err(e.into());
      }
    };
    if let Err(e) = out.write_all(memory.used()) {
      error!("Failed to write image bytes: {}", e);
      return Err(e.into());
    }
  }

  info!(
    "Placed {} blocks into {} bytes, image ends at 0x{}",
    memory.blocks().len(),
    memory.cursor(),
    to_hex(memory.cursor() as u32, 4)
  );

  Ok(())
}
