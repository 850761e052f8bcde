//! Acu-Rite 986 Command Line Interface
//!
//! Decodes pulse dumps, one capture per line, and prints one reading per
//! capture. Log lines without a pulse list are skipped.
//!
//! Built with the `cli` feature: `cargo run --features cli --bin acurite`.
//!
//! Usage:
//!   acurite capture.txt                              # decode a file
//!   rflink-log | acurite                             # decode stdin
//!   acurite --pulses "1696,1472,...,480"             # decode one train
//!   acurite --offset 22352.0=-1.5 --fahrenheit capture.txt
//!   acurite --checksum enforce capture.txt

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use acurite::{
    parse_pulse_list, AcuriteDecoder, CalibrationStore, ChecksumMode, DecoderConfig, SyncPolicy,
    TemperatureArithmetic, TemperatureUnit, DEVICE_DESCRIPTION, PROTOCOL_ID,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ChecksumArg {
    /// Do not compute the checksum
    Ignore,
    /// Report whether the checksum matches
    Report,
    /// Drop frames whose checksum does not match
    Enforce,
}

impl From<ChecksumArg> for ChecksumMode {
    fn from(arg: ChecksumArg) -> Self {
        match arg {
            ChecksumArg::Ignore => Self::Ignore,
            ChecksumArg::Report => Self::Report,
            ChecksumArg::Enforce => Self::Enforce,
        }
    }
}

/// Decode Acu-Rite 986 refrigerator/freezer sensor captures.
#[derive(Debug, Parser)]
#[command(name = "acurite", version, about)]
struct Cli {
    /// Capture file, one pulse dump per line (stdin if omitted)
    input: Option<PathBuf>,

    /// Decode this pulse list instead of reading a file
    #[arg(short, long, conflicts_with = "input")]
    pulses: Option<String>,

    /// Calibration offset for a device, e.g. 22352.1=-0.5 (repeatable)
    #[arg(short, long = "offset", value_name = "ID=VALUE", value_parser = parse_offset)]
    offsets: Vec<(f64, f64)>,

    /// Report temperatures in Fahrenheit
    #[arg(long)]
    fahrenheit: bool,

    /// Truncate Celsius conversion to whole degrees
    #[arg(long)]
    truncate: bool,

    /// Frame checksum handling
    #[arg(long, value_enum, default_value = "ignore")]
    checksum: ChecksumArg,

    /// Reject captures without a recognizable preamble
    #[arg(long)]
    strict_sync: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_offset(s: &str) -> Result<(f64, f64), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got {s:?}"))?;
    let id = id.trim().parse().map_err(|e| format!("bad id {id:?}: {e}"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("bad offset {value:?}: {e}"))?;
    Ok((id, value))
}

impl Cli {
    fn config(&self) -> DecoderConfig {
        DecoderConfig {
            unit: if self.fahrenheit {
                TemperatureUnit::Fahrenheit
            } else {
                TemperatureUnit::Celsius
            },
            arithmetic: if self.truncate {
                TemperatureArithmetic::Truncating
            } else {
                TemperatureArithmetic::Float
            },
            sync: if self.strict_sync {
                SyncPolicy::Strict
            } else {
                SyncPolicy::Fallback
            },
            checksum: self.checksum.into(),
            ..DecoderConfig::default()
        }
    }

    fn read_input(&self) -> Result<String> {
        if let Some(pulses) = &self.pulses {
            return Ok(pulses.clone());
        }
        match &self.input {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display())),
            None => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("cannot read stdin")?;
                Ok(text)
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "acurite=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<usize> {
    let calibration = CalibrationStore::new();
    for &(id, offset) in &cli.offsets {
        if !calibration.register(id, offset) {
            warn!(id, offset, "duplicate calibration ignored");
        }
    }

    let decoder = AcuriteDecoder::new(cli.config(), calibration)?;
    let text = cli.read_input()?;

    let mut decoded = 0;
    let mut captures = 0;
    for (lineno, line) in text.lines().enumerate() {
        let raw = match parse_pulse_list(line) {
            Ok(raw) if raw.is_empty() => {
                debug!(line = lineno + 1, "no pulse data");
                continue;
            }
            Ok(raw) => raw,
            Err(e) => {
                warn!(line = lineno + 1, %e, "skipping unreadable pulse list");
                continue;
            }
        };
        captures += 1;

        match decoder.decode(&raw) {
            Ok(reading) => {
                decoded += 1;
                println!("{PROTOCOL_ID}: {reading}");
            }
            Err(e) if e.is_rejection() => {
                println!("line {}: not an {DEVICE_DESCRIPTION}: {e}", lineno + 1);
            }
            Err(e) => println!("line {}: {e}", lineno + 1),
        }
    }

    if captures == 0 {
        bail!("no pulse data in input");
    }
    Ok(decoded)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(0) => process::exit(2),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
