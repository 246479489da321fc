//! RIL Signal Decoder CLI Application
//!
//! Command-line front end for the ril-signal-decoder library. It stands in
//! for the radio interface layer's dispatcher when working with captured
//! signal-strength responses:
//! - Reads binary captures, hex payloads or literal field lists
//! - Selects a vendor/firmware profile from config or flags
//! - Decodes records in parallel and prints a text or JSON report

use anyhow::Result;
use clap::Parser;
use rayon::prelude::*;
use ril_signal_decoder::{DecodeEvent, ProfileRegistry, SignalDecoder, WireByteOrder};
use std::io;
use std::path::PathBuf;

mod config;
mod input;
mod report;

use config::{AppConfig, OutputFormat};
use input::InputRecord;
use report::DecodedRecord;

/// RIL Signal Decoder - Decode modem signal-strength responses
#[derive(Parser, Debug)]
#[command(name = "ril-signal-cli")]
#[command(about = "Decode modem signal-strength responses into canonical descriptors", long_about = None)]
#[command(version)]
struct Args {
    /// Binary capture of back-to-back 28-byte payloads
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// One payload as a hex string (can be repeated)
    #[arg(long, value_name = "HEX")]
    hex: Vec<String>,

    /// Seven comma-separated field values (can be repeated)
    #[arg(long, value_name = "A,B,C,D,E,F,G", allow_hyphen_values = true)]
    values: Vec<String>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Modem vendor (overrides config)
    #[arg(long)]
    vendor: Option<String>,

    /// Firmware profile (overrides config)
    #[arg(long)]
    firmware: Option<String>,

    /// Payload byte order (overrides config)
    #[arg(long, value_enum)]
    byte_order: Option<ByteOrderArg>,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// List the registered decoding profiles and exit
    #[arg(long)]
    list_profiles: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ByteOrderArg {
    Native,
    Little,
    Big,
}

impl From<ByteOrderArg> for WireByteOrder {
    fn from(arg: ByteOrderArg) -> Self {
        match arg {
            ByteOrderArg::Native => WireByteOrder::Native,
            ByteOrderArg::Little => WireByteOrder::Little,
            ByteOrderArg::Big => WireByteOrder::Big,
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("RIL Signal Decoder CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", ril_signal_decoder::VERSION);

    let registry = ProfileRegistry::builtin();

    if args.list_profiles {
        for key in registry.keys() {
            println!("{}", key);
        }
        return Ok(());
    }

    if !has_input(&args) {
        println!("RIL Signal Decoder - No input specified");
        println!("\nQuick Start:");
        println!("  ril-signal-cli --values 5,10,101,-3,20,1,8");
        println!("  ril-signal-cli --input capture.bin --byte-order little");
        println!("\nUse --help for more options");
        return Ok(());
    }

    let app_config = resolve_config(&args)?;
    let records = input::collect(args.input.as_deref(), &args.hex, &args.values)?;
    if records.is_empty() {
        log::warn!("Input contained no records");
    }

    let decoder = SignalDecoder::new(&registry, &app_config.decoder)?.with_observer(log_event);
    let decoded = decode_all(&decoder, &records);

    let failed = decoded.iter().filter(|r| r.is_error()).count();
    if failed > 0 {
        log::warn!("{} of {} record(s) failed to decode", failed, decoded.len());
    }

    let stdout = io::stdout();
    report::write_report(&mut stdout.lock(), &decoded, &app_config.output)?;

    Ok(())
}

/// True when at least one input flag was given
fn has_input(args: &Args) -> bool {
    args.input.is_some() || !args.hex.is_empty() || !args.values.is_empty()
}

/// Merge the config file (if any) with command-line overrides
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(vendor) = &args.vendor {
        app_config.decoder.vendor = vendor.clone();
    }
    if let Some(firmware) = &args.firmware {
        app_config.decoder.firmware = firmware.clone();
    }
    if let Some(order) = args.byte_order {
        app_config.decoder.byte_order = order.into();
    }
    if let Some(format) = args.format {
        app_config.output.format = format;
    }

    log::debug!("Effective configuration: {:?}", app_config);
    Ok(app_config)
}

/// Decode every record in parallel, keeping input order
fn decode_all(decoder: &SignalDecoder, records: &[InputRecord]) -> Vec<DecodedRecord> {
    records
        .par_iter()
        .map(|record| {
            let raw = match record {
                InputRecord::Fields { raw, .. } => *raw,
                InputRecord::Payload { bytes, offset, .. } => {
                    match decoder.read_payload_at(bytes, *offset) {
                        Ok(raw) => raw,
                        Err(e) => return DecodedRecord::failed(record.source(), e),
                    }
                }
            };
            let decoded = decoder.decode_detailed(&raw);
            DecodedRecord::decoded(record.source(), &raw, decoded.signal, decoded.corrections)
        })
        .collect()
}

/// Forward decode events to the log
fn log_event(event: &DecodeEvent) {
    match event {
        DecodeEvent::Corrected { profile, correction } => log::debug!(
            "[{}] slot {} {}: {} -> {}",
            profile,
            correction.position,
            correction.kind,
            correction.raw,
            correction.corrected
        ),
        DecodeEvent::Decoded { profile, signal, .. } => log::trace!("[{}] decoded {}", profile, signal),
        DecodeEvent::Failed {
            profile,
            offset,
            reason,
        } => log::warn!("[{}] payload at offset {} rejected: {}", profile, offset, reason),
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
