//! Decode a single signal-strength payload
//!
//! Usage:
//!   decode_payload [vendor] [firmware] <f0> <f1> <f2> <f3> <f4> <f5> <f6>
//!
//! Example:
//!   RUST_LOG=debug decode_payload samsung apollo 5 10 101 -3 20 1 8

use ril_signal_decoder::{
    DecodeEvent, DecoderConfig, ProfileRegistry, RawStatusMessage, SignalDecoder, FIELD_COUNT,
};
use std::env;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (config, values) = if args.len() == FIELD_COUNT + 2 {
        (DecoderConfig::new().with_profile(&args[0], &args[1]), &args[2..])
    } else {
        (DecoderConfig::new(), &args[..])
    };

    let fields = match values
        .iter()
        .map(|v| v.parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(fields) => fields,
        Err(e) => {
            eprintln!("Invalid field value: {}", e);
            std::process::exit(1);
        }
    };
    let raw = match RawStatusMessage::try_from(&fields[..]) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let registry = ProfileRegistry::builtin();
    let decoder = match SignalDecoder::new(&registry, &config) {
        Ok(decoder) => decoder,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Known profiles:");
            for key in registry.keys() {
                eprintln!("  {}", key);
            }
            std::process::exit(1);
        }
    };

    let decoder = decoder.with_observer(|event: &DecodeEvent| {
        if let DecodeEvent::Corrected { correction, .. } = event {
            println!(
                "  corrected slot {} ({}): {} -> {}",
                correction.position, correction.kind, correction.raw, correction.corrected
            );
        }
    });

    // Round-trip through the wire format the modem uses
    let payload: Vec<u8> = raw.fields.iter().flat_map(|v| v.to_ne_bytes()).collect();
    match decoder.decode_payload(&payload) {
        Ok(signal) => println!("{} -> {}", decoder.profile(), signal),
        Err(e) => eprintln!("Decode error: {}", e),
    }
}
