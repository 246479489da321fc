//! Report generation
//!
//! Renders decoded records as plain text or JSON lines.

use crate::config::{OutputConfig, OutputFormat};
use anyhow::Result;
use ril_signal_decoder::{CanonicalSignalStrength, Correction, RawStatusMessage};
use serde::Serialize;
use std::io::Write;

/// Outcome of decoding one input record
#[derive(Debug, Clone, Serialize)]
pub struct DecodedRecord {
    pub source: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Ok {
        raw: [i32; 7],
        signal: CanonicalSignalStrength,
        corrections: Vec<Correction>,
    },
    Error(String),
}

impl DecodedRecord {
    pub fn decoded(
        source: impl Into<String>,
        raw: &RawStatusMessage,
        signal: CanonicalSignalStrength,
        corrections: Vec<Correction>,
    ) -> Self {
        Self {
            source: source.into(),
            outcome: Outcome::Ok {
                raw: raw.fields,
                signal,
                corrections,
            },
        }
    }

    pub fn failed(source: impl Into<String>, error: impl ToString) -> Self {
        Self {
            source: source.into(),
            outcome: Outcome::Error(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }
}

/// Write all records in the configured format
pub fn write_report<W: Write>(out: &mut W, records: &[DecodedRecord], config: &OutputConfig) -> Result<()> {
    match config.format {
        OutputFormat::Text => write_text(out, records, config.show_corrections),
        OutputFormat::Json => write_json(out, records),
    }
}

fn write_text<W: Write>(out: &mut W, records: &[DecodedRecord], show_corrections: bool) -> Result<()> {
    for record in records {
        match &record.outcome {
            Outcome::Ok {
                raw,
                signal,
                corrections,
            } => {
                writeln!(out, "{}: {:?} -> {}", record.source, raw, signal)?;
                if show_corrections {
                    for c in corrections {
                        writeln!(out, "    slot {} {}: {} -> {}", c.position, c.kind, c.raw, c.corrected)?;
                    }
                }
            }
            Outcome::Error(e) => writeln!(out, "{}: error: {}", record.source, e)?,
        }
    }

    let failed = records.iter().filter(|r| r.is_error()).count();
    writeln!(out, "{} record(s), {} failed", records.len(), failed)?;
    Ok(())
}

fn write_json<W: Write>(out: &mut W, records: &[DecodedRecord]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ril_signal_decoder::CorrectionKind;

    fn sample() -> Vec<DecodedRecord> {
        let raw = RawStatusMessage::new([5, 10, 101, -3, 20, 1, 8]);
        vec![
            DecodedRecord::decoded(
                "hex#1",
                &raw,
                CanonicalSignalStrength::new([5, 10, 98, 3, 20, 1, 8], false),
                vec![Correction {
                    position: 2,
                    kind: CorrectionKind::RangeRemap,
                    raw: 101,
                    corrected: 98,
                }],
            ),
            DecodedRecord::failed("hex#2", "Buffer underflow: need 28 bytes, only 27 available"),
        ]
    }

    #[test]
    fn test_text_report() {
        let mut out = Vec::new();
        write_report(&mut out, &sample(), &OutputConfig::default()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("hex#1: [5, 10, 101, -3, 20, 1, 8] -> gsm=5 ber=10 cdma_dbm=98"));
        assert!(text.contains("    slot 2 RangeRemap: 101 -> 98"));
        assert!(text.contains("hex#2: error: Buffer underflow"));
        assert!(text.ends_with("2 record(s), 1 failed\n"));
    }

    #[test]
    fn test_text_report_without_corrections() {
        let config = OutputConfig {
            format: OutputFormat::Text,
            show_corrections: false,
        };
        let mut out = Vec::new();
        write_report(&mut out, &sample(), &config).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains("RangeRemap"));
    }

    #[test]
    fn test_json_report() {
        let config = OutputConfig {
            format: OutputFormat::Json,
            show_corrections: true,
        };
        let mut out = Vec::new();
        write_report(&mut out, &sample(), &config).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["source"], "hex#1");
        assert_eq!(lines[0]["ok"]["signal"]["metrics"][2], 98);
        assert_eq!(lines[0]["ok"]["signal"]["is_gsm"], false);
        assert_eq!(lines[0]["ok"]["corrections"][0]["kind"], "RangeRemap");
        assert!(lines[1]["error"].as_str().unwrap().starts_with("Buffer underflow"));
    }
}
