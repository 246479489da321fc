//! Vendor decoding profiles
//!
//! Each profile is a plain function from the raw firmware message to a
//! [`Decoded`] value. Profiles are pure: no logging, no state, no I/O. The
//! corrections they applied are returned alongside the descriptor so the
//! caller can report them.
//!
//! | Profile          | GSM primary | Corrections                         |
//! |------------------|-------------|-------------------------------------|
//! | `samsung/apollo` | no          | slot 3 sign, slot 2 poor-range remap |
//! | `aosp/stock`     | yes         | none                                |

use crate::types::{
    CanonicalSignalStrength, Correction, CorrectionKind, Decoded, ProfileKey, RawStatusMessage,
};

/// Signature shared by every decoding profile
pub type DecodeFn = fn(&RawStatusMessage) -> Decoded;

pub const SAMSUNG: &str = "samsung";
pub const APOLLO: &str = "apollo";
pub const AOSP: &str = "aosp";
pub const STOCK: &str = "stock";

/// Slot carrying the CDMA dBm magnitude
const CDMA_DBM: usize = 2;
/// Slot carrying the CDMA Ec/Io delta
const CDMA_ECIO: usize = 3;

/// Upper edge of the platform's poor-signal band; larger magnitudes are remapped
const POOR_SIGNAL_EDGE: i32 = 95;
const REMAP_BASE: i32 = 96;

pub fn samsung_apollo_key() -> ProfileKey {
    ProfileKey::new(SAMSUNG, APOLLO)
}

pub fn aosp_stock_key() -> ProfileKey {
    ProfileKey::new(AOSP, STOCK)
}

/// Samsung Apollo firmware
///
/// One firmware revision reports Ec/Io with an inverted sign, and the CDMA
/// magnitude uses an extended 95..105 poor range that the platform expects
/// in 95..100. Only meant to run once on raw firmware data.
pub fn decode_samsung_apollo(raw: &RawStatusMessage) -> Decoded {
    let mut fields = raw.fields;
    let mut corrections = Vec::new();

    let ecio = fields[CDMA_ECIO];
    if ecio < 0 {
        // i32::MIN has no positive counterpart and stays as-is
        fields[CDMA_ECIO] = ecio.wrapping_neg();
        corrections.push(Correction {
            position: CDMA_ECIO,
            kind: CorrectionKind::SignNormalization,
            raw: ecio,
            corrected: fields[CDMA_ECIO],
        });
    }

    let dbm = fields[CDMA_DBM];
    if dbm > POOR_SIGNAL_EDGE {
        // dbm >= 96 here, so the subtraction cannot overflow and `/` truncates toward zero
        fields[CDMA_DBM] = (dbm - REMAP_BASE) / 2 + REMAP_BASE;
        corrections.push(Correction {
            position: CDMA_DBM,
            kind: CorrectionKind::RangeRemap,
            raw: dbm,
            corrected: fields[CDMA_DBM],
        });
    }

    Decoded {
        signal: CanonicalSignalStrength::new(fields, false),
        corrections,
    }
}

/// Stock platform behaviour: positional copy, GSM primary
pub fn decode_aosp_stock(raw: &RawStatusMessage) -> Decoded {
    Decoded {
        signal: CanonicalSignalStrength::new(raw.fields, true),
        corrections: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apollo(fields: [i32; 7]) -> [i32; 7] {
        decode_samsung_apollo(&RawStatusMessage::new(fields)).signal.metrics()
    }

    #[test]
    fn test_apollo_scenarios() {
        assert_eq!(apollo([5, 10, 101, -3, 20, 1, 8]), [5, 10, 98, 3, 20, 1, 8]);
        assert_eq!(apollo([0, 0, 0, 0, 0, 0, 0]), [0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(apollo([99, 99, 200, 5, 99, 99, 99]), [99, 99, 148, 5, 99, 99, 99]);
        assert_eq!(apollo([1, 2, 95, 0, 3, 4, 5]), [1, 2, 95, 0, 3, 4, 5]);
    }

    #[test]
    fn test_apollo_remap_edges() {
        assert_eq!(apollo([0, 0, 96, 0, 0, 0, 0])[2], 96);
        assert_eq!(apollo([0, 0, 97, 0, 0, 0, 0])[2], 96);
        assert_eq!(apollo([0, 0, 98, 0, 0, 0, 0])[2], 97);
        assert_eq!(apollo([0, 0, 105, 0, 0, 0, 0])[2], 100);
        assert_eq!(apollo([0, 0, i32::MAX, 0, 0, 0, 0])[2], (i32::MAX - 96) / 2 + 96);
        // Negative magnitudes are left alone
        assert_eq!(apollo([0, 0, -120, 0, 0, 0, 0])[2], -120);
    }

    #[test]
    fn test_apollo_sign_normalization() {
        assert_eq!(apollo([0, 0, 0, -1, 0, 0, 0])[3], 1);
        assert_eq!(apollo([0, 0, 0, 7, 0, 0, 0])[3], 7);
        assert_eq!(apollo([0, 0, 0, i32::MIN, 0, 0, 0])[3], i32::MIN);
    }

    #[test]
    fn test_apollo_records_corrections_in_order() {
        let decoded = decode_samsung_apollo(&RawStatusMessage::new([5, 10, 101, -3, 20, 1, 8]));
        assert!(!decoded.signal.is_gsm());
        assert_eq!(
            decoded.corrections,
            vec![
                Correction {
                    position: 3,
                    kind: CorrectionKind::SignNormalization,
                    raw: -3,
                    corrected: 3,
                },
                Correction {
                    position: 2,
                    kind: CorrectionKind::RangeRemap,
                    raw: 101,
                    corrected: 98,
                },
            ]
        );
    }

    #[test]
    fn test_apollo_not_idempotent() {
        let once = apollo([0, 0, 200, 0, 0, 0, 0]);
        let twice = apollo(once);
        assert_eq!(once[2], 148);
        assert_eq!(twice[2], 122);
    }

    #[test]
    fn test_stock_passthrough() {
        let decoded = decode_aosp_stock(&RawStatusMessage::new([5, 10, 101, -3, 20, 1, 8]));
        assert_eq!(decoded.signal.metrics(), [5, 10, 101, -3, 20, 1, 8]);
        assert!(decoded.signal.is_gsm());
        assert!(decoded.corrections.is_empty());
    }
}
