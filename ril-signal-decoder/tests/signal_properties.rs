// End-to-end checks of the Samsung Apollo profile through the public API
use ril_signal_decoder::{
    DecoderConfig, DecoderError, ProfileRegistry, RawStatusMessage, SignalDecoder, WireByteOrder,
};
use std::sync::Arc;
use std::thread;

fn apollo() -> SignalDecoder {
    SignalDecoder::new(&ProfileRegistry::builtin(), &DecoderConfig::new()).unwrap()
}

fn encode(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_ne_bytes()).collect()
}

#[test]
fn scenario_table() {
    let decoder = apollo();
    let cases: [([i32; 7], [i32; 7]); 4] = [
        ([5, 10, 101, -3, 20, 1, 8], [5, 10, 98, 3, 20, 1, 8]),
        ([0, 0, 0, 0, 0, 0, 0], [0, 0, 0, 0, 0, 0, 0]),
        ([99, 99, 200, 5, 99, 99, 99], [99, 99, 148, 5, 99, 99, 99]),
        ([1, 2, 95, 0, 3, 4, 5], [1, 2, 95, 0, 3, 4, 5]),
    ];

    for (input, expected) in cases {
        let signal = decoder.decode_payload(&encode(&input)).unwrap();
        assert_eq!(signal.metrics(), expected, "input {:?}", input);
        assert!(!signal.is_gsm());
    }
}

#[test]
fn short_buffer_produces_no_descriptor() {
    let decoder = apollo();
    for len in 0..28 {
        let result = decoder.decode_payload(&vec![0u8; len]);
        assert!(
            matches!(result, Err(DecoderError::Underflow { needed: 28, available }) if available == len),
            "length {}",
            len
        );
    }
}

#[test]
fn poor_range_lands_in_platform_band() {
    let decoder = apollo();
    for value in 95..=105 {
        let dbm = decoder
            .decode_message(&RawStatusMessage::new([0, 0, value, 0, 0, 0, 0]))
            .cdma_dbm();
        assert!((95..=100).contains(&dbm), "{} -> {}", value, dbm);
    }
}

#[test]
fn byte_order_is_configurable() {
    let config = DecoderConfig::new().with_byte_order(WireByteOrder::Big);
    let decoder = SignalDecoder::new(&ProfileRegistry::builtin(), &config).unwrap();
    let payload: Vec<u8> = [5i32, 10, 101, -3, 20, 1, 8]
        .iter()
        .flat_map(|v| v.to_be_bytes())
        .collect();
    assert_eq!(
        decoder.decode_payload(&payload).unwrap().metrics(),
        [5, 10, 98, 3, 20, 1, 8]
    );
}

#[test]
fn stock_profile_is_passthrough() {
    let config = DecoderConfig::new().with_profile("aosp", "stock");
    let decoder = SignalDecoder::new(&ProfileRegistry::builtin(), &config).unwrap();
    let signal = decoder.decode_payload(&encode(&[5, 10, 101, -3, 20, 1, 8])).unwrap();
    assert_eq!(signal.metrics(), [5, 10, 101, -3, 20, 1, 8]);
    assert!(signal.is_gsm());
}

#[test]
fn concurrent_decoding_shares_one_decoder() {
    let decoder = Arc::new(apollo());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let decoder = Arc::clone(&decoder);
            thread::spawn(move || {
                let raw = RawStatusMessage::new([i, 0, 96 + i * 10, -i, 0, 0, 0]);
                decoder.decode_message(&raw)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let i = i as i32;
        let signal = handle.join().unwrap();
        assert_eq!(signal.gsm_signal_strength(), i);
        assert_eq!(signal.cdma_dbm(), (i * 10) / 2 + 96);
        assert_eq!(signal.cdma_ecio(), i);
    }
}
