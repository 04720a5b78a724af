//! Integration tests for fragment reassembly and frame decoding
//!
//! Covers:
//! - Multi-fragment frames for both protocol variants
//! - Rejected fragments leaving the reassembly state untouched
//! - Orphan and foreign-reference fragments

#![cfg(test)]

mod common;

use impactguard_core::{
    time, Decoded, FrameDecoder, FrameError, ProtocolConfig,
};

use common::frames::{fragment, nine_axis_payload, six_axis_payload, Row};
use proptest::prelude::*;

fn decode_all(decoder: &mut FrameDecoder, fragments: &[Vec<u8>]) -> Decoded {
    let (last, head) = fragments.split_last().expect("at least one fragment");
    for f in head {
        let pending = decoder.decode(f).expect("buffered");
        assert!(matches!(pending, Decoded::Pending { .. }));
    }
    decoder.decode(last).expect("final fragment decodes")
}

fn sample_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            let k = i as f32;
            Row::new([k, -k, 9.81 + k], [0.1 * k, 0.0, -0.1 * k]).with_mag([30.0, k, -k])
        })
        .collect()
}

#[test]
fn test_six_axis_three_fragments() {
    let rows = sample_rows(6);
    let payload = six_axis_payload(10_000, &rows);
    let fragments = fragment(0x21, &payload, 3);
    assert_eq!(fragments.len(), 3);

    let mut decoder = FrameDecoder::new(ProtocolConfig::six_axis());
    let Decoded::Frame(frame) = decode_all(&mut decoder, &fragments) else {
        panic!("expected a frame");
    };

    assert_eq!(frame.reference, 0x21);
    assert_eq!(frame.sample_rate_hz, 78);
    assert_eq!(frame.rows.len(), 6);
    for (i, (raw, row)) in frame.rows.iter().zip(rows.iter()).enumerate() {
        assert_eq!(raw.accel, row.accel);
        assert_eq!(raw.gyro, row.gyro);
        assert_eq!(raw.mag, None);
        assert_eq!(raw.timestamp, time::row_timestamp(10_000, i, 78));
    }
    assert!(decoder.state().is_idle());
}

#[test]
fn test_nine_axis_full_frame() {
    let rows = sample_rows(8);
    let payload = nine_axis_payload(500, &rows);
    let fragments = fragment(0x05, &payload, 2);

    let mut decoder = FrameDecoder::new(ProtocolConfig::nine_axis());
    let Decoded::Frame(frame) = decode_all(&mut decoder, &fragments) else {
        panic!("expected a frame");
    };

    assert_eq!(frame.rows.len(), 8);
    assert_eq!(frame.dropped_rows, 0);
    assert_eq!(frame.sample_rate_hz, 104);
    assert_eq!(frame.rows[7].mag, Some(rows[7].mag));
    assert_eq!(frame.rows[7].timestamp, 500 + 67);
}

#[test]
fn test_frame_restart_discards_partial() {
    let mut decoder = FrameDecoder::new(ProtocolConfig::six_axis());
    let stale = fragment(0x01, &six_axis_payload(0, &sample_rows(4)), 2);
    decoder.decode(&stale[0]).unwrap();

    let fresh = fragment(0x02, &six_axis_payload(777, &sample_rows(2)), 2);
    let Decoded::Frame(frame) = decode_all(&mut decoder, &fresh) else {
        panic!("expected a frame");
    };
    assert_eq!(frame.reference, 0x02);
    assert_eq!(frame.base_timestamp, 777);
    assert_eq!(frame.rows.len(), 2);
}

#[test]
fn test_interleaved_reference_is_ignored() {
    let mut decoder = FrameDecoder::new(ProtocolConfig::six_axis());
    let ours = fragment(0x0a, &six_axis_payload(0, &sample_rows(4)), 2);
    let theirs = fragment(0x0b, &six_axis_payload(0, &sample_rows(4)), 2);

    decoder.decode(&ours[0]).unwrap();
    assert_eq!(
        decoder.decode(&theirs[1]),
        Err(FrameError::ReferenceMismatch { expected: 0x0a, found: 0x0b })
    );

    let decoded = decoder.decode(&ours[1]).unwrap();
    assert_eq!(decoded.rows().len(), 4);
}

#[test]
fn test_orphans_before_first() {
    let mut decoder = FrameDecoder::new(ProtocolConfig::six_axis());
    let frags = fragment(0x01, &six_axis_payload(0, &sample_rows(6)), 3);

    assert_eq!(decoder.decode(&frags[1]), Err(FrameError::OrphanFragment { tag: 0x02 }));
    assert_eq!(decoder.decode(&frags[2]), Err(FrameError::OrphanFragment { tag: 0x03 }));
    assert!(decoder.state().is_idle());
}

#[test]
fn test_non_finite_rows_are_dropped() {
    let mut rows = sample_rows(8);
    rows[1].accel[0] = f32::NAN;
    rows[6].gyro[2] = f32::NEG_INFINITY;
    let payload = six_axis_payload(2_000, &rows);

    let mut decoder = FrameDecoder::new(ProtocolConfig::six_axis());
    let Decoded::Frame(frame) = decode_all(&mut decoder, &fragment(0x44, &payload, 3)) else {
        panic!("expected a frame");
    };

    assert_eq!(frame.rows.len(), 6);
    assert_eq!(frame.dropped_rows, 2);
    assert!(frame.rows.iter().all(|r| r.is_finite()));
    // Survivors keep the timestamps of their original row positions
    assert_eq!(frame.rows[1].timestamp, time::row_timestamp(2_000, 2, 104));
    assert!(decoder.state().is_idle());
}

proptest! {
    #[test]
    fn prop_reassembly_matches_rows(
        values in proptest::collection::vec(-200.0f32..200.0, 6..=6 * 20),
        base in 0u32..4_000_000_000,
        pieces in 2usize..12,
        reference in any::<u8>(),
    ) {
        let rows: Vec<Row> = values
            .chunks_exact(6)
            .map(|c| Row::new([c[0], c[1], c[2]], [c[3], c[4], c[5]]))
            .collect();
        let payload = six_axis_payload(base, &rows);
        let fragments = fragment(reference, &payload, pieces);

        let mut decoder = FrameDecoder::new(ProtocolConfig::six_axis());
        let decoded = decode_all(&mut decoder, &fragments);
        let rate = rows.len() as u32 * 13;

        prop_assert_eq!(decoded.rows().len(), rows.len());
        for (i, (raw, row)) in decoded.rows().iter().zip(rows.iter()).enumerate() {
            prop_assert_eq!(raw.accel, row.accel);
            prop_assert_eq!(raw.gyro, row.gyro);
            prop_assert_eq!(raw.timestamp, time::row_timestamp(base, i, rate));
        }
        prop_assert!(decoder.state().is_idle());
    }

    #[test]
    fn prop_invalid_fragment_leaves_state(
        body in proptest::collection::vec(any::<u8>(), 0..200),
        tag in any::<u8>(),
    ) {
        let mut fragment_bytes = vec![tag, 0x33];
        fragment_bytes.extend_from_slice(&body);

        let len_ok = (6..=150).contains(&fragment_bytes.len());
        let tag_ok = (1..=3).contains(&tag);
        prop_assume!(!(len_ok && tag_ok));

        let mut decoder = FrameDecoder::new(ProtocolConfig::six_axis());
        decoder.decode(&[0x01, 0x33, 1, 2, 3, 4, 5, 6]).unwrap();
        let before = decoder.state().clone();

        prop_assert!(decoder.decode(&fragment_bytes).is_err());
        prop_assert_eq!(decoder.state().payload(), before.payload());
        prop_assert_eq!(decoder.state().reference(), before.reference());
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(
        stream in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..160), 0..40),
    ) {
        let mut decoder = FrameDecoder::new(ProtocolConfig::nine_axis());
        for f in &stream {
            let _ = decoder.decode(f);
            prop_assert!(decoder.state().len() <= 512);
        }
    }
}
