use truth42::preprocessor::{Preprocessor, TmPacket, TruthPreprocessor};
use truth42::{Error, TruthRecord, RECORD_LEN};

/// Encode a record into its 276-byte wire form.
fn encode(record: &TruthRecord) -> Vec<u8> {
    let mut buf = Vec::with_capacity(RECORD_LEN);
    let mut put = |v: f64| buf.extend_from_slice(&v.to_le_bytes());
    put(record.dyn_time);
    record.pos_n.iter().for_each(|&v| put(v));
    record.svb.iter().for_each(|&v| put(v));
    record.bvb.iter().for_each(|&v| put(v));
    record.hvb.iter().for_each(|&v| put(v));
    record.wn.iter().for_each(|&v| put(v));
    record.qn.iter().for_each(|&v| put(v));
    put(record.mass);
    record.cm.iter().for_each(|&v| put(v));
    for row in &record.inertia {
        row.iter().for_each(|&v| put(v));
    }
    buf.extend_from_slice(&record.eclipse.to_le_bytes());
    buf.extend_from_slice(&record.atmo_density.to_le_bytes());
    assert_eq!(buf.len(), RECORD_LEN);
    buf
}

/// A record with a distinct value in every element, LEO-ish magnitudes.
fn sample_record() -> TruthRecord {
    TruthRecord {
        dyn_time: 86_400.125,
        pos_n: [6_778_137.0, -1_234.5, 42.0],
        svb: [0.1, 0.2, 0.3],
        bvb: [1.0e-5, -2.0e-5, 3.0e-5],
        hvb: [0.01, 0.02, 0.03],
        wn: [-0.001, 0.002, -0.003],
        qn: [0.5, -0.5, 0.5, 0.5],
        mass: 1_550.25,
        cm: [0.01, -0.02, 0.03],
        inertia: [
            [1000.0, 1.0, 2.0],
            [1.0, 2000.0, 3.0],
            [2.0, 3.0, 3000.0],
        ],
        eclipse: 1,
        atmo_density: 3.5e-12,
    }
}

#[test]
fn round_trip() {
    let record = sample_record();
    let decoded = TruthRecord::decode(&encode(&record)).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn round_trip_preserves_float_bits() {
    let mut record = sample_record();
    record.dyn_time = f64::from_bits(0x7ff8_0000_0000_0001); // NaN payload
    record.atmo_density = -0.0;

    let decoded = TruthRecord::decode(&encode(&record)).unwrap();
    assert_eq!(
        decoded.dyn_time.to_bits(),
        record.dyn_time.to_bits(),
        "NaN payload must survive decode"
    );
    assert_eq!(decoded.atmo_density.to_bits(), (-0.0f64).to_bits());
}

#[test]
fn short_buffer_reports_length() {
    let buf = encode(&sample_record());
    match TruthRecord::decode(&buf[..200]) {
        Err(Error::ShortBuffer { actual, expected }) => {
            assert_eq!(actual, 200);
            assert_eq!(expected, RECORD_LEN);
        }
        other => panic!("expected ShortBuffer, got {other:?}"),
    }
}

#[test]
fn trailing_bytes_ignored() {
    let record = sample_record();
    let mut buf = encode(&record);
    buf.extend_from_slice(&encode(&record)); // a second record's worth of noise

    let decoded = TruthRecord::decode(&buf).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn preprocessor_stamps_generation_time() {
    let record = sample_record(); // dyn_time = 86400.125
    let pp = TruthPreprocessor::default();

    let packet = pp.process(TmPacket::new(encode(&record))).unwrap();
    assert_eq!(packet.generation_time, Some(946_728_000_000 + 86_400_125));
}

#[test]
fn preprocessor_drops_short_packet() {
    let pp = TruthPreprocessor::default();
    let buf = encode(&sample_record());
    assert!(pp.process(TmPacket::new(buf[..RECORD_LEN - 1].to_vec())).is_none());
}
