/// Encoded size of one measure value.
pub const MEASURE_LEN: usize = 8;

/// Big-endian IEEE-754 encoding of a score. Lossless, NaN payloads included.
pub fn encode_measure(value: f64) -> [u8; MEASURE_LEN] {
    value.to_be_bytes()
}

/// Inverse of [`encode_measure`]. `None` unless `bytes` is exactly 8 bytes long.
pub fn decode_measure(bytes: &[u8]) -> Option<f64> {
    let raw: [u8; MEASURE_LEN] = bytes.try_into().ok()?;
    Some(f64::from_be_bytes(raw))
}
