//! Wire-format builders
//!
//! Produces notification fragments exactly as the helmet firmware sends them:
//! `[tag, reference, payload...]`, with the reassembled payload being a
//! little-endian base timestamp followed by planar accel, gyro and (9-axis)
//! mag blocks.

use impactguard_core::{
    constants::protocol::{TAG_CONTINUATION, TAG_FINAL, TAG_FIRST, MAX_FRAGMENT_LEN, FRAGMENT_HEADER_LEN},
    math::Vec3,
    RawSample,
};

/// One row as the firmware samples it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    pub accel: Vec3,
    pub gyro: Vec3,
    pub mag: Vec3,
}

impl Row {
    pub fn new(accel: Vec3, gyro: Vec3) -> Self {
        Self { accel, gyro, mag: [0.0; 3] }
    }

    pub fn with_mag(mut self, mag: Vec3) -> Self {
        self.mag = mag;
        self
    }

    pub fn from_raw(raw: &RawSample) -> Self {
        Self {
            accel: raw.accel,
            gyro: raw.gyro,
            mag: raw.mag.unwrap_or([0.0; 3]),
        }
    }
}

fn push_vec3(out: &mut Vec<u8>, v: Vec3) {
    for c in v {
        out.extend_from_slice(&c.to_le_bytes());
    }
}

/// Reassembled 6-axis payload
pub fn six_axis_payload(base: u32, rows: &[Row]) -> Vec<u8> {
    let mut out = base.to_le_bytes().to_vec();
    rows.iter().for_each(|r| push_vec3(&mut out, r.accel));
    rows.iter().for_each(|r| push_vec3(&mut out, r.gyro));
    out
}

/// Reassembled 9-axis payload
pub fn nine_axis_payload(base: u32, rows: &[Row]) -> Vec<u8> {
    let mut out = six_axis_payload(base, rows);
    rows.iter().for_each(|r| push_vec3(&mut out, r.mag));
    out
}

/// Split a payload into `count` fragments (FIRST, CONTINUATION..., FINAL)
///
/// `count` is clamped so every fragment is between 6 and 150 bytes and there
/// are at least two.
pub fn fragment(reference: u8, payload: &[u8], count: usize) -> Vec<Vec<u8>> {
    let max_body = MAX_FRAGMENT_LEN - FRAGMENT_HEADER_LEN;
    let min_count = payload.len().div_ceil(max_body).max(2);
    let max_count = (payload.len() / 4).max(min_count);
    let count = count.clamp(min_count, max_count);

    let base = payload.len() / count;
    let extra = payload.len() % count;
    let mut fragments = Vec::with_capacity(count);
    let mut offset = 0;

    for i in 0..count {
        let size = base + usize::from(i < extra);
        let tag = match i {
            0 => TAG_FIRST,
            i if i == count - 1 => TAG_FINAL,
            _ => TAG_CONTINUATION,
        };
        let mut fragment = vec![tag, reference];
        fragment.extend_from_slice(&payload[offset..offset + size]);
        fragments.push(fragment);
        offset += size;
    }
    fragments
}

/// 6-axis frame as two fragments
pub fn six_axis_frame(reference: u8, base: u32, rows: &[Row]) -> Vec<Vec<u8>> {
    fragment(reference, &six_axis_payload(base, rows), 2)
}

/// Period in ms covered by one 6-axis frame (rate = rows × 13 Hz)
pub fn six_axis_frame_period_ms() -> u32 {
    1000 / 13
}
