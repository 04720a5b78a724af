//! Time handling for sensor timestamps
//!
//! The sensor stamps every frame with a 32-bit millisecond counter that starts
//! at an arbitrary value when the subscription begins. Rows inside a frame are
//! stamped by linear interpolation (see [`crate::frame`]), so all timestamps in
//! the pipeline share this single time base.

/// Sensor timestamp in milliseconds (wire time base, not wall clock)
pub type Timestamp = u32;

/// Milliseconds elapsed from `earlier` to `later`
///
/// Returns 0 when `later` precedes `earlier`. Frame ordering across
/// notifications is assumed, not verified, so a backwards step must not turn
/// into a huge positive delta.
pub fn elapsed_ms(earlier: Timestamp, later: Timestamp) -> u32 {
    later.saturating_sub(earlier)
}

/// Time delta between two samples in seconds
pub fn delta_seconds(earlier: Timestamp, later: Timestamp) -> f32 {
    elapsed_ms(earlier, later) as f32 / 1000.0
}

/// Timestamp of row `index` inside a frame sampled at `sample_rate_hz`
///
/// `base + floor(index * 1000 / rate)`. A zero rate stamps every row with the
/// base timestamp.
pub fn row_timestamp(base: Timestamp, index: usize, sample_rate_hz: u32) -> Timestamp {
    if sample_rate_hz == 0 {
        return base;
    }
    let offset = (index as u64 * 1000) / sample_rate_hz as u64;
    base.wrapping_add(offset as u32)
}

/// Lower edge of a window, clamped at the start of the time base
pub fn window_start(center: Timestamp, width_ms: u32) -> Timestamp {
    center.saturating_sub(width_ms)
}

/// Upper edge of a window, clamped at the end of the time base
pub fn window_end(center: Timestamp, width_ms: u32) -> Timestamp {
    center.saturating_add(width_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_never_negative() {
        assert_eq!(elapsed_ms(1000, 1500), 500);
        assert_eq!(elapsed_ms(1500, 1000), 0);
    }

    #[test]
    fn delta_in_seconds() {
        assert_eq!(delta_seconds(0, 250), 0.25);
        assert_eq!(delta_seconds(250, 0), 0.0);
    }

    #[test]
    fn row_interpolation() {
        // 104 Hz: 0, 9, 19, 28 ms
        assert_eq!(row_timestamp(1000, 0, 104), 1000);
        assert_eq!(row_timestamp(1000, 1, 104), 1009);
        assert_eq!(row_timestamp(1000, 2, 104), 1019);
        assert_eq!(row_timestamp(1000, 3, 104), 1028);

        assert_eq!(row_timestamp(1000, 5, 0), 1000);
    }

    #[test]
    fn window_edges_clamp() {
        assert_eq!(window_start(10, 15), 0);
        assert_eq!(window_end(u32::MAX - 5, 15), u32::MAX);
    }
}
