//! Pure mapping between pointer coordinates, model values and CSS offsets.

/// Horizontal pointer position projected onto the track, clamped to `[0, 1]`.
pub fn pointer_fraction(pointer_x: f64, track_left: f64, track_width: f64) -> f64 {
    if track_width.is_nan() || track_width <= 0.0 || !pointer_x.is_finite() {
        return 0.0;
    }
    ((pointer_x - track_left) / track_width).clamp(0.0, 1.0)
}

/// Model value at `fraction` of the range; halves round up.
pub fn value_at(fraction: f64, min: i32, max: i32) -> i32 {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let raw = min as f64 + fraction * (max as f64 - min as f64);
    (raw + 0.5).floor() as i32
}

/// Position of `value` along the track, in percent.
pub fn position_percent(value: i32, min: i32, max: i32) -> f64 {
    if max == min {
        return 0.0;
    }
    100.0 * (value as f64 - min as f64) / (max as f64 - min as f64)
}

/// Extent of the filled chunk, in percent of the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkSpan {
    pub left: f64,
    pub width: f64,
}

/// The chunk always runs from the zero reference (clamped into the range) to
/// the value, on whichever side of zero the value lies.
pub fn chunk_span(value: i32, min: i32, max: i32) -> ChunkSpan {
    let at_value = position_percent(value, min, max);
    if value < 0 {
        let end = position_percent(max.min(0), min, max);
        ChunkSpan {
            left: at_value,
            width: end - at_value,
        }
    } else {
        let start = position_percent(min.max(0), min, max);
        ChunkSpan {
            left: start,
            width: at_value - start,
        }
    }
}

pub fn value_label(value: i32, plus: bool) -> String {
    if plus && value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_to_three_quarters() {
        let fraction = pointer_fraction(175.0, 100.0, 100.0);
        assert_eq!(fraction, 0.75);
        assert_eq!(value_at(fraction, -10, 10), 5);
    }

    #[test]
    fn pointer_outside_the_track_clamps_to_bounds() {
        assert_eq!(value_at(pointer_fraction(20.0, 100.0, 200.0), -12, 12), -12);
        assert_eq!(value_at(pointer_fraction(900.0, 100.0, 200.0), -12, 12), 12);
        assert_eq!(value_at(-0.4, 0, 100), 0);
        assert_eq!(value_at(1.7, 0, 100), 100);
    }

    #[test]
    fn value_matches_rounded_projection_across_the_range() {
        for (min, max) in [(-10, 10), (0, 100), (-12, 12), (0, 10), (5, 7)] {
            for step in 0..=40 {
                let fraction = step as f64 / 40.0;
                let expected = (min as f64 + fraction * (max - min) as f64 + 0.5).floor() as i32;
                assert_eq!(value_at(fraction, min, max), expected);
                assert!((min..=max).contains(&value_at(fraction, min, max)));
            }
        }
    }

    #[test]
    fn halves_round_up_even_when_negative() {
        // -10 + 0.375 * 20 = -2.5
        assert_eq!(value_at(0.375, -10, 10), -2);
        // 0 + 0.25 * 10 = 2.5
        assert_eq!(value_at(0.25, 0, 10), 3);
    }

    #[test]
    fn degenerate_track_does_not_divide_by_zero() {
        assert_eq!(pointer_fraction(50.0, 10.0, 0.0), 0.0);
        assert_eq!(position_percent(3, 3, 3), 0.0);
    }

    #[test]
    fn chunk_spans_zero_to_value_on_both_sides() {
        assert_eq!(chunk_span(5, -10, 10), ChunkSpan { left: 50.0, width: 25.0 });
        assert_eq!(chunk_span(-5, -10, 10), ChunkSpan { left: 25.0, width: 25.0 });
        assert_eq!(chunk_span(0, -10, 10), ChunkSpan { left: 50.0, width: 0.0 });
    }

    #[test]
    fn chunk_reference_is_clamped_into_the_range() {
        // All-positive range: chunk grows from the left edge.
        assert_eq!(chunk_span(30, 0, 100), ChunkSpan { left: 0.0, width: 30.0 });
        assert_eq!(chunk_span(15, 10, 20), ChunkSpan { left: 0.0, width: 50.0 });
        // All-negative range: chunk grows from the right edge.
        assert_eq!(chunk_span(-15, -20, -10), ChunkSpan { left: 50.0, width: 50.0 });
    }

    #[test]
    fn plus_sign_only_for_positive_values() {
        assert_eq!(value_label(3, true), "+3");
        assert_eq!(value_label(0, true), "0");
        assert_eq!(value_label(-3, true), "-3");
        assert_eq!(value_label(3, false), "3");
    }
}
