//! Scalar interpolation helpers shared by the camera and trigger systems.

/// Linear interpolation between `a` and `b` by factor `t`.
///
/// `t` is not clamped; callers that need clamping do it themselves.
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Remaps `value` from the range `[in_min, in_max]` to `[out_min, out_max]`.
///
/// A degenerate input range (`in_min == in_max`) returns `out_min` instead
/// of dividing by zero.
#[must_use]
pub fn map_range(in_min: f32, in_max: f32, out_min: f32, out_max: f32, value: f32) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    out_min + (out_max - out_min) * ((value - in_min) / span)
}

/// Moves `current` toward `target` by at most `max_delta`, never overshooting.
///
/// A negative `max_delta` pushes the value away from the target, matching
/// the classic game-math convention.
#[must_use]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}
