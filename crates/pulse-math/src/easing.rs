//! Easing curves and the settings bundle that level objects attach to
//! camera effects.

use serde::{Deserialize, Serialize};

/// Easing curves for timed value transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EaseCurve {
    /// Constant speed, no acceleration.
    Linear,
    /// Slow start, fast end.
    EaseIn,
    /// Fast start, slow end.
    #[default]
    EaseOut,
    /// Slow start, fast middle, slow end.
    EaseInOut,
}

impl EaseCurve {
    /// Map a linear progress value (0.0..=1.0) to an eased value.
    #[must_use]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EaseCurve::Linear => t,
            EaseCurve::EaseIn => t * t,
            EaseCurve::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            EaseCurve::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Duration + curve pair describing one timed transition.
///
/// Level files attach these to trigger effects; the camera's ease manager
/// consumes them when an ease starts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EaseSettings {
    /// Total transition time in seconds. Zero snaps on the first tick.
    pub duration: f32,
    /// Curve shaping the progress value.
    pub curve: EaseCurve,
}

impl Default for EaseSettings {
    fn default() -> Self {
        Self {
            duration: 1.0,
            curve: EaseCurve::default(),
        }
    }
}

impl EaseSettings {
    /// Create settings with the given duration and curve.
    #[must_use]
    pub fn new(duration: f32, curve: EaseCurve) -> Self {
        Self { duration, curve }
    }

    /// Eased progress for `elapsed` seconds into the transition.
    ///
    /// Returns 1.0 once `elapsed` reaches the duration (including the
    /// zero-duration case).
    #[must_use]
    pub fn sample(&self, elapsed: f32) -> f32 {
        if elapsed >= self.duration || self.duration <= 0.0 {
            return 1.0;
        }
        self.curve.apply(elapsed / self.duration)
    }
}
