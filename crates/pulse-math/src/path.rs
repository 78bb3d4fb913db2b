//! Level path: a polyline with an arc-length table mapping a 1-D traveled
//! distance to a 3-D world position and back.
//!
//! The runner moves along a fixed path; everything that needs a position
//! (player, camera target, trigger placement) queries this table instead of
//! integrating its own transform.

use glam::Vec3;

/// A fixed polyline path with precomputed cumulative segment lengths.
///
/// Degenerate (zero-length) segments are skipped at construction so every
/// stored segment has a well-defined direction.
#[derive(Debug, Clone)]
pub struct LevelPath {
    points: Vec<Vec3>,
    /// Cumulative distance from the path start to each point.
    /// `cumulative[0] == 0.0`, `cumulative.last() == length`.
    cumulative: Vec<f32>,
}

impl LevelPath {
    /// Build a path from an ordered list of waypoints.
    ///
    /// Fewer than two distinct points produce a single-point path whose
    /// length is zero; every query then returns that point.
    #[must_use]
    pub fn new(waypoints: &[Vec3]) -> Self {
        let mut points: Vec<Vec3> = Vec::with_capacity(waypoints.len());
        for &p in waypoints {
            match points.last() {
                Some(last) if last.distance_squared(p) <= f32::EPSILON => {}
                _ => points.push(p),
            }
        }
        if points.is_empty() {
            points.push(Vec3::ZERO);
        }

        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0_f32;
        cumulative.push(0.0);
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }

        Self { points, cumulative }
    }

    /// A straight path along +X of the given length, starting at the origin.
    #[must_use]
    pub fn straight(length: f32) -> Self {
        Self::new(&[Vec3::ZERO, Vec3::new(length.max(0.0), 0.0, 0.0)])
    }

    /// Total arc length of the path.
    #[must_use]
    pub fn length(&self) -> f32 {
        *self.cumulative.last().unwrap_or(&0.0)
    }

    /// World position at the given traveled distance.
    ///
    /// Distances are clamped to `[0, length]`.
    #[must_use]
    pub fn position_at(&self, distance: f32) -> Vec3 {
        let n = self.points.len();
        if n == 1 {
            return self.points[0];
        }
        let d = distance.clamp(0.0, self.length());

        // Binary search for the segment containing d.
        let i = match self
            .cumulative
            .binary_search_by(|probe| probe.partial_cmp(&d).unwrap_or(std::cmp::Ordering::Less))
        {
            Ok(exact) => exact.min(n - 2),
            Err(insert) => insert.saturating_sub(1).min(n - 2),
        };

        let seg_start = self.cumulative[i];
        let seg_len = self.cumulative[i + 1] - seg_start;
        let t = if seg_len > 0.0 {
            (d - seg_start) / seg_len
        } else {
            0.0
        };
        self.points[i].lerp(self.points[i + 1], t)
    }

    /// Traveled distance of the closest point on the path to `position`.
    ///
    /// Projects onto every segment and keeps the nearest hit, so a trigger
    /// placed in the world resolves to the distance the player must reach.
    #[must_use]
    pub fn distance_of(&self, position: Vec3) -> f32 {
        let n = self.points.len();
        if n == 1 {
            return 0.0;
        }

        let mut best_dist_sq = f32::MAX;
        let mut best_traveled = 0.0_f32;

        for i in 0..n - 1 {
            let a = self.points[i];
            let b = self.points[i + 1];
            let ab = b - a;
            let len_sq = ab.length_squared();
            let t = if len_sq > 0.0 {
                ((position - a).dot(ab) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let closest = a + ab * t;
            let dist_sq = position.distance_squared(closest);
            if dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                best_traveled = self.cumulative[i] + (self.cumulative[i + 1] - self.cumulative[i]) * t;
            }
        }

        best_traveled
    }

    /// The path's starting position.
    #[must_use]
    pub fn start_position(&self) -> Vec3 {
        self.points[0]
    }
}
