//! Math foundations for the Pulse runner: easing curves, scalar helpers,
//! and the level path that maps traveled distance to world positions.

mod easing;
mod path;
mod range;

pub use easing::{EaseCurve, EaseSettings};
pub use path::LevelPath;
pub use range::{lerp, map_range, move_towards};
