//! The follow camera: soft Y tracking with border locks, decaying shake,
//! and three channels of timed transitions (offset, rotation, fov).
//!
//! Everything here is driven by `pulse-sim` events and resources; the crate
//! never reads input or level content directly.

mod behaviour;
mod ease;
mod follow;
mod shake;

pub use behaviour::{CameraBehaviour, CameraTuning, MAX_FOV, MIN_FOV};
pub use ease::{EaseInstance, EaseKind, EaseManager, ease_command_system, ease_update_system};
pub use follow::{camera_late_system, camera_respawn_system, camera_y_system};
pub use shake::{ShakeRng, shake_command_system, shake_update_system};
