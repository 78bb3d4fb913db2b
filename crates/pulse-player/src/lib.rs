//! Player simulation: the gamemode handler and its behaviours, fixed-tick
//! movement and vertical physics, death/respawn, win detection, and
//! practice checkpoints.

mod gamemode;
mod movement;
mod practice;
mod spawn;

pub use gamemode::{
    CubeBehaviour, GamemodeHandler, ShipBehaviour, gamemode_request_system,
    gamemode_respawn_system, gamemode_update_system,
};
pub use movement::{PlayerTuning, movement_system, physics_system, win_system};
pub use practice::practice_system;
pub use spawn::death_system;
