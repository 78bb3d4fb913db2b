//! World factory function and core resource registration.

use bevy_ecs::prelude::*;

use crate::events::register_events;
use crate::state::{BorderState, InputSnapshot, PlayerState, PracticeState};
use crate::time::TimeRes;

/// Registers the core simulation resources and event queues into the given
/// world with default values.
pub fn register_core_resources(world: &mut World) {
    world.insert_resource(TimeRes::default());
    world.insert_resource(PlayerState::default());
    world.insert_resource(PracticeState::default());
    world.insert_resource(BorderState::default());
    world.insert_resource(InputSnapshot::default());
    register_events(world);
}

/// Creates and returns a fully initialized world with all core resources
/// and event queues pre-inserted.
#[must_use]
pub fn create_world() -> World {
    let mut world = World::new();
    register_core_resources(&mut world);
    world
}
