//! Gamemode portals: path-distance gates that swap the player's mode and
//! manage the camera's Y borders.
//!
//! A portal with a border height applies borders centred on itself; one
//! without removes whatever borders are active. Border edges are rounded to
//! whole units and clamped to the playfield so the camera lock never aims
//! above [`BorderState::MAX_HEIGHT`] or below the ground.

use bevy_ecs::prelude::*;
use glam::Vec3;
use pulse_sim::{BorderState, Gamemode, GamemodeRequest, PlayerState, RespawnEvent};
use tracing::debug;

/// A portal placed in the level.
#[derive(Component, Debug, Clone)]
pub struct Portal {
    /// Stable id from the [`ObjectIdHandler`](crate::ObjectIdHandler).
    pub id: i64,
    /// Path distance at which the portal takes effect.
    pub distance: f32,
    /// World position, the vertical centre for border placement.
    pub position: Vec3,
    /// The mode to switch to.
    pub target: Gamemode,
    /// Border height to apply, or `None` to remove borders.
    pub border_distance: Option<f32>,
    /// Size flag to apply on entry, or `None` to leave it unchanged.
    pub set_small: Option<bool>,
    /// The player has crossed this portal since the last respawn.
    pub entered: bool,
}

impl Portal {
    /// The border range this portal would apply, rounded and clamped the
    /// same way regardless of where the portal sits.
    #[must_use]
    pub fn border_range(&self, border_distance: f32) -> (f32, f32) {
        let max_y = (self.position.y + border_distance / 2.0)
            .clamp(border_distance, BorderState::MAX_HEIGHT)
            .round();
        let min_y = (self.position.y - border_distance / 2.0)
            .clamp(0.0, BorderState::MAX_HEIGHT - border_distance)
            .round();
        (min_y, max_y)
    }

    fn apply(&self, borders: &mut BorderState, player: &mut PlayerState) {
        match self.border_distance {
            Some(distance) => {
                let (min_y, max_y) = self.border_range(distance);
                borders.apply(min_y, max_y);
            }
            None => borders.remove(),
        }
        if let Some(small) = self.set_small {
            player.is_small = small;
        }
    }
}

/// Fires portals whose distance the player has crossed. Runs in the Update
/// stage, before the gamemode handler consumes requests.
pub fn portal_system(
    mut portals: Query<&mut Portal>,
    mut player: ResMut<PlayerState>,
    mut borders: ResMut<BorderState>,
    mut requests: EventWriter<GamemodeRequest>,
) {
    for mut portal in &mut portals {
        if portal.entered || player.dead || player.traveled_distance <= portal.distance {
            continue;
        }
        portal.entered = true;
        debug!(id = portal.id, target = ?portal.target, "portal entered");
        requests.send(GamemodeRequest(portal.target));
        portal.apply(&mut borders, &mut player);
    }
}

/// Re-arms portals on respawn and replays the border state the respawn
/// point sits in: the last portal at or before the restored distance wins,
/// and with no portal behind the player borders come off.
pub fn portal_respawn_system(
    mut respawns: EventReader<RespawnEvent>,
    mut portals: Query<&mut Portal>,
    mut player: ResMut<PlayerState>,
    mut borders: ResMut<BorderState>,
) {
    if respawns.read().next().is_none() {
        return;
    }
    let traveled = player.traveled_distance;
    let mut last_entered: Option<Mut<Portal>> = None;
    for mut portal in &mut portals {
        portal.entered = portal.distance < traveled;
        if portal.entered
            && last_entered
                .as_ref()
                .is_none_or(|p| p.distance < portal.distance)
        {
            last_entered = Some(portal);
        }
    }
    match last_entered {
        Some(portal) => portal.apply(&mut borders, &mut player),
        None => borders.remove(),
    }
}
