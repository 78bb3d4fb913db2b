//! The gamemode handler: owns which movement behaviour is active, switches
//! between them disable-then-enable, and edge-detects the gravity and size
//! flags so each change is announced exactly once.

use bevy_ecs::prelude::*;
use pulse_sim::{
    Gamemode, GamemodeChanged, GamemodeRequest, GravityChanged, PlayerState, RespawnEvent,
    SizeChanged,
};
use tracing::debug;

/// Cube behaviour state: gravity plus tap-to-jump while grounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubeBehaviour {
    /// Resting on the floor (or ceiling while flipped).
    pub grounded: bool,
}

impl CubeBehaviour {
    fn on_enable(&mut self) {
        self.grounded = false;
    }

    fn on_disable(&mut self) {
        self.grounded = false;
    }
}

/// Ship behaviour state: hold-to-climb. Stateless for now, kept as a struct
/// so the dispatch reads the same for every mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShipBehaviour;

impl ShipBehaviour {
    fn on_enable(&mut self) {}

    fn on_disable(&mut self) {}
}

/// Owns the active gamemode and the per-mode behaviour state.
///
/// At most one behaviour is active; [`change_gamemode`](Self::change_gamemode)
/// always disables the old one before enabling the new, and a same-mode call
/// runs the cycle anyway so the behaviour re-enables fresh.
#[derive(Resource, Debug, Clone)]
pub struct GamemodeHandler {
    current: Gamemode,
    /// Mode the level starts in; non-practice respawns return to it.
    pub start_gamemode: Gamemode,
    old_upside_down: bool,
    old_is_small: bool,
    /// Cube behaviour state.
    pub cube: CubeBehaviour,
    /// Ship behaviour state.
    pub ship: ShipBehaviour,
}

impl GamemodeHandler {
    /// Build a handler starting (and restarting) in `start_gamemode`.
    #[must_use]
    pub fn new(start_gamemode: Gamemode) -> Self {
        Self {
            current: start_gamemode,
            start_gamemode,
            old_upside_down: false,
            old_is_small: false,
            cube: CubeBehaviour::default(),
            ship: ShipBehaviour::default(),
        }
    }

    /// The active mode.
    #[must_use]
    pub fn current(&self) -> Gamemode {
        self.current
    }

    fn disable(&mut self, mode: Gamemode) {
        match mode {
            Gamemode::None => {}
            Gamemode::Cube => self.cube.on_disable(),
            Gamemode::Ship => self.ship.on_disable(),
        }
    }

    fn enable(&mut self, mode: Gamemode) {
        match mode {
            Gamemode::None => {}
            Gamemode::Cube => self.cube.on_enable(),
            Gamemode::Ship => self.ship.on_enable(),
        }
    }

    /// Switch modes: disable the current behaviour, swap, enable the new
    /// one, announce the change.
    pub fn change_gamemode(&mut self, new: Gamemode, changed: &mut EventWriter<GamemodeChanged>) {
        debug!(from = ?self.current, to = ?new, "gamemode change");
        self.disable(self.current);
        self.current = new;
        self.enable(new);
        changed.send(GamemodeChanged(new));
    }

    /// Overwrite the cached edge-detector flags, suppressing notifications
    /// for a state that was restored rather than changed.
    pub fn sync_flags(&mut self, player: &PlayerState) {
        self.old_upside_down = player.upside_down;
        self.old_is_small = player.is_small;
    }
}

impl Default for GamemodeHandler {
    fn default() -> Self {
        Self::new(Gamemode::Cube)
    }
}

/// Consumes mode-switch requests from portals and triggers.
pub fn gamemode_request_system(
    mut requests: EventReader<GamemodeRequest>,
    mut handler: ResMut<GamemodeHandler>,
    mut changed: EventWriter<GamemodeChanged>,
) {
    for request in requests.read() {
        handler.change_gamemode(request.0, &mut changed);
    }
}

/// Per-frame handler update: a no-op while dead, otherwise edge-detects the
/// gravity and size flags against the previous frame and announces each
/// change once.
pub fn gamemode_update_system(
    player: Res<PlayerState>,
    mut handler: ResMut<GamemodeHandler>,
    mut gravity: EventWriter<GravityChanged>,
    mut size: EventWriter<SizeChanged>,
) {
    if player.dead {
        return;
    }
    if player.upside_down != handler.old_upside_down {
        handler.old_upside_down = player.upside_down;
        gravity.send(GravityChanged(player.upside_down));
    }
    if player.is_small != handler.old_is_small {
        handler.old_is_small = player.is_small;
        size.send(SizeChanged(player.is_small));
    }
}

/// Respawn handling: a fresh attempt returns to the start gamemode, a
/// practice respawn returns to the checkpoint's. The switch runs even when
/// the target is already active, so the behaviour re-enables fresh and every
/// respawn announces its gamemode. Cached flags sync to the restored player
/// so the restore itself raises no gravity or size notifications.
pub fn gamemode_respawn_system(
    mut respawns: EventReader<RespawnEvent>,
    player: Res<PlayerState>,
    mut handler: ResMut<GamemodeHandler>,
    mut changed: EventWriter<GamemodeChanged>,
) {
    for respawn in respawns.read() {
        let target = if respawn.practice {
            respawn.checkpoint.gamemode
        } else {
            handler.start_gamemode
        };
        handler.change_gamemode(target, &mut changed);
        handler.sync_flags(&player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::event::Events;
    use bevy_ecs::system::RunSystemOnce;
    use pulse_sim::create_world;

    fn test_world() -> World {
        let mut world = create_world();
        world.insert_resource(GamemodeHandler::default());
        world
    }

    fn drain<E: Event + Clone>(world: &mut World) -> Vec<E> {
        let events = world.resource::<Events<E>>();
        let collected: Vec<E> = events.get_cursor().read(events).cloned().collect();
        collected
    }

    #[test]
    fn test_request_switches_mode_and_announces() {
        let mut world = test_world();
        world.send_event(GamemodeRequest(Gamemode::Ship));
        world.run_system_once(gamemode_request_system).unwrap();
        assert_eq!(
            world.resource::<GamemodeHandler>().current(),
            Gamemode::Ship
        );
        let changed = drain::<GamemodeChanged>(&mut world);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].0, Gamemode::Ship);
    }

    #[test]
    fn test_gravity_edge_fires_exactly_once() {
        let mut world = test_world();
        world.resource_mut::<PlayerState>().upside_down = true;
        world.run_system_once(gamemode_update_system).unwrap();
        world.run_system_once(gamemode_update_system).unwrap();
        assert_eq!(drain::<GravityChanged>(&mut world).len(), 1);
        assert_eq!(drain::<SizeChanged>(&mut world).len(), 0);
    }

    #[test]
    fn test_size_edge_fires_size_not_gravity() {
        let mut world = test_world();
        world.resource_mut::<PlayerState>().is_small = true;
        world.run_system_once(gamemode_update_system).unwrap();
        assert_eq!(drain::<SizeChanged>(&mut world).len(), 1);
        assert_eq!(drain::<GravityChanged>(&mut world).len(), 0);
    }

    #[test]
    fn test_dead_player_gets_no_edge_detection() {
        let mut world = test_world();
        {
            let mut player = world.resource_mut::<PlayerState>();
            player.upside_down = true;
            player.dead = true;
        }
        world.run_system_once(gamemode_update_system).unwrap();
        assert_eq!(drain::<GravityChanged>(&mut world).len(), 0);
    }

    #[test]
    fn test_restored_flags_raise_no_notifications() {
        let mut world = test_world();
        world.resource_mut::<PlayerState>().upside_down = true;
        world
            .resource_mut::<GamemodeHandler>()
            .sync_flags(&PlayerState {
                upside_down: true,
                ..Default::default()
            });
        world.run_system_once(gamemode_update_system).unwrap();
        assert_eq!(drain::<GravityChanged>(&mut world).len(), 0);
    }

    #[test]
    fn test_same_mode_respawn_still_announces_the_gamemode() {
        let mut world = test_world();
        world.resource_mut::<GamemodeHandler>().cube.grounded = true;
        world.send_event(RespawnEvent {
            practice: false,
            checkpoint: pulse_sim::Checkpoint::default(),
        });
        world.run_system_once(gamemode_respawn_system).unwrap();
        let changed = drain::<GamemodeChanged>(&mut world);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].0, Gamemode::Cube);
        // The disable/enable cycle ran, clearing the behaviour state.
        assert!(!world.resource::<GamemodeHandler>().cube.grounded);
    }

    #[test]
    fn test_practice_respawn_restores_checkpoint_gamemode() {
        let mut world = test_world();
        world.send_event(RespawnEvent {
            practice: true,
            checkpoint: pulse_sim::Checkpoint {
                position: glam::Vec3::ZERO,
                traveled_distance: 10.0,
                gamemode: Gamemode::Ship,
                upside_down: true,
                is_small: false,
                cam_state: pulse_sim::CamState::default(),
                activated_ids: vec![],
            },
        });
        world.resource_mut::<PlayerState>().upside_down = true;
        world.run_system_once(gamemode_respawn_system).unwrap();
        assert_eq!(
            world.resource::<GamemodeHandler>().current(),
            Gamemode::Ship
        );
        // The restored gravity flag must not fire a notification afterwards.
        world.run_system_once(gamemode_update_system).unwrap();
        assert_eq!(drain::<GravityChanged>(&mut world).len(), 0);
    }
}
