//! Percent progress: the live fraction for the HUD and the best-percent
//! records that feed the save file.

use bevy_ecs::prelude::*;
use pulse_sim::{DeathEvent, PlayerState, PracticeState, WinEvent};
use tracing::info;

use crate::level::LevelRes;

/// Best percents for the loaded level. Percents are fractions in `[0, 1]`.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct LevelProgress {
    /// Best percent reached outside practice mode.
    pub normal_percent: f32,
    /// Best percent reached in practice mode.
    pub practice_percent: f32,
    /// Set when either best improved since the last save.
    pub dirty: bool,
}

impl LevelProgress {
    /// Record an attempt that ended at `percent`, under the mode picked by
    /// `practice`. Keeps the better of old and new.
    pub fn record(&mut self, percent: f32, practice: bool) {
        let slot = if practice {
            &mut self.practice_percent
        } else {
            &mut self.normal_percent
        };
        if percent > *slot {
            *slot = percent;
            self.dirty = true;
        }
    }
}

/// The fraction of the path covered, clamped to `[0, 1]`.
#[must_use]
pub fn current_percent(player: &PlayerState, level: &LevelRes) -> f32 {
    let length = level.path.length();
    if length <= 0.0 {
        return 0.0;
    }
    (player.traveled_distance / length).clamp(0.0, 1.0)
}

/// Records best percents when an attempt ends. A win counts as a full run
/// regardless of where the traveled distance clamped.
pub fn record_progress_system(
    mut deaths: EventReader<DeathEvent>,
    mut wins: EventReader<WinEvent>,
    player: Res<PlayerState>,
    practice: Res<PracticeState>,
    level: Res<LevelRes>,
    mut progress: ResMut<LevelProgress>,
) {
    let died = deaths.read().next().is_some();
    let won = wins.read().next().is_some();
    if !died && !won {
        return;
    }
    let percent = if won {
        1.0
    } else {
        current_percent(&player, &level)
    };
    progress.record(percent, practice.enabled);
    info!(
        percent = percent * 100.0,
        practice = practice.enabled,
        won,
        "attempt ended"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::system::RunSystemOnce;
    use pulse_math::LevelPath;
    use pulse_sim::create_world;

    fn test_world() -> World {
        let mut world = create_world();
        world.insert_resource(LevelRes {
            name: "test".into(),
            path: LevelPath::straight(100.0),
        });
        world.init_resource::<LevelProgress>();
        world
    }

    #[test]
    fn test_record_keeps_the_better_percent() {
        let mut progress = LevelProgress::default();
        progress.record(0.4, false);
        progress.record(0.2, false);
        assert_eq!(progress.normal_percent, 0.4);
        progress.record(0.9, true);
        assert_eq!(progress.practice_percent, 0.9);
        assert_eq!(progress.normal_percent, 0.4);
        assert!(progress.dirty);
    }

    #[test]
    fn test_death_records_current_percent() {
        let mut world = test_world();
        world.resource_mut::<PlayerState>().traveled_distance = 25.0;
        world.send_event(DeathEvent);
        world.run_system_once(record_progress_system).unwrap();
        assert_eq!(world.resource::<LevelProgress>().normal_percent, 0.25);
    }

    #[test]
    fn test_win_records_full_run() {
        let mut world = test_world();
        world.resource_mut::<PlayerState>().traveled_distance = 99.0;
        world.send_event(WinEvent);
        world.run_system_once(record_progress_system).unwrap();
        assert_eq!(world.resource::<LevelProgress>().normal_percent, 1.0);
    }

    #[test]
    fn test_no_event_changes_nothing() {
        let mut world = test_world();
        world.resource_mut::<PlayerState>().traveled_distance = 50.0;
        world.run_system_once(record_progress_system).unwrap();
        assert_eq!(world.resource::<LevelProgress>().normal_percent, 0.0);
        assert!(!world.resource::<LevelProgress>().dirty);
    }
}
