//! Camera shake: a periodically-refreshed random offset whose magnitude
//! decays linearly over the shake's duration.

use bevy_ecs::prelude::*;
use glam::Vec3;
use pulse_sim::{CameraShake, TimeRes};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::behaviour::CameraBehaviour;

/// Rng used for shake offsets. A resource so tests can seed it.
#[derive(Resource, Debug)]
pub struct ShakeRng(pub SmallRng);

impl Default for ShakeRng {
    fn default() -> Self {
        Self(SmallRng::from_entropy())
    }
}

/// Starts shakes requested by trigger events. A new shake replaces the
/// current one outright.
pub fn shake_command_system(
    mut events: EventReader<CameraShake>,
    mut camera: ResMut<CameraBehaviour>,
) {
    for event in events.read() {
        debug!(
            strength = event.strength,
            frequency = event.frequency,
            length = event.length,
            "camera shake started"
        );
        camera.shake_strength = event.strength;
        camera.shake_frequency = event.frequency;
        camera.shake_frequency_timer = 0.0;
        camera.shake_length = event.length;
        camera.shake_length_timer = event.length;
    }
}

/// Advances the running shake: refreshes the random offset at the shake
/// frequency, scales it by the remaining fraction of the duration, and
/// zeroes everything once the duration elapses.
pub fn shake_update_system(
    time: Res<TimeRes>,
    mut rng: ResMut<ShakeRng>,
    mut camera: ResMut<CameraBehaviour>,
) {
    if camera.shake_length_timer <= 0.0 {
        return;
    }
    camera.shake_length_timer -= time.delta;
    if camera.shake_length_timer <= 0.0 {
        camera.stop_shake();
        return;
    }

    camera.shake_frequency_timer -= time.delta;
    if camera.shake_frequency_timer <= 0.0 && camera.shake_frequency > 0.0 {
        camera.shake_frequency_timer = 1.0 / camera.shake_frequency;
        let falloff = camera.shake_length_timer / camera.shake_length;
        let amplitude = camera.shake_strength * falloff;
        camera.shake_offset = Vec3::new(
            rng.0.gen_range(-1.0..=1.0),
            rng.0.gen_range(-1.0..=1.0),
            0.0,
        ) * amplitude;
    }
}
