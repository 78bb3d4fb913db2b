//! Stable object ids and the per-attempt activation table.
//!
//! Ids are handed out once when a level is spawned and never reused, so a
//! checkpoint can record "these triggers already fired" as a plain id list
//! and a later respawn can replay it against the same objects.

use std::collections::HashSet;

use bevy_ecs::prelude::*;

/// Allocates object ids and tracks which triggers have fired this attempt.
#[derive(Resource, Debug, Clone, Default)]
pub struct ObjectIdHandler {
    next_id: i64,
    activated: HashSet<i64>,
}

impl ObjectIdHandler {
    /// Hand out the next id. Ids are unique for the lifetime of the handler.
    pub fn assign(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Record that the object with `id` has fired.
    pub fn activate(&mut self, id: i64) {
        self.activated.insert(id);
    }

    /// Whether the object with `id` has fired this attempt.
    #[must_use]
    pub fn is_activated(&self, id: i64) -> bool {
        self.activated.contains(&id)
    }

    /// Forget every activation. Used on non-practice respawns.
    pub fn clear_activations(&mut self) {
        self.activated.clear();
    }

    /// Replace the activation set with a checkpoint's saved ids.
    pub fn restore(&mut self, ids: &[i64]) {
        self.activated = ids.iter().copied().collect();
    }

    /// The current activation set, for saving into a checkpoint.
    #[must_use]
    pub fn snapshot(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.activated.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}
