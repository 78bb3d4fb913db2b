//! Frame-coherent keyboard state tracker.
//!
//! [`KeyboardState`] accumulates winit [`KeyEvent`]s during a frame and
//! answers [`PressMode`] queries for any physical key: held, just pressed
//! this frame, or just released this frame.
//!
//! Physical key codes are used throughout so the gameplay keys work
//! identically regardless of the user's keyboard layout.

use crate::PressMode;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is a repeat event.
    pub repeat: bool,
}

/// Tracks per-frame keyboard state using physical (scan-code) keys.
///
/// # Usage
///
/// 1. Forward every [`KeyEvent`] to [`process_event`](Self::process_event).
/// 2. Query with [`pressed`](Self::pressed).
/// 3. Call [`clear_transients`](Self::clear_transients) at the end of each frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<PhysicalKey>,
    just_pressed: HashSet<PhysicalKey>,
    just_released: HashSet<PhysicalKey>,
}

impl KeyboardState {
    /// Creates a new `KeyboardState` with no keys pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes a winit [`KeyEvent`], updating internal state.
    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Processes a [`RawKeyEvent`] (platform-independent, test-friendly).
    ///
    /// Repeat events are ignored so `Down` stays a single-frame edge.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                self.held.insert(event.key);
                self.just_pressed.insert(event.key);
            }
            ElementState::Released => {
                self.held.remove(&event.key);
                self.just_released.insert(event.key);
            }
        }
    }

    /// Press-mode query for a physical key code.
    #[must_use]
    pub fn pressed(&self, key: KeyCode, mode: PressMode) -> bool {
        let key = PhysicalKey::Code(key);
        match mode {
            PressMode::Hold => self.held.contains(&key),
            PressMode::Down => self.just_pressed.contains(&key),
            PressMode::Up => self.just_released.contains(&key),
        }
    }

    /// Whether any key at all satisfies the given press mode this frame.
    #[must_use]
    pub fn pressed_any(&self, mode: PressMode) -> bool {
        match mode {
            PressMode::Hold => !self.held.is_empty(),
            PressMode::Down => !self.just_pressed.is_empty(),
            PressMode::Up => !self.just_released.is_empty(),
        }
    }

    /// Clears the just-pressed and just-released sets. Call at end of frame.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
