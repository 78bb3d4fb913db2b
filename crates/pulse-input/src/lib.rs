//! Input abstraction for the Pulse runner.
//!
//! Physical device state ([`KeyboardState`], [`GamepadState`]) is tracked per
//! frame; named [`Binding`]s combine keyboard and gamepad key sets and answer
//! press-mode queries (hold / down / up) with configurable multi-key policies.

mod binding;
mod gamepad;
mod keyboard;

pub use binding::{Binding, BindingSet, CheckMode, KeyBinding};
pub use gamepad::{GamepadButton, GamepadManager, GamepadState};
pub use keyboard::{KeyboardState, RawKeyEvent};

use serde::{Deserialize, Serialize};

/// How a key query interprets the press state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressMode {
    /// The key is held down this frame.
    Hold,
    /// The key transitioned to pressed this frame.
    Down,
    /// The key transitioned to released this frame.
    Up,
}
