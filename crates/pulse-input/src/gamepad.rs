//! Gamepad input wrapping [`gilrs`].
//!
//! [`GamepadManager`] polls gilrs each frame and folds every connected pad
//! into one aggregated [`GamepadState`]; the runner has a single local player
//! so any pad may drive it. The left stick folds into the d-pad buttons once
//! it leaves the configured deadzone. Hot-plug is handled transparently.

use crate::PressMode;
use gilrs::{Axis, Button, EventType, Gilrs};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Unified button names that work across Xbox / PlayStation / generic pads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamepadButton {
    /// A / Cross
    South,
    /// B / Circle
    East,
    /// Y / Triangle
    North,
    /// X / Square
    West,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    LeftShoulder,
    RightShoulder,
    Start,
    Select,
}

impl GamepadButton {
    fn from_gilrs(button: Button) -> Option<Self> {
        match button {
            Button::South => Some(Self::South),
            Button::East => Some(Self::East),
            Button::North => Some(Self::North),
            Button::West => Some(Self::West),
            Button::DPadUp => Some(Self::DPadUp),
            Button::DPadDown => Some(Self::DPadDown),
            Button::DPadLeft => Some(Self::DPadLeft),
            Button::DPadRight => Some(Self::DPadRight),
            Button::LeftTrigger => Some(Self::LeftShoulder),
            Button::RightTrigger => Some(Self::RightShoulder),
            Button::Start => Some(Self::Start),
            Button::Select => Some(Self::Select),
            _ => None,
        }
    }
}

/// Per-button frame state.
#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    held: bool,
    just_pressed: bool,
    just_released: bool,
}

/// Aggregated button state across all connected gamepads.
#[derive(Debug, Clone, Default)]
pub struct GamepadState {
    buttons: HashMap<GamepadButton, ButtonFrame>,
}

impl GamepadState {
    /// Creates an empty state with nothing pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Press-mode query for a button.
    #[must_use]
    pub fn pressed(&self, button: GamepadButton, mode: PressMode) -> bool {
        let Some(frame) = self.buttons.get(&button) else {
            return false;
        };
        match mode {
            PressMode::Hold => frame.held,
            PressMode::Down => frame.just_pressed,
            PressMode::Up => frame.just_released,
        }
    }

    /// Records a button press. Also used directly by tests.
    pub fn press(&mut self, button: GamepadButton) {
        let frame = self.buttons.entry(button).or_default();
        if !frame.held {
            frame.just_pressed = true;
        }
        frame.held = true;
    }

    /// Records a button release. Also used directly by tests.
    pub fn release(&mut self, button: GamepadButton) {
        let frame = self.buttons.entry(button).or_default();
        if frame.held {
            frame.just_released = true;
        }
        frame.held = false;
    }

    /// Clears the just-pressed and just-released flags. Call at end of frame.
    pub fn clear_transients(&mut self) {
        for frame in self.buttons.values_mut() {
            frame.just_pressed = false;
            frame.just_released = false;
        }
    }
}

/// Owns the gilrs context and pumps its events into a [`GamepadState`].
pub struct GamepadManager {
    gilrs: Option<Gilrs>,
    state: GamepadState,
    deadzone: f32,
    // Digital left-stick direction per axis: -1, 0 or 1.
    stick_x: i8,
    stick_y: i8,
}

impl GamepadManager {
    /// Initializes gilrs. A missing gamepad backend degrades to an inert
    /// manager instead of an error.
    #[must_use]
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(g) => Some(g),
            Err(err) => {
                info!("gamepad backend unavailable: {err}");
                None
            }
        };
        Self {
            gilrs,
            state: GamepadState::new(),
            deadzone: 0.15,
            stick_x: 0,
            stick_y: 0,
        }
    }

    /// Sets the stick deadzone. Stick values inside it read as centred.
    pub fn set_deadzone(&mut self, deadzone: f32) {
        self.deadzone = deadzone.abs();
    }

    /// Drains pending gilrs events into the aggregated state.
    /// Call once per frame before binding queries.
    pub fn poll(&mut self) {
        let Some(mut gilrs) = self.gilrs.take() else {
            return;
        };
        while let Some(event) = gilrs.next_event() {
            match event.event {
                EventType::ButtonPressed(button, _) => {
                    if let Some(unified) = GamepadButton::from_gilrs(button) {
                        self.state.press(unified);
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(unified) = GamepadButton::from_gilrs(button) {
                        self.state.release(unified);
                    }
                }
                EventType::AxisChanged(Axis::LeftStickX, value, _) => self.stick_x_changed(value),
                EventType::AxisChanged(Axis::LeftStickY, value, _) => self.stick_y_changed(value),
                EventType::Connected => info!("gamepad connected"),
                EventType::Disconnected => info!("gamepad disconnected"),
                _ => {}
            }
        }
        self.gilrs = Some(gilrs);
    }

    fn digital(&self, value: f32) -> i8 {
        if value > self.deadzone {
            1
        } else if value < -self.deadzone {
            -1
        } else {
            0
        }
    }

    fn stick_x_changed(&mut self, value: f32) {
        let dir = self.digital(value);
        if dir == self.stick_x {
            return;
        }
        match self.stick_x {
            -1 => self.state.release(GamepadButton::DPadLeft),
            1 => self.state.release(GamepadButton::DPadRight),
            _ => {}
        }
        match dir {
            -1 => self.state.press(GamepadButton::DPadLeft),
            1 => self.state.press(GamepadButton::DPadRight),
            _ => {}
        }
        self.stick_x = dir;
    }

    fn stick_y_changed(&mut self, value: f32) {
        let dir = self.digital(value);
        if dir == self.stick_y {
            return;
        }
        match self.stick_y {
            -1 => self.state.release(GamepadButton::DPadDown),
            1 => self.state.release(GamepadButton::DPadUp),
            _ => {}
        }
        match dir {
            -1 => self.state.press(GamepadButton::DPadDown),
            1 => self.state.press(GamepadButton::DPadUp),
            _ => {}
        }
        self.stick_y = dir;
    }

    /// The aggregated per-frame button state.
    #[must_use]
    pub fn state(&self) -> &GamepadState {
        &self.state
    }

    /// Clears transient flags on the aggregated state.
    pub fn clear_transients(&mut self) {
        self.state.clear_transients();
    }
}

impl Default for GamepadManager {
    fn default() -> Self {
        Self::new()
    }
}
