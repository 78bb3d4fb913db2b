//! Named input bindings: each binding combines a keyboard key set and a
//! gamepad button set and answers press-mode queries under a configurable
//! multi-key policy.

use crate::gamepad::{GamepadButton, GamepadState};
use crate::keyboard::KeyboardState;
use crate::PressMode;
use serde::{Deserialize, Serialize};
use tracing::warn;
use winit::keyboard::KeyCode;

/// Serde helper module for [`KeyCode`] which doesn't implement serde natively.
mod keycode_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use winit::keyboard::KeyCode;

    /// Serialize a [`KeyCode`] as its debug string (e.g., `"KeyW"`).
    pub fn serialize<S: Serializer>(code: &KeyCode, s: S) -> Result<S::Ok, S::Error> {
        format!("{code:?}").serialize(s)
    }

    /// Deserialize a [`KeyCode`] from its debug string.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KeyCode, D::Error> {
        let name = String::deserialize(d)?;
        super::parse_key_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown key: {name}")))
    }
}

/// Parse a key name in [`KeyCode`] debug form (e.g., `"KeyW"`, `"Space"`).
#[must_use]
pub fn parse_key_name(s: &str) -> Option<KeyCode> {
    Some(match s {
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyN" => KeyCode::KeyN,
        "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyT" => KeyCode::KeyT,
        "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY,
        "KeyZ" => KeyCode::KeyZ,
        "Digit0" => KeyCode::Digit0,
        "Digit1" => KeyCode::Digit1,
        "Digit2" => KeyCode::Digit2,
        "Digit3" => KeyCode::Digit3,
        "Digit4" => KeyCode::Digit4,
        "Digit5" => KeyCode::Digit5,
        "Digit6" => KeyCode::Digit6,
        "Digit7" => KeyCode::Digit7,
        "Digit8" => KeyCode::Digit8,
        "Digit9" => KeyCode::Digit9,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        _ => return None,
    })
}

/// A single bound keyboard key, serializable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding(#[serde(with = "keycode_serde")] pub KeyCode);

/// Policy for combining a binding's key sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckMode {
    /// Any key in either set satisfies the query.
    #[default]
    Any,
    /// Every key of at least one device's set must satisfy it.
    All,
    /// Every key in both sets must satisfy it.
    Everything,
}

/// A named input binding over keyboard keys and gamepad buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    /// Identifier used by gameplay code and keybinding overrides.
    pub name: String,
    /// Bound keyboard keys.
    pub keyboard: Vec<KeyBinding>,
    /// Bound gamepad buttons.
    pub gamepad: Vec<GamepadButton>,
    /// Multi-key combination policy.
    pub check_mode: CheckMode,
}

impl Binding {
    /// Create a binding with the default `Any` policy.
    #[must_use]
    pub fn new(name: &str, keyboard: &[KeyCode], gamepad: &[GamepadButton]) -> Self {
        Self {
            name: name.to_string(),
            keyboard: keyboard.iter().map(|&k| KeyBinding(k)).collect(),
            gamepad: gamepad.to_vec(),
            check_mode: CheckMode::Any,
        }
    }

    /// Same as [`new`](Self::new) with an explicit policy.
    #[must_use]
    pub fn with_mode(
        name: &str,
        keyboard: &[KeyCode],
        gamepad: &[GamepadButton],
        check_mode: CheckMode,
    ) -> Self {
        let mut binding = Self::new(name, keyboard, gamepad);
        binding.check_mode = check_mode;
        binding
    }

    /// Evaluate the binding against the current device state.
    ///
    /// Empty key sets never satisfy a query: a binding with no keys at all
    /// is a no-op, and under `All`/`Everything` an empty set cannot vouch
    /// for its device.
    #[must_use]
    pub fn pressed(&self, keyboard: &KeyboardState, gamepad: &GamepadState, mode: PressMode) -> bool {
        match self.check_mode {
            CheckMode::Any => {
                self.keyboard.iter().any(|k| keyboard.pressed(k.0, mode))
                    || self.gamepad.iter().any(|b| gamepad.pressed(*b, mode))
            }
            CheckMode::All => {
                let kb_all = !self.keyboard.is_empty()
                    && self.keyboard.iter().all(|k| keyboard.pressed(k.0, mode));
                let gp_all = !self.gamepad.is_empty()
                    && self.gamepad.iter().all(|b| gamepad.pressed(*b, mode));
                kb_all || gp_all
            }
            CheckMode::Everything => {
                if self.keyboard.is_empty() && self.gamepad.is_empty() {
                    return false;
                }
                self.keyboard.iter().all(|k| keyboard.pressed(k.0, mode))
                    && self.gamepad.iter().all(|b| gamepad.pressed(*b, mode))
            }
        }
    }
}

/// A named collection of [`Binding`]s with RON persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingSet {
    /// The bindings, looked up by name.
    pub bindings: Vec<Binding>,
}

impl Default for BindingSet {
    fn default() -> Self {
        Self::runner_defaults()
    }
}

impl BindingSet {
    /// An empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// The runner's default binding table.
    #[must_use]
    pub fn runner_defaults() -> Self {
        use GamepadButton as Pad;
        Self {
            bindings: vec![
                // The main gameplay button that does everything.
                Binding::new(
                    "click",
                    &[KeyCode::ArrowUp, KeyCode::Space],
                    &[Pad::South],
                ),
                Binding::new("escape", &[KeyCode::Escape], &[Pad::Start]),
                Binding::new(
                    "left",
                    &[KeyCode::KeyA, KeyCode::ArrowLeft],
                    &[Pad::DPadLeft],
                ),
                Binding::new(
                    "right",
                    &[KeyCode::KeyD, KeyCode::ArrowRight],
                    &[Pad::DPadRight],
                ),
                Binding::new("up", &[KeyCode::KeyW, KeyCode::ArrowUp], &[Pad::DPadUp]),
                Binding::new(
                    "down",
                    &[KeyCode::KeyS, KeyCode::ArrowDown],
                    &[Pad::DPadDown],
                ),
                Binding::new("submit", &[KeyCode::Enter], &[Pad::South]),
                Binding::new("cancel", &[KeyCode::Backspace], &[Pad::East]),
                Binding::new("place_checkpoint", &[KeyCode::KeyZ], &[Pad::West]),
                Binding::new("remove_checkpoint", &[KeyCode::KeyX], &[Pad::North]),
                Binding::new("toggle_practice", &[KeyCode::KeyP], &[Pad::Select]),
            ],
        }
    }

    /// Look up a binding by name. Missing names degrade to `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.name == name)
    }

    /// Evaluate a named binding; an unknown name is never pressed.
    #[must_use]
    pub fn pressed(
        &self,
        name: &str,
        keyboard: &KeyboardState,
        gamepad: &GamepadState,
        mode: PressMode,
    ) -> bool {
        self.get(name)
            .is_some_and(|b| b.pressed(keyboard, gamepad, mode))
    }

    /// Apply configured keybinding overrides, each pair naming a binding and
    /// the key that replaces its keyboard set. Gamepad buttons and the check
    /// mode are untouched. Unknown binding or key names are skipped with a
    /// warning.
    pub fn apply_overrides<'a>(&mut self, overrides: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (name, key_name) in overrides {
            let Some(key) = parse_key_name(key_name) else {
                warn!(binding = name, key = key_name, "unknown key in keybinding override");
                continue;
            };
            match self.bindings.iter_mut().find(|b| b.name == name) {
                Some(binding) => binding.keyboard = vec![KeyBinding(key)],
                None => warn!(binding = name, "keybinding override for unknown binding"),
            }
        }
    }

    /// Combine two bindings into a signed axis: +1 when only the positive
    /// binding is held, -1 when only the negative one is, otherwise 0.
    #[must_use]
    pub fn axis(
        &self,
        negative: &str,
        positive: &str,
        keyboard: &KeyboardState,
        gamepad: &GamepadState,
    ) -> f32 {
        let neg = self.pressed(negative, keyboard, gamepad, PressMode::Hold);
        let pos = self.pressed(positive, keyboard, gamepad, PressMode::Hold);
        match (neg, pos) {
            (false, true) => 1.0,
            (true, false) => -1.0,
            _ => 0.0,
        }
    }

    /// Serialize to RON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from RON string.
    ///
    /// # Errors
    /// Returns an error if the RON string is malformed.
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}
