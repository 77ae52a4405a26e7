//! Button-state input model
//!
//! The host only answers "is this key down right now?". Each tick the raw
//! answers are folded into a per-action [`ButtonState`] so gameplay can tell
//! a fresh press from a held key.

use std::collections::BTreeMap;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::vector::{normalized_2d, to_3d};

/// Physical keys the host can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    ShiftLeft,
    Space,
    KeyW,
    KeyA,
    KeyS,
    KeyD,
}

/// Logical controls, independent of the physical key bound to them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Dive,
}

/// Four-state button model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ButtonState {
    #[default]
    Released,
    /// Went down this tick
    JustPressed,
    Held,
    /// Went up this tick
    JustReleased,
}

impl ButtonState {
    /// Advance one tick given whether the key is down now
    pub fn next(self, raw_down: bool) -> Self {
        match (self, raw_down) {
            (ButtonState::Released, true) => ButtonState::JustPressed,
            (ButtonState::Released, false) => ButtonState::Released,
            (ButtonState::JustPressed, true) => ButtonState::Held,
            (ButtonState::JustPressed, false) => ButtonState::JustReleased,
            (ButtonState::Held, true) => ButtonState::Held,
            (ButtonState::Held, false) => ButtonState::JustReleased,
            (ButtonState::JustReleased, true) => ButtonState::JustPressed,
            (ButtonState::JustReleased, false) => ButtonState::Released,
        }
    }

    pub fn is_down(self) -> bool {
        matches!(self, ButtonState::JustPressed | ButtonState::Held)
    }

    pub fn is_pressed(self) -> bool {
        self == ButtonState::JustPressed
    }

    pub fn is_released(self) -> bool {
        self == ButtonState::JustReleased
    }
}

/// Key bound to each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bindings {
    pub left: Key,
    pub right: Key,
    pub up: Key,
    pub down: Key,
    pub dive: Key,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            left: Key::ArrowLeft,
            right: Key::ArrowRight,
            up: Key::ArrowUp,
            down: Key::ArrowDown,
            dive: Key::ShiftLeft,
        }
    }
}

impl Bindings {
    /// WASD movement, space to dive
    pub fn wasd() -> Self {
        Self {
            left: Key::KeyA,
            right: Key::KeyD,
            up: Key::KeyW,
            down: Key::KeyS,
            dive: Key::Space,
        }
    }

    /// Every (action, key) pair, in action order
    pub fn pairs(&self) -> [(Action, Key); 5] {
        [
            (Action::Left, self.left),
            (Action::Right, self.right),
            (Action::Up, self.up),
            (Action::Down, self.down),
            (Action::Dive, self.dive),
        ]
    }
}

/// Tracked button states for one set of bindings
#[derive(Debug, Clone)]
pub struct InputState {
    bindings: Bindings,
    states: BTreeMap<Action, ButtonState>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(Bindings::default())
    }
}

impl InputState {
    pub fn new(bindings: Bindings) -> Self {
        let states = bindings
            .pairs()
            .iter()
            .map(|&(action, _)| (action, ButtonState::Released))
            .collect();
        Self { bindings, states }
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Transition every tracked action. Call exactly once per tick, before
    /// any query for that tick.
    pub fn update(&mut self, is_key_down: impl Fn(Key) -> bool) {
        for (action, key) in self.bindings.pairs() {
            let state = self.states.entry(action).or_default();
            *state = state.next(is_key_down(key));
        }
    }

    /// Current state of an action (untracked actions read as released)
    pub fn state(&self, action: Action) -> ButtonState {
        self.states.get(&action).copied().unwrap_or_default()
    }

    pub fn is_down(&self, action: Action) -> bool {
        self.state(action).is_down()
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.state(action).is_pressed()
    }

    pub fn is_released(&self, action: Action) -> bool {
        self.state(action).is_released()
    }

    /// Unit (or zero) planar direction from the four movement actions.
    ///
    /// Screen coordinates: up is -y. Diagonals come out unit length, the same
    /// speed as a single axis.
    pub fn directional_vector(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.is_down(Action::Left) {
            v.x -= 1.0;
        }
        if self.is_down(Action::Right) {
            v.x += 1.0;
        }
        if self.is_down(Action::Up) {
            v.y -= 1.0;
        }
        if self.is_down(Action::Down) {
            v.y += 1.0;
        }
        normalized_2d(v)
    }

    pub fn directional_vector3(&self) -> Vec3 {
        to_3d(self.directional_vector())
    }
}
