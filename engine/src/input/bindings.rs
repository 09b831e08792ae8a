//! Input bindings
//!
//! Maps physical keys to player intents, allowing for future key remapping
//! support. Decoupled from any windowing system: the host translates its
//! own key events into the generic [`KeyCode`] before lookup.

use std::collections::HashMap;

use super::{Intent, TurnDirection};

/// Generic key codes, independent of the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    Space,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Maps physical keys to intents.
///
/// Several keys may bind to the same intent (A and ArrowLeft both turn
/// left by default); a key binds to at most one intent.
#[derive(Debug, Clone)]
pub struct IntentBindings {
    key_to_intent: HashMap<KeyCode, Intent>,
}

impl Default for IntentBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentBindings {
    /// Creates bindings with the default mapping:
    ///
    /// - A / ArrowLeft = turn left
    /// - D / ArrowRight = turn right
    /// - Space / ArrowUp = jump
    /// - S / ArrowDown = slide
    pub fn new() -> Self {
        let mut bindings = Self {
            key_to_intent: HashMap::new(),
        };

        bindings.bind(KeyCode::A, Intent::Turn(TurnDirection::Left));
        bindings.bind(KeyCode::ArrowLeft, Intent::Turn(TurnDirection::Left));
        bindings.bind(KeyCode::D, Intent::Turn(TurnDirection::Right));
        bindings.bind(KeyCode::ArrowRight, Intent::Turn(TurnDirection::Right));
        bindings.bind(KeyCode::Space, Intent::Jump);
        bindings.bind(KeyCode::ArrowUp, Intent::Jump);
        bindings.bind(KeyCode::S, Intent::Slide);
        bindings.bind(KeyCode::ArrowDown, Intent::Slide);

        bindings
    }

    /// Creates an empty binding table.
    pub fn empty() -> Self {
        Self {
            key_to_intent: HashMap::new(),
        }
    }

    /// Binds a key to an intent, replacing any previous binding for that key.
    pub fn bind(&mut self, key: KeyCode, intent: Intent) {
        self.key_to_intent.insert(key, intent);
    }

    /// Removes the binding for a key.
    pub fn unbind(&mut self, key: KeyCode) {
        self.key_to_intent.remove(&key);
    }

    /// Looks up the intent bound to a key.
    pub fn intent_for(&self, key: KeyCode) -> Option<Intent> {
        self.key_to_intent.get(&key).copied()
    }

    /// All keys currently bound to the given intent.
    pub fn keys_for(&self, intent: Intent) -> Vec<KeyCode> {
        let mut keys: Vec<KeyCode> = self
            .key_to_intent
            .iter()
            .filter(|(_, bound)| **bound == intent)
            .map(|(key, _)| *key)
            .collect();
        keys.sort_by_key(|k| format!("{k:?}"));
        keys
    }
}
