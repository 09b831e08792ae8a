//! Player intents
//!
//! Discrete, already-debounced signals from the input layer. The core
//! never polls device state; an intent arrives as an event, sits in the
//! [`IntentQueue`], and is applied at the next tick boundary.

use std::collections::VecDeque;

/// Lateral component of a turn intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnDirection {
    /// Turn 90° counter to the travel direction (lateral -1)
    Left,
    /// No lateral component (lateral 0)
    Straight,
    /// Turn 90° with the travel direction (lateral +1)
    Right,
}

impl TurnDirection {
    /// The signed lateral value: -1, 0 or +1.
    pub fn value(&self) -> f32 {
        match self {
            TurnDirection::Left => -1.0,
            TurnDirection::Straight => 0.0,
            TurnDirection::Right => 1.0,
        }
    }
}

/// One discrete player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Commit a turn on the tile under the player, if one matches
    Turn(TurnDirection),
    /// Jump (honored only while grounded)
    Jump,
    /// Slide under obstacles. Reserved: currently a no-op hook.
    Slide,
}

/// FIFO queue of intents awaiting the next tick.
///
/// Intents are fire-and-forget: one that matches no geometry at apply time
/// is dropped, never retried.
#[derive(Debug, Clone, Default)]
pub struct IntentQueue {
    queue: VecDeque<Intent>,
}

impl IntentQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues an intent for the next tick.
    pub fn push(&mut self, intent: Intent) {
        self.queue.push_back(intent);
    }

    /// Removes and returns the oldest pending intent.
    pub fn pop(&mut self) -> Option<Intent> {
        self.queue.pop_front()
    }

    /// Drains all pending intents in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = Intent> + '_ {
        self.queue.drain(..)
    }

    /// Number of pending intents.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Discards all pending intents.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
