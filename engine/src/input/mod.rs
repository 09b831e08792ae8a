//! Input Module
//!
//! Intent-based input for the runner core. The core never sees devices or
//! polled key state; an external input layer delivers discrete
//! [`Intent`] events which queue here until the next tick boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! use canyon_run_engine::input::{Intent, IntentBindings, IntentQueue, KeyCode, TurnDirection};
//!
//! let bindings = IntentBindings::new();
//! let mut queue = IntentQueue::new();
//!
//! // Host translates a key press into an intent
//! if let Some(intent) = bindings.intent_for(KeyCode::A) {
//!     queue.push(intent);
//! }
//!
//! // The game loop drains the queue at the tick boundary
//! for intent in queue.drain() {
//!     match intent {
//!         Intent::Turn(direction) => { /* request a turn */ }
//!         Intent::Jump => { /* request a jump */ }
//!         Intent::Slide => {}
//!     }
//! }
//! ```

pub mod bindings;
pub mod intents;

// Re-export commonly used types at module level
pub use bindings::{IntentBindings, KeyCode};
pub use intents::{Intent, IntentQueue, TurnDirection};
