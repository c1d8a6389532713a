// Input handling system
//
// Raw keyboard events become `KeyInput` records through the key bindings in
// `config`, and are pushed into an `IntentQueue`. The game drains that queue
// exactly once per frame, before the physics step, so input never mutates
// simulation state mid-frame.
//
// ## Usage Example
//
// ```rust
// let bindings = InputConfig::with_defaults();
// let mut queue = IntentQueue::new();
//
// // In the event loop
// if let Some(input) = bindings.translate(key_code, state, repeat) {
//     queue.push(input);
// }
//
// // At the start of the frame update
// for input in queue.drain() {
//     // apply
// }
// ```

pub mod action;
pub mod config;
pub mod queue;

pub use action::{Action, KeyInput, KeyState};
pub use config::InputConfig;
pub use queue::IntentQueue;
