// Single-consumer queue of key intents, drained once per frame

use super::action::KeyInput;
use std::collections::VecDeque;

/// Maximum number of intents held between two frames
const MAX_QUEUE_SIZE: usize = 64;

/// FIFO of key inputs waiting for the next frame update
#[derive(Debug)]
pub struct IntentQueue {
    queue: VecDeque<KeyInput>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::with_capacity(MAX_QUEUE_SIZE),
        }
    }

    /// Queue an input; the oldest input is dropped when the queue is full
    pub fn push(&mut self, input: KeyInput) {
        if self.queue.len() == MAX_QUEUE_SIZE {
            if let Some(oldest) = self.queue.pop_front() {
                log::warn!("Input queue full, dropped {:?}", oldest);
            }
        }
        self.queue.push_back(input);
    }

    /// Take every queued input in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = KeyInput> + '_ {
        self.queue.drain(..)
    }
}

impl Default for IntentQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;

    #[test]
    fn test_queue_creation() {
        let mut queue = IntentQueue::new();
        assert_eq!(queue.drain().count(), 0);
    }

    #[test]
    fn test_drain_preserves_order() {
        let mut queue = IntentQueue::new();
        queue.push(KeyInput::pressed(Action::MoveRight));
        queue.push(KeyInput::pressed(Action::Jump));
        queue.push(KeyInput::released(Action::MoveRight));

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![
                KeyInput::pressed(Action::MoveRight),
                KeyInput::pressed(Action::Jump),
                KeyInput::released(Action::MoveRight),
            ]
        );
        assert_eq!(queue.drain().count(), 0);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut queue = IntentQueue::new();
        queue.push(KeyInput::pressed(Action::MoveRight));
        queue.push(KeyInput::pressed(Action::MoveRight).repeated());
        assert_eq!(queue.drain().count(), 2);
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let mut queue = IntentQueue::new();
        queue.push(KeyInput::pressed(Action::Dash));
        for _ in 0..MAX_QUEUE_SIZE {
            queue.push(KeyInput::pressed(Action::MoveLeft));
        }

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained.len(), MAX_QUEUE_SIZE);
        assert!(drained.iter().all(|i| i.action == Action::MoveLeft));
    }
}
