//! Combat event queue
//!
//! Collision callbacks run inside the factory update and cannot touch the
//! actor map. They record what touched what here, and the session resolves
//! the queue once the physics step is over.

use crate::actors::ActorId;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Something that happened during the physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatEvent {
    /// `me` overlapped `other`; reported from `me`'s side
    Contact {
        /// Actor whose callback fired
        me: ActorId,
        /// Actor it touched
        other: ActorId,
    },
}

/// Shared FIFO of combat events
///
/// Clones share the same queue, so one clone can live in callbacks while the
/// session drains another.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Rc<RefCell<VecDeque<CombatEvent>>>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn push(&self, event: CombatEvent) {
        self.events.borrow_mut().push_back(event);
    }

    /// Take every queued event in arrival order
    pub fn drain(&self) -> Vec<CombatEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    /// Drop every queued event
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_clones_share_queue() {
        let mut ids: SlotMap<ActorId, ()> = SlotMap::with_key();
        let a = ids.insert(());
        let b = ids.insert(());

        let queue = EventQueue::new();
        let recorder = queue.clone();
        recorder.push(CombatEvent::Contact { me: a, other: b });
        recorder.push(CombatEvent::Contact { me: b, other: a });

        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.drain(),
            vec![
                CombatEvent::Contact { me: a, other: b },
                CombatEvent::Contact { me: b, other: a },
            ]
        );
        assert!(recorder.is_empty());
    }
}
