//! Optimistic action queue.
//!
//! Locally-issued actions that the server has not yet echoed back. The
//! transport guarantees the server confirms the local player's actions in the
//! order they were sent, so the head of the queue is always the oldest
//! unconfirmed local action and confirmation is a plain pop.

use std::collections::VecDeque;

use crate::state::action::Action;

/// FIFO queue of unconfirmed local actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimisticQueue {
    actions: VecDeque<Action>,
}

impl OptimisticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly-issued local action. Unbounded.
    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    /// Resolve a server confirmation against the queue.
    ///
    /// When the confirmed action belongs to the local player, the oldest
    /// unconfirmed entry is removed and returned. Confirmations for other
    /// players never touch the queue (their optimistic state is not tracked
    /// here), and confirming against an empty queue is a no-op.
    pub fn confirm(&mut self, confirmed: &Action, local_player_id: Option<&str>) -> Option<Action> {
        if local_player_id != Some(confirmed.player_id.as_str()) {
            return None;
        }
        self.actions.pop_front()
    }

    /// Oldest unconfirmed action, if any.
    pub fn front(&self) -> Option<&Action> {
        self.actions.front()
    }

    /// Number of in-flight local actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::action::Ability;

    fn action(player: &str, turn: u64) -> Action {
        Action::new(player, turn, Some(Ability::Basic))
    }

    #[test]
    fn test_enqueue_preserves_order() {
        let mut queue = OptimisticQueue::new();
        queue.enqueue(action("me", 1));
        queue.enqueue(action("me", 2));
        queue.enqueue(action("me", 3));

        let turns: Vec<u64> = queue.iter().map(|a| a.turn_count).collect();
        assert_eq!(turns, vec![1, 2, 3]);
    }

    #[test]
    fn test_confirm_removes_exactly_the_head() {
        let mut queue = OptimisticQueue::new();
        queue.enqueue(action("me", 1));
        queue.enqueue(action("me", 2));

        let removed = queue.confirm(&action("me", 1), Some("me"));
        assert_eq!(removed.map(|a| a.turn_count), Some(1));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.front().map(|a| a.turn_count), Some(2));
    }

    #[test]
    fn test_confirm_for_other_player_is_ignored() {
        let mut queue = OptimisticQueue::new();
        queue.enqueue(action("me", 1));

        let removed = queue.confirm(&action("them", 1), Some("me"));
        assert!(removed.is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_confirm_on_empty_queue_is_a_noop() {
        let mut queue = OptimisticQueue::new();
        let removed = queue.confirm(&action("me", 1), Some("me"));
        assert!(removed.is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_confirm_without_identity_is_ignored() {
        // Until an identity is assigned nothing can match the local player.
        let mut queue = OptimisticQueue::new();
        queue.enqueue(action("me", 1));

        let removed = queue.confirm(&action("me", 1), None);
        assert!(removed.is_none());
        assert_eq!(queue.len(), 1);
    }
}
