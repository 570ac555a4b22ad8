use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::Notification;

/// Notification bus. Most recent first; never trimmed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationsState {
    pub notifications: VecDeque<Notification>,
    pub unread_count: usize,
}

impl NotificationsState {
    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    pub fn counted_unread(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationsAction {
    Add(Notification),
    MarkAsRead(String),
    MarkAllAsRead,
    Remove(String),
    ClearAll,
}

pub fn reduce(state: &mut NotificationsState, action: NotificationsAction) {
    match action {
        NotificationsAction::Add(mut notification) => {
            notification.read = false;
            state.notifications.push_front(notification);
            state.unread_count += 1;
        }
        NotificationsAction::MarkAsRead(id) => {
            if let Some(n) = state.notifications.iter_mut().find(|n| n.id == id) {
                if !n.read {
                    n.read = true;
                    state.unread_count = state.unread_count.saturating_sub(1);
                }
            }
        }
        NotificationsAction::MarkAllAsRead => {
            for n in state.notifications.iter_mut() {
                n.read = true;
            }
            state.unread_count = 0;
        }
        NotificationsAction::Remove(id) => {
            if let Some(pos) = state.notifications.iter().position(|n| n.id == id) {
                if let Some(removed) = state.notifications.remove(pos) {
                    if !removed.read {
                        state.unread_count = state.unread_count.saturating_sub(1);
                    }
                }
            }
        }
        NotificationsAction::ClearAll => {
            state.notifications.clear();
            state.unread_count = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NotificationDraft, NotificationKind};
    use proptest::prelude::*;

    fn note(title: &str) -> Notification {
        Notification::from_draft(NotificationDraft::new(title, "body", NotificationKind::Info))
    }

    #[test]
    fn add_prepends_and_counts() {
        let mut state = NotificationsState::default();
        reduce(&mut state, NotificationsAction::Add(note("first")));
        reduce(&mut state, NotificationsAction::Add(note("second")));

        assert_eq!(state.unread_count, 2);
        assert_eq!(state.notifications[0].title, "second");
        assert_eq!(state.notifications[1].title, "first");
    }

    #[test]
    fn add_forces_unread() {
        let mut state = NotificationsState::default();
        let mut n = note("pre-read");
        n.read = true;
        reduce(&mut state, NotificationsAction::Add(n));
        assert_eq!(state.unread_count, 1);
        assert!(!state.notifications[0].read);
    }

    #[test]
    fn marking_twice_only_decrements_once() {
        let mut state = NotificationsState::default();
        let n = note("x");
        let id = n.id.clone();
        reduce(&mut state, NotificationsAction::Add(n));
        reduce(&mut state, NotificationsAction::Add(note("y")));

        reduce(&mut state, NotificationsAction::MarkAsRead(id.clone()));
        reduce(&mut state, NotificationsAction::MarkAsRead(id));
        assert_eq!(state.unread_count, 1);
    }

    #[test]
    fn mark_all_zeroes_counter() {
        let mut state = NotificationsState::default();
        for i in 0..5 {
            reduce(&mut state, NotificationsAction::Add(note(&i.to_string())));
        }
        reduce(&mut state, NotificationsAction::MarkAllAsRead);
        assert_eq!(state.unread_count, 0);
        assert!(state.notifications.iter().all(|n| n.read));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Read(usize),
        ReadAll,
        Remove(usize),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => Just(Op::Add),
            3 => (0usize..8).prop_map(Op::Read),
            1 => Just(Op::ReadAll),
            2 => (0usize..8).prop_map(Op::Remove),
            1 => Just(Op::Clear),
        ]
    }

    fn pick(state: &NotificationsState, i: usize) -> Option<String> {
        state.notifications.get(i).map(|n| n.id.clone())
    }

    proptest! {
        #[test]
        fn unread_count_never_drifts(ops in prop::collection::vec(op(), 0..64)) {
            let mut state = NotificationsState::default();
            for op in ops {
                let before = state.unread_count;
                match op {
                    Op::Add => {
                        reduce(&mut state, NotificationsAction::Add(note("n")));
                        prop_assert_eq!(state.unread_count, before + 1);
                    }
                    Op::Read(i) => {
                        if let Some(id) = pick(&state, i) {
                            reduce(&mut state, NotificationsAction::MarkAsRead(id));
                        }
                    }
                    Op::ReadAll => {
                        reduce(&mut state, NotificationsAction::MarkAllAsRead);
                        prop_assert_eq!(state.unread_count, 0);
                    }
                    Op::Remove(i) => {
                        if let Some(id) = pick(&state, i) {
                            reduce(&mut state, NotificationsAction::Remove(id));
                        }
                    }
                    Op::Clear => reduce(&mut state, NotificationsAction::ClearAll),
                }
                prop_assert_eq!(state.unread_count, state.counted_unread());
            }
        }
    }
}
