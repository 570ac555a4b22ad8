use serde::{Deserialize, Serialize};

use crate::types::{Role, User, UserStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsersState {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl UsersState {
    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UsersAction {
    FetchPending,
    FetchFulfilled(Vec<User>),
    FetchRejected(String),
    UpdateStatus { id: String, status: UserStatus },
    UpdateRole { id: String, role: Role },
}

pub fn reduce(state: &mut UsersState, action: UsersAction) {
    match action {
        UsersAction::FetchPending => {
            state.loading = true;
            state.error = None;
        }
        UsersAction::FetchFulfilled(users) => {
            state.loading = false;
            state.users = users;
        }
        UsersAction::FetchRejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
        UsersAction::UpdateStatus { id, status } => {
            if let Some(user) = state.users.iter_mut().find(|u| u.id == id) {
                user.status = status;
            }
        }
        UsersAction::UpdateRole { id, role } => {
            if let Some(user) = state.users.iter_mut().find(|u| u.id == id) {
                user.role = role;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn fetch_lifecycle_replaces_list() {
        let mut state = UsersState {
            users: seed::users()[..1].to_vec(),
            ..Default::default()
        };
        reduce(&mut state, UsersAction::FetchPending);
        assert!(state.loading);

        reduce(&mut state, UsersAction::FetchFulfilled(seed::users()));
        assert!(!state.loading);
        assert_eq!(state.users, seed::users());
    }

    #[test]
    fn rejected_fetch_keeps_list() {
        let mut state = UsersState {
            users: seed::users(),
            ..Default::default()
        };
        reduce(&mut state, UsersAction::FetchPending);
        reduce(&mut state, UsersAction::FetchRejected("offline".into()));
        assert_eq!(state.error.as_deref(), Some("offline"));
        assert_eq!(state.users.len(), 5);
    }

    #[test]
    fn status_change_touches_one_user() {
        let mut state = UsersState {
            users: seed::users(),
            ..Default::default()
        };
        reduce(
            &mut state,
            UsersAction::UpdateStatus {
                id: "3".into(),
                status: UserStatus::Active,
            },
        );

        let expected: Vec<User> = seed::users()
            .into_iter()
            .map(|mut u| {
                if u.id == "3" {
                    u.status = UserStatus::Active;
                }
                u
            })
            .collect();
        assert_eq!(state.users, expected);
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut state = UsersState {
            users: seed::users(),
            ..Default::default()
        };
        reduce(
            &mut state,
            UsersAction::UpdateRole {
                id: "99".into(),
                role: Role::Admin,
            },
        );
        assert_eq!(state.users, seed::users());
    }
}
