use serde::{Deserialize, Serialize};

use crate::auth::Session;
use crate::types::User;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    LoginStart,
    LoginSuccess(Session),
    LoginFailure(String),
    Logout,
    UpdateProfile { name: String, email: String },
}

pub fn reduce(state: &mut AuthState, action: AuthAction) {
    match action {
        AuthAction::LoginStart => {
            state.loading = true;
            state.error = None;
        }
        AuthAction::LoginSuccess(session) => {
            state.loading = false;
            state.is_authenticated = true;
            state.user = Some(session.user);
            state.token = Some(session.token);
            state.error = None;
        }
        AuthAction::LoginFailure(message) => {
            state.loading = false;
            state.is_authenticated = false;
            state.user = None;
            state.token = None;
            state.error = Some(message);
        }
        AuthAction::Logout => {
            *state = AuthState::default();
        }
        AuthAction::UpdateProfile { name, email } => {
            if let Some(user) = state.user.as_mut() {
                user.name = name;
                user.email = email;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn session() -> Session {
        Session {
            user: seed::users().remove(0),
            token: "t".into(),
        }
    }

    #[test]
    fn failure_after_success_clears_session() {
        let mut state = AuthState::default();
        reduce(&mut state, AuthAction::LoginStart);
        reduce(&mut state, AuthAction::LoginSuccess(session()));
        assert!(state.is_authenticated);

        reduce(&mut state, AuthAction::LoginFailure("bad".into()));
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert_eq!(state.error.as_deref(), Some("bad"));
    }

    #[test]
    fn profile_update_requires_a_user() {
        let mut state = AuthState::default();
        reduce(
            &mut state,
            AuthAction::UpdateProfile {
                name: "x".into(),
                email: "x@example.com".into(),
            },
        );
        assert!(state.user.is_none());

        reduce(&mut state, AuthAction::LoginSuccess(session()));
        reduce(
            &mut state,
            AuthAction::UpdateProfile {
                name: "Johnny".into(),
                email: "johnny@example.com".into(),
            },
        );
        assert_eq!(state.user.as_ref().unwrap().name, "Johnny");
    }
}
