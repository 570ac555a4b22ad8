// adminkit/src/auth.rs
//
// Mock authentication: validates the form, fabricates a user and token, and
// writes both session keys to storage.
//

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AdminError;
use crate::seed;
use crate::storage::{KeyValueStorage, AUTH_TOKEN_KEY, AUTH_USER_KEY};
use crate::types::{Role, User, UserStatus};
use crate::validation::{validate_login, validate_signup, LoginForm, SignupForm};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

pub struct AuthService {
    storage: Arc<dyn KeyValueStorage>,
}

impl AuthService {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn login(&self, form: &LoginForm) -> Result<Session, AdminError> {
        validate_login(form)?;

        // Known demo accounts keep their seeded identity; anything else gets a
        // fresh admin profile named after the mailbox.
        let user = seed::users()
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(&form.email))
            .unwrap_or_else(|| new_user(display_name(&form.email), &form.email));

        let session = self.open_session(user)?;
        info!("User {} logged in", session.user.email);
        Ok(session)
    }

    pub fn signup(&self, form: &SignupForm) -> Result<Session, AdminError> {
        validate_signup(form)?;

        let user = new_user(form.name.trim().to_string(), &form.email);
        let session = self.open_session(user)?;
        info!("User {} signed up", session.user.email);
        Ok(session)
    }

    pub fn logout(&self) -> Result<(), AdminError> {
        self.storage.remove(AUTH_USER_KEY)?;
        self.storage.remove(AUTH_TOKEN_KEY)?;
        info!("Session cleared");
        Ok(())
    }

    /// Session persisted by an earlier login, if both keys are present and the
    /// stored user still parses.
    pub fn restore(&self) -> Result<Option<Session>, AdminError> {
        let (Some(raw_user), Some(token)) = (
            self.storage.get(AUTH_USER_KEY)?,
            self.storage.get(AUTH_TOKEN_KEY)?,
        ) else {
            return Ok(None);
        };

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Ok(Some(Session { user, token })),
            Err(e) => {
                warn!("Discarding unreadable stored user: {}", e);
                Ok(None)
            }
        }
    }

    fn open_session(&self, user: User) -> Result<Session, AdminError> {
        let token = format!("mock-token-{}", Uuid::new_v4().simple());
        let raw_user =
            serde_json::to_string(&user).map_err(|e| AdminError::StorageError(e.to_string()))?;

        self.storage.set(AUTH_USER_KEY, &raw_user)?;
        self.storage.set(AUTH_TOKEN_KEY, &token)?;

        Ok(Session { user, token })
    }
}

fn new_user(name: String, email: &str) -> User {
    User {
        id: Uuid::new_v4().to_string(),
        name,
        email: email.to_string(),
        role: Role::Admin,
        status: UserStatus::Active,
        joined: Utc::now().date_naive(),
    }
}

fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    local
        .split(['.', '_', '-', '+'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::validation::Field;

    fn service() -> (Arc<MemoryStorage>, AuthService) {
        let storage = Arc::new(MemoryStorage::new());
        (storage.clone(), AuthService::new(storage))
    }

    fn login_form(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn login_writes_both_keys() {
        let (storage, auth) = service();
        let session = auth.login(&login_form("mary.ann@example.com", "pw1")).unwrap();

        assert_eq!(session.user.name, "Mary Ann");
        assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), Some(session.token.clone()));
        let stored: User = serde_json::from_str(&storage.get(AUTH_USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored, session.user);
    }

    #[test]
    fn login_reuses_seeded_account() {
        let (_, auth) = service();
        let session = auth.login(&login_form("JANE@example.com", "pw1")).unwrap();
        assert_eq!(session.user.id, "2");
    }

    #[test]
    fn invalid_login_leaves_storage_untouched() {
        let (storage, auth) = service();
        let err = auth.login(&login_form("nope", "x")).unwrap_err();

        match err {
            AdminError::ValidationError(errors) => {
                assert!(errors.has(Field::Email));
                assert!(errors.has(Field::Password));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(storage.is_empty());
    }

    #[test]
    fn signup_then_restore_then_logout() {
        let (storage, auth) = service();
        let form = SignupForm {
            name: " Ada Lovelace ".to_string(),
            email: "ada@example.com".to_string(),
            password: "engine".to_string(),
            confirm_password: "engine".to_string(),
        };
        let session = auth.signup(&form).unwrap();
        assert_eq!(session.user.name, "Ada Lovelace");

        assert_eq!(auth.restore().unwrap(), Some(session));

        auth.logout().unwrap();
        assert!(auth.restore().unwrap().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn restore_ignores_half_written_session() {
        let (storage, auth) = service();
        storage.set(AUTH_TOKEN_KEY, "orphan").unwrap();
        assert!(auth.restore().unwrap().is_none());

        storage.set(AUTH_USER_KEY, "{broken").unwrap();
        assert!(auth.restore().unwrap().is_none());
    }
}
