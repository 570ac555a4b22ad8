// adminkit/src/store/handle.rs
//
// Shared handle over the store plus the async thunks: each one dispatches a
// pending action, waits out the configured delay and then fulfils from the
// seed data or the auth service.
//

use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::auth::{AuthService, Session};
use crate::config::StoreConfig;
use crate::errors::AdminError;
use crate::seed;
use crate::store::theme::ThemeConfig;
use crate::store::{
    Action, AnalyticsAction, AuthAction, NotificationsAction, OrdersAction, ProductsAction,
    Store, ThemeAction, UiAction, UsersAction,
};
use crate::types::{Notification, NotificationDraft, NotificationKind};
use crate::validation::{LoginForm, SignupForm};

#[derive(Clone)]
pub struct StoreHandle {
    inner: Arc<RwLock<Store>>,
    config: StoreConfig,
}

impl StoreHandle {
    pub fn new(store: Store, config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
            config,
        }
    }

    pub async fn dispatch(&self, action: impl Into<Action>) {
        self.inner.write().await.dispatch(action);
    }

    pub async fn snapshot(&self) -> Store {
        self.inner.read().await.clone()
    }

    /// Runs `f` against the current state under the read lock.
    pub async fn read<T>(&self, f: impl FnOnce(&Store) -> T) -> T {
        let store = self.inner.read().await;
        f(&store)
    }

    /// Holds the store exclusively, stalling every dispatch until dropped.
    #[cfg(test)]
    pub(crate) async fn hold_write(&self) -> tokio::sync::RwLockWriteGuard<'_, Store> {
        self.inner.write().await
    }

    pub async fn fetch_users(&self) {
        self.dispatch(UsersAction::FetchPending).await;
        tokio::time::sleep(self.config.fetch_delay()).await;
        self.dispatch(UsersAction::FetchFulfilled(seed::users())).await;
        debug!("Users fetched");
    }

    pub async fn fetch_products(&self) {
        self.dispatch(ProductsAction::FetchPending).await;
        tokio::time::sleep(self.config.fetch_delay()).await;
        self.dispatch(ProductsAction::FetchFulfilled(seed::products())).await;
        debug!("Products fetched");
    }

    pub async fn fetch_orders(&self) {
        self.dispatch(OrdersAction::FetchPending).await;
        tokio::time::sleep(self.config.fetch_delay()).await;
        self.dispatch(OrdersAction::FetchFulfilled(seed::orders())).await;
        debug!("Orders fetched");
    }

    pub async fn fetch_analytics(&self) {
        self.dispatch(AnalyticsAction::FetchPending).await;
        tokio::time::sleep(self.config.fetch_delay()).await;
        self.dispatch(AnalyticsAction::FetchFulfilled(seed::analytics())).await;
        debug!("Analytics fetched");
    }

    /// Initial page load: every list fetched concurrently under the global
    /// loading flag.
    pub async fn load_all(&self) {
        self.dispatch(UiAction::SetGlobalLoading(true)).await;
        tokio::join!(
            self.fetch_users(),
            self.fetch_products(),
            self.fetch_orders(),
            self.fetch_analytics(),
        );
        self.dispatch(UiAction::SetGlobalLoading(false)).await;
    }

    /// Pushes a notification and returns its id.
    pub async fn notify(&self, draft: NotificationDraft) -> String {
        let notification = Notification::from_draft(draft);
        let id = notification.id.clone();
        self.dispatch(NotificationsAction::Add(notification)).await;
        id
    }

    pub async fn login(&self, auth: &AuthService, form: &LoginForm) -> Result<Session, AdminError> {
        self.dispatch(AuthAction::LoginStart).await;
        tokio::time::sleep(self.config.auth_delay()).await;
        self.finish_auth(auth.login(form)).await
    }

    pub async fn signup(&self, auth: &AuthService, form: &SignupForm) -> Result<Session, AdminError> {
        self.dispatch(AuthAction::LoginStart).await;
        tokio::time::sleep(self.config.auth_delay()).await;
        self.finish_auth(auth.signup(form)).await
    }

    async fn finish_auth(&self, result: Result<Session, AdminError>) -> Result<Session, AdminError> {
        match result {
            Ok(session) => {
                self.dispatch(AuthAction::LoginSuccess(session.clone())).await;
                Ok(session)
            }
            Err(e) => {
                self.dispatch(AuthAction::LoginFailure(e.to_string())).await;
                Err(e)
            }
        }
    }

    pub async fn logout(&self, auth: &AuthService) -> Result<(), AdminError> {
        auth.logout()?;
        self.dispatch(AuthAction::Logout).await;
        Ok(())
    }

    /// Re-enters a session persisted by an earlier run. Returns whether one
    /// was found.
    pub async fn restore_session(&self, auth: &AuthService) -> Result<bool, AdminError> {
        match auth.restore()? {
            Some(session) => {
                info!("Restored session for {}", session.user.email);
                self.dispatch(AuthAction::LoginSuccess(session)).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn export_theme(&self) -> Result<String, AdminError> {
        let config = self.read(|store| store.theme.to_config()).await;
        config.to_json()
    }

    /// All-or-nothing: on any parse failure the theme is untouched and a
    /// single error notification is raised.
    pub async fn import_theme_json(&self, raw: &str) -> Result<ThemeConfig, AdminError> {
        self.apply_theme_import(ThemeConfig::from_json(raw)).await
    }

    /// Same contract as `import_theme_json`, reading the document from disk.
    pub async fn import_theme_file(&self, path: impl AsRef<Path>) -> Result<ThemeConfig, AdminError> {
        self.apply_theme_import(ThemeConfig::import_from_file(path)).await
    }

    async fn apply_theme_import(
        &self,
        parsed: Result<ThemeConfig, AdminError>,
    ) -> Result<ThemeConfig, AdminError> {
        match parsed {
            Ok(config) => {
                self.dispatch(ThemeAction::Import(config.clone())).await;
                self.notify(NotificationDraft::new(
                    "Theme imported",
                    "Your theme settings have been applied",
                    NotificationKind::Success,
                ))
                .await;
                Ok(config)
            }
            Err(e) => {
                warn!("Rejected theme import: {}", e);
                self.notify(NotificationDraft::new(
                    "Import failed",
                    "Invalid theme file format",
                    NotificationKind::Error,
                ))
                .await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStorage, MemoryStorage, AUTH_TOKEN_KEY, AUTH_USER_KEY};
    use crate::store::ThemeState;
    use std::time::Duration;

    fn handle() -> StoreHandle {
        StoreHandle::new(Store::default(), StoreConfig::immediate())
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_is_pending_until_the_delay_elapses() {
        let handle = StoreHandle::new(Store::default(), StoreConfig::default());
        let task = tokio::spawn({
            let handle = handle.clone();
            async move { handle.fetch_orders().await }
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(handle.read(|s| s.orders.loading).await);
        assert!(handle.read(|s| s.orders.orders.is_empty()).await);

        task.await.unwrap();
        let orders = handle.snapshot().await.orders;
        assert!(!orders.loading);
        assert_eq!(orders.orders, seed::orders());
    }

    #[tokio::test]
    async fn login_updates_state_and_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let auth = AuthService::new(storage.clone());
        let handle = handle();

        let form = LoginForm {
            email: "admin@example.com".into(),
            password: "secret".into(),
        };
        let session = handle.login(&auth, &form).await.unwrap();

        let state = handle.snapshot().await.auth;
        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some(session.token.as_str()));
        assert!(storage.get(AUTH_USER_KEY).unwrap().is_some());
        assert!(storage.get(AUTH_TOKEN_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn failed_login_records_error() {
        let auth = AuthService::new(Arc::new(MemoryStorage::new()));
        let handle = handle();
        let form = LoginForm {
            email: "not-an-email".into(),
            password: "pw".into(),
        };

        assert!(handle.login(&auth, &form).await.is_err());
        let state = handle.snapshot().await.auth;
        assert!(!state.is_authenticated);
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn logout_then_restore_finds_nothing() {
        let auth = AuthService::new(Arc::new(MemoryStorage::new()));
        let handle = handle();
        let form = LoginForm {
            email: "admin@example.com".into(),
            password: "secret".into(),
        };
        handle.login(&auth, &form).await.unwrap();
        handle.logout(&auth).await.unwrap();

        assert!(!handle.snapshot().await.auth.is_authenticated);
        assert!(!handle.restore_session(&auth).await.unwrap());
    }

    #[tokio::test]
    async fn theme_export_import_round_trips_colors() {
        let handle = handle();
        handle
            .dispatch(ThemeAction::SetColor {
                key: "primary".into(),
                value: "#ff00aa".into(),
            })
            .await;
        handle
            .dispatch(ThemeAction::SetModuleColor {
                module: "blockchain".into(),
                key: "accent".into(),
                value: "#00ff00".into(),
            })
            .await;
        let exported = handle.export_theme().await.unwrap();
        let before = handle.snapshot().await.theme;

        handle.dispatch(ThemeAction::Reset).await;
        assert_ne!(handle.snapshot().await.theme, before);

        handle.import_theme_json(&exported).await.unwrap();
        let after = handle.snapshot().await.theme;
        assert_eq!(after.colors, before.colors);
        assert_eq!(after.module_colors, before.module_colors);
    }

    #[tokio::test]
    async fn bad_theme_import_raises_one_error_and_changes_nothing() {
        let handle = handle();
        let err = handle.import_theme_json("{ not json").await.unwrap_err();
        assert!(matches!(err, AdminError::ImportError(_)));

        let store = handle.snapshot().await;
        assert_eq!(store.theme, ThemeState::default());
        assert_eq!(store.notifications.notifications.len(), 1);
        let n = &store.notifications.notifications[0];
        assert_eq!(n.kind, NotificationKind::Error);
        assert_eq!(n.message, "Invalid theme file format");
    }

    #[tokio::test]
    async fn file_import_failures_raise_one_error_each() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ broken").unwrap();

        let handle = handle();
        let err = handle.import_theme_file(&broken).await.unwrap_err();
        assert!(matches!(err, AdminError::ImportError(_)));
        let err = handle.import_theme_file(dir.path().join("missing.json")).await.unwrap_err();
        assert!(matches!(err, AdminError::ImportError(_)));

        let store = handle.snapshot().await;
        assert_eq!(store.theme, ThemeState::default());
        assert_eq!(store.notifications.notifications.len(), 2);
        assert!(store
            .notifications
            .notifications
            .iter()
            .all(|n| n.kind == NotificationKind::Error && n.message == "Invalid theme file format"));
    }

    #[tokio::test]
    async fn file_import_applies_exported_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        let handle = handle();
        handle
            .dispatch(ThemeAction::SetColor {
                key: "accent".into(),
                value: "#123456".into(),
            })
            .await;
        std::fs::write(&path, handle.export_theme().await.unwrap()).unwrap();
        handle.dispatch(ThemeAction::Reset).await;

        handle.import_theme_file(&path).await.unwrap();
        let store = handle.snapshot().await;
        assert_eq!(store.theme.colors["accent"], "#123456");
        assert_eq!(store.notifications.notifications[0].title, "Theme imported");
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_users_is_pending_until_the_delay_elapses() {
        let handle = StoreHandle::new(Store::default(), StoreConfig::default());
        let task = tokio::spawn({
            let handle = handle.clone();
            async move { handle.fetch_users().await }
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(handle.read(|s| s.users.loading && s.users.users.is_empty()).await);

        task.await.unwrap();
        let users = handle.snapshot().await.users;
        assert!(!users.loading);
        assert_eq!(users.users, seed::users());
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_products_is_pending_until_the_delay_elapses() {
        let handle = StoreHandle::new(Store::default(), StoreConfig::default());
        let task = tokio::spawn({
            let handle = handle.clone();
            async move { handle.fetch_products().await }
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(handle.read(|s| s.products.loading && s.products.products.is_empty()).await);

        task.await.unwrap();
        let products = handle.snapshot().await.products;
        assert!(!products.loading);
        assert_eq!(products.products, seed::products());
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_analytics_is_pending_until_the_delay_elapses() {
        let handle = StoreHandle::new(Store::default(), StoreConfig::default());
        let task = tokio::spawn({
            let handle = handle.clone();
            async move { handle.fetch_analytics().await }
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(handle.read(|s| s.analytics.loading).await);
        assert_eq!(handle.read(|s| s.analytics.overview.total_revenue).await, 0.0);

        task.await.unwrap();
        let analytics = handle.snapshot().await.analytics;
        assert!(!analytics.loading);
        assert_eq!(analytics.overview, seed::analytics());
    }

    #[tokio::test(start_paused = true)]
    async fn load_all_holds_global_loading_until_every_list_arrives() {
        let handle = StoreHandle::new(Store::default(), StoreConfig::default());
        let task = tokio::spawn({
            let handle = handle.clone();
            async move { handle.load_all().await }
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(handle.read(|s| s.ui.global_loading).await);

        task.await.unwrap();
        let store = handle.snapshot().await;
        assert!(!store.ui.global_loading);
        assert_eq!(store.users.users.len(), 5);
        assert_eq!(store.orders.orders.len(), 5);
        assert_eq!(store.analytics.overview, seed::analytics());
    }
}
