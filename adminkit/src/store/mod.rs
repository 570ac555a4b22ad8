// adminkit/src/store/mod.rs
//
// Global store. Each slice owns its state and a pure reducer; `Store::dispatch`
// routes a top-level action to exactly one slice.
//

pub mod analytics;
pub mod auth;
pub mod handle;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod theme;
pub mod ui;
pub mod users;

use serde::{Deserialize, Serialize};

use crate::metrics;
use crate::seed;

pub use analytics::{AnalyticsAction, AnalyticsState};
pub use auth::{AuthAction, AuthState};
pub use handle::StoreHandle;
pub use notifications::{NotificationsAction, NotificationsState};
pub use orders::{OrdersAction, OrdersState};
pub use products::{ProductsAction, ProductsState};
pub use theme::{ThemeAction, ThemeState};
pub use ui::{UiAction, UiState};
pub use users::{UsersAction, UsersState};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Users(UsersAction),
    Products(ProductsAction),
    Orders(OrdersAction),
    Analytics(AnalyticsAction),
    Notifications(NotificationsAction),
    Theme(ThemeAction),
    Ui(UiAction),
}

impl Action {
    pub fn slice(&self) -> &'static str {
        match self {
            Action::Auth(_) => "auth",
            Action::Users(_) => "users",
            Action::Products(_) => "products",
            Action::Orders(_) => "orders",
            Action::Analytics(_) => "analytics",
            Action::Notifications(_) => "notifications",
            Action::Theme(_) => "theme",
            Action::Ui(_) => "ui",
        }
    }
}

macro_rules! impl_from_slice_action {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Action {
                fn from(action: $ty) -> Self {
                    Action::$variant(action)
                }
            }
        )*
    };
}

impl_from_slice_action! {
    Auth => AuthAction,
    Users => UsersAction,
    Products => ProductsAction,
    Orders => OrdersAction,
    Analytics => AnalyticsAction,
    Notifications => NotificationsAction,
    Theme => ThemeAction,
    Ui => UiAction,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub auth: AuthState,
    pub users: UsersState,
    pub products: ProductsState,
    pub orders: OrdersState,
    pub analytics: AnalyticsState,
    pub notifications: NotificationsState,
    pub theme: ThemeState,
    pub ui: UiState,
}

impl Store {
    /// Store with every list already fulfilled from the seed data.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        store.users.users = seed::users();
        store.products.products = seed::products();
        store.orders.orders = seed::orders();
        store.analytics.overview = seed::analytics();
        store
    }

    pub fn dispatch(&mut self, action: impl Into<Action>) {
        let action = action.into();
        metrics::record_dispatch(action.slice());

        match action {
            Action::Auth(a) => auth::reduce(&mut self.auth, a),
            Action::Users(a) => users::reduce(&mut self.users, a),
            Action::Products(a) => products::reduce(&mut self.products, a),
            Action::Orders(a) => orders::reduce(&mut self.orders, a),
            Action::Analytics(a) => analytics::reduce(&mut self.analytics, a),
            Action::Notifications(a) => {
                if let NotificationsAction::Add(n) = &a {
                    metrics::record_notification(n.kind.as_str());
                }
                notifications::reduce(&mut self.notifications, a)
            }
            Action::Theme(a) => theme::reduce(&mut self.theme, a),
            Action::Ui(a) => ui::reduce(&mut self.ui, a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Notification, NotificationDraft, NotificationKind, OrderStatus, UserStatus};

    #[test]
    fn dispatch_touches_only_the_target_slice() {
        let mut store = Store::seeded();
        let before = store.clone();

        store.dispatch(OrdersAction::UpdateStatus {
            id: "2".into(),
            status: OrderStatus::Shipped,
        });

        assert_eq!(store.users, before.users);
        assert_eq!(store.products, before.products);
        assert_eq!(store.notifications, before.notifications);
        assert_eq!(store.orders.get("2").map(|o| o.status), Some(OrderStatus::Shipped));
    }

    #[test]
    fn slice_actions_convert_into_action() {
        let action: Action = UsersAction::UpdateStatus {
            id: "3".into(),
            status: UserStatus::Active,
        }
        .into();
        assert_eq!(action.slice(), "users");

        let mut store = Store::seeded();
        store.dispatch(action);
        assert_eq!(store.users.get("3").map(|u| u.status), Some(UserStatus::Active));
    }

    #[test]
    fn notifications_flow_through_dispatch() {
        let mut store = Store::default();
        let n = Notification::from_draft(NotificationDraft::new("Hi", "there", NotificationKind::Warning));
        store.dispatch(NotificationsAction::Add(n));
        assert_eq!(store.notifications.unread_count, 1);
    }
}
