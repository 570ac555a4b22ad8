// services/tui-dash/src/api.rs
//
// API client for polling a running admin-api

use std::collections::HashSet;
use std::time::Duration;

use adminkit::sim::PanelSnapshot;
use adminkit::store::{AnalyticsState, NotificationsState, OrdersState};
use adminkit::types::{AnalyticsOverview, Notification};
use anyhow::Result;

use crate::state::DashboardState;

pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
    connected: bool,
    last_error: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            connected: false,
            last_error: None,
        }
    }

    fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send()?.error_for_status()?;
        Ok(response.json::<T>()?)
    }

    fn post(&self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        self.client.post(&url).send()?.error_for_status()?;
        Ok(())
    }

    pub fn fetch_status(&mut self, state: &mut DashboardState) {
        let polled = self.get::<Vec<PanelSnapshot>>("/api/panels").and_then(|panels| {
            let notifications = self.get::<NotificationsState>("/api/notifications")?;
            let orders = self.get::<OrdersState>("/api/orders")?;
            let analytics = self.get::<AnalyticsState>("/api/analytics")?;
            Ok((panels, notifications, orders, analytics.overview))
        });

        match polled {
            Ok((panels, notifications, orders, overview)) => {
                if !self.connected {
                    state.add_log("INFO", &format!("Connected to admin-api at {}", self.base_url));
                }
                self.connected = true;
                self.last_error = None;
                self.update_state(state, panels, notifications, orders, overview);
            }
            Err(e) => {
                if self.connected {
                    state.add_log("WARN", &format!("Lost connection to admin-api: {}", e));
                } else if self.last_error.is_none() {
                    state.add_log("INFO", &format!("Connecting to {}...", self.base_url));
                }
                self.connected = false;
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn update_state(
        &self,
        state: &mut DashboardState,
        panels: Vec<PanelSnapshot>,
        notifications: NotificationsState,
        orders: OrdersState,
        overview: AnalyticsOverview,
    ) {
        for n in fresh_notifications(&state.notifications, &notifications).into_iter().rev() {
            state.add_log("INFO", &format!("{}: {}", n.title, n.message));
        }

        state.panels = panels;
        state.selected = state.selected.min(state.panels.len().saturating_sub(1));
        state.notifications = notifications;
        state.orders = orders.orders;
        state.total_revenue = overview.total_revenue;
    }

    pub fn trigger(&mut self, state: &mut DashboardState) {
        let Some(panel) = state.selected_panel() else {
            return;
        };
        let Some(kind) = panel.actions.first().copied() else {
            let msg = format!("{} has no actions", panel.title);
            state.add_log("WARN", &msg);
            return;
        };
        let path = format!("/api/panels/{}/actions/{}", panel.id, kind);
        let title = panel.title.clone();

        match self.post(&path) {
            Ok(()) => state.add_log("INFO", &format!("{}: {} started", title, kind.label())),
            Err(e) => state.add_log("ERROR", &format!("{} failed: {}", kind.label(), e)),
        }
    }

    pub fn toggle_mount(&mut self, state: &mut DashboardState) {
        let Some(panel) = state.selected_panel() else {
            return;
        };
        let verb = if panel.mounted { "unmount" } else { "mount" };
        let path = format!("/api/panels/{}/{}", panel.id, verb);

        if let Err(e) = self.post(&path) {
            state.add_log("ERROR", &format!("Failed to {} panel: {}", verb, e));
        }
    }

    pub fn mark_all_read(&mut self, state: &mut DashboardState) {
        if let Err(e) = self.post("/api/notifications/read-all") {
            state.add_log("ERROR", &format!("Failed to mark notifications read: {}", e));
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Notifications in `incoming` newer than anything already shown, newest
/// first. The list is newest-first, so these are the entries ahead of the
/// first known id. Removals or a reset list do not shift the window.
fn fresh_notifications<'a>(
    known: &NotificationsState,
    incoming: &'a NotificationsState,
) -> Vec<&'a Notification> {
    let seen: HashSet<&str> = known.notifications.iter().map(|n| n.id.as_str()).collect();
    incoming
        .notifications
        .iter()
        .take_while(|n| !seen.contains(n.id.as_str()))
        .collect()
}
