// services/tui-dash/src/state.rs
//
// Dashboard state management

use adminkit::sim::PanelSnapshot;
use adminkit::store::NotificationsState;
use adminkit::types::{Order, OrderStatus};
use chrono::{DateTime, Local};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Clone)]
pub struct DashboardState {
    // Panels, in catalog order
    pub panels: Vec<PanelSnapshot>,
    pub selected: usize,

    // Store mirrors
    pub notifications: NotificationsState,
    pub orders: Vec<Order>,
    pub total_revenue: f64,

    // Status
    pub is_paused: bool,
    pub elapsed_secs: f64,
    pub elapsed_display: String,

    // Activity log
    pub activity_log: Vec<LogEntry>,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: String, // INFO, WARN, ERROR
    pub message: String,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            panels: Vec::new(),
            selected: 0,
            notifications: NotificationsState::default(),
            orders: Vec::new(),
            total_revenue: 0.0,
            is_paused: false,
            elapsed_secs: 0.0,
            elapsed_display: "00:00:00".to_string(),
            activity_log: Vec::new(),
        }
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
        if self.is_paused {
            self.add_log("WARN", "Simulation paused by user");
        } else {
            self.add_log("INFO", "Simulation resumed");
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
        self.add_log("INFO", "Dashboard reset");
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.panels.len() {
            self.selected += 1;
        }
    }

    pub fn selected_panel(&self) -> Option<&PanelSnapshot> {
        self.panels.get(self.selected)
    }

    pub fn mounted_count(&self) -> usize {
        self.panels.iter().filter(|p| p.mounted).count()
    }

    pub fn open_orders(&self) -> usize {
        self.orders
            .iter()
            .filter(|o| matches!(o.status, OrderStatus::Pending | OrderStatus::Processing))
            .count()
    }

    pub fn add_log(&mut self, level: &str, message: &str) {
        self.activity_log.push(LogEntry {
            timestamp: Local::now(),
            level: level.to_string(),
            message: message.to_string(),
        });

        if self.activity_log.len() > MAX_LOG_ENTRIES {
            self.activity_log.remove(0);
        }
    }

    pub fn update_elapsed(&mut self) {
        let hours = (self.elapsed_secs / 3600.0) as u32;
        let minutes = ((self.elapsed_secs % 3600.0) / 60.0) as u32;
        let seconds = (self.elapsed_secs % 60.0) as u32;
        self.elapsed_display = format!("{:02}:{:02}:{:02}", hours, minutes, seconds);
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminkit::sim::{PanelId, PanelState};

    #[test]
    fn log_is_capped() {
        let mut state = DashboardState::new();
        for i in 0..150 {
            state.add_log("INFO", &i.to_string());
        }
        assert_eq!(state.activity_log.len(), MAX_LOG_ENTRIES);
        assert_eq!(state.activity_log[0].message, "50");
    }

    #[test]
    fn selection_stays_in_range() {
        let mut state = DashboardState::new();
        state.panels = PanelId::ALL[..3]
            .iter()
            .map(|id| PanelState::seeded(*id).snapshot())
            .collect();

        state.select_prev();
        assert_eq!(state.selected, 0);
        for _ in 0..10 {
            state.select_next();
        }
        assert_eq!(state.selected, 2);
        assert_eq!(state.selected_panel().map(|p| p.id), Some(PanelId::ALL[2]));
    }

    #[test]
    fn elapsed_formats_as_clock() {
        let mut state = DashboardState::new();
        state.elapsed_secs = 3_725.0;
        state.update_elapsed();
        assert_eq!(state.elapsed_display, "01:02:05");
    }
}
