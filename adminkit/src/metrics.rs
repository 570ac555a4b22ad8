use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, Encoder,
    HistogramVec, IntCounterVec, IntGauge, TextEncoder,
};

use crate::errors::AdminError;

lazy_static! {
    pub static ref ACTIONS_DISPATCHED: IntCounterVec = register_int_counter_vec!(
        "admin_actions_dispatched_total",
        "Store actions dispatched, by slice",
        &["slice"]
    ).unwrap();

    pub static ref NOTIFICATIONS_PUSHED: IntCounterVec = register_int_counter_vec!(
        "admin_notifications_pushed_total",
        "Notifications added to the bus, by type",
        &["kind"]
    ).unwrap();

    pub static ref SIMULATION_TICKS: IntCounterVec = register_int_counter_vec!(
        "admin_simulation_ticks_total",
        "Metric ticks applied, by panel",
        &["panel"]
    ).unwrap();

    pub static ref MOUNTED_PANELS: IntGauge = register_int_gauge!(
        "admin_mounted_panels",
        "Panels currently mounted"
    ).unwrap();

    pub static ref ACTION_RUN_DURATION: HistogramVec = register_histogram_vec!(
        "admin_action_run_duration_seconds",
        "Wall time of completed panel actions",
        &["action", "status"]
    ).unwrap();
}

pub fn record_dispatch(slice: &str) {
    ACTIONS_DISPATCHED.with_label_values(&[slice]).inc();
}

pub fn record_notification(kind: &str) {
    NOTIFICATIONS_PUSHED.with_label_values(&[kind]).inc();
}

pub fn record_tick(panel: &str) {
    SIMULATION_TICKS.with_label_values(&[panel]).inc();
}

pub fn record_action_run(action: &str, completed: bool, duration: f64) {
    let status = if completed { "completed" } else { "dropped" };
    ACTION_RUN_DURATION
        .with_label_values(&[action, status])
        .observe(duration);
}

/// Default registry in the Prometheus text format.
pub fn gather_text() -> Result<String, AdminError> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| AdminError::Unknown(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| AdminError::Unknown(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_show_up_in_text_output() {
        record_dispatch("ui");
        record_notification("info");
        let text = gather_text().unwrap();
        assert!(text.contains("admin_actions_dispatched_total"));
        assert!(text.contains("admin_notifications_pushed_total"));
    }
}
