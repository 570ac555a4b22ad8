pub mod actions;
pub mod catalog;
pub mod metric;
pub mod panel;
pub mod simulator;

pub use actions::{ActionKind, ActionRun, RunDuration};
pub use catalog::{MetricSpec, PanelId, PanelSpec};
pub use metric::{Drift, SimulatedMetric};
pub use panel::{PanelSnapshot, PanelState};
pub use simulator::Simulator;
