use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::routes::Route;
use crate::sim::actions::{ActionKind, ActionRun};
use crate::sim::catalog::PanelId;
use crate::sim::metric::SimulatedMetric;

/// Local state of one simulated panel. Owned by the panel, never shared.
#[derive(Debug, Clone)]
pub struct PanelState {
    pub id: PanelId,
    pub metrics: Vec<SimulatedMetric>,
    pub ticks: u64,
    pub mounted: bool,
    pub runs: BTreeMap<Uuid, ActionRun>,
}

impl PanelState {
    pub fn seeded(id: PanelId) -> Self {
        Self {
            id,
            metrics: id.spec().metrics.iter().map(SimulatedMetric::from_spec).collect(),
            ticks: 0,
            mounted: false,
            runs: BTreeMap::new(),
        }
    }

    /// Advances every metric once. A no-op on an unmounted panel.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.mounted {
            return false;
        }
        for metric in &mut self.metrics {
            metric.tick(rng);
        }
        self.ticks += 1;
        true
    }

    /// Back to seed values; drops any in-flight runs.
    pub fn reset(&mut self) {
        for metric in &mut self.metrics {
            metric.reset();
        }
        self.ticks = 0;
        self.runs.clear();
    }

    pub fn metric(&self, key: &str) -> Option<&SimulatedMetric> {
        self.metrics.iter().find(|m| m.key == key)
    }

    pub fn pending(&self) -> bool {
        !self.runs.is_empty()
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        let spec = self.id.spec();
        PanelSnapshot {
            id: self.id,
            title: spec.title.to_string(),
            route: Route::Panel(self.id).path(),
            period_ms: spec.period.as_millis() as u64,
            metrics: self.metrics.clone(),
            ticks: self.ticks,
            mounted: self.mounted,
            pending: self.pending(),
            runs: self.runs.values().cloned().collect(),
            actions: spec.actions.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub id: PanelId,
    pub title: String,
    pub route: String,
    pub period_ms: u64,
    pub metrics: Vec<SimulatedMetric>,
    pub ticks: u64,
    pub mounted: bool,
    pub pending: bool,
    pub runs: Vec<ActionRun>,
    pub actions: Vec<ActionKind>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    #[test]
    fn unmounted_panel_ignores_ticks() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut panel = PanelState::seeded(PanelId::SystemMonitor);
        let before = panel.metrics.clone();

        assert!(!panel.tick(&mut rng));
        assert_eq!(panel.metrics, before);
        assert_eq!(panel.ticks, 0);
    }

    #[test]
    fn reset_clears_runs_and_ticks() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut panel = PanelState::seeded(PanelId::Blockchain);
        panel.mounted = true;
        for _ in 0..10 {
            panel.tick(&mut rng);
        }
        let run = ActionRun::new(ActionKind::ExecuteContract, Duration::from_secs(2));
        panel.runs.insert(run.id, run);
        assert!(panel.pending());

        panel.reset();
        assert_eq!(panel.ticks, 0);
        assert!(!panel.pending());
        assert_eq!(panel.metric("gas_price").map(|m| m.value), Some(42.0));
    }

    #[test]
    fn snapshot_carries_route_and_actions() {
        let snap = PanelState::seeded(PanelId::NeuralNetwork).snapshot();
        assert_eq!(snap.route, "/admin/neural-network");
        assert_eq!(snap.actions, vec![ActionKind::TrainModel, ActionKind::DeployModel]);
        assert_eq!(snap.period_ms, 2_000);
        assert!(!snap.mounted);
    }
}
