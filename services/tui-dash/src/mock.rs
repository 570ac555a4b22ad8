// services/tui-dash/src/mock.rs
//
// Local simulation for demo mode. Drives the same panel state and store the
// admin API uses, without a runtime: every update advances the clock by one
// refresh interval.

use std::collections::HashMap;
use std::time::Duration;

use adminkit::sim::{ActionRun, PanelId, PanelState};
use adminkit::store::{NotificationsAction, OrdersAction};
use adminkit::types::{Notification, NotificationDraft, NotificationKind};
use adminkit::Store;
use rand::Rng;
use uuid::Uuid;

use crate::state::DashboardState;

/// Panels mounted when the demo starts.
const DEMO_PANELS: [PanelId; 4] = [
    PanelId::SystemMonitor,
    PanelId::AiInsights,
    PanelId::Blockchain,
    PanelId::AudioVisualizer,
];

pub struct MockDataGenerator {
    tick_count: u64,
    started: bool,
    step: Duration,
    panels: Vec<PanelState>,
    since_tick: Vec<Duration>,
    run_clock: HashMap<Uuid, Duration>,
    store: Store,
}

impl MockDataGenerator {
    pub fn new(step: Duration) -> Self {
        Self {
            tick_count: 0,
            started: false,
            step,
            panels: PanelId::ALL.into_iter().map(PanelState::seeded).collect(),
            since_tick: vec![Duration::ZERO; PanelId::ALL.len()],
            run_clock: HashMap::new(),
            store: Store::seeded(),
        }
    }

    pub fn update(&mut self, state: &mut DashboardState) {
        self.tick_count += 1;

        // Initialize on first tick
        if !self.started {
            self.initialize(state);
            self.started = true;
            self.publish(state);
            return;
        }

        if state.is_paused {
            return;
        }

        state.elapsed_secs += self.step.as_secs_f64();
        state.update_elapsed();

        let mut rng = rand::thread_rng();

        for (i, panel) in self.panels.iter_mut().enumerate() {
            if !panel.mounted {
                continue;
            }
            self.since_tick[i] += self.step;
            let period = panel.id.spec().period;
            while self.since_tick[i] >= period {
                self.since_tick[i] -= period;
                panel.tick(&mut rng);
            }
        }

        self.advance_runs(state);

        // Orders trickle through the pipeline
        if self.tick_count % 150 == 0 {
            self.advance_random_order(state, &mut rng);
        }

        self.publish(state);
    }

    /// Starts the first action the selected panel offers.
    pub fn trigger(&mut self, state: &mut DashboardState) {
        let Some(panel) = self.panels.get_mut(state.selected) else {
            return;
        };
        if !panel.mounted {
            state.add_log("WARN", &format!("{} is not mounted", panel.id.title()));
            return;
        }
        let Some(kind) = panel.id.spec().actions.first().copied() else {
            state.add_log("WARN", &format!("{} has no actions", panel.id.title()));
            return;
        };

        let duration = kind.duration().resolve(&mut rand::thread_rng());
        let run = ActionRun::new(kind, duration);
        self.run_clock.insert(run.id, Duration::ZERO);
        panel.runs.insert(run.id, run);
        state.add_log("INFO", &format!("{}: {} started", panel.id.title(), kind.label()));
        self.publish(state);
    }

    pub fn toggle_mount(&mut self, state: &mut DashboardState) {
        let Some(panel) = self.panels.get_mut(state.selected) else {
            return;
        };
        if panel.mounted {
            for id in panel.runs.keys() {
                self.run_clock.remove(id);
            }
            panel.mounted = false;
            panel.reset();
            state.add_log("INFO", &format!("Unmounted {}", panel.id.title()));
        } else {
            panel.mounted = true;
            self.since_tick[state.selected] = Duration::ZERO;
            state.add_log("INFO", &format!("Mounted {}", panel.id.title()));
        }
        self.publish(state);
    }

    pub fn mark_all_read(&mut self, state: &mut DashboardState) {
        self.store.dispatch(NotificationsAction::MarkAllAsRead);
        self.publish(state);
    }

    fn advance_runs(&mut self, state: &mut DashboardState) {
        let mut finished = Vec::new();

        for panel in self.panels.iter_mut().filter(|p| p.mounted) {
            for run in panel.runs.values_mut() {
                let clock = self.run_clock.entry(run.id).or_default();
                *clock += self.step;
                while *clock >= run.step() && !run.is_done() {
                    *clock -= run.step();
                    run.advance();
                }
                if run.is_done() {
                    finished.push((panel.id, run.id, run.kind));
                }
            }
        }

        let mut rng = rand::thread_rng();
        for (panel_id, run_id, kind) in finished {
            if let Some(panel) = self.panels.iter_mut().find(|p| p.id == panel_id) {
                panel.runs.remove(&run_id);
            }
            self.run_clock.remove(&run_id);

            let draft = kind.synthesize(&mut rng);
            state.add_log("INFO", &format!("{}: {}", draft.title, draft.message));
            self.notify(draft);
        }
    }

    fn advance_random_order<R: Rng>(&mut self, state: &mut DashboardState, rng: &mut R) {
        let open: Vec<_> = self
            .store
            .orders
            .orders
            .iter()
            .filter_map(|o| o.status.next().map(|next| (o.id.clone(), next)))
            .collect();
        if open.is_empty() {
            return;
        }

        let (id, status) = open[rng.gen_range(0..open.len())].clone();
        self.store.dispatch(OrdersAction::UpdateStatus {
            id: id.clone(),
            status,
        });
        state.add_log("INFO", &format!("Order #{} is now {}", id, status));
        self.notify(NotificationDraft::new(
            "Order updated",
            format!("Order #{} moved to {}", id, status),
            NotificationKind::Info,
        ));
    }

    fn notify(&mut self, draft: NotificationDraft) {
        self.store
            .dispatch(NotificationsAction::Add(Notification::from_draft(draft)));
    }

    fn publish(&self, state: &mut DashboardState) {
        state.panels = self.panels.iter().map(PanelState::snapshot).collect();
        state.notifications = self.store.notifications.clone();
        state.orders = self.store.orders.orders.clone();
        state.total_revenue = self.store.analytics.overview.total_revenue;
    }

    fn initialize(&mut self, state: &mut DashboardState) {
        for panel in self.panels.iter_mut() {
            if DEMO_PANELS.contains(&panel.id) {
                panel.mounted = true;
            }
        }

        state.add_log("INFO", "TUI Dashboard initialized - Demo Mode");
        state.add_log(
            "INFO",
            &format!(
                "Loaded {} users, {} products, {} orders",
                self.store.users.users.len(),
                self.store.products.products.len(),
                self.store.orders.orders.len()
            ),
        );
        for id in DEMO_PANELS {
            state.add_log("INFO", &format!("Mounted {}", id.title()));
        }
    }
}
