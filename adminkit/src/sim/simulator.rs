// adminkit/src/sim/simulator.rs
//
// Mount/unmount lifecycle for the simulated panels. A mounted panel owns one
// ticker task plus one task per in-flight action; unmounting aborts all of
// them and puts the panel back on its seed values. A run that already
// completed still delivers its notification.
//

use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SimulationConfig;
use crate::errors::AdminError;
use crate::metrics;
use crate::sim::actions::{ActionKind, ActionRun};
use crate::sim::catalog::PanelId;
use crate::sim::panel::{PanelSnapshot, PanelState};
use crate::store::StoreHandle;

struct PanelHandle {
    state: Arc<Mutex<PanelState>>,
    ticker: JoinHandle<()>,
    runs: Mutex<Vec<JoinHandle<()>>>,
}

pub struct Simulator {
    store: StoreHandle,
    config: SimulationConfig,
    panels: DashMap<PanelId, PanelHandle>,
}

impl Simulator {
    pub fn new(store: StoreHandle, config: SimulationConfig) -> Self {
        Self {
            store,
            config,
            panels: DashMap::new(),
        }
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Starts the panel's ticker. Mounting an already mounted panel is a
    /// no-op. Must be called from within a tokio runtime.
    pub fn mount(&self, id: PanelId) -> PanelSnapshot {
        let entry = self.panels.entry(id).or_insert_with(|| {
            let mut panel = PanelState::seeded(id);
            panel.mounted = true;
            let state = Arc::new(Mutex::new(panel));
            let period = self.config.scale(id.spec().period);
            let ticker = tokio::spawn(run_ticker(id, state.clone(), period));

            metrics::MOUNTED_PANELS.inc();
            info!("Mounted panel {} (tick every {:?})", id, period);

            PanelHandle {
                state,
                ticker,
                runs: Mutex::new(Vec::new()),
            }
        });
        let snapshot = entry.state.lock().snapshot();
        snapshot
    }

    /// Stops the panel and resets it to seed values. Returns false if it was
    /// not mounted.
    pub fn unmount(&self, id: PanelId) -> bool {
        let Some((_, handle)) = self.panels.remove(&id) else {
            return false;
        };

        {
            let mut panel = handle.state.lock();
            panel.mounted = false;
            for run in panel.runs.values() {
                let elapsed = (chrono::Utc::now() - run.started_at)
                    .to_std()
                    .unwrap_or_default();
                metrics::record_action_run(run.kind.slug(), false, elapsed.as_secs_f64());
            }
            panel.reset();
        }

        handle.ticker.abort();
        for run in handle.runs.lock().drain(..) {
            run.abort();
        }

        metrics::MOUNTED_PANELS.dec();
        info!("Unmounted panel {}", id);
        true
    }

    pub fn is_mounted(&self, id: PanelId) -> bool {
        self.panels.contains_key(&id)
    }

    pub fn mounted(&self) -> Vec<PanelId> {
        let mut ids: Vec<PanelId> = self.panels.iter().map(|entry| *entry.key()).collect();
        ids.sort();
        ids
    }

    /// Live state for a mounted panel, seed state otherwise.
    pub fn snapshot(&self, id: PanelId) -> PanelSnapshot {
        match self.panels.get(&id) {
            Some(handle) => handle.state.lock().snapshot(),
            None => PanelState::seeded(id).snapshot(),
        }
    }

    pub fn snapshot_all(&self) -> Vec<PanelSnapshot> {
        PanelId::ALL.into_iter().map(|id| self.snapshot(id)).collect()
    }

    /// Starts an independent run of `kind` on a mounted panel.
    pub fn trigger(&self, id: PanelId, kind: ActionKind) -> Result<Uuid, AdminError> {
        if !id.spec().supports(kind) {
            return Err(AdminError::SimulationError(format!(
                "panel {} has no action {}",
                id, kind
            )));
        }
        let handle = self
            .panels
            .get(&id)
            .ok_or_else(|| AdminError::SimulationError(format!("panel {} is not mounted", id)))?;

        let duration = self.config.scale(kind.duration().resolve(&mut rand::thread_rng()));
        let run = ActionRun::new(kind, duration);
        let run_id = run.id;
        let step = run.step();
        handle.state.lock().runs.insert(run_id, run);

        let task = tokio::spawn(run_action(
            handle.state.clone(),
            self.store.clone(),
            run_id,
            kind,
            step,
        ));

        let mut runs = handle.runs.lock();
        runs.retain(|t| !t.is_finished());
        runs.push(task);

        debug!("Started {} on {} ({:?})", kind, id, duration);
        Ok(run_id)
    }

    pub fn shutdown(&self) {
        let ids: Vec<PanelId> = self.panels.iter().map(|entry| *entry.key()).collect();
        for id in ids {
            self.unmount(id);
        }
    }
}

impl Drop for Simulator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_ticker(id: PanelId, state: Arc<Mutex<PanelState>>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;
        let ticked = {
            let mut rng = rand::thread_rng();
            let mut panel = state.lock();
            panel.tick(&mut rng)
        };
        if !ticked {
            break;
        }
        metrics::record_tick(id.slug());
    }
}

async fn run_action(
    state: Arc<Mutex<PanelState>>,
    store: StoreHandle,
    run_id: Uuid,
    kind: ActionKind,
    step: Duration,
) {
    let started = Instant::now();
    let mut interval = tokio::time::interval(step);
    interval.tick().await;

    loop {
        interval.tick().await;
        let done = {
            let mut panel = state.lock();
            if !panel.mounted {
                return;
            }
            match panel.runs.get_mut(&run_id) {
                Some(run) => run.advance(),
                None => return,
            }
        };
        if done {
            break;
        }
    }

    let draft = {
        let mut panel = state.lock();
        if !panel.mounted || panel.runs.remove(&run_id).is_none() {
            warn!("Run {} vanished before completion", run_id);
            return;
        }
        let mut rng = rand::thread_rng();
        kind.synthesize(&mut rng)
    };

    metrics::record_action_run(kind.slug(), true, started.elapsed().as_secs_f64());
    // The run is complete once removed. Its notification is delivered from a
    // detached task so an unmount while the store is busy cannot cancel it.
    tokio::spawn(async move {
        store.notify(draft).await;
    });
}
