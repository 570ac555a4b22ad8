// adminkit/src/sim/actions.rs
//
// User-triggered panel actions. Each one "works" for a while, then invents a
// plausible result and reports it as a notification.
//

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use crate::errors::AdminError;
use crate::types::{NotificationDraft, NotificationKind};

/// Progress updates per run.
pub const PROGRESS_STEPS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    GenerateInsights,
    TrainModel,
    DeployModel,
    GenerateReport,
    ExecuteContract,
    RunSecurityScan,
    RunCircuit,
    CalibrateSensors,
    RenderVideo,
    ExportData,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunDuration {
    Fixed(Duration),
    Between(Duration, Duration),
}

impl RunDuration {
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Duration {
        match self {
            RunDuration::Fixed(d) => d,
            RunDuration::Between(lo, hi) if hi > lo => {
                Duration::from_millis(rng.gen_range(lo.as_millis() as u64..=hi.as_millis() as u64))
            }
            RunDuration::Between(lo, _) => lo,
        }
    }
}

impl ActionKind {
    pub const ALL: [ActionKind; 10] = [
        ActionKind::GenerateInsights,
        ActionKind::TrainModel,
        ActionKind::DeployModel,
        ActionKind::GenerateReport,
        ActionKind::ExecuteContract,
        ActionKind::RunSecurityScan,
        ActionKind::RunCircuit,
        ActionKind::CalibrateSensors,
        ActionKind::RenderVideo,
        ActionKind::ExportData,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ActionKind::GenerateInsights => "generate-insights",
            ActionKind::TrainModel => "train-model",
            ActionKind::DeployModel => "deploy-model",
            ActionKind::GenerateReport => "generate-report",
            ActionKind::ExecuteContract => "execute-contract",
            ActionKind::RunSecurityScan => "run-security-scan",
            ActionKind::RunCircuit => "run-circuit",
            ActionKind::CalibrateSensors => "calibrate-sensors",
            ActionKind::RenderVideo => "render-video",
            ActionKind::ExportData => "export-data",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::GenerateInsights => "Generate insights",
            ActionKind::TrainModel => "Train model",
            ActionKind::DeployModel => "Deploy model",
            ActionKind::GenerateReport => "Generate report",
            ActionKind::ExecuteContract => "Execute contract",
            ActionKind::RunSecurityScan => "Run security scan",
            ActionKind::RunCircuit => "Run circuit",
            ActionKind::CalibrateSensors => "Calibrate sensors",
            ActionKind::RenderVideo => "Render video",
            ActionKind::ExportData => "Export data",
        }
    }

    pub fn duration(self) -> RunDuration {
        match self {
            ActionKind::GenerateInsights => RunDuration::Fixed(Duration::from_secs(2)),
            ActionKind::TrainModel => {
                RunDuration::Between(Duration::from_secs(5), Duration::from_secs(8))
            }
            ActionKind::DeployModel => RunDuration::Fixed(Duration::from_secs(3)),
            ActionKind::GenerateReport => {
                RunDuration::Between(Duration::from_secs(2), Duration::from_secs(4))
            }
            ActionKind::ExecuteContract => {
                RunDuration::Between(Duration::from_secs(2), Duration::from_secs(5))
            }
            ActionKind::RunSecurityScan => RunDuration::Fixed(Duration::from_secs(4)),
            ActionKind::RunCircuit => {
                RunDuration::Between(Duration::from_secs(1), Duration::from_secs(3))
            }
            ActionKind::CalibrateSensors => RunDuration::Fixed(Duration::from_secs(2)),
            ActionKind::RenderVideo => {
                RunDuration::Between(Duration::from_secs(6), Duration::from_secs(10))
            }
            ActionKind::ExportData => RunDuration::Fixed(Duration::from_millis(1_500)),
        }
    }

    /// Fabricated outcome of a finished run.
    pub fn synthesize<R: Rng + ?Sized>(self, rng: &mut R) -> NotificationDraft {
        let success = NotificationKind::Success;
        match self {
            ActionKind::GenerateInsights => {
                let trends = ["seasonal uplift", "cart abandonment", "repeat buyers", "mobile traffic"];
                let trend = trends[rng.gen_range(0..trends.len())];
                NotificationDraft::new(
                    "Insights ready",
                    format!(
                        "Detected {} with {:.1}% confidence across {} sessions",
                        trend,
                        rng.gen_range(85.0..99.0),
                        rng.gen_range(1_000..25_000)
                    ),
                    success,
                )
            }
            ActionKind::TrainModel => NotificationDraft::new(
                "Training complete",
                format!(
                    "{} epochs finished, validation accuracy {:.2}%",
                    rng.gen_range(20..120),
                    rng.gen_range(88.0..99.0)
                ),
                success,
            ),
            ActionKind::DeployModel => NotificationDraft::new(
                "Model deployed",
                format!("Version v{}.{}.{} is now serving traffic", rng.gen_range(1..4), rng.gen_range(0..10), rng.gen_range(0..20)),
                success,
            ),
            ActionKind::GenerateReport => NotificationDraft::new(
                "Report generated",
                format!(
                    "Forecast projects {:+.1}% revenue change next quarter",
                    rng.gen_range(-5.0..25.0)
                ),
                NotificationKind::Info,
            ),
            ActionKind::ExecuteContract => {
                let hash: String = (0..16).map(|_| format!("{:x}", rng.gen_range(0..16u8))).collect();
                NotificationDraft::new(
                    "Contract executed",
                    format!(
                        "Transaction 0x{} confirmed in block {} ({} gas)",
                        hash,
                        rng.gen_range(18_000_000..19_000_000u64),
                        rng.gen_range(21_000..250_000u64)
                    ),
                    success,
                )
            }
            ActionKind::RunSecurityScan => {
                let findings = rng.gen_range(0..4);
                let kind = if findings == 0 { success } else { NotificationKind::Warning };
                NotificationDraft::new(
                    "Security scan finished",
                    format!("{} endpoints scanned, {} issue(s) found", rng.gen_range(40..200), findings),
                    kind,
                )
            }
            ActionKind::RunCircuit => NotificationDraft::new(
                "Circuit executed",
                format!(
                    "{} shots on {} qubits, fidelity {:.2}%",
                    rng.gen_range(512..8_192),
                    rng.gen_range(4..64),
                    rng.gen_range(95.0..99.9)
                ),
                success,
            ),
            ActionKind::CalibrateSensors => NotificationDraft::new(
                "Calibration complete",
                format!("Drift corrected by {:.2}%", rng.gen_range(0.1..3.0)),
                success,
            ),
            ActionKind::RenderVideo => NotificationDraft::new(
                "Render finished",
                format!(
                    "Exported {}s of 1080p footage ({:.1} MB)",
                    rng.gen_range(15..300),
                    rng.gen_range(20.0..900.0)
                ),
                success,
            ),
            ActionKind::ExportData => NotificationDraft::new(
                "Export ready",
                format!("{} rows written to export-{}.csv", rng.gen_range(100..10_000), Utc::now().format("%Y%m%d")),
                NotificationKind::Info,
            ),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ActionKind {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| AdminError::NotFound(format!("action `{}`", s)))
    }
}

/// An in-flight action on a mounted panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRun {
    pub id: Uuid,
    pub kind: ActionKind,
    pub progress: f64,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl ActionRun {
    pub fn new(kind: ActionKind, duration: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            progress: 0.0,
            started_at: Utc::now(),
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn step(&self) -> Duration {
        (Duration::from_millis(self.duration_ms) / PROGRESS_STEPS).max(Duration::from_millis(1))
    }

    /// Advances one step; true once the run reaches 100%.
    pub fn advance(&mut self) -> bool {
        self.progress = (self.progress + 100.0 / f64::from(PROGRESS_STEPS)).min(100.0);
        self.progress >= 100.0 - 1e-9
    }

    pub fn is_done(&self) -> bool {
        self.progress >= 100.0 - 1e-9
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_kind_synthesizes_a_message() {
        let mut rng = StdRng::seed_from_u64(11);
        for kind in ActionKind::ALL {
            let draft = kind.synthesize(&mut rng);
            assert!(!draft.title.is_empty());
            assert!(!draft.message.is_empty());
            assert_eq!(kind.slug().parse::<ActionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn random_durations_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let spec = RunDuration::Between(Duration::from_secs(2), Duration::from_secs(5));
        for _ in 0..100 {
            let d = spec.resolve(&mut rng);
            assert!(d >= Duration::from_secs(2) && d <= Duration::from_secs(5));
        }
    }

    #[test]
    fn run_completes_after_fixed_steps() {
        let mut run = ActionRun::new(ActionKind::ExportData, Duration::from_secs(2));
        assert_eq!(run.step(), Duration::from_millis(100));
        let mut steps = 0;
        while !run.advance() {
            steps += 1;
            assert!(steps < 100, "run never finished");
        }
        assert_eq!(steps + 1, PROGRESS_STEPS);
        assert_eq!(run.progress, 100.0);
    }
}
