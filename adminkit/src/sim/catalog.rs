// adminkit/src/sim/catalog.rs
//
// Static description of every simulated feature panel: its tick period, the
// metrics it animates and the actions it offers.
//

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::AdminError;
use crate::sim::actions::ActionKind;
use crate::sim::metric::Drift;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelId {
    AiInsights,
    NeuralNetwork,
    PredictiveAnalytics,
    SmartRecommendations,
    ChatbotAssistant,
    VoiceCommands,
    GestureControl,
    ArOverlay,
    VrWorkspace,
    Blockchain,
    SecurityCenter,
    SystemMonitor,
    IotSensors,
    QuantumLab,
    AudioVisualizer,
    VideoRendering,
}

impl PanelId {
    pub const ALL: [PanelId; 16] = [
        PanelId::AiInsights,
        PanelId::NeuralNetwork,
        PanelId::PredictiveAnalytics,
        PanelId::SmartRecommendations,
        PanelId::ChatbotAssistant,
        PanelId::VoiceCommands,
        PanelId::GestureControl,
        PanelId::ArOverlay,
        PanelId::VrWorkspace,
        PanelId::Blockchain,
        PanelId::SecurityCenter,
        PanelId::SystemMonitor,
        PanelId::IotSensors,
        PanelId::QuantumLab,
        PanelId::AudioVisualizer,
        PanelId::VideoRendering,
    ];

    pub fn slug(self) -> &'static str {
        self.spec().slug
    }

    pub fn title(self) -> &'static str {
        self.spec().title
    }

    pub fn spec(self) -> &'static PanelSpec {
        match self {
            PanelId::AiInsights => &AI_INSIGHTS,
            PanelId::NeuralNetwork => &NEURAL_NETWORK,
            PanelId::PredictiveAnalytics => &PREDICTIVE_ANALYTICS,
            PanelId::SmartRecommendations => &SMART_RECOMMENDATIONS,
            PanelId::ChatbotAssistant => &CHATBOT_ASSISTANT,
            PanelId::VoiceCommands => &VOICE_COMMANDS,
            PanelId::GestureControl => &GESTURE_CONTROL,
            PanelId::ArOverlay => &AR_OVERLAY,
            PanelId::VrWorkspace => &VR_WORKSPACE,
            PanelId::Blockchain => &BLOCKCHAIN,
            PanelId::SecurityCenter => &SECURITY_CENTER,
            PanelId::SystemMonitor => &SYSTEM_MONITOR,
            PanelId::IotSensors => &IOT_SENSORS,
            PanelId::QuantumLab => &QUANTUM_LAB,
            PanelId::AudioVisualizer => &AUDIO_VISUALIZER,
            PanelId::VideoRendering => &VIDEO_RENDERING,
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for PanelId {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelId::ALL
            .into_iter()
            .find(|id| id.slug() == s)
            .ok_or_else(|| AdminError::NotFound(format!("panel `{}`", s)))
    }
}

#[derive(Debug)]
pub struct MetricSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub initial: f64,
    pub drift: Drift,
}

#[derive(Debug)]
pub struct PanelSpec {
    pub slug: &'static str,
    pub title: &'static str,
    pub period: Duration,
    pub metrics: &'static [MetricSpec],
    pub actions: &'static [ActionKind],
}

impl PanelSpec {
    pub fn supports(&self, kind: ActionKind) -> bool {
        self.actions.contains(&kind)
    }
}

const fn walk(
    key: &'static str,
    label: &'static str,
    unit: &'static str,
    min: f64,
    max: f64,
    initial: f64,
    step: f64,
) -> MetricSpec {
    MetricSpec {
        key,
        label,
        unit,
        min,
        max,
        initial,
        drift: Drift::Walk { step },
    }
}

const fn replace(
    key: &'static str,
    label: &'static str,
    unit: &'static str,
    min: f64,
    max: f64,
    initial: f64,
) -> MetricSpec {
    MetricSpec {
        key,
        label,
        unit,
        min,
        max,
        initial,
        drift: Drift::Replace,
    }
}

static AI_INSIGHTS: PanelSpec = PanelSpec {
    slug: "ai-insights",
    title: "AI Insights",
    period: Duration::from_secs(3),
    metrics: &[
        replace("accuracy", "Model accuracy", "%", 85.0, 99.0, 94.2),
        replace("confidence", "Confidence", "%", 70.0, 98.0, 88.0),
        walk("predictions", "Predictions / min", "", 0.0, 5_000.0, 1_250.0, 150.0),
    ],
    actions: &[ActionKind::GenerateInsights],
};

static NEURAL_NETWORK: PanelSpec = PanelSpec {
    slug: "neural-network",
    title: "Neural Network Trainer",
    period: Duration::from_secs(2),
    metrics: &[
        walk("loss", "Training loss", "", 0.01, 2.5, 0.85, 0.05),
        replace("accuracy", "Validation accuracy", "%", 85.0, 99.0, 91.0),
        walk("gpu", "GPU utilisation", "%", 0.0, 100.0, 72.0, 8.0),
    ],
    actions: &[ActionKind::TrainModel, ActionKind::DeployModel],
};

static PREDICTIVE_ANALYTICS: PanelSpec = PanelSpec {
    slug: "predictive-analytics",
    title: "Predictive Analytics",
    period: Duration::from_secs(4),
    metrics: &[
        replace("forecast_accuracy", "Forecast accuracy", "%", 85.0, 99.0, 92.5),
        walk("revenue_forecast", "Next-month revenue", "$", 15_000.0, 40_000.0, 26_500.0, 750.0),
        walk("churn_risk", "Churn risk", "%", 0.0, 25.0, 6.5, 0.8),
    ],
    actions: &[ActionKind::GenerateReport],
};

static SMART_RECOMMENDATIONS: PanelSpec = PanelSpec {
    slug: "smart-recommendations",
    title: "Smart Recommendations",
    period: Duration::from_secs(3),
    metrics: &[
        walk("click_through", "Click-through rate", "%", 1.0, 15.0, 6.8, 0.6),
        replace("relevance", "Relevance score", "%", 80.0, 99.0, 90.0),
    ],
    actions: &[ActionKind::GenerateInsights],
};

static CHATBOT_ASSISTANT: PanelSpec = PanelSpec {
    slug: "chatbot-assistant",
    title: "Chatbot Assistant",
    period: Duration::from_secs(3),
    metrics: &[
        replace("satisfaction", "Satisfaction", "%", 85.0, 99.0, 93.0),
        walk("active_sessions", "Active sessions", "", 0.0, 200.0, 42.0, 6.0),
        walk("response_ms", "Response time", "ms", 120.0, 1_500.0, 480.0, 60.0),
    ],
    actions: &[ActionKind::DeployModel],
};

static VOICE_COMMANDS: PanelSpec = PanelSpec {
    slug: "voice-commands",
    title: "Voice Commands",
    period: Duration::from_secs(2),
    metrics: &[
        replace("recognition", "Recognition accuracy", "%", 85.0, 99.0, 95.0),
        walk("latency_ms", "Latency", "ms", 50.0, 400.0, 180.0, 25.0),
    ],
    actions: &[ActionKind::CalibrateSensors],
};

static GESTURE_CONTROL: PanelSpec = PanelSpec {
    slug: "gesture-control",
    title: "Gesture Control",
    period: Duration::from_secs(2),
    metrics: &[
        replace("detection", "Detection confidence", "%", 70.0, 99.0, 87.0),
        walk("fps", "Tracking FPS", "fps", 24.0, 60.0, 48.0, 4.0),
        walk("battery", "Controller battery", "%", 0.0, 100.0, 82.0, 1.5),
    ],
    actions: &[ActionKind::CalibrateSensors],
};

static AR_OVERLAY: PanelSpec = PanelSpec {
    slug: "ar-overlay",
    title: "AR Overlay",
    period: Duration::from_secs(2),
    metrics: &[
        replace("tracking", "Tracking quality", "%", 80.0, 100.0, 93.0),
        walk("anchors", "Spatial anchors", "", 0.0, 50.0, 12.0, 2.0),
        walk("fps", "Render FPS", "fps", 30.0, 90.0, 60.0, 5.0),
    ],
    actions: &[ActionKind::CalibrateSensors],
};

static VR_WORKSPACE: PanelSpec = PanelSpec {
    slug: "vr-workspace",
    title: "VR Workspace",
    period: Duration::from_secs(3),
    metrics: &[
        walk("battery", "Headset battery", "%", 0.0, 100.0, 76.0, 0.5),
        walk("latency_ms", "Motion-to-photon", "ms", 8.0, 40.0, 18.0, 2.0),
        walk("fps", "Frame rate", "fps", 72.0, 120.0, 90.0, 4.0),
    ],
    actions: &[ActionKind::CalibrateSensors],
};

static BLOCKCHAIN: PanelSpec = PanelSpec {
    slug: "blockchain",
    title: "Blockchain Ledger",
    period: Duration::from_secs(5),
    metrics: &[
        walk("gas_price", "Gas price", "gwei", 10.0, 200.0, 42.0, 6.0),
        walk("tps", "Transactions / s", "", 5.0, 50.0, 18.0, 3.0),
        replace("security_score", "Security score", "%", 90.0, 100.0, 97.0),
    ],
    actions: &[ActionKind::ExecuteContract],
};

static SECURITY_CENTER: PanelSpec = PanelSpec {
    slug: "security-center",
    title: "Security Center",
    period: Duration::from_secs(3),
    metrics: &[
        replace("security_score", "Security score", "%", 85.0, 99.0, 94.0),
        walk("threats_blocked", "Threats blocked", "", 0.0, 500.0, 128.0, 12.0),
        walk("firewall_load", "Firewall load", "%", 0.0, 100.0, 35.0, 6.0),
    ],
    actions: &[ActionKind::RunSecurityScan],
};

static SYSTEM_MONITOR: PanelSpec = PanelSpec {
    slug: "system-monitor",
    title: "System Monitor",
    period: Duration::from_secs(2),
    metrics: &[
        walk("cpu", "CPU", "%", 0.0, 100.0, 45.0, 10.0),
        walk("memory", "Memory", "%", 0.0, 100.0, 62.0, 5.0),
        walk("disk", "Disk", "%", 0.0, 100.0, 71.0, 1.0),
        walk("network_mbps", "Network", "Mbps", 0.0, 1_000.0, 240.0, 60.0),
    ],
    actions: &[ActionKind::ExportData],
};

static IOT_SENSORS: PanelSpec = PanelSpec {
    slug: "iot-sensors",
    title: "IoT Sensors",
    period: Duration::from_secs(5),
    metrics: &[
        walk("temperature", "Temperature", "°C", 15.0, 35.0, 22.5, 0.5),
        walk("humidity", "Humidity", "%", 30.0, 70.0, 48.0, 1.5),
        walk("battery", "Sensor battery", "%", 0.0, 100.0, 91.0, 0.8),
    ],
    actions: &[ActionKind::CalibrateSensors, ActionKind::ExportData],
};

static QUANTUM_LAB: PanelSpec = PanelSpec {
    slug: "quantum-lab",
    title: "Quantum Lab",
    period: Duration::from_secs(4),
    metrics: &[
        replace("fidelity", "Qubit fidelity", "%", 95.0, 99.9, 98.7),
        walk("coherence_us", "Coherence time", "µs", 50.0, 150.0, 110.0, 5.0),
    ],
    actions: &[ActionKind::RunCircuit],
};

static AUDIO_VISUALIZER: PanelSpec = PanelSpec {
    slug: "audio-visualizer",
    title: "Audio Visualizer",
    period: Duration::from_millis(100),
    metrics: &[
        replace("low", "Low band", "%", 0.0, 100.0, 40.0),
        replace("mid", "Mid band", "%", 0.0, 100.0, 55.0),
        replace("high", "High band", "%", 0.0, 100.0, 30.0),
    ],
    actions: &[],
};

static VIDEO_RENDERING: PanelSpec = PanelSpec {
    slug: "video-rendering",
    title: "Video Rendering",
    period: Duration::from_secs(2),
    metrics: &[
        walk("render_fps", "Render speed", "fps", 5.0, 120.0, 48.0, 6.0),
        walk("queue", "Queued jobs", "", 0.0, 20.0, 3.0, 1.0),
    ],
    actions: &[ActionKind::RenderVideo, ActionKind::ExportData],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip_and_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for id in PanelId::ALL {
            assert!(seen.insert(id.slug()), "duplicate slug {}", id.slug());
            assert_eq!(id.slug().parse::<PanelId>().unwrap(), id);
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.slug()));
        }
    }

    #[test]
    fn specs_are_well_formed() {
        for id in PanelId::ALL {
            let spec = id.spec();
            assert!(!spec.metrics.is_empty(), "{} has no metrics", id);
            assert!(spec.period >= Duration::from_millis(100));
            for m in spec.metrics {
                assert!(m.min <= m.max, "{}.{} inverted bounds", id, m.key);
                assert!((m.min..=m.max).contains(&m.initial), "{}.{} seed out of bounds", id, m.key);
            }
        }
    }
}
