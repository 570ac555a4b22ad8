use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::sim::catalog::MetricSpec;

/// Samples kept per metric for sparklines.
pub const HISTORY_LEN: usize = 60;

/// How a metric moves on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Drift {
    /// `clamp(old + uniform(-step, step), min, max)`
    Walk { step: f64 },
    /// `uniform(min, max)`
    Replace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedMetric {
    pub key: String,
    pub label: String,
    pub unit: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub initial: f64,
    pub drift: Drift,
    #[serde(default)]
    pub history: VecDeque<f64>,
}

impl SimulatedMetric {
    pub fn from_spec(spec: &MetricSpec) -> Self {
        let mut history = VecDeque::with_capacity(HISTORY_LEN);
        history.push_back(spec.initial);
        Self {
            key: spec.key.to_string(),
            label: spec.label.to_string(),
            unit: spec.unit.to_string(),
            value: spec.initial,
            min: spec.min,
            max: spec.max,
            initial: spec.initial,
            drift: spec.drift,
            history,
        }
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.value = next_value(self.value, self.min, self.max, self.drift, rng);
        self.history.push_back(self.value);
        while self.history.len() > HISTORY_LEN {
            self.history.pop_front();
        }
    }

    pub fn reset(&mut self) {
        self.value = self.initial;
        self.history.clear();
        self.history.push_back(self.initial);
    }

    /// Position of the value inside its bounds, 0.0 to 1.0.
    pub fn ratio(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 1.0;
        }
        ((self.value - self.min) / span).clamp(0.0, 1.0)
    }

    pub fn in_bounds(&self) -> bool {
        self.value >= self.min && self.value <= self.max
    }
}

pub fn next_value<R: Rng + ?Sized>(current: f64, min: f64, max: f64, drift: Drift, rng: &mut R) -> f64 {
    let next = match drift {
        Drift::Walk { step } if step > 0.0 => current + rng.gen_range(-step..=step),
        Drift::Walk { .. } => current,
        Drift::Replace if max > min => rng.gen_range(min..=max),
        Drift::Replace => min,
    };
    next.clamp(min, max)
}
