pub mod estimator;
pub mod fallback;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub use estimator::estimate_admission_chance;
pub use fallback::fallback_estimate;

pub const HIGH_THRESHOLD: u8 = 70;
pub const MEDIUM_THRESHOLD: u8 = 40;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Chance {
    High,
    Medium,
    Low,
}

impl Chance {
    /// `>= 70` is High, `40..70` is Medium, anything lower is Low.
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= HIGH_THRESHOLD {
            Self::High
        } else if percentage >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl Display for Chance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionResult {
    pub chance: Chance,
    pub percentage: u8,
}

impl PredictionResult {
    pub const NEUTRAL: PredictionResult = PredictionResult {
        chance: Chance::Medium,
        percentage: 50,
    };

    pub fn from_percentage(percentage: u8) -> Self {
        let percentage = percentage.min(100);
        Self {
            chance: Chance::from_percentage(percentage),
            percentage,
        }
    }

    /// Rounds half away from zero and clamps into `0..=100`.
    pub(crate) fn from_score(raw: f64) -> Self {
        let clamped = if raw.is_finite() {
            raw.round().clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self::from_percentage(clamped as u8)
    }
}

pub(crate) fn interpolate(top: f64, span: f64, position: f64) -> f64 {
    top - position * span
}
