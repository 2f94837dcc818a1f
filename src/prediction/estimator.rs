use tracing::debug;

use crate::catalog::{Branch, College, CutoffRepository, HistoricalCutoffRecord};
use crate::eligibility::FilterValues;
use crate::prediction::fallback::fallback_estimate;
use crate::prediction::{interpolate, PredictionResult};

const HIGH_PERCENTAGE: u8 = 95;
const LOW_PERCENTAGE: u8 = 15;
const SPAN_PERCENTAGE: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CohortAverages {
    pub opening: f64,
    pub closing: f64,
}

impl CohortAverages {
    pub fn from_records(records: &[HistoricalCutoffRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let count = records.len() as f64;
        let opening = records
            .iter()
            .map(|r| f64::from(r.opening_rank))
            .sum::<f64>()
            / count;
        let closing = records
            .iter()
            .map(|r| f64::from(r.closing_rank))
            .sum::<f64>()
            / count;
        Some(Self { opening, closing })
    }

    pub fn estimate(&self, rank: u32) -> PredictionResult {
        let rank = f64::from(rank);
        if rank <= self.opening {
            return PredictionResult::from_percentage(HIGH_PERCENTAGE);
        }
        if rank > self.closing {
            return PredictionResult::from_percentage(LOW_PERCENTAGE);
        }
        let range = self.closing - self.opening;
        if range <= 0.0 {
            // Collapsed range: anything past the opening rank is past the closing rank.
            return PredictionResult::from_percentage(LOW_PERCENTAGE);
        }
        PredictionResult::from_score(interpolate(
            f64::from(HIGH_PERCENTAGE),
            SPAN_PERCENTAGE,
            (rank - self.opening) / range,
        ))
    }
}

/// Uses the historical cutoffs of the exact (college, branch, round, category)
/// cohort when any exist, and the single-cutoff heuristic otherwise. Without a
/// positive rank the result is the neutral `Medium / 50`.
pub fn estimate_admission_chance<R>(
    college: &College,
    branch: &Branch,
    filters: &FilterValues,
    cutoffs: &R,
) -> PredictionResult
where
    R: CutoffRepository + ?Sized,
{
    let Some(rank) = filters.rank() else {
        return PredictionResult::NEUTRAL;
    };

    let cohort =
        cutoffs.query_historical_cutoffs(college.id, branch.id, filters.round, filters.category);
    match CohortAverages::from_records(&cohort) {
        Some(averages) => averages.estimate(rank),
        None => {
            debug!(
                college = college.id,
                branch = branch.id,
                round = %filters.round,
                category = %filters.category,
                "no historical cutoffs, using fallback estimate"
            );
            fallback_estimate(college, branch, rank)
        }
    }
}
