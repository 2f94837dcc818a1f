use crate::catalog::{Branch, College, CollegeType};
use crate::prediction::{interpolate, PredictionResult};

pub const DEFAULT_CUTOFF_RANK: u32 = 1500;
pub const DEFAULT_PLACEMENT_RATE: f64 = 75.0;

const HIGH_PERCENTAGE: u8 = 90;
const LOW_PERCENTAGE: u8 = 20;
const SAFE_FRACTION: f64 = 0.6;
const REACH_FRACTION: f64 = 1.1;
const WINDOW_FRACTION: f64 = 0.5;
const SPAN_PERCENTAGE: f64 = 50.0;

pub fn type_weight(college_type: CollegeType) -> f64 {
    match college_type {
        CollegeType::Government => 1.1,
        CollegeType::GrantInAid => 1.0,
        CollegeType::Private => 0.9,
    }
}

pub fn adjusted_cutoff(college: &College, branch: &Branch) -> f64 {
    let cutoff_rank = f64::from(branch.cutoff_rank.unwrap_or(DEFAULT_CUTOFF_RANK));
    let placement_weight = college.placement_rate.unwrap_or(DEFAULT_PLACEMENT_RATE) / 100.0;
    cutoff_rank * placement_weight * type_weight(college.college_type)
}

pub fn fallback_estimate(college: &College, branch: &Branch, rank: u32) -> PredictionResult {
    let adjusted = adjusted_cutoff(college, branch);
    let rank = f64::from(rank);
    let safe = adjusted * SAFE_FRACTION;
    if rank <= safe {
        return PredictionResult::from_percentage(HIGH_PERCENTAGE);
    }
    if rank > adjusted * REACH_FRACTION {
        return PredictionResult::from_percentage(LOW_PERCENTAGE);
    }
    // safe < rank <= reach implies adjusted > 0
    let window = adjusted * WINDOW_FRACTION;
    PredictionResult::from_score(interpolate(
        f64::from(HIGH_PERCENTAGE),
        SPAN_PERCENTAGE,
        (rank - safe) / window,
    ))
}
