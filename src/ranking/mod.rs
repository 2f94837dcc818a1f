pub mod recommendations;

use serde::{Deserialize, Serialize};

use crate::catalog::{Branch, College};
use crate::prediction::PredictionResult;

pub use recommendations::{composite_score, rank_recommendations, score_recommendations};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedRecommendation {
    pub college: College,
    pub branch: Branch,
    pub chance: PredictionResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecommendation {
    pub recommendation: RankedRecommendation,
    pub score: f64,
}

impl From<ScoredRecommendation> for RankedRecommendation {
    fn from(value: ScoredRecommendation) -> Self {
        value.recommendation
    }
}
