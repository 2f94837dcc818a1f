//! Admission chance prediction and college recommendation ranking.
//!
//! Given a student's exam rank and preferences, the crate estimates the
//! chance of admission into each college branch from historical opening and
//! closing ranks (or a cutoff heuristic when no history exists) and ranks the
//! eligible options by a composite score.

pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod output;
pub mod prediction;
pub mod ranking;

pub use eligibility::{filter_eligible_colleges, is_eligible, select_colleges, FilterValues};
pub use prediction::{estimate_admission_chance, Chance, PredictionResult};
pub use ranking::{rank_recommendations, RankedRecommendation};
