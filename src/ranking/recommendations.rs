use tracing::debug;

use crate::catalog::{branches_of, Branch, College, CutoffRepository};
use crate::eligibility::{branch_matches_course, passes_college_rules, FilterValues};
use crate::prediction::{estimate_admission_chance, PredictionResult};
use crate::ranking::{RankedRecommendation, ScoredRecommendation};

const PLACEMENT_DIVISOR: f64 = 2.0;
const PACKAGE_DIVISOR: f64 = 200_000.0;
const FEE_DIVISOR: f64 = 50_000.0;

/// Ordering score: chance percentage, plus up to 50 for placement rate, plus
/// 1 per 2 lakh of average package, minus 1 per 50 thousand of annual fee.
pub fn composite_score(college: &College, chance: &PredictionResult) -> f64 {
    f64::from(chance.percentage)
        + college.placement_rate.unwrap_or(0.0) / PLACEMENT_DIVISOR
        + college.average_package.unwrap_or(0.0) / PACKAGE_DIVISOR
        - f64::from(college.annual_fee) / FEE_DIVISOR
}

/// Every eligible (college, branch) pair with its estimate and score, highest
/// score first. Equal scores keep catalog order: colleges as given, then
/// branches as given within a college.
pub fn score_recommendations<R>(
    colleges: &[College],
    branches: &[Branch],
    filters: &FilterValues,
    cutoffs: &R,
) -> Vec<ScoredRecommendation>
where
    R: CutoffRepository + ?Sized,
{
    if filters.rank().is_none() {
        return Vec::new();
    }

    let mut scored = Vec::new();
    for college in colleges {
        if !passes_college_rules(college, filters) {
            continue;
        }
        for branch in branches_of(branches, college.id) {
            if !branch_matches_course(branch, filters) {
                continue;
            }
            let chance = estimate_admission_chance(college, branch, filters, cutoffs);
            let score = composite_score(college, &chance);
            scored.push(ScoredRecommendation {
                recommendation: RankedRecommendation {
                    college: college.clone(),
                    branch: branch.clone(),
                    chance,
                },
                score,
            });
        }
    }

    // stable: ties stay in catalog order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    debug!(entries = scored.len(), "ranked recommendations");
    scored
}

pub fn rank_recommendations<R>(
    colleges: &[College],
    branches: &[Branch],
    filters: &FilterValues,
    cutoffs: &R,
) -> Vec<RankedRecommendation>
where
    R: CutoffRepository + ?Sized,
{
    score_recommendations(colleges, branches, filters, cutoffs)
        .into_iter()
        .map(RankedRecommendation::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        Category, CollegeType, Course, CutoffTable, HistoricalCutoffRecord, InstituteBranch, Round,
    };
    use crate::prediction::Chance;

    fn college(
        id: u32,
        college_type: CollegeType,
        annual_fee: u32,
        placement_rate: Option<f64>,
        average_package: Option<f64>,
    ) -> College {
        College {
            id,
            name: format!("College {id}"),
            city: "Rajkot".to_string(),
            college_type,
            annual_fee,
            placement_rate,
            average_package,
            institute_code: None,
        }
    }

    fn branch(id: u32, college_id: u32, name: &str, cutoff_rank: u32) -> Branch {
        Branch {
            id,
            college_id,
            name: name.to_string(),
            course: Course::BeBtech,
            seats: 120,
            cutoff_rank: Some(cutoff_rank),
        }
    }

    fn fixture() -> (Vec<College>, Vec<Branch>, CutoffTable) {
        let colleges = vec![
            college(1, CollegeType::Private, 200_000, Some(95.0), Some(1_200_000.0)),
            college(2, CollegeType::Government, 120_000, Some(85.0), Some(800_000.0)),
            college(3, CollegeType::GrantInAid, 150_000, None, None),
        ];
        let branches = vec![
            branch(1, 1, "ICT", 500),
            branch(2, 2, "Computer Engineering", 1000),
            branch(3, 2, "IT", 1200),
            branch(4, 3, "Civil Engineering", 2200),
        ];
        let cutoffs = CutoffTable::new(vec![HistoricalCutoffRecord {
            college_id: 2,
            branch_id: 2,
            year: 2023,
            round: Round::Mock,
            category: Category::General,
            opening_rank: 501,
            closing_rank: 1000,
        }]);
        (colleges, branches, cutoffs)
    }

    #[test]
    fn composite_score_weights_each_factor() {
        let c = college(1, CollegeType::Private, 500_000, Some(80.0), Some(2_000_000.0));
        let chance = PredictionResult::from_percentage(60);
        // 60 + 40 + 10 - 10
        assert!((composite_score(&c, &chance) - 100.0).abs() < 1e-9);

        let bare = college(2, CollegeType::Private, 0, None, None);
        assert!((composite_score(&bare, &chance) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn no_rank_yields_no_recommendations() {
        let (colleges, branches, cutoffs) = fixture();
        assert!(rank_recommendations(&colleges, &branches, &FilterValues::default(), &cutoffs)
            .is_empty());
        let zero = FilterValues::default().with_rank(0);
        assert!(rank_recommendations(&colleges, &branches, &zero, &cutoffs).is_empty());
    }

    #[test]
    fn one_entry_per_matching_branch_sorted_by_score() {
        let (colleges, branches, cutoffs) = fixture();
        let filters = FilterValues::default().with_rank(700);
        let scored = score_recommendations(&colleges, &branches, &filters, &cutoffs);
        assert_eq!(scored.len(), 4);
        for pair in scored.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }

        let ids: Vec<u32> = scored.iter().map(|s| s.recommendation.branch.id).collect();
        // IT 88 + 42.5 + 4 - 2.4, CE 71 + 42.5 + 4 - 2.4, Civil 90 - 3, ICT 20 + 47.5 + 6 - 4
        assert_eq!(ids, vec![3, 2, 4, 1]);

        // CE uses history (opening 501, closing 1000): 95 - (199/499)*60 = 71
        let ldce_ce = scored
            .iter()
            .find(|s| s.recommendation.branch.id == 2)
            .expect("LDCE CE ranked");
        assert_eq!(ldce_ce.recommendation.chance.percentage, 71);
        assert_eq!(ldce_ce.recommendation.chance.chance, Chance::High);
    }

    #[test]
    fn filters_gate_colleges_and_branches() {
        let (colleges, branches, cutoffs) = fixture();
        let filters = FilterValues::default()
            .with_rank(700)
            .with_max_fee(150_000)
            .with_branches(["IT", "Civil Engineering"]);
        let ranked = rank_recommendations(&colleges, &branches, &filters, &cutoffs);
        let pairs: Vec<(u32, u32)> = ranked.iter().map(|r| (r.college.id, r.branch.id)).collect();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&(2, 3)));
        assert!(pairs.contains(&(3, 4)));

        let diploma = FilterValues::default()
            .with_rank(700)
            .with_course(Course::Diploma);
        assert!(rank_recommendations(&colleges, &branches, &diploma, &cutoffs).is_empty());
    }

    #[test]
    fn institute_picks_restrict_ranked_colleges() {
        let (colleges, branches, cutoffs) = fixture();
        let filters = FilterValues::default()
            .with_rank(700)
            .with_institute_branches([InstituteBranch {
                college_id: 2,
                branch_id: 3,
            }]);
        let ranked = rank_recommendations(&colleges, &branches, &filters, &cutoffs);
        // both LDCE branches: picks match on the college only
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| r.college.id == 2));
    }

    #[test]
    fn equal_scores_keep_catalog_order() {
        let colleges = vec![
            college(1, CollegeType::Private, 100_000, Some(80.0), None),
            college(2, CollegeType::Private, 100_000, Some(80.0), None),
        ];
        let branches = vec![
            branch(10, 2, "IT", 1000),
            branch(11, 1, "IT", 1000),
            branch(12, 1, "Computer Engineering", 1000),
        ];
        let filters = FilterValues::default().with_rank(100);
        let ranked = rank_recommendations(&colleges, &branches, &filters, &CutoffTable::default());
        let ids: Vec<u32> = ranked.iter().map(|r| r.branch.id).collect();
        assert_eq!(ids, vec![11, 12, 10]);
    }
}
