use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{Branch, College, CutoffRepository};
use crate::eligibility::{is_college_eligible, FilterValues};
use crate::ranking::rank_recommendations;

pub fn filter_eligible_colleges<'a>(
    colleges: &'a [College],
    branches: &[Branch],
    filters: &FilterValues,
) -> Vec<&'a College> {
    let mut seen = BTreeSet::new();
    colleges
        .iter()
        .filter(|college| is_college_eligible(college, branches, filters))
        .filter(|college| seen.insert(college.id))
        .collect()
}

/// With a positive rank, the colleges of the ranked recommendations in ranked
/// order, each at its best position. Without one, plain eligibility filtering.
pub fn select_colleges<'a, R>(
    colleges: &'a [College],
    branches: &[Branch],
    filters: &FilterValues,
    cutoffs: &R,
) -> Vec<&'a College>
where
    R: CutoffRepository + ?Sized,
{
    if filters.rank().is_none() {
        return filter_eligible_colleges(colleges, branches, filters);
    }

    // reversed so the first college with a repeated id wins
    let by_id: BTreeMap<_, &College> = colleges.iter().rev().map(|c| (c.id, c)).collect();
    let mut seen = BTreeSet::new();
    rank_recommendations(colleges, branches, filters, cutoffs)
        .into_iter()
        .filter(|rec| seen.insert(rec.college.id))
        .filter_map(|rec| by_id.get(&rec.college.id).copied())
        .collect()
}
