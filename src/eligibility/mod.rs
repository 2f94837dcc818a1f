pub mod evaluator;
pub mod selection;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, CollegeId, CollegeType, Course, InstituteBranch, Round};

pub use evaluator::{
    branch_matches_course, is_branch_eligible, is_college_eligible, is_eligible,
    passes_college_rules,
};
pub use selection::{filter_eligible_colleges, select_colleges};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterValues {
    #[serde(default)]
    pub acpc_rank: Option<u32>,
    pub course: Course,
    #[serde(default)]
    pub selected_branches: BTreeSet<String>,
    pub round: Round,
    pub category: Category,
    #[serde(default)]
    pub selected_college_types: BTreeSet<CollegeType>,
    #[serde(default)]
    pub max_fee: Option<u32>,
    #[serde(default)]
    pub selected_institutes: BTreeSet<CollegeId>,
    #[serde(default)]
    pub selected_institute_branches: BTreeSet<InstituteBranch>,
}

impl Default for FilterValues {
    fn default() -> Self {
        Self {
            acpc_rank: None,
            course: Course::BeBtech,
            selected_branches: BTreeSet::new(),
            round: Round::Mock,
            category: Category::General,
            selected_college_types: BTreeSet::new(),
            max_fee: None,
            selected_institutes: BTreeSet::new(),
            selected_institute_branches: BTreeSet::new(),
        }
    }
}

impl FilterValues {
    /// The student's rank, if one usable for prediction was given.
    pub fn rank(&self) -> Option<u32> {
        self.acpc_rank.filter(|rank| *rank > 0)
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.acpc_rank = Some(rank);
        self
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.course = course;
        self
    }

    pub fn with_round(mut self, round: Round) -> Self {
        self.round = round;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_max_fee(mut self, max_fee: u32) -> Self {
        self.max_fee = Some(max_fee);
        self
    }

    pub fn with_branches<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_branches = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_college_types(mut self, types: impl IntoIterator<Item = CollegeType>) -> Self {
        self.selected_college_types = types.into_iter().collect();
        self
    }

    pub fn with_institutes(mut self, ids: impl IntoIterator<Item = CollegeId>) -> Self {
        self.selected_institutes = ids.into_iter().collect();
        self
    }

    pub fn with_institute_branches(
        mut self,
        picks: impl IntoIterator<Item = InstituteBranch>,
    ) -> Self {
        self.selected_institute_branches = picks.into_iter().collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rank_counts_as_missing() {
        assert_eq!(FilterValues::default().rank(), None);
        assert_eq!(FilterValues::default().with_rank(0).rank(), None);
        assert_eq!(FilterValues::default().with_rank(812).rank(), Some(812));
    }

    #[test]
    fn deserializes_with_sparse_fields() {
        let filters: FilterValues = serde_json::from_value(serde_json::json!({
            "course": "BE/BTech",
            "round": "2",
            "category": "OBC",
            "selected_institute_branches": [{"college_id": 2, "branch_id": 3}]
        }))
        .expect("filters should deserialize");
        assert_eq!(filters.round, Round::Second);
        assert_eq!(filters.category, Category::Obc);
        assert!(filters.selected_branches.is_empty());
        assert_eq!(filters.selected_institute_branches.len(), 1);
        assert_eq!(filters.rank(), None);
    }
}
