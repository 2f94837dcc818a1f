use crate::catalog::{branches_of, Branch, College};
use crate::eligibility::FilterValues;

/// College-level rules only: fee ceiling, ownership type, institute picks.
///
/// Institute-branch picks are matched on their college id alone; the branch
/// half of a pick does not narrow which branches of that college qualify.
pub fn passes_college_rules(college: &College, filters: &FilterValues) -> bool {
    if let Some(max_fee) = filters.max_fee {
        if college.annual_fee > max_fee {
            return false;
        }
    }
    if !filters.selected_college_types.is_empty()
        && !filters
            .selected_college_types
            .contains(&college.college_type)
    {
        return false;
    }
    if !filters.selected_institutes.is_empty()
        && !filters.selected_institutes.contains(&college.id)
    {
        return false;
    }
    if !filters.selected_institute_branches.is_empty()
        && !filters
            .selected_institute_branches
            .iter()
            .any(|pick| pick.college_id == college.id)
    {
        return false;
    }
    true
}

pub fn branch_matches_course(branch: &Branch, filters: &FilterValues) -> bool {
    branch.course == filters.course
        && (filters.selected_branches.is_empty() || filters.selected_branches.contains(&branch.name))
}

pub fn is_branch_eligible(college: &College, branch: &Branch, filters: &FilterValues) -> bool {
    branch.college_id == college.id
        && passes_college_rules(college, filters)
        && branch_matches_course(branch, filters)
}

pub fn is_college_eligible(college: &College, branches: &[Branch], filters: &FilterValues) -> bool {
    passes_college_rules(college, filters)
        && branches_of(branches, college.id).any(|branch| branch_matches_course(branch, filters))
}

pub fn is_eligible(
    college: &College,
    branch: Option<&Branch>,
    branches: &[Branch],
    filters: &FilterValues,
) -> bool {
    match branch {
        Some(branch) => is_branch_eligible(college, branch, filters),
        None => is_college_eligible(college, branches, filters),
    }
}
