pub mod cutoffs;
pub mod loader;
pub mod schema;
pub mod seed;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use cutoffs::{CutoffQuery, CutoffRepository, CutoffTable, HistoricalCutoffRecord};
pub use schema::{
    Branch, BranchId, Category, College, CollegeId, CollegeType, Course, InstituteBranch,
    ParseError, Round,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate college id {0}")]
    DuplicateCollege(CollegeId),
    #[error("duplicate branch id {0}")]
    DuplicateBranch(BranchId),
    #[error("branch {branch_id} references unknown college {college_id}")]
    UnknownCollege {
        branch_id: BranchId,
        college_id: CollegeId,
    },
    #[error("branch {0} has no seats")]
    NoSeats(BranchId),
    #[error("branch {0} has a zero cutoff rank")]
    ZeroCutoff(BranchId),
    #[error("cutoff for college {college_id} branch {branch_id} references an unknown branch of that college")]
    OrphanCutoff {
        college_id: CollegeId,
        branch_id: BranchId,
    },
    #[error("cutoff for college {college_id} branch {branch_id} ({year}, round {round}, {category}) appears more than once")]
    DuplicateCutoff {
        college_id: CollegeId,
        branch_id: BranchId,
        year: u16,
        round: Round,
        category: Category,
    },
    #[error(
        "cutoff for college {college_id} branch {branch_id} ({year}) has opening rank {opening} above closing rank {closing}"
    )]
    InvertedCutoff {
        college_id: CollegeId,
        branch_id: BranchId,
        year: u16,
        opening: u32,
        closing: u32,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub colleges: Vec<College>,
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub historical_cutoffs: Vec<HistoricalCutoffRecord>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    colleges: Vec<College>,
    branches: Vec<Branch>,
    cutoffs: CutoffTable,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    pub fn from_dataset(dataset: Dataset) -> Result<Self, CatalogError> {
        let mut college_ids = BTreeSet::new();
        for college in &dataset.colleges {
            if !college_ids.insert(college.id) {
                return Err(CatalogError::DuplicateCollege(college.id));
            }
        }

        let mut branch_owner = BTreeMap::new();
        for branch in &dataset.branches {
            if !college_ids.contains(&branch.college_id) {
                return Err(CatalogError::UnknownCollege {
                    branch_id: branch.id,
                    college_id: branch.college_id,
                });
            }
            if branch.seats == 0 {
                return Err(CatalogError::NoSeats(branch.id));
            }
            if branch.cutoff_rank == Some(0) {
                return Err(CatalogError::ZeroCutoff(branch.id));
            }
            if branch_owner.insert(branch.id, branch.college_id).is_some() {
                return Err(CatalogError::DuplicateBranch(branch.id));
            }
        }

        let mut seen = BTreeSet::new();
        for record in &dataset.historical_cutoffs {
            validate_cutoff(record, &branch_owner, &mut seen)?;
        }

        Ok(Self {
            colleges: dataset.colleges,
            branches: dataset.branches,
            cutoffs: CutoffTable::new(dataset.historical_cutoffs),
            loaded_at: Utc::now(),
        })
    }

    pub fn merge_cutoffs(
        &mut self,
        records: Vec<HistoricalCutoffRecord>,
    ) -> Result<usize, CatalogError> {
        let branch_owner: BTreeMap<BranchId, CollegeId> =
            self.branches.iter().map(|b| (b.id, b.college_id)).collect();
        let mut seen: BTreeSet<CutoffKey> =
            self.cutoffs.records().iter().map(cutoff_key).collect();
        for record in &records {
            validate_cutoff(record, &branch_owner, &mut seen)?;
        }
        let added = records.len();
        self.cutoffs.extend(records);
        Ok(added)
    }

    pub fn colleges(&self) -> &[College] {
        &self.colleges
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn cutoffs(&self) -> &CutoffTable {
        &self.cutoffs
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn college(&self, id: CollegeId) -> Option<&College> {
        self.colleges.iter().find(|c| c.id == id)
    }

    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }

    pub fn branches_of(&self, college_id: CollegeId) -> impl Iterator<Item = &Branch> {
        branches_of(&self.branches, college_id)
    }

    pub fn find_college(&self, key: &str) -> Option<&College> {
        let key = key.trim();
        if let Ok(id) = key.parse::<CollegeId>() {
            return self.college(id);
        }
        self.colleges.iter().find(|c| {
            c.institute_code
                .as_deref()
                .is_some_and(|code| code.eq_ignore_ascii_case(key))
                || c.name.eq_ignore_ascii_case(key)
        })
    }

    pub fn find_branch(&self, college_id: CollegeId, key: &str) -> Option<&Branch> {
        let key = key.trim();
        if let Ok(id) = key.parse::<BranchId>() {
            return self.branch(id).filter(|b| b.college_id == college_id);
        }
        self.branches_of(college_id)
            .find(|b| b.name.eq_ignore_ascii_case(key))
    }

    /// Colleges ordered by their most competitive branch cutoff, lowest first.
    /// Colleges with no branch cutoff sort last; ties keep catalog order.
    pub fn colleges_by_competitiveness(&self) -> Vec<&College> {
        let mut ordered: Vec<(&College, Option<u32>)> = self
            .colleges
            .iter()
            .map(|college| {
                let best = self
                    .branches_of(college.id)
                    .filter_map(|b| b.cutoff_rank)
                    .min();
                (college, best)
            })
            .collect();
        ordered.sort_by_key(|(_, best)| best.unwrap_or(u32::MAX));
        ordered.into_iter().map(|(college, _)| college).collect()
    }
}

pub fn branches_of(branches: &[Branch], college_id: CollegeId) -> impl Iterator<Item = &Branch> {
    branches.iter().filter(move |b| b.college_id == college_id)
}

type CutoffKey = (CollegeId, BranchId, u16, Round, Category);

fn cutoff_key(record: &HistoricalCutoffRecord) -> CutoffKey {
    (
        record.college_id,
        record.branch_id,
        record.year,
        record.round,
        record.category,
    )
}

fn validate_cutoff(
    record: &HistoricalCutoffRecord,
    branch_owner: &BTreeMap<BranchId, CollegeId>,
    seen: &mut BTreeSet<CutoffKey>,
) -> Result<(), CatalogError> {
    if branch_owner.get(&record.branch_id) != Some(&record.college_id) {
        return Err(CatalogError::OrphanCutoff {
            college_id: record.college_id,
            branch_id: record.branch_id,
        });
    }
    if !seen.insert(cutoff_key(record)) {
        return Err(CatalogError::DuplicateCutoff {
            college_id: record.college_id,
            branch_id: record.branch_id,
            year: record.year,
            round: record.round,
            category: record.category,
        });
    }
    if record.opening_rank > record.closing_rank {
        return Err(CatalogError::InvertedCutoff {
            college_id: record.college_id,
            branch_id: record.branch_id,
            year: record.year,
            opening: record.opening_rank,
            closing: record.closing_rank,
        });
    }
    Ok(())
}
