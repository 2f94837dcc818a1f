use serde::{Deserialize, Serialize};

use crate::catalog::schema::{BranchId, Category, CollegeId, Round};

/// Best and worst rank admitted into one (college, branch, year, round,
/// category) cohort. `opening_rank <= closing_rank`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoricalCutoffRecord {
    pub college_id: CollegeId,
    pub branch_id: BranchId,
    pub year: u16,
    pub round: Round,
    pub category: Category,
    pub opening_rank: u32,
    pub closing_rank: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CutoffQuery {
    pub college_id: Option<CollegeId>,
    pub branch_id: Option<BranchId>,
    pub year: Option<u16>,
    pub round: Option<Round>,
    pub category: Option<Category>,
}

impl CutoffQuery {
    pub fn cohort(
        college_id: CollegeId,
        branch_id: BranchId,
        round: Round,
        category: Category,
    ) -> Self {
        Self {
            college_id: Some(college_id),
            branch_id: Some(branch_id),
            year: None,
            round: Some(round),
            category: Some(category),
        }
    }

    pub fn matches(&self, record: &HistoricalCutoffRecord) -> bool {
        self.college_id.map_or(true, |id| id == record.college_id)
            && self.branch_id.map_or(true, |id| id == record.branch_id)
            && self.year.map_or(true, |year| year == record.year)
            && self.round.map_or(true, |round| round == record.round)
            && self
                .category
                .map_or(true, |category| category == record.category)
    }
}

pub trait CutoffRepository: Send + Sync {
    fn query(&self, query: &CutoffQuery) -> Vec<HistoricalCutoffRecord>;

    fn query_historical_cutoffs(
        &self,
        college_id: CollegeId,
        branch_id: BranchId,
        round: Round,
        category: Category,
    ) -> Vec<HistoricalCutoffRecord> {
        self.query(&CutoffQuery::cohort(college_id, branch_id, round, category))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CutoffTable {
    records: Vec<HistoricalCutoffRecord>,
}

impl CutoffTable {
    pub fn new(records: Vec<HistoricalCutoffRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[HistoricalCutoffRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = HistoricalCutoffRecord>) {
        self.records.extend(records);
    }
}

impl CutoffRepository for CutoffTable {
    fn query(&self, query: &CutoffQuery) -> Vec<HistoricalCutoffRecord> {
        let mut out: Vec<HistoricalCutoffRecord> = self
            .records
            .iter()
            .filter(|record| query.matches(record))
            .copied()
            .collect();
        out.sort_by(|a, b| b.year.cmp(&a.year).then(a.round.cmp(&b.round)));
        out
    }
}
