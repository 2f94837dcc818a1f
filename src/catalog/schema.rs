use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type CollegeId = u32;
pub type BranchId = u32;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CollegeType {
    #[serde(alias = "Government")]
    Government,
    #[serde(alias = "Grant-in-aid", alias = "grant-in-aid")]
    GrantInAid,
    #[serde(alias = "Private")]
    Private,
}

impl CollegeType {
    pub const ALL: [CollegeType; 3] = [
        CollegeType::Government,
        CollegeType::GrantInAid,
        CollegeType::Private,
    ];
}

impl Display for CollegeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Government => "Government",
            Self::GrantInAid => "Grant-in-aid",
            Self::Private => "Private",
        };
        write!(f, "{display}")
    }
}

impl FromStr for CollegeType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "government" | "govt" | "gov" => Ok(Self::Government),
            "grant_in_aid" | "gia" | "aided" => Ok(Self::GrantInAid),
            "private" | "self_financed" => Ok(Self::Private),
            _ => Err(ParseError::new("college type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Course {
    #[serde(alias = "BE/BTech", alias = "be/btech")]
    BeBtech,
    #[serde(alias = "Diploma", alias = "Diploma Engineering")]
    Diploma,
    #[serde(alias = "Pharmacy")]
    Pharmacy,
    #[serde(alias = "Architecture")]
    Architecture,
    #[serde(alias = "MCA")]
    Mca,
    #[serde(alias = "MBA")]
    Mba,
}

impl Course {
    pub const ALL: [Course; 6] = [
        Course::BeBtech,
        Course::Diploma,
        Course::Pharmacy,
        Course::Architecture,
        Course::Mca,
        Course::Mba,
    ];
}

impl Display for Course {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::BeBtech => "BE/BTech",
            Self::Diploma => "Diploma",
            Self::Pharmacy => "Pharmacy",
            Self::Architecture => "Architecture",
            Self::Mca => "MCA",
            Self::Mba => "MBA",
        };
        write!(f, "{display}")
    }
}

impl FromStr for Course {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "be/btech" | "be_btech" | "be" | "btech" | "b.tech" => Ok(Self::BeBtech),
            "diploma" | "diploma engineering" | "diploma_engineering" => Ok(Self::Diploma),
            "pharmacy" | "bpharm" => Ok(Self::Pharmacy),
            "architecture" | "barch" => Ok(Self::Architecture),
            "mca" => Ok(Self::Mca),
            "mba" => Ok(Self::Mba),
            _ => Err(ParseError::new("course", s)),
        }
    }
}

/// Counselling round. Declaration order is chronological, so `Ord` sorts
/// Mock before rounds 1, 2 and 3.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Round {
    #[serde(rename = "mock", alias = "Mock")]
    Mock,
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "3")]
    Third,
}

impl Round {
    pub const ALL: [Round; 4] = [Round::Mock, Round::First, Round::Second, Round::Third];

    pub fn index(self) -> usize {
        match self {
            Self::Mock => 0,
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }
}

impl Display for Round {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Mock => "Mock",
            Self::First => "1",
            Self::Second => "2",
            Self::Third => "3",
        };
        write!(f, "{display}")
    }
}

impl FromStr for Round {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "mock" | "0" => Ok(Self::Mock),
            "1" | "first" | "round1" => Ok(Self::First),
            "2" | "second" | "round2" => Ok(Self::Second),
            "3" | "third" | "round3" => Ok(Self::Third),
            _ => Err(ParseError::new("round", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[serde(alias = "General")]
    General,
    #[serde(alias = "EWS")]
    Ews,
    #[serde(alias = "OBC")]
    Obc,
    #[serde(alias = "SC")]
    Sc,
    #[serde(alias = "ST")]
    St,
    #[serde(alias = "PWD")]
    Pwd,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::General,
        Category::Ews,
        Category::Obc,
        Category::Sc,
        Category::St,
        Category::Pwd,
    ];
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::General => "General",
            Self::Ews => "EWS",
            Self::Obc => "OBC",
            Self::Sc => "SC",
            Self::St => "ST",
            Self::Pwd => "PWD",
        };
        write!(f, "{display}")
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "general" | "gen" | "open" => Ok(Self::General),
            "ews" => Ok(Self::Ews),
            "obc" | "sebc" => Ok(Self::Obc),
            "sc" => Ok(Self::Sc),
            "st" => Ok(Self::St),
            "pwd" | "ph" => Ok(Self::Pwd),
            _ => Err(ParseError::new("category", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct College {
    pub id: CollegeId,
    pub name: String,
    pub city: String,
    #[serde(rename = "type")]
    pub college_type: CollegeType,
    pub annual_fee: u32,
    #[serde(default)]
    pub placement_rate: Option<f64>,
    #[serde(default)]
    pub average_package: Option<f64>,
    #[serde(default)]
    pub institute_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Branch {
    pub id: BranchId,
    pub college_id: CollegeId,
    pub name: String,
    pub course: Course,
    pub seats: u32,
    #[serde(default)]
    pub cutoff_rank: Option<u32>,
}

/// An explicit (college, branch) pick, written as `"<college_id>-<branch_id>"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstituteBranch {
    pub college_id: CollegeId,
    pub branch_id: BranchId,
}

impl Display for InstituteBranch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.college_id, self.branch_id)
    }
}

impl FromStr for InstituteBranch {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (college, branch) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| ParseError::new("institute-branch pair", s))?;
        let college_id = college
            .trim()
            .parse()
            .map_err(|_| ParseError::new("institute-branch pair", s))?;
        let branch_id = branch
            .trim()
            .parse()
            .map_err(|_| ParseError::new("institute-branch pair", s))?;
        Ok(Self {
            college_id,
            branch_id,
        })
    }
}
