use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Course, Round};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON dataset; empty means the built-in demo dataset.
    #[serde(default)]
    pub dataset_path: String,
    /// Extra historical cutoffs merged on top of the dataset.
    #[serde(default)]
    pub cutoffs_csv: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_course")]
    pub course: Course,
    #[serde(default = "default_round")]
    pub round: Round,
    #[serde(default = "default_category")]
    pub category: Category,
    #[serde(default)]
    pub max_fee: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub dataset_path: Option<String>,
    pub cutoffs_csv: Option<String>,
    pub limit: Option<usize>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/admission-advisor/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(dataset_path) = overrides.dataset_path {
            self.data.dataset_path = dataset_path;
        }
        if let Some(cutoffs_csv) = overrides.cutoffs_csv {
            self.data.cutoffs_csv = cutoffs_csv;
        }
        if let Some(limit) = overrides.limit {
            self.output.limit = limit;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn resolved_dataset_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.data.dataset_path)
    }

    pub fn resolved_cutoffs_csv(&self) -> Option<PathBuf> {
        non_empty_path(&self.data.cutoffs_csv)
    }

    pub fn default_template() -> String {
        let template = r#"[data]
# JSON file with colleges, branches and historical_cutoffs; empty uses the demo data
dataset_path = ""
# optional CSV: college_id,branch_id,year,round,category,opening_rank,closing_rank
cutoffs_csv = ""

[query]
course = "be_btech"
round = "mock"
category = "general"
# max_fee = 150000

[output]
limit = 25
"#;
        template.to_string()
    }
}

fn non_empty_path(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(expand_tilde(trimmed))
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            course: default_course(),
            round: default_round(),
            category: default_category(),
            max_fee: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

fn default_course() -> Course {
    Course::BeBtech
}

fn default_round() -> Round {
    Round::Mock
}

fn default_category() -> Category {
    Category::General
}

fn default_limit() -> usize {
    25
}
