use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::catalog::seed::seed_dataset;
use crate::catalog::{Catalog, Dataset, HistoricalCutoffRecord};

#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_dataset(&self) -> Result<Dataset>;

    async fn load(&self) -> Result<Catalog> {
        let dataset = self.fetch_dataset().await?;
        let catalog = Catalog::from_dataset(dataset)
            .with_context(|| format!("invalid dataset from {}", self.name()))?;
        info!(
            source = self.name(),
            colleges = catalog.colleges().len(),
            branches = catalog.branches().len(),
            cutoffs = catalog.cutoffs().len(),
            loaded_at = %catalog.loaded_at(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedSource;

#[async_trait]
impl CatalogSource for SeedSource {
    fn name(&self) -> &str {
        "built-in demo dataset"
    }

    async fn fetch_dataset(&self) -> Result<Dataset> {
        Ok(seed_dataset())
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    label: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }
}

#[async_trait]
impl CatalogSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.label
    }

    async fn fetch_dataset(&self) -> Result<Dataset> {
        let data = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed reading dataset: {}", self.path.display()))?;
        let dataset: Dataset = serde_json::from_str(&data)
            .with_context(|| format!("failed parsing dataset JSON: {}", self.path.display()))?;
        Ok(dataset)
    }
}

pub fn source_for(dataset_path: Option<&Path>) -> Box<dyn CatalogSource> {
    match dataset_path {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(SeedSource),
    }
}

/// Parses cutoff rows with the header
/// `college_id,branch_id,year,round,category,opening_rank,closing_rank`.
pub fn parse_cutoffs_csv(data: &str) -> Result<Vec<HistoricalCutoffRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());
    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<HistoricalCutoffRecord>().enumerate() {
        let record: HistoricalCutoffRecord =
            row.with_context(|| format!("invalid cutoff row {}", idx + 1))?;
        records.push(record);
    }
    debug!(rows = records.len(), "parsed cutoff csv");
    Ok(records)
}

pub async fn read_cutoffs_csv(path: &Path) -> Result<Vec<HistoricalCutoffRecord>> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed reading cutoffs csv: {}", path.display()))?;
    parse_cutoffs_csv(&data).with_context(|| format!("failed parsing {}", path.display()))
}
