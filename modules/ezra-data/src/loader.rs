//! CSV parsing and the two load pipelines (projects, districts).

use std::sync::Arc;

use ezra_common::{Config, District, ResearchProject};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::normalize::{normalize_districts, normalize_projects, ConfidentialIds};
use crate::source::CsvSource;

// --- Raw rows ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectRow {
    pub id: String,
    pub title: String,
    pub researcher: String,
    pub category: String,
    pub phase: String,
    pub description: String,
    pub latitude: String,
    pub longitude: String,
    pub partners: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "completionDate")]
    pub completion_date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DistrictAttributesRow {
    #[serde(rename = "GEOID20")]
    pub geoid: String,
    #[serde(rename = "COLOR")]
    pub color: String,
    #[serde(rename = "DISTRICT")]
    pub district: String,
    #[serde(rename = "DISTRICT_N")]
    pub district_name: String,
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "Office_Controller")]
    pub office_controller: String,
    #[serde(rename = "Pfluger_Tier_Rank")]
    pub tier_rank: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DistrictShapeRow {
    #[serde(rename = "GEOID20")]
    pub geoid: String,
    pub geometry_type: String,
    pub coordinates: String,
}

/// Parse header-keyed CSV. Blank lines are skipped; short rows leave the
/// missing columns at their defaults.
pub fn parse_rows<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(record.deserialize(Some(&headers))?);
    }
    Ok(rows)
}

// --- Pipelines ---

#[derive(Debug, Clone)]
pub struct DataPaths {
    pub projects: String,
    pub district_attributes: String,
    pub district_shapes: String,
}

impl DataPaths {
    pub fn from_config(config: &Config) -> Self {
        Self {
            projects: config.projects_path.clone(),
            district_attributes: config.district_attributes_path.clone(),
            district_shapes: config.district_shapes_path.clone(),
        }
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone)]
pub struct LoadedProjects {
    pub projects: Vec<ResearchProject>,
    pub dropped: usize,
}

pub struct CsvLoader {
    source: Arc<dyn CsvSource>,
    paths: DataPaths,
    confidential: ConfidentialIds,
}

impl CsvLoader {
    pub fn new(source: Arc<dyn CsvSource>, paths: DataPaths, confidential: ConfidentialIds) -> Self {
        Self {
            source,
            paths,
            confidential,
        }
    }

    pub fn from_config(source: Arc<dyn CsvSource>, config: &Config) -> Self {
        Self::new(
            source,
            DataPaths::from_config(config),
            ConfidentialIds::new(config.confidential_ids.iter().cloned()),
        )
    }

    /// Load the primary project list. Fetch and parse failures are returned
    /// to the caller; individual bad rows are dropped.
    pub async fn load_projects(&self) -> Result<LoadedProjects> {
        let text = self.source.fetch_text(&self.paths.projects).await?;
        let rows: Vec<ProjectRow> = parse_rows(&text)?;
        let (projects, dropped) = normalize_projects(rows, &self.confidential);
        info!(count = projects.len(), dropped, "Loaded research projects");
        Ok(LoadedProjects { projects, dropped })
    }

    /// Load decorative district outlines. Any failure yields an empty list.
    pub async fn load_districts(&self) -> Vec<District> {
        match self.try_load_districts().await {
            Ok(districts) => districts,
            Err(e) => {
                warn!(error = %e, "Failed to load districts");
                Vec::new()
            }
        }
    }

    async fn try_load_districts(&self) -> Result<Vec<District>> {
        let (attributes, shapes) = tokio::try_join!(
            self.source.fetch_text(&self.paths.district_attributes),
            self.source.fetch_text(&self.paths.district_shapes),
        )?;
        let attributes: Vec<DistrictAttributesRow> = parse_rows(&attributes)?;
        let shapes: Vec<DistrictShapeRow> = parse_rows(&shapes)?;
        Ok(normalize_districts(attributes, shapes))
    }
}
