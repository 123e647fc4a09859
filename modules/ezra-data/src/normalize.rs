//! Turn raw CSV rows into domain records.

use std::collections::{HashMap, HashSet};

use ezra_common::{
    Category, Confidentiality, District, DistrictGeometry, Phase, Position, ResearchProject,
};
use tracing::warn;

use crate::loader::{DistrictAttributesRow, DistrictShapeRow, ProjectRow};

const PLACEHOLDER_OFFICE: &str = "UNCATEGORIZED";
const DEFAULT_DISTRICT_COLOR: &str = "5";

/// Project ids that are rendered muted and redacted.
#[derive(Debug, Clone, Default)]
pub struct ConfidentialIds(HashSet<String>);

impl ConfidentialIds {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    pub fn classify(&self, id: &str) -> Confidentiality {
        if self.0.contains(id) {
            Confidentiality::Confidential
        } else {
            Confidentiality::Public
        }
    }
}

/// Why a project row was not turned into a project.
#[derive(Debug, Clone, PartialEq)]
pub enum RowRejection {
    InvalidPosition { latitude: String, longitude: String },
    DuplicateId,
}

impl std::fmt::Display for RowRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowRejection::InvalidPosition {
                latitude,
                longitude,
            } => write!(f, "invalid position ({latitude:?}, {longitude:?})"),
            RowRejection::DuplicateId => write!(f, "duplicate id"),
        }
    }
}

/// Split a pipe-delimited partner list. Empty fields and blank tokens yield `None`.
pub fn split_partners(raw: &str) -> Option<Vec<String>> {
    let partners: Vec<String> = raw
        .split('|')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    if partners.is_empty() {
        None
    } else {
        Some(partners)
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Map one row to a project. Rows without two finite coordinates are rejected.
pub fn project_from_row(
    row: ProjectRow,
    confidential: &ConfidentialIds,
) -> Result<ResearchProject, RowRejection> {
    let (Some(lat), Some(lng)) = (
        parse_coordinate(&row.latitude),
        parse_coordinate(&row.longitude),
    ) else {
        return Err(RowRejection::InvalidPosition {
            latitude: row.latitude,
            longitude: row.longitude,
        });
    };

    let category = Category::parse(&row.category);
    Ok(ResearchProject {
        confidentiality: confidential.classify(&row.id),
        image: category.image_url(),
        partners: split_partners(&row.partners),
        position: Position::new(lat, lng),
        id: row.id,
        title: row.title,
        researcher: row.researcher,
        category,
        phase: Phase::parse(&row.phase),
        description: row.description,
        start_date: non_empty(row.start_date),
        completion_date: non_empty(row.completion_date),
    })
}

/// Normalize every row, keeping the first occurrence of each id.
/// Returns the projects and the number of rows dropped.
pub fn normalize_projects(
    rows: Vec<ProjectRow>,
    confidential: &ConfidentialIds,
) -> (Vec<ResearchProject>, usize) {
    let mut seen = HashSet::new();
    let mut projects = Vec::with_capacity(rows.len());
    let mut dropped = 0;

    for row in rows {
        let id = row.id.clone();
        let result = if seen.contains(&id) {
            Err(RowRejection::DuplicateId)
        } else {
            project_from_row(row, confidential)
        };

        match result {
            Ok(project) => {
                seen.insert(id);
                projects.push(project);
            }
            Err(reason) => {
                warn!(id = %id, %reason, "Dropping project row");
                dropped += 1;
            }
        }
    }

    (projects, dropped)
}

/// Join attribute and shape rows by GEOID20.
///
/// Attribute rows without a real office controller are skipped. Shapes whose
/// coordinate string is not valid JSON are logged and skipped.
pub fn normalize_districts(
    attributes: Vec<DistrictAttributesRow>,
    shapes: Vec<DistrictShapeRow>,
) -> Vec<District> {
    let shapes_by_id: HashMap<String, DistrictShapeRow> = shapes
        .into_iter()
        .map(|s| (s.geoid.clone(), s))
        .collect();

    let mut districts = Vec::new();
    for attr in attributes {
        let office = attr.office_controller.trim();
        if office.is_empty() || office == PLACEHOLDER_OFFICE {
            continue;
        }
        let Some(shape) = shapes_by_id.get(&attr.geoid) else {
            continue;
        };

        let coordinates: serde_json::Value = match serde_json::from_str(&shape.coordinates) {
            Ok(c) => c,
            Err(e) => {
                warn!(geoid = %attr.geoid, error = %e, "Failed to parse district geometry");
                continue;
            }
        };
        if !coordinates.is_array() {
            warn!(geoid = %attr.geoid, "District coordinates are not an array");
            continue;
        }

        districts.push(District {
            name: non_empty(attr.name).unwrap_or(attr.district_name),
            district: attr.district,
            office: office.to_string(),
            color: non_empty(attr.color).unwrap_or_else(|| DEFAULT_DISTRICT_COLOR.to_string()),
            tier_rank: non_empty(attr.tier_rank),
            geometry: DistrictGeometry {
                kind: shape.geometry_type.clone(),
                coordinates,
            },
            geoid: attr.geoid,
        });
    }

    districts
}
