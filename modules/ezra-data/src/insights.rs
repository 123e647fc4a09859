//! Read-only aggregations behind the dashboard, portfolio and analytics views.
//!
//! Counts are returned in first-seen order so charts keep a stable layout
//! for a given CSV.

use std::collections::HashSet;

use ezra_common::{Phase, ResearchProject};
use serde::Serialize;

use crate::filter::CategoryFilter;

/// Researcher placeholder for unstaffed projects.
pub const UNASSIGNED_RESEARCHER: &str = "TBD";

/// Projects shown under "Active Projects" on the dashboard.
pub const ACTIVE_PROJECT_LIMIT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Count {
    pub name: String,
    pub count: usize,
}

fn tally<I>(keys: I) -> Vec<Count>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: Vec<Count> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|c| c.name == key) {
            Some(c) => c.count += 1,
            None => counts.push(Count {
                name: key,
                count: 1,
            }),
        }
    }
    counts
}

fn is_staffed(researcher: &str) -> bool {
    researcher != UNASSIGNED_RESEARCHER
}

/// Title-cased category names with their project counts.
pub fn category_counts(projects: &[ResearchProject]) -> Vec<Count> {
    tally(projects.iter().map(|p| p.category.display_name()))
}

pub fn phase_counts(projects: &[ResearchProject]) -> Vec<Count> {
    tally(projects.iter().map(|p| p.phase.label().to_string()))
}

/// Projects per researcher, most projects first. `TBD` is not a researcher.
pub fn researcher_counts(projects: &[ResearchProject]) -> Vec<Count> {
    let mut counts = tally(
        projects
            .iter()
            .filter(|p| is_staffed(&p.researcher))
            .map(|p| p.researcher.clone()),
    );
    // Stable sort keeps first-seen order among ties.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn unique_researchers(projects: &[ResearchProject]) -> usize {
    projects
        .iter()
        .map(|p| p.researcher.as_str())
        .filter(|r| is_staffed(r))
        .collect::<HashSet<_>>()
        .len()
}

/// Leading four-digit year of a date string such as `2024-03` or `2024`.
pub fn start_year(date: &str) -> Option<u16> {
    let prefix = date.trim().get(..4)?;
    if prefix.chars().all(|c| c.is_ascii_digit()) {
        prefix.parse().ok()
    } else {
        None
    }
}

/// Projects started per year, ascending. Undated projects are left out.
pub fn started_per_year(projects: &[ResearchProject]) -> Vec<(u16, usize)> {
    let mut years: Vec<(u16, usize)> = Vec::new();
    for year in projects
        .iter()
        .filter_map(|p| p.start_date.as_deref().and_then(start_year))
    {
        match years.iter_mut().find(|(y, _)| *y == year) {
            Some((_, n)) => *n += 1,
            None => years.push((year, 1)),
        }
    }
    years.sort_by_key(|(y, _)| *y);
    years
}

pub fn active_projects(projects: &[ResearchProject]) -> &[ResearchProject] {
    &projects[..projects.len().min(ACTIVE_PROJECT_LIMIT)]
}

/// Completed projects, optionally restricted to one category.
pub fn portfolio<'a>(
    projects: &'a [ResearchProject],
    category: &CategoryFilter,
) -> Vec<&'a ResearchProject> {
    projects
        .iter()
        .filter(|p| p.phase == Phase::Completed && category.matches(&p.category))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub project_count: usize,
    pub researcher_count: usize,
    pub categories: Vec<Count>,
}

impl DashboardSummary {
    pub fn from_projects(projects: &[ResearchProject]) -> Self {
        Self {
            project_count: projects.len(),
            researcher_count: unique_researchers(projects),
            categories: category_counts(projects),
        }
    }
}
