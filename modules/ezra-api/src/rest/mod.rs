use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::info;

use ezra_common::{District, Palette, ResearchProject};
use ezra_data::{CategoryFilter, ProjectQuery, StoreSnapshot};

use crate::auth::MaybeSession;
use crate::AppState;

// --- Query structs ---

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct MarkersQuery {
    q: String,
    category: String,
}

// --- Helpers ---

/// Copy of a project safe for a signed-out reader.
fn redact(project: &ResearchProject) -> ResearchProject {
    let mut out = project.clone();
    if project.is_confidential() {
        out.title = project.public_title().to_string();
        out.description = String::new();
    }
    out
}

fn projects_json(projects: &[ResearchProject], reveal: bool) -> serde_json::Value {
    if reveal {
        serde_json::json!(projects)
    } else {
        serde_json::json!(projects.iter().map(redact).collect::<Vec<_>>())
    }
}

fn snapshot_json(snapshot: &StoreSnapshot, reveal: bool) -> serde_json::Value {
    serde_json::json!({
        "projects": projects_json(&snapshot.projects, reveal),
        "loading": snapshot.loading,
        "status": snapshot.status,
        "error": snapshot.error,
    })
}

/// Plottable projects as a GeoJSON FeatureCollection. Rows without a finite
/// position are skipped.
pub fn projects_to_geojson(
    projects: &[&ResearchProject],
    palette: &Palette,
    reveal: bool,
) -> serde_json::Value {
    let features: Vec<serde_json::Value> = projects
        .iter()
        .filter(|p| p.position.is_finite())
        .map(|p| {
            let icon = palette.marker_icon(p);
            let title = if reveal { p.title.as_str() } else { p.public_title() };
            serde_json::json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": p.position.lng_lat(),
                },
                "properties": {
                    "id": p.id,
                    "label": p.public_title(),
                    "title": title,
                    "color": palette.marker_color(p),
                    "icon": icon.name(),
                    "icon_svg": icon.svg_paths(),
                    "confidential": p.is_confidential(),
                    "category": p.category.slug(),
                    "phase": p.phase.label(),
                }
            })
        })
        .collect();

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

pub fn districts_to_geojson(districts: &[District]) -> serde_json::Value {
    let features: Vec<serde_json::Value> = districts
        .iter()
        .map(|d| {
            serde_json::json!({
                "type": "Feature",
                "geometry": d.geometry,
                "properties": {
                    "geoid": d.geoid,
                    "name": d.name,
                    "district": d.district,
                    "office": d.office,
                    "color": d.color,
                    "tier_rank": d.tier_rank,
                }
            })
        })
        .collect();

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

// --- Handlers ---

pub async fn api_projects(
    session: MaybeSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let snapshot = state.store.snapshot().await;
    Json(snapshot_json(&snapshot, session.is_signed_in()))
}

pub async fn api_project_detail(
    session: MaybeSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let snapshot = state.store.snapshot().await;
    match snapshot.find(&id) {
        Some(project) if session.is_signed_in() => Json(serde_json::json!(project)).into_response(),
        Some(project) => Json(serde_json::json!(redact(project))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": format!("project {id} not found")})),
        )
            .into_response(),
    }
}

pub async fn api_markers(
    session: MaybeSession,
    State(state): State<Arc<AppState>>,
    Query(params): Query<MarkersQuery>,
) -> impl IntoResponse {
    let snapshot = state.store.snapshot().await;
    let reveal = session.is_signed_in();
    let mut query = ProjectQuery::new(&params.q, CategoryFilter::parse(&params.category));
    if !reveal {
        query = query.for_guest();
    }
    let visible = query.apply(&snapshot.projects);
    Json(projects_to_geojson(&visible, &state.palette, reveal))
}

pub async fn api_districts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let districts = state.districts().await;
    Json(districts_to_geojson(&districts))
}

pub async fn api_refresh(session: MaybeSession, State(state): State<Arc<AppState>>) -> Response {
    if !session.is_signed_in() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "Sign in required"})),
        )
            .into_response();
    }

    info!("Project refresh requested");
    let snapshot = state.store.refresh().await;
    (StatusCode::ACCEPTED, Json(snapshot_json(&snapshot, true))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ezra_common::{Category, Confidentiality, DistrictGeometry, Phase, Position};

    fn project(id: &str, confidentiality: Confidentiality, position: Position) -> ResearchProject {
        ResearchProject {
            id: id.to_string(),
            title: "Security Vestibules".to_string(),
            researcher: "Agustin Gonzalez".to_string(),
            category: Category::HealthSafety,
            phase: Phase::Developmental,
            description: "Entry sequences".to_string(),
            position,
            partners: None,
            start_date: None,
            completion_date: None,
            image: Category::HealthSafety.image_url(),
            confidentiality,
        }
    }

    #[test]
    fn markers_carry_palette_styling_and_lng_lat_order() {
        let p = project("P1", Confidentiality::Public, Position::new(30.1, -97.2));
        let geo = projects_to_geojson(&[&p], &Palette::default(), false);
        let feature = &geo["features"][0];
        assert_eq!(feature["geometry"]["coordinates"], serde_json::json!([-97.2, 30.1]));
        assert_eq!(feature["properties"]["color"], "#f16555");
        assert_eq!(feature["properties"]["icon"], "heart");
        assert_eq!(feature["properties"]["label"], "Security Vestibules");
    }

    #[test]
    fn confidential_markers_are_muted_and_redacted_for_guests() {
        let p = project("P1", Confidentiality::Confidential, Position::new(30.1, -97.2));
        let geo = projects_to_geojson(&[&p], &Palette::default(), false);
        let props = &geo["features"][0]["properties"];
        assert_eq!(props["label"], "CONFIDENTIAL");
        assert_eq!(props["title"], "CONFIDENTIAL");
        assert_eq!(props["color"], "#666666");
        assert_eq!(props["icon"], "lock");
        assert_eq!(props["confidential"], true);

        let geo = projects_to_geojson(&[&p], &Palette::default(), true);
        assert_eq!(geo["features"][0]["properties"]["title"], "Security Vestibules");
        assert_eq!(geo["features"][0]["properties"]["label"], "CONFIDENTIAL");
    }

    #[test]
    fn unplottable_projects_are_skipped() {
        let p = project("P1", Confidentiality::Public, Position::new(f64::NAN, -97.2));
        let geo = projects_to_geojson(&[&p], &Palette::default(), false);
        assert_eq!(geo["features"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn redact_only_touches_confidential_projects() {
        let public = project("P1", Confidentiality::Public, Position::new(30.0, -97.0));
        assert_eq!(redact(&public), public);

        let secret = project("P2", Confidentiality::Confidential, Position::new(30.0, -97.0));
        let shown = redact(&secret);
        assert_eq!(shown.title, "CONFIDENTIAL");
        assert!(shown.description.is_empty());
    }

    #[test]
    fn districts_keep_geometry_and_properties() {
        let d = District {
            geoid: "4801234".to_string(),
            name: "Austin ISD".to_string(),
            district: "227901".to_string(),
            office: "Austin".to_string(),
            color: "3".to_string(),
            tier_rank: None,
            geometry: DistrictGeometry {
                kind: "Polygon".to_string(),
                coordinates: serde_json::json!([[[-97.0, 30.0], [-97.1, 30.0], [-97.0, 30.1]]]),
            },
        };
        let geo = districts_to_geojson(&[d]);
        let feature = &geo["features"][0];
        assert_eq!(feature["geometry"]["type"], "Polygon");
        assert_eq!(feature["properties"]["name"], "Austin ISD");
        assert_eq!(feature["properties"]["tier_rank"], serde_json::Value::Null);
    }
}
