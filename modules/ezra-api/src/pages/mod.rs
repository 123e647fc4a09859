use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::info;

use ezra_data::{insights, CategoryFilter, ProjectQuery, Selection};

use crate::auth::{self, record_attempt, MaybeSession, TeamSession};
use crate::components::dashboard::category_rows;
use crate::components::map::{filter_query, MapView};
use crate::components::{
    build_analytics_data, category_options, project_to_view, render_analytics,
    render_collaborate, render_dashboard, render_login, render_map, render_pitch,
    render_portfolio, CollaborateData, DashboardData, LeafletRenderer, MapPageData,
    MarkerRenderer, PitchPageData, PortfolioData, PortfolioMode, Viewer,
};
use crate::forms::{ContactForm, PitchDraft, PitchStep, PitchWizard};
use crate::AppState;

/// Max login attempts per IP per hour.
const AUTH_RATE_LIMIT_PER_HOUR: usize = 10;

fn viewer(session: &MaybeSession) -> Viewer {
    match session.user_name() {
        Some(name) => Viewer::team(name),
        None => Viewer::guest(),
    }
}

// --- Auth pages ---

pub async fn login_page(session: MaybeSession) -> Response {
    if session.is_signed_in() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(render_login(None)).into_response()
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<std::net::SocketAddr>,
    axum::Form(form): axum::Form<LoginForm>,
) -> Response {
    // Rate limit auth attempts
    {
        let mut limiter = state.rate_limiter.lock().await;
        if !record_attempt(&mut limiter, addr.ip(), Instant::now(), AUTH_RATE_LIMIT_PER_HOUR) {
            return Html(render_login(Some("Too many attempts. Try again later.".to_string())))
                .into_response();
        }
    }

    tokio::time::sleep(state.config.login_delay).await;

    let email = form.email.as_str();
    if !auth::verify_credentials(&state.config, email, &form.password) {
        info!(email = %email, ip = %addr.ip(), "Login failed");
        return Html(render_login(Some("Invalid email or password.".to_string()))).into_response();
    }

    info!(email = %email, "Login succeeded");
    let cookie = auth::session_cookie(email, auth::session_secret(&state.config));
    (
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, "/dashboard".to_string()),
            (header::SET_COOKIE, cookie),
        ],
    )
        .into_response()
}

pub async fn logout() -> Response {
    (
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, "/map".to_string()),
            (header::SET_COOKIE, auth::clear_session_cookie()),
        ],
    )
        .into_response()
}

// --- Public pages ---

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct MapQuery {
    q: String,
    category: String,
    selected: Option<String>,
}

pub async fn map_page(
    session: MaybeSession,
    State(state): State<Arc<AppState>>,
    Query(params): Query<MapQuery>,
) -> impl IntoResponse {
    let snapshot = state.store.snapshot().await;
    let reveal = session.is_signed_in();
    let palette = &state.palette;

    let category = CategoryFilter::parse(&params.category);
    let mut query = ProjectQuery::new(&params.q, category.clone());
    if !reveal {
        query = query.for_guest();
    }
    let selection = Selection::from_param(params.selected.as_deref());
    let filter = filter_query(&params.q, category.as_param());

    let target = selection.view_target(&snapshot.projects, &state.config.map);
    let mut view = MapView::new(&state.config.map, target, &filter, palette.marker_size());
    view.selected = selection.id().map(str::to_string);

    let renderer = LeafletRenderer;
    let projects = query
        .apply(&snapshot.projects)
        .into_iter()
        .map(|p| project_to_view(p, palette, reveal))
        .collect();

    Html(render_map(MapPageData {
        viewer: viewer(&session),
        projects,
        total: snapshot.projects.len(),
        search: params.q.clone(),
        category: category.as_param().to_string(),
        categories: category_options(palette),
        legend: palette
            .legend()
            .into_iter()
            .map(|(_, style)| (style.label, style.color.to_string()))
            .collect(),
        selected: selection
            .project(&snapshot.projects)
            .map(|p| project_to_view(p, palette, reveal)),
        loading: snapshot.loading,
        error: snapshot.error.clone(),
        stylesheet: renderer.stylesheet().to_string(),
        script_src: renderer.script_src().to_string(),
        map_script: renderer.init_script(&view),
    }))
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct PortfolioQuery {
    category: String,
    view: String,
    selected: Option<String>,
}

pub async fn portfolio_page(
    session: MaybeSession,
    State(state): State<Arc<AppState>>,
    Query(params): Query<PortfolioQuery>,
) -> impl IntoResponse {
    let snapshot = state.store.snapshot().await;
    let reveal = session.is_signed_in();
    let palette = &state.palette;

    let category = CategoryFilter::parse(&params.category);
    let completed = insights::portfolio(&snapshot.projects, &category);
    let selection = Selection::from_param(params.selected.as_deref());
    let selected = completed
        .iter()
        .find(|p| selection.is_selected(&p.id))
        .map(|p| project_to_view(p, palette, reveal));

    Html(render_portfolio(PortfolioData {
        viewer: viewer(&session),
        projects: completed
            .iter()
            .map(|p| project_to_view(p, palette, reveal))
            .collect(),
        category: category.as_param().to_string(),
        categories: category_options(palette),
        mode: PortfolioMode::parse(&params.view),
        selected,
        loading: snapshot.loading,
        error: snapshot.error.clone(),
    }))
}

pub async fn collaborate_page(session: MaybeSession) -> impl IntoResponse {
    Html(render_collaborate(CollaborateData::empty(viewer(&session))))
}

pub async fn collaborate_submit(
    session: MaybeSession,
    State(state): State<Arc<AppState>>,
    axum::Form(form): axum::Form<ContactForm>,
) -> impl IntoResponse {
    let mut data = CollaborateData::from_form(viewer(&session), &form);
    match form.validate() {
        Ok(inquiry) => {
            tokio::time::sleep(state.config.contact_delay).await;
            info!(
                confidential = inquiry.confidential,
                has_organization = inquiry.organization.is_some(),
                "Collaboration inquiry received"
            );
            data.name = inquiry.name;
            data.sent = true;
        }
        Err(e) => data.error = Some(e.to_string()),
    }
    Html(render_collaborate(data))
}

// --- Team pages (TeamSession required) ---

pub async fn dashboard_page(
    session: TeamSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let snapshot = state.store.snapshot().await;
    let summary = insights::DashboardSummary::from_projects(&snapshot.projects);

    Html(render_dashboard(DashboardData {
        viewer: Viewer::team(session.name),
        project_count: summary.project_count,
        researcher_count: summary.researcher_count,
        categories: category_rows(&summary.categories, summary.project_count),
        active_projects: insights::active_projects(&snapshot.projects)
            .iter()
            .map(|p| project_to_view(p, &state.palette, true))
            .collect(),
        loading: snapshot.loading,
        error: snapshot.error.clone(),
    }))
}

pub async fn dashboard_refresh(
    _session: TeamSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    state.store.refresh().await;
    Redirect::to("/dashboard")
}

pub async fn pitch_page(session: TeamSession) -> impl IntoResponse {
    Html(render_pitch(PitchPageData {
        viewer: Viewer::team(session.name),
        step: PitchStep::ProjectContext,
        draft: PitchDraft::default(),
        error: None,
        receipt: None,
    }))
}

/// Wizard state as posted: every draft field plus the step shown and the
/// button pressed.
#[derive(Deserialize)]
pub struct PitchForm {
    #[serde(default)]
    step: String,
    #[serde(default)]
    action: String,
    #[serde(flatten)]
    draft: PitchDraft,
}

pub async fn pitch_submit(
    session: TeamSession,
    axum::Form(form): axum::Form<PitchForm>,
) -> impl IntoResponse {
    let step = PitchStep::from_number(form.step.trim().parse().unwrap_or(1));
    let mut wizard = PitchWizard::new(step, form.draft);
    let mut error = None;
    let mut receipt = None;

    match form.action.as_str() {
        "back" => wizard.back(),
        "submit" => match wizard.submit() {
            Ok(r) => receipt = Some(r.message.to_string()),
            Err(e) => error = Some(e.to_string()),
        },
        _ => {
            if let Err(e) = wizard.next() {
                error = Some(e.to_string());
            }
        }
    }

    Html(render_pitch(PitchPageData {
        viewer: Viewer::team(session.name),
        step: wizard.step(),
        draft: wizard.draft,
        error,
        receipt,
    }))
}

pub async fn analytics_page(
    session: TeamSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let snapshot = state.store.snapshot().await;
    Html(render_analytics(build_analytics_data(
        Viewer::team(session.name),
        &snapshot.projects,
        &state.palette,
        snapshot.loading,
        snapshot.error.clone(),
    )))
}
