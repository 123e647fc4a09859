use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::{header, HeaderValue},
    response::Redirect,
    routing::{get, post},
    Router,
};
use tokio::sync::{Mutex, RwLock};
use tower_http::set_header::SetResponseHeaderLayer;

use ezra_common::{Config, District, Palette};
use ezra_data::ProjectsStore;

pub mod auth;
pub mod components;
pub mod forms;
pub mod pages;
pub mod rest;
pub mod templates;

pub struct AppState {
    pub config: Config,
    pub palette: Palette,
    pub store: Arc<ProjectsStore>,
    districts: RwLock<Arc<Vec<District>>>,
    pub rate_limiter: Mutex<HashMap<IpAddr, Vec<Instant>>>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<ProjectsStore>) -> Self {
        Self {
            config,
            palette: Palette::default(),
            store,
            districts: RwLock::new(Arc::new(Vec::new())),
            rate_limiter: Mutex::new(HashMap::new()),
        }
    }

    pub async fn districts(&self) -> Arc<Vec<District>> {
        self.districts.read().await.clone()
    }

    /// Fetch district outlines. Failures leave the list empty.
    pub async fn load_districts(&self) {
        let districts = self.store.loader().load_districts().await;
        *self.districts.write().await = Arc::new(districts);
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/map") }))
        .route("/health", get(|| async { "ok" }))
        // Public pages (Dioxus SSR)
        .route("/map", get(pages::map_page))
        .route("/portfolio", get(pages::portfolio_page))
        .route(
            "/collaborate",
            get(pages::collaborate_page).post(pages::collaborate_submit),
        )
        .route("/login", get(pages::login_page).post(pages::login_submit))
        .route("/logout", post(pages::logout))
        // Team pages
        .route("/dashboard", get(pages::dashboard_page))
        .route("/dashboard/refresh", post(pages::dashboard_refresh))
        .route("/pitch", get(pages::pitch_page).post(pages::pitch_submit))
        .route("/analytics", get(pages::analytics_page))
        // REST API
        .route("/api/projects", get(rest::api_projects))
        .route("/api/projects/refresh", post(rest::api_refresh))
        .route("/api/projects/{id}", get(rest::api_project_detail))
        .route("/api/markers", get(rest::api_markers))
        .route("/api/districts", get(rest::api_districts))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        // Method + path only; query strings carry search text.
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
