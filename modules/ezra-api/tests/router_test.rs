//! Router exercised end to end over an in-memory CSV source.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use ezra_api::{build_router, AppState};
use ezra_common::Config;
use ezra_data::{CsvLoader, ProjectsStore, StaticSource};

const PROJECTS: &str = "\
id,title,researcher,category,phase,description,latitude,longitude,partners,startDate,completionDate
X25-RB01,Acoustic Comfort,Katherine Wiley,health-safety,Completed,Reverberation,30.28,-97.73,UT Austin,2023-01,2024-05
X25-RB02,Biophilic Learning,Leah van der Sanden,sustainability,Developmental,Daylight,30.26,-97.74,,2024-02,
X25-RB03,Sensory Rooms,Monse Rios,psychology,Literature Review,Calm spaces,30.30,-97.75,,2024-08,
X25-RB09,Security Vestibules,Agustin Gonzalez,health-safety,Developmental,Entry sequences,30.25,-97.70,,,
";

const EMAIL: &str = "apps@pflugerarchitects.com";

fn test_config() -> Config {
    Config {
        login_delay: Duration::ZERO,
        contact_delay: Duration::ZERO,
        ..Config::default()
    }
}

async fn app() -> Router {
    let config = test_config();
    let source = StaticSource::new().with(&config.projects_path, PROJECTS);
    let loader = Arc::new(CsvLoader::from_config(Arc::new(source), &config));
    let store = Arc::new(ProjectsStore::new(loader));
    store.refresh().await;

    let state = Arc::new(AppState::new(config, store));
    build_router(state).layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_cookie(mut req: Request<Body>, cookie: &str) -> Request<Body> {
    req.headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    req
}

async fn body_text(res: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(res: &axum::response::Response) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Log in and return the `name=value` pair to send back as a Cookie header.
async fn login(app: &Router) -> String {
    let body = format!("email={}&password=123456", EMAIL.replace('@', "%40"));
    let res = app.clone().oneshot(post_form("/login", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn health_and_root_redirect() {
    let app = app().await;

    let res = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "ok");

    let res = app.oneshot(get("/")).await.unwrap();
    assert!(res.status().is_redirection());
    assert_eq!(location(&res), "/map");
}

#[tokio::test]
async fn responses_are_not_cached() {
    let res = app().await.oneshot(get("/map")).await.unwrap();
    assert_eq!(res.headers()[header::CACHE_CONTROL], "no-store");
    assert_eq!(res.headers()[header::PRAGMA], "no-cache");
}

#[tokio::test]
async fn internal_views_redirect_guests_to_login() {
    let app = app().await;
    for uri in ["/dashboard", "/pitch", "/analytics"] {
        let res = app.clone().oneshot(get(uri)).await.unwrap();
        assert!(res.status().is_redirection(), "{uri}");
        assert_eq!(location(&res), "/login", "{uri}");
    }
}

#[tokio::test]
async fn login_sets_session_and_unlocks_dashboard() {
    let app = app().await;
    let cookie = login(&app).await;
    assert!(cookie.starts_with("ezra_session="));

    let res = app
        .clone()
        .oneshot(with_cookie(get("/dashboard"), &cookie))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;
    assert!(html.contains("Research Hub"));
    assert!(html.contains("Active Research"));
    // Signed in: collaborate leaves the nav, insights joins it.
    assert!(html.contains("/analytics"));
    assert!(!html.contains("href=\"/collaborate\""));

    let res = app
        .oneshot(with_cookie(post_form("/logout", ""), &cookie))
        .await
        .unwrap();
    assert_eq!(location(&res), "/map");
    let cleared = res.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn bad_login_shows_error() {
    let res = app()
        .await
        .oneshot(post_form("/login", "email=someone%40else.com&password=123456"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(header::SET_COOKIE).is_none());
    assert!(body_text(res).await.contains("Invalid email or password."));
}

#[tokio::test]
async fn login_attempts_are_rate_limited() {
    let app = app().await;
    for _ in 0..10 {
        app.clone()
            .oneshot(post_form("/login", "email=x%40y.com&password=nope"))
            .await
            .unwrap();
    }
    let res = app
        .oneshot(post_form("/login", "email=x%40y.com&password=nope"))
        .await
        .unwrap();
    assert!(body_text(res).await.contains("Too many attempts. Try again later."));
}

#[tokio::test]
async fn map_sidebar_filters_and_redacts_for_guests() {
    let app = app().await;

    let res = app.clone().oneshot(get("/map?q=acoustic&category=all")).await.unwrap();
    let html = body_text(res).await;
    assert!(html.contains("Acoustic Comfort"));
    assert!(!html.contains("Biophilic Learning"));

    let res = app.oneshot(get("/map?category=health-safety")).await.unwrap();
    let html = body_text(res).await;
    assert!(html.contains("CONFIDENTIAL"));
    assert!(!html.contains("Security Vestibules"));
}

#[tokio::test]
async fn markers_follow_the_filter() {
    let app = app().await;

    let res = app.clone().oneshot(get("/api/markers")).await.unwrap();
    let geo = body_json(res).await;
    assert_eq!(geo["type"], "FeatureCollection");
    assert_eq!(geo["features"].as_array().unwrap().len(), 4);

    let res = app.oneshot(get("/api/markers?category=psychology")).await.unwrap();
    let geo = body_json(res).await;
    let features = geo["features"].as_array().unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["properties"]["id"], "X25-RB03");
    assert_eq!(features[0]["properties"]["color"], "#9A3324");
}

#[tokio::test]
async fn project_detail_redacts_and_404s() {
    let app = app().await;

    let res = app.clone().oneshot(get("/api/projects/X25-RB09")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let project = body_json(res).await;
    assert_eq!(project["title"], "CONFIDENTIAL");
    assert_eq!(project["confidentiality"], "confidential");

    let res = app.oneshot(get("/api/projects/NOPE")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(body_json(res).await["error"].is_string());
}

#[tokio::test]
async fn projects_endpoint_reports_store_state() {
    let res = app().await.oneshot(get("/api/projects")).await.unwrap();
    let body = body_json(res).await;
    assert_eq!(body["loading"], false);
    assert_eq!(body["status"], "loaded");
    assert!(body["error"].is_null());
    assert_eq!(body["projects"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn refresh_requires_a_session() {
    let app = app().await;

    let res = app
        .clone()
        .oneshot(post_form("/api/projects/refresh", ""))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let cookie = login(&app).await;
    let res = app
        .oneshot(with_cookie(post_form("/api/projects/refresh", ""), &cookie))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::ACCEPTED);
    let body = body_json(res).await;
    assert_eq!(body["projects"][3]["title"], "Security Vestibules");
}

#[tokio::test]
async fn pitch_next_is_guarded() {
    let app = app().await;
    let cookie = login(&app).await;

    let res = app
        .clone()
        .oneshot(with_cookie(post_form("/pitch", "step=1&action=next"), &cookie))
        .await
        .unwrap();
    let html = body_text(res).await;
    assert!(html.contains("Project Context is missing: project_identification, category"));
    assert!(html.contains("Step 1 of 5"));

    let body = "step=1&action=next&project_identification=Kennedy+Elementary&category=Fine+Arts";
    let res = app
        .oneshot(with_cookie(post_form("/pitch", body), &cookie))
        .await
        .unwrap();
    let html = body_text(res).await;
    assert!(html.contains("Step 2 of 5"));
    assert!(html.contains("Kennedy Elementary"));
}

#[tokio::test]
async fn collaborate_validates_then_acknowledges() {
    let app = app().await;

    let res = app
        .clone()
        .oneshot(post_form("/collaborate", "name=Ada&email=ada&message=Hi"))
        .await
        .unwrap();
    let html = body_text(res).await;
    assert!(html.contains("email must look like"));
    assert!(!html.contains("Message Sent!"));

    let res = app
        .oneshot(post_form(
            "/collaborate",
            "name=Ada&email=ada%40example.com&message=Hi&confidential=on",
        ))
        .await
        .unwrap();
    assert!(body_text(res).await.contains("Message Sent!"));
}

#[tokio::test]
async fn portfolio_lists_completed_work_only() {
    let res = app().await.oneshot(get("/portfolio?view=list")).await.unwrap();
    let html = body_text(res).await;
    assert!(html.contains("Acoustic Comfort"));
    assert!(!html.contains("Sensory Rooms"));
}

#[tokio::test]
async fn login_compares_email_exactly() {
    let res = app()
        .await
        .oneshot(post_form(
            "/login",
            "email=+apps%40pflugerarchitects.com&password=123456",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(header::SET_COOKIE).is_none());
    assert!(body_text(res).await.contains("Invalid email or password."));
}

#[tokio::test]
async fn map_search_is_not_trimmed() {
    let res = app().await.oneshot(get("/map?q=comfort+")).await.unwrap();
    assert!(!body_text(res).await.contains("Acoustic Comfort"));
}

#[tokio::test]
async fn guest_search_cannot_find_confidential_titles() {
    let app = app().await;

    let res = app.clone().oneshot(get("/map?q=security")).await.unwrap();
    assert!(!body_text(res).await.contains("CONFIDENTIAL"));

    let res = app.clone().oneshot(get("/api/markers?q=security")).await.unwrap();
    assert_eq!(body_json(res).await["features"].as_array().unwrap().len(), 0);

    let cookie = login(&app).await;
    let res = app
        .oneshot(with_cookie(get("/api/markers?q=security"), &cookie))
        .await
        .unwrap();
    let geo = body_json(res).await;
    assert_eq!(geo["features"][0]["properties"]["id"], "X25-RB09");
}
