use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ezra_api::{build_router, AppState};
use ezra_common::{Config, DataLocation};
use ezra_data::{source_for, CsvLoader, ProjectsStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ezra=info".parse()?))
        .init();

    let config = Config::from_env()?;

    if config.uses_default_credentials() {
        warn!("Using built-in team credentials. Set EZRA_LOGIN_EMAIL and EZRA_LOGIN_PASSWORD.");
    }
    match &config.data {
        DataLocation::Url(url) => info!(%url, "Loading CSV data over HTTP"),
        DataLocation::Dir(dir) => info!(dir = %dir.display(), "Loading CSV data from disk"),
    }

    let loader = Arc::new(CsvLoader::from_config(source_for(&config.data), &config));
    let store = Arc::new(ProjectsStore::new(loader));
    store.mark_loading().await;

    let addr = format!("{}:{}", config.web_host, config.web_port);
    let state = Arc::new(AppState::new(config, store.clone()));

    // Initial loads run in the background; views render a loading state meanwhile.
    tokio::spawn({
        let store = store.clone();
        async move {
            store.refresh().await;
        }
    });
    tokio::spawn({
        let state = state.clone();
        async move {
            state.load_districts().await;
        }
    });

    let app = build_router(state);

    info!("EZRA starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
