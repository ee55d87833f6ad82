//! `bulletinflow` - `Planning Center` bulletin text service.

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bulletinflow::api::{self, AppState};
use bulletinflow::config::Config;
use bulletinflow::hymnal::HymnIndex;
use bulletinflow::planning_center::PlanningCenterClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    info!("Starting {} v{}", config.app_name(), config.app_version());

    if !config.has_planning_center_credentials() {
        warn!(
            "Planning Center credentials not configured; \
             set PLANNING_CENTER_ID and PLANNING_CENTER_TOKEN to serve plan data"
        );
    }

    // A missing hymnal table degrades to an empty index; a malformed one is fatal
    let hymns = if config.hymnal_path.is_file() {
        HymnIndex::load(&config.hymnal_path)?
    } else {
        warn!("Hymnal table not found at {}; serving without hymn matches", config.hymnal_path.display());
        HymnIndex::default()
    };

    let client = PlanningCenterClient::new(&config);
    let state = AppState::new(client, hymns, &config);
    let app = api::build_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
