//! Internal aggregation API surface.
//!
//! The HTTP endpoints the UI collaborator consumes. Handlers stay thin:
//! they validate query parameters, delegate to the engine, and map engine
//! errors onto HTTP statuses.

mod error;
mod health;
mod hymns;
mod plans;

pub use error::ApiError;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};

use crate::aggregate::PlanAggregator;
use crate::config::Config;
use crate::hymnal::HymnIndex;
use crate::planning_center::PlanningCenterClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// `Planning Center` client for single-resource fetches.
    pub client: PlanningCenterClient,
    /// Fan-out aggregator for the all-plans view.
    pub aggregator: Arc<PlanAggregator<PlanningCenterClient>>,
    /// Hymnal cross-reference index, built once at startup.
    pub hymns: Arc<HymnIndex>,
    /// Service startup timestamp for uptime reporting.
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Assemble the shared state from loaded configuration.
    pub fn new(client: PlanningCenterClient, hymns: HymnIndex, config: &Config) -> Self {
        let aggregator = PlanAggregator::new(client.clone()).with_per_page(config.per_page);
        Self {
            client,
            aggregator: Arc::new(aggregator),
            hymns: Arc::new(hymns),
            startup_time: Utc::now(),
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/service-types", get(plans::service_types))
        .route("/all-plans", get(plans::all_plans))
        .route("/plans", get(plans::plans))
        .route("/plan-items", get(plans::plan_items))
        .route("/hymns", post(hymns::hymns))
        .route("/health", get(health::health_check))
        .with_state(state)
}
