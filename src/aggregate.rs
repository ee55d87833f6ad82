//! Fan-out plan aggregation across service types.
//!
//! Fetches plans for every active service type concurrently, merges them
//! into one descending-by-date sequence, and groups them into calendar-day
//! buckets for the all-plans view. One unreachable service type degrades to
//! an empty contribution; it never sinks the rest of the aggregation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use futures::future;
use serde::Serialize;

use crate::constants::aggregation::ALL_PLANS_PER_PAGE;
use crate::error::Result;
use crate::planning_center::{Plan, PlanningCenterClient, ServiceType, ServiceTypeRef, SortOrder};
use crate::types::ServiceTypeId;

/// Source of service types and plans.
///
/// Abstracts the `Planning Center` client so the fan-out and its
/// partial-failure behavior are testable without a network.
#[async_trait]
pub trait PlanSource: Send + Sync {
    /// Every service type known upstream, archived ones included.
    async fn service_types(&self) -> Result<Vec<ServiceType>>;

    /// Up to `per_page` plans for one service type, newest first.
    async fn plans_for(&self, service_type: &ServiceTypeId, per_page: u32) -> Result<Vec<Plan>>;
}

#[async_trait]
impl PlanSource for PlanningCenterClient {
    async fn service_types(&self) -> Result<Vec<ServiceType>> {
        let (service_types, _) = self.get_service_types().await?;
        Ok(service_types)
    }

    async fn plans_for(&self, service_type: &ServiceTypeId, per_page: u32) -> Result<Vec<Plan>> {
        let (plans, _) = self.get_plans(service_type, SortOrder::Descending, per_page).await?;
        Ok(plans)
    }
}

/// Aggregated result of the all-plans fan-out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPlans {
    /// Calendar day (`YYYY-MM-DD`) to the plans on that day, newest first
    /// within each day.
    pub plans_by_date: BTreeMap<String, Vec<Plan>>,
    /// Total number of plans across all days.
    pub total_count: usize,
}

/// Concurrent plan fetcher and day-bucket grouper.
pub struct PlanAggregator<S> {
    source: S,
    per_page: u32,
}

impl<S: PlanSource> PlanAggregator<S> {
    /// Create an aggregator with the default page size.
    pub const fn new(source: S) -> Self {
        Self { source, per_page: ALL_PLANS_PER_PAGE }
    }

    /// Override the per-service-type page size.
    #[must_use]
    pub const fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Fetch and group plans across every active service type.
    ///
    /// Archived service types are dropped before the fan-out. A failure for
    /// one service type is logged and contributes an empty plan list; a
    /// failure listing service types themselves is fatal.
    pub async fn all_plans(&self) -> Result<AggregatedPlans> {
        let service_types = self.source.service_types().await?;
        let active: Vec<ServiceType> =
            service_types.into_iter().filter(|st| !st.archived).collect();

        let fetches = active.iter().map(|st| self.plans_for_type(st));
        let plans: Vec<Plan> = future::join_all(fetches).await.into_iter().flatten().collect();

        Ok(group_by_day(plans))
    }

    /// One sub-fetch of the fan-out, tagged with its owning service type.
    async fn plans_for_type(&self, service_type: &ServiceType) -> Vec<Plan> {
        let id = ServiceTypeId::new(service_type.id.as_str());
        match self.source.plans_for(&id, self.per_page).await {
            Ok(mut plans) => {
                let tag = ServiceTypeRef {
                    id: service_type.id.clone(),
                    name: service_type.name.clone(),
                };
                for plan in &mut plans {
                    plan.service_type = Some(tag.clone());
                }
                plans
            }
            Err(e) => {
                tracing::warn!("Failed to fetch plans for service type {}: {e}", service_type.id);
                Vec::new()
            }
        }
    }
}

/// Sort plans newest first and group them into calendar-day buckets.
fn group_by_day(mut plans: Vec<Plan>) -> AggregatedPlans {
    // ISO-8601 timestamps sort correctly as strings
    plans.sort_by(|a, b| b.sort_date.cmp(&a.sort_date));

    let total_count = plans.len();
    let mut plans_by_date: BTreeMap<String, Vec<Plan>> = BTreeMap::new();
    for plan in plans {
        let key = day_key(&plan.sort_date).to_string();
        plans_by_date.entry(key).or_default().push(plan);
    }

    AggregatedPlans { plans_by_date, total_count }
}

/// Calendar-day grouping key: the date portion before `T`, or a best-effort
/// ten-character slice for timestamps that are not ISO-8601.
fn day_key(sort_date: &str) -> &str {
    sort_date.split_once('T').map_or_else(
        || sort_date.get(..10).unwrap_or(sort_date),
        |(day, _)| day,
    )
}
