//! HTTP client for the `Planning Center` Services v2 API.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::planning_center::types::{Plan, PlanItem, ServiceType, Song};
use crate::types::{PlanId, ServiceTypeId};

const BASE_URL: &str = "https://api.planningcenteronline.com/services/v2";

/// Server-side ordering for plan listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first (`order=sort_date`).
    Ascending,
    /// Newest first (`order=-sort_date`).
    Descending,
}

impl SortOrder {
    const fn query_value(self) -> &'static str {
        match self {
            Self::Ascending => "sort_date",
            Self::Descending => "-sort_date",
        }
    }
}

/// Items plus included song resources for one plan.
#[derive(Debug, Clone)]
pub struct PlanItemsPage {
    /// Plan items, ascending by sequence.
    pub items: Vec<PlanItem>,
    /// Included songs, in API response order. Items join on title; when two
    /// included songs share a title, the first match in this order wins.
    pub included: Vec<Song>,
    /// Upstream total item count.
    pub total_count: u64,
}

/// Client for accessing the `Planning Center` Online API
///
/// All requests use Basic Auth with the configured credential pair. The
/// client itself is cheap to clone; fan-out callers share one connection
/// pool.
#[derive(Clone)]
pub struct PlanningCenterClient {
    app_id: String,
    secret: String,
    client: Client,
}

impl PlanningCenterClient {
    /// Create a new `Planning Center` client from config
    pub fn new(config: &Config) -> Self {
        Self {
            app_id: config.planning_center_id.clone(),
            secret: config.planning_center_token.clone(),
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Error out before any request when credentials are absent.
    fn ensure_configured(&self) -> Result<()> {
        if self.app_id.is_empty() || self.secret.is_empty() {
            return Err(Error::config(
                "Planning Center credentials not configured",
                "Set PLANNING_CENTER_ID and PLANNING_CENTER_TOKEN environment variables",
            ));
        }
        Ok(())
    }

    /// Make an authenticated GET request with query parameters
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{BASE_URL}{path}");
        let resp = self.client
            .get(&url)
            .basic_auth(&self.app_id, Some(&self.secret))
            .header("Content-Type", "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {path} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::pco_status(
                format!("Request to {path} returned {status}"),
                status.as_u16(),
            ));
        }

        resp.json().await
            .map_err(|e| Error::parse(format!("Invalid JSON from {path}: {e}"), None))
    }

    /// Fetch all service types, archived ones included.
    pub async fn get_service_types(&self) -> Result<(Vec<ServiceType>, u64)> {
        self.ensure_configured()?;

        let json = self.get("/service_types", &[]).await?;
        let data = json["data"].as_array()
            .ok_or_else(|| Error::parse("Missing 'data' array in service types response", None))?;

        let service_types: Vec<ServiceType> = data.iter().filter_map(parse_service_type).collect();
        let total = meta_total(&json, service_types.len());
        Ok((service_types, total))
    }

    /// Fetch up to `per_page` plans for one service type, in the requested
    /// server-side sort order.
    pub async fn get_plans(
        &self,
        service_type: &ServiceTypeId,
        order: SortOrder,
        per_page: u32,
    ) -> Result<(Vec<Plan>, u64)> {
        self.ensure_configured()?;

        let path = format!("/service_types/{service_type}/plans");
        let per_page = per_page.to_string();
        let json = self.get(&path, &[
            ("order", order.query_value()),
            ("per_page", per_page.as_str()),
        ]).await?;

        let data = json["data"].as_array()
            .ok_or_else(|| Error::parse(format!("Missing 'data' array in plans response for service type {service_type}"), None))?;

        let plans: Vec<Plan> = data.iter().filter_map(parse_plan).collect();
        let total = meta_total(&json, plans.len());
        Ok((plans, total))
    }

    /// Fetch the items of one plan with their included song resources.
    ///
    /// Items come back ascending by sequence regardless of upstream order.
    pub async fn get_plan_items(
        &self,
        service_type: &ServiceTypeId,
        plan: &PlanId,
    ) -> Result<PlanItemsPage> {
        self.ensure_configured()?;

        let path = format!("/service_types/{service_type}/plans/{plan}/items");
        let json = self.get(&path, &[("include", "song")]).await?;

        let data = json["data"].as_array()
            .ok_or_else(|| Error::parse(format!("Missing 'data' array in items response for plan {plan}"), None))?;

        let mut items: Vec<PlanItem> = data.iter().filter_map(parse_item).collect();
        items.sort_by_key(|item| item.sequence);

        let included = json["included"].as_array().map(|a| a.as_slice()).unwrap_or(&[]);
        let songs: Vec<Song> = included.iter()
            .filter(|v| v["type"].as_str() == Some("Song"))
            .filter_map(parse_song)
            .collect();

        let total = meta_total(&json, items.len());
        Ok(PlanItemsPage { items, included: songs, total_count: total })
    }
}

/// Upstream meta total, falling back to the parsed count.
fn meta_total(json: &Value, fallback: usize) -> u64 {
    json["meta"]["total_count"].as_u64().unwrap_or(fallback as u64)
}

fn string_attr(attrs: &Value, key: &str) -> String {
    attrs[key].as_str().unwrap_or_default().to_string()
}

/// Parse one service type resource; archived state derives from a non-null
/// `archived_at`.
fn parse_service_type(data: &Value) -> Option<ServiceType> {
    let id = data["id"].as_str()?.to_string();
    let attrs = &data["attributes"];
    Some(ServiceType {
        id,
        name: attrs["name"].as_str().unwrap_or("Unknown").to_string(),
        frequency: string_attr(attrs, "frequency"),
        sequence: attrs["sequence"].as_i64().unwrap_or_default(),
        archived: attrs["archived_at"].as_str().is_some(),
        created_at: string_attr(attrs, "created_at"),
        updated_at: string_attr(attrs, "updated_at"),
    })
}

fn parse_plan(data: &Value) -> Option<Plan> {
    let id = data["id"].as_str()?.to_string();
    let attrs = &data["attributes"];
    // Older API responses carry the URL under links.self instead
    let planning_center_url = attrs["planning_center_url"].as_str()
        .or_else(|| data["links"]["self"].as_str())
        .unwrap_or_default()
        .to_string();
    Some(Plan {
        id,
        dates: string_attr(attrs, "dates"),
        short_dates: string_attr(attrs, "short_dates"),
        planning_center_url,
        items_count: attrs["items_count"].as_i64().unwrap_or_default(),
        title: attrs["title"].as_str().map(String::from),
        sort_date: string_attr(attrs, "sort_date"),
        created_at: string_attr(attrs, "created_at"),
        updated_at: string_attr(attrs, "updated_at"),
        service_type: None,
    })
}

fn parse_item(data: &Value) -> Option<PlanItem> {
    let id = data["id"].as_str()?.to_string();
    let attrs = &data["attributes"];
    Some(PlanItem {
        id,
        title: attrs["title"].as_str().unwrap_or("Untitled").to_string(),
        item_type: string_attr(attrs, "item_type"),
        sequence: attrs["sequence"].as_i64().unwrap_or_default(),
        service_position: string_attr(attrs, "service_position"),
        key_name: attrs["key_name"].as_str().map(String::from),
        length: attrs["length"].as_i64().unwrap_or_default(),
        description: attrs["description"].as_str().map(String::from),
        created_at: string_attr(attrs, "created_at"),
        updated_at: string_attr(attrs, "updated_at"),
    })
}

fn parse_song(data: &Value) -> Option<Song> {
    let id = data["id"].as_str()?.to_string();
    let attrs = &data["attributes"];
    Some(Song {
        id,
        title: string_attr(attrs, "title"),
        author: string_attr(attrs, "author"),
        admin: attrs["admin"].as_str().map(String::from),
        ccli_number: attrs["ccli_number"].as_i64().unwrap_or_default(),
        copyright: string_attr(attrs, "copyright"),
        notes: string_attr(attrs, "notes"),
        themes: string_attr(attrs, "themes"),
        created_at: string_attr(attrs, "created_at"),
        updated_at: string_attr(attrs, "updated_at"),
        planning_center_url: data["links"]["self"].as_str().unwrap_or_default().to_string(),
    })
}
