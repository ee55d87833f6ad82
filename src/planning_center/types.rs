//! `Planning Center` data types.
//!
//! These types represent the data structures from the `Planning Center` API,
//! flattened from the JSON:API envelope into the shapes the aggregation
//! endpoints serve. Timestamps stay as the ISO-8601 strings the API returns;
//! they sort correctly lexicographically and are never re-parsed except for
//! bulletin header dates.

use serde::Serialize;

/// A recurring category of service (e.g., "Sunday Morning")
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceType {
    /// Service type identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Recurrence description (e.g., "Weekly").
    pub frequency: String,
    /// Ordering key among service types.
    pub sequence: i64,
    /// Whether the service type has been archived upstream. Archived entries
    /// are excluded from all downstream processing.
    pub archived: bool,
    /// Creation timestamp.
    pub created_at: String,
    /// Last-update timestamp.
    pub updated_at: String,
}

/// Shorthand service type tag attached to aggregated plans
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTypeRef {
    /// Service type identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A specific scheduled occurrence of a service type
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Plan identifier.
    pub id: String,
    /// Human-readable date range (e.g., "March 31, 2024").
    pub dates: String,
    /// Abbreviated date range.
    pub short_dates: String,
    /// Link back to the plan in `Planning Center`.
    pub planning_center_url: String,
    /// Number of items in the plan.
    pub items_count: i64,
    /// Optional plan title.
    pub title: Option<String>,
    /// Canonical ordering key (ISO-8601). Its date portion is the
    /// calendar-day grouping key.
    pub sort_date: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last-update timestamp.
    pub updated_at: String,
    /// Owning service type; set by the aggregation fan-out, absent on
    /// single-service-type listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceTypeRef>,
}

/// A line entry within a plan (song, announcement, header, ...)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    /// Item identifier.
    pub id: String,
    /// Display title; for songs this is the join key to [`Song`].
    pub title: String,
    /// Item kind as reported upstream ("song", "header", "item", ...).
    pub item_type: String,
    /// Display/output order within the plan.
    pub sequence: i64,
    /// Position within the service ("during", "pre", "post").
    pub service_position: String,
    /// Musical key, if set.
    pub key_name: Option<String>,
    /// Planned length in seconds.
    pub length: i64,
    /// Free-text description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last-update timestamp.
    pub updated_at: String,
}

impl PlanItem {
    /// Whether this item is a song (the only kind that feeds copyright and
    /// schedule generation).
    #[must_use]
    pub fn is_song(&self) -> bool {
        self.item_type == "song"
    }
}

/// Song metadata included alongside plan items
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Song identifier.
    pub id: String,
    /// Song title; items join on this by exact equality.
    pub title: String,
    /// Free-text author credit, delimiter-separated.
    pub author: String,
    /// Administering organization, if any.
    pub admin: Option<String>,
    /// CCLI song number.
    pub ccli_number: i64,
    /// Free-text copyright statement.
    pub copyright: String,
    /// Internal notes.
    pub notes: String,
    /// Comma-separated themes.
    pub themes: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last-update timestamp.
    pub updated_at: String,
    /// Link back to the song in `Planning Center`.
    pub planning_center_url: String,
}
