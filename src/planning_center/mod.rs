//! `Planning Center` Online integration.
//!
//! A read-only client for the Services v2 API plus the data types that flow
//! out of it.

pub mod api;
pub mod types;

pub use api::{PlanItemsPage, PlanningCenterClient, SortOrder};
pub use types::{Plan, PlanItem, ServiceType, ServiceTypeRef, Song};
