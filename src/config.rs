//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::aggregation::ALL_PLANS_PER_PAGE;
use crate::error::Result;

/// Default listen address for the HTTP service.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5710";

/// Default hymnal table location, relative to the working directory.
const DEFAULT_HYMNAL_PATH: &str = "hymns.json";

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// `Planning Center` Online application ID
    pub planning_center_id: String,
    /// `Planning Center` Online secret token
    pub planning_center_token: String,
    /// Listen address for the HTTP service
    pub bind_addr: String,
    /// Path to the hymnal lookup table (JSON)
    pub hymnal_path: PathBuf,
    /// Page size for the all-plans fan-out fetch
    pub per_page: u32,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            planning_center_id: String::new(),
            planning_center_token: String::new(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            hymnal_path: PathBuf::from(DEFAULT_HYMNAL_PATH),
            per_page: ALL_PLANS_PER_PAGE,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        // Try to load Planning Center credentials from environment
        if let Ok(app_id) = env::var("PLANNING_CENTER_ID") {
            config.planning_center_id = app_id;
        }

        if let Ok(token) = env::var("PLANNING_CENTER_TOKEN") {
            config.planning_center_token = token;
        }

        if let Ok(addr) = env::var("BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Ok(path) = env::var("HYMNAL_PATH") {
            config.hymnal_path = PathBuf::from(path);
        }

        // Page size can be configured via environment
        if let Ok(per_page) = env::var("PER_PAGE") {
            if let Ok(per_page) = per_page.parse::<u32>() {
                config.per_page = per_page;
            }
        }

        Ok(config)
    }

    /// Check if `Planning Center` is configured
    pub const fn has_planning_center_credentials(&self) -> bool {
        !self.planning_center_id.is_empty() && !self.planning_center_token.is_empty()
    }
}
