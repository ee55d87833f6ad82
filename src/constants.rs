//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Plan aggregation constants.
pub mod aggregation {
    /// Page size for the all-plans fan-out fetch (per service type).
    pub const ALL_PLANS_PER_PAGE: u32 = 500;

    /// Page size for a single-service-type plan listing.
    pub const SERVICE_PLANS_PER_PAGE: u32 = 400;
}

/// Schedule composition constants.
pub mod schedule {
    /// Quiet period before an in-progress custom-text edit is committed.
    pub const CUSTOM_TEXT_DEBOUNCE_MS: u64 = 500;
}
