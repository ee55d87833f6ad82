//! `bulletinflow` - `Planning Center` to church-bulletin text workflow service.
//!
//! This crate aggregates worship-service planning data from `Planning Center`
//! Online, cross-references songs against a static hymnal lookup table, and
//! generates the copyright-attribution blocks and worship-schedule listings
//! printed in church bulletins.

// Re-export public modules for use in integration tests and as a library
pub mod aggregate;
pub mod api;
pub mod config;
pub mod constants;
pub mod copyright;
pub mod error;
pub mod hymnal;
pub mod planning_center;
pub mod schedule;
pub mod session;
pub mod types;
