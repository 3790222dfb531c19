//! Betting-pool tracker with PDF and Word report generation.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod store;
pub mod report;
pub mod server;
