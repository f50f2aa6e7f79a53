#![forbid(unsafe_code)]

//! Core domain model and fee projection engine for the public charge estimator.
//!
//! This crate provides:
//! - Domain types (specialty entries, breakdowns, summaries, advisories)
//! - Regulator-fixed rate tables
//! - Projection engine (schedules, aggregation, summary, cap advisory)
//! - Roster persistence and CSV export

pub mod types;
pub mod error;
pub mod tables;
pub mod config;
pub mod logging;
pub mod schedule;
pub mod summary;
pub mod engine;
pub mod roster;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use tables::{default_tables, RateTables};
pub use config::Config;
pub use schedule::generate_schedule;
pub use summary::{advise, summarize};
pub use engine::{aggregate, calculate, calculate_with};
pub use roster::Roster;
