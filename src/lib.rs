//! Daily Report - data access for employee daily reports and likes
//!
//! Reports are listed newest first in fixed-size pages, validated before
//! they are saved, and can be liked by other employees. Every operation runs
//! against a caller-owned [`ports::ReportSession`].

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
