//! Domain layer containing the daily report records.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `report` - Daily report record
//! - `like` - "Employee liked report" record

pub mod foundation;
pub mod like;
pub mod report;
