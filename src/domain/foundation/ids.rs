//! Strongly-typed identifier value objects.
//!
//! Identifiers are store-assigned serial integers (PostgreSQL `SERIAL`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Identifier of a daily report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(i32);

impl ReportId {
    /// Creates a ReportId from a raw database value.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw database value.
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReportId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_positive("report_id", s).map(Self)
    }
}

/// Identifier of an employee (owner of reports, giver of likes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(i32);

impl EmployeeId {
    /// Creates an EmployeeId from a raw database value.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw database value.
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_positive("employee_id", s).map(Self)
    }
}

/// Identifier of a like row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikeId(i32);

impl LikeId {
    /// Creates a LikeId from a raw database value.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw database value.
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for LikeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_positive(field: &str, s: &str) -> Result<i32, ValidationError> {
    let value: i32 = s
        .trim()
        .parse()
        .map_err(|_| ValidationError::invalid_format(field, "not an integer"))?;
    if value <= 0 {
        return Err(ValidationError::out_of_range(field, 1, i32::MAX, value));
    }
    Ok(value)
}
