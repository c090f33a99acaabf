//! Report session port.
//!
//! Defines the contract for one caller's connection to the report store.
//! The report service receives a session per call instead of owning one.
//!
//! # Design
//!
//! - **Named queries**: list and count operations take a [`ReportQuery`]
//!   rather than inline SQL
//! - **One transaction per write**: each insert/update/delete begins and
//!   commits its own transaction before returning
//! - **Explicit release**: `close` hands the connection back; any later call
//!   fails with `SessionClosed`

use crate::domain::foundation::{DomainError, EmployeeId, LikeId, ReportId};
use crate::domain::like::Like;
use crate::domain::report::{NewReport, Report};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Session port for report and like persistence.
///
/// Takes `&mut self` throughout: a session serves one caller at a time.
#[async_trait]
pub trait ReportSession: Send {
    /// Run a named report query, optionally restricted to one page.
    ///
    /// Results are ordered newest first (id descending).
    async fn fetch_reports(
        &mut self,
        query: ReportQuery,
        page: Option<PageRequest>,
    ) -> Result<Vec<Report>, DomainError>;

    /// Count the rows a named report query would return without paging.
    async fn count_reports(&mut self, query: ReportQuery) -> Result<u64, DomainError>;

    /// Find a report by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_report(&mut self, id: ReportId) -> Result<Option<Report>, DomainError>;

    /// Insert a new report and return it with its assigned id.
    async fn insert_report(&mut self, report: &NewReport) -> Result<Report, DomainError>;

    /// Write all fields of an existing report.
    ///
    /// # Errors
    ///
    /// - `ReportNotFound` if the row doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_report(&mut self, report: &Report) -> Result<(), DomainError>;

    /// Insert a like and return it with its assigned id.
    ///
    /// No uniqueness check is made on (report, employee).
    ///
    /// # Errors
    ///
    /// - `ReportNotFound` if the liked report doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn insert_like(&mut self, like: &Like) -> Result<Like, DomainError>;

    /// Find a like by report and employee.
    ///
    /// Returns `None` if the employee has not liked the report. When
    /// duplicates exist the oldest row is returned.
    async fn find_like(
        &mut self,
        report_id: ReportId,
        employee_id: EmployeeId,
    ) -> Result<Option<Like>, DomainError>;

    /// Permanently remove a like.
    ///
    /// # Errors
    ///
    /// - `LikeNotFound` if the row doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete_like(&mut self, id: LikeId) -> Result<(), DomainError>;

    /// Count likes registered for a report.
    async fn count_likes(&mut self, report_id: ReportId) -> Result<u64, DomainError>;

    /// Release the session. Calling it again is a no-op.
    async fn close(&mut self) -> Result<(), DomainError>;

    /// Returns false once `close` has been called.
    fn is_open(&self) -> bool;
}

/// Pre-declared report queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "query", content = "employee_id", rename_all = "snake_case")]
pub enum ReportQuery {
    /// Every report in the store.
    All,
    /// Reports written by the employee.
    OwnedBy(EmployeeId),
    /// Reports the employee has liked, each report listed once.
    LikedBy(EmployeeId),
}

impl ReportQuery {
    /// Stable symbolic name, used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ReportQuery::All => "report.getAll",
            ReportQuery::OwnedBy(_) => "report.getAllMine",
            ReportQuery::LikedBy(_) => "report.getAllByLikeEmployee",
        }
    }
}

impl fmt::Display for ReportQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Offset/limit window for a paged query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of results to return.
    pub limit: u32,

    /// Number of results to skip.
    pub offset: u32,
}

impl PageRequest {
    /// Window for a 1-based page number; page 0 is treated as page 1.
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            limit: per_page,
            offset: page.saturating_sub(1).saturating_mul(per_page),
        }
    }

    /// Apply the window to an already ordered sequence.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .cloned()
            .collect()
    }
}
