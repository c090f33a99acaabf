//! ReportService - report and like operations over a caller-supplied session.
//!
//! Every operation receives the session explicitly. Reads issue one named
//! query; writes validate first and then perform a single write in the
//! session's own transaction.

use tracing::{debug, info};

use crate::application::report_validator;
use crate::application::views::{to_view_list, EmployeeView, ReportView};
use crate::config::ReportsConfig;
use crate::domain::foundation::{DomainError, ErrorCode, ReportId, Timestamp};
use crate::domain::like::Like;
use crate::ports::{PageRequest, ReportQuery, ReportSession};

/// Rows shown on one list page unless configured otherwise.
pub const DEFAULT_ROWS_PER_PAGE: u32 = 15;

/// Result of `create` and `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The report was written; the view reflects the stored row.
    Saved(ReportView),
    /// Validation failed and nothing was written. Never empty.
    Invalid(Vec<String>),
}

impl SaveOutcome {
    /// Validation messages, empty when the report was saved.
    pub fn errors(&self) -> &[String] {
        match self {
            SaveOutcome::Saved(_) => &[],
            SaveOutcome::Invalid(errors) => errors,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }

    /// The stored view, if the save went through.
    pub fn saved(self) -> Option<ReportView> {
        match self {
            SaveOutcome::Saved(view) => Some(view),
            SaveOutcome::Invalid(_) => None,
        }
    }
}

/// Report and like operations.
#[derive(Debug, Clone)]
pub struct ReportService {
    rows_per_page: u32,
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS_PER_PAGE)
    }
}

impl ReportService {
    /// Creates a service listing `rows_per_page` reports per page (at least 1).
    pub fn new(rows_per_page: u32) -> Self {
        Self {
            rows_per_page: rows_per_page.max(1),
        }
    }

    pub fn from_config(config: &ReportsConfig) -> Self {
        Self::new(config.rows_per_page)
    }

    pub fn rows_per_page(&self) -> u32 {
        self.rows_per_page
    }

    fn page(&self, page: u32) -> PageRequest {
        PageRequest::page(page, self.rows_per_page)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Report queries
    // ─────────────────────────────────────────────────────────────────────────

    /// One page of the reports written by `employee`.
    pub async fn get_mine_per_page(
        &self,
        session: &mut dyn ReportSession,
        employee: &EmployeeView,
        page: u32,
    ) -> Result<Vec<ReportView>, DomainError> {
        self.list_page(session, ReportQuery::OwnedBy(employee.id), page)
            .await
    }

    /// Number of reports written by `employee`.
    pub async fn count_all_mine(
        &self,
        session: &mut dyn ReportSession,
        employee: &EmployeeView,
    ) -> Result<u64, DomainError> {
        session
            .count_reports(ReportQuery::OwnedBy(employee.id))
            .await
    }

    /// One page of all reports.
    pub async fn get_all_per_page(
        &self,
        session: &mut dyn ReportSession,
        page: u32,
    ) -> Result<Vec<ReportView>, DomainError> {
        self.list_page(session, ReportQuery::All, page).await
    }

    /// Number of reports in the store.
    pub async fn count_all(&self, session: &mut dyn ReportSession) -> Result<u64, DomainError> {
        session.count_reports(ReportQuery::All).await
    }

    /// Look up one report.
    ///
    /// # Errors
    ///
    /// - `ReportNotFound` if no report has this id
    pub async fn find_one(
        &self,
        session: &mut dyn ReportSession,
        id: ReportId,
    ) -> Result<ReportView, DomainError> {
        let report = session
            .find_report(id)
            .await?
            .ok_or_else(|| report_not_found(id))?;
        Ok(ReportView::from(report))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Report writes
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate and store a new report, stamping both timestamps with now.
    pub async fn create(
        &self,
        session: &mut dyn ReportSession,
        mut view: ReportView,
    ) -> Result<SaveOutcome, DomainError> {
        let errors = report_validator::validate(&view);
        if !errors.is_empty() {
            debug!(errors = errors.len(), "Report rejected by validation");
            return Ok(SaveOutcome::Invalid(errors));
        }

        let now = Timestamp::now();
        view.created_at = Some(now);
        view.updated_at = Some(now);

        let report = session.insert_report(&view.to_new_report(now)).await?;
        info!(
            report_id = %report.id(),
            employee_id = %report.employee_id(),
            "Report created"
        );

        Ok(SaveOutcome::Saved(ReportView::from(report)))
    }

    /// Validate and apply edits to an existing report.
    ///
    /// Only the report date, title, content and update time change.
    ///
    /// The stored row is read before the write transaction opens; it supplies
    /// the author and creation time of the returned view. The write itself
    /// still fails with `ReportNotFound` if the row is removed in between.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the view has no id
    /// - `ReportNotFound` if the report no longer exists
    pub async fn update(
        &self,
        session: &mut dyn ReportSession,
        mut view: ReportView,
    ) -> Result<SaveOutcome, DomainError> {
        let errors = report_validator::validate(&view);
        if !errors.is_empty() {
            debug!(errors = errors.len(), "Report edit rejected by validation");
            return Ok(SaveOutcome::Invalid(errors));
        }

        let id = view.require_id()?;
        let now = Timestamp::now();
        view.updated_at = Some(now);

        let mut report = session
            .find_report(id)
            .await?
            .ok_or_else(|| report_not_found(id))?;
        view.copy_onto(&mut report, now);
        session.update_report(&report).await?;
        info!(report_id = %id, "Report updated");

        Ok(SaveOutcome::Saved(ReportView::from(report)))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Likes
    // ─────────────────────────────────────────────────────────────────────────

    /// Register that `employee` likes `report`.
    ///
    /// Does not check for an existing like first.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the report view was never saved
    /// - `ReportNotFound` if the report no longer exists
    pub async fn create_like(
        &self,
        session: &mut dyn ReportSession,
        report: &ReportView,
        employee: &EmployeeView,
    ) -> Result<(), DomainError> {
        let report_id = report.require_id()?;
        let like = session
            .insert_like(&Like::new(report_id, employee.id))
            .await?;
        info!(
            like_id = ?like.id(),
            report_id = %report_id,
            employee_id = %employee.id,
            "Like created"
        );
        Ok(())
    }

    /// The like `employee` gave `report`, or `None` if there is none.
    pub async fn find_like(
        &self,
        session: &mut dyn ReportSession,
        report: &ReportView,
        employee: &EmployeeView,
    ) -> Result<Option<Like>, DomainError> {
        let report_id = report.require_id()?;
        session.find_like(report_id, employee.id).await
    }

    /// Permanently remove a like.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the like was never stored
    /// - `LikeNotFound` if it is already gone
    pub async fn delete_like(
        &self,
        session: &mut dyn ReportSession,
        like: &Like,
    ) -> Result<(), DomainError> {
        let id = like.id().ok_or_else(|| {
            DomainError::new(ErrorCode::InvalidInput, "Like has not been saved yet")
        })?;
        session.delete_like(id).await?;
        info!(like_id = %id, report_id = %like.report_id(), "Like deleted");
        Ok(())
    }

    /// Number of likes on `report`.
    pub async fn count_likes(
        &self,
        session: &mut dyn ReportSession,
        report: &ReportView,
    ) -> Result<u64, DomainError> {
        let report_id = report.require_id()?;
        session.count_likes(report_id).await
    }

    /// One page of the reports `employee` has liked.
    pub async fn get_my_favorite_reports_per_page(
        &self,
        session: &mut dyn ReportSession,
        employee: &EmployeeView,
        page: u32,
    ) -> Result<Vec<ReportView>, DomainError> {
        self.list_page(session, ReportQuery::LikedBy(employee.id), page)
            .await
    }

    /// Number of reports `employee` has liked.
    pub async fn count_my_favorite_reports(
        &self,
        session: &mut dyn ReportSession,
        employee: &EmployeeView,
    ) -> Result<u64, DomainError> {
        session
            .count_reports(ReportQuery::LikedBy(employee.id))
            .await
    }

    async fn list_page(
        &self,
        session: &mut dyn ReportSession,
        query: ReportQuery,
        page: u32,
    ) -> Result<Vec<ReportView>, DomainError> {
        let window = self.page(page);
        debug!(
            query = query.name(),
            page,
            offset = window.offset,
            limit = window.limit,
            "Fetching report page"
        );
        let reports = session.fetch_reports(query, Some(window)).await?;
        Ok(to_view_list(reports))
    }
}

fn report_not_found(id: ReportId) -> DomainError {
    DomainError::new(ErrorCode::ReportNotFound, format!("Report not found: {}", id))
        .with_detail("report_id", id.to_string())
}
