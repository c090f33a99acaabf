//! Report record.
//!
//! A daily report written by one employee. Reports are created and
//! edited but never deleted by this crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmployeeId, ReportId, Timestamp};

/// Maximum length for a report title (column width).
pub const MAX_TITLE_LENGTH: usize = 255;

/// Persisted daily report.
///
/// # Invariants
///
/// - `id` is assigned by the store and never changes
/// - `employee_id` and `created_at` are fixed at creation
/// - `updated_at` is never before `created_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    id: ReportId,
    employee_id: EmployeeId,
    report_date: NaiveDate,
    title: String,
    content: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Report {
    /// Reconstitute a report from persistence (no validation).
    pub fn reconstitute(
        id: ReportId,
        employee_id: EmployeeId,
        report_date: NaiveDate,
        title: String,
        content: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            employee_id,
            report_date,
            title,
            content,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> ReportId {
        self.id
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn report_date(&self) -> NaiveDate {
        self.report_date
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the editable fields and stamp the update time.
    ///
    /// Owner, id and creation time are left untouched.
    pub fn revise(
        &mut self,
        report_date: NaiveDate,
        title: String,
        content: String,
        updated_at: Timestamp,
    ) {
        self.report_date = report_date;
        self.title = title;
        self.content = content;
        self.updated_at = updated_at;
    }
}

/// A report that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub employee_id: EmployeeId,
    pub report_date: NaiveDate,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NewReport {
    /// Attach the store-assigned id, producing the persisted record.
    pub fn into_report(self, id: ReportId) -> Report {
        Report::reconstitute(
            id,
            self.employee_id,
            self.report_date,
            self.title,
            self.content,
            self.created_at,
            self.updated_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new_report() -> NewReport {
        let now = Timestamp::now();
        NewReport {
            employee_id: EmployeeId::new(1),
            report_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            title: "Monday".to_string(),
            content: "Visited two customers.".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn into_report_keeps_all_fields() {
        let new_report = sample_new_report();
        let report = new_report.clone().into_report(ReportId::new(5));

        assert_eq!(report.id(), ReportId::new(5));
        assert_eq!(report.employee_id(), new_report.employee_id);
        assert_eq!(report.title(), "Monday");
        assert_eq!(report.created_at(), &new_report.created_at);
    }

    #[test]
    fn revise_changes_only_editable_fields() {
        let mut report = sample_new_report().into_report(ReportId::new(1));
        let created_at = *report.created_at();
        let later = Timestamp::now();
        let new_date = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();

        report.revise(new_date, "Tuesday".to_string(), "Wrote specs.".to_string(), later);

        assert_eq!(report.id(), ReportId::new(1));
        assert_eq!(report.employee_id(), EmployeeId::new(1));
        assert_eq!(report.created_at(), &created_at);
        assert_eq!(report.updated_at(), &later);
        assert_eq!(report.report_date(), new_date);
        assert_eq!(report.title(), "Tuesday");
        assert_eq!(report.content(), "Wrote specs.");
    }
}
