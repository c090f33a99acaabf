//! Report view and its conversions to and from the stored record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, EmployeeId, ErrorCode, ReportId, Timestamp};
use crate::domain::report::{NewReport, Report};

/// Display-side shape of a report.
///
/// `id` and the timestamps are `None` until the report has been saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportView {
    pub id: Option<ReportId>,
    pub employee_id: EmployeeId,
    pub report_date: NaiveDate,
    pub title: String,
    pub content: String,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl ReportView {
    /// A report as typed into the entry form, not yet saved.
    pub fn draft(
        employee_id: EmployeeId,
        report_date: NaiveDate,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            employee_id,
            report_date,
            title: title.into(),
            content: content.into(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns the id of a saved report.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the view was never saved
    pub fn require_id(&self) -> Result<ReportId, DomainError> {
        self.id.ok_or_else(|| {
            DomainError::new(ErrorCode::InvalidInput, "Report has not been saved yet")
        })
    }

    /// Build the record to insert, taking the timestamps stamped on the view.
    pub(crate) fn to_new_report(&self, now: Timestamp) -> NewReport {
        NewReport {
            employee_id: self.employee_id,
            report_date: self.report_date,
            title: self.title.clone(),
            content: self.content.clone(),
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }

    /// Copy the editable fields of the view onto a persisted record.
    pub(crate) fn copy_onto(&self, report: &mut Report, now: Timestamp) {
        report.revise(
            self.report_date,
            self.title.clone(),
            self.content.clone(),
            self.updated_at.unwrap_or(now),
        );
    }
}

impl From<&Report> for ReportView {
    fn from(report: &Report) -> Self {
        Self {
            id: Some(report.id()),
            employee_id: report.employee_id(),
            report_date: report.report_date(),
            title: report.title().to_string(),
            content: report.content().to_string(),
            created_at: Some(*report.created_at()),
            updated_at: Some(*report.updated_at()),
        }
    }
}

impl From<Report> for ReportView {
    fn from(report: Report) -> Self {
        ReportView::from(&report)
    }
}

/// Convert an ordered list of records, keeping the order.
pub fn to_view_list(reports: Vec<Report>) -> Vec<ReportView> {
    reports.into_iter().map(ReportView::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn stored_report() -> Report {
        let created = Timestamp::now();
        NewReport {
            employee_id: EmployeeId::new(2),
            report_date: date(1),
            title: "Stored".to_string(),
            content: "Body".to_string(),
            created_at: created,
            updated_at: created,
        }
        .into_report(ReportId::new(10))
    }

    #[test]
    fn view_from_report_copies_every_field() {
        let report = stored_report();
        let view = ReportView::from(&report);

        assert_eq!(view.id, Some(ReportId::new(10)));
        assert_eq!(view.employee_id, EmployeeId::new(2));
        assert_eq!(view.report_date, date(1));
        assert_eq!(view.title, "Stored");
        assert_eq!(view.content, "Body");
        assert_eq!(view.created_at, Some(*report.created_at()));
        assert_eq!(view.updated_at, Some(*report.updated_at()));
    }

    #[test]
    fn draft_has_no_id_and_require_id_fails() {
        let view = ReportView::draft(EmployeeId::new(1), date(2), "t", "c");
        let err = view.require_id().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn to_new_report_uses_view_timestamps_when_present() {
        let stamped = Timestamp::now();
        let mut view = ReportView::draft(EmployeeId::new(1), date(2), "t", "c");
        view.created_at = Some(stamped);
        view.updated_at = Some(stamped);

        let record = view.to_new_report(Timestamp::now());
        assert_eq!(record.created_at, stamped);
        assert_eq!(record.updated_at, stamped);
    }

    #[test]
    fn copy_onto_keeps_identity_and_creation_time() {
        let mut report = stored_report();
        let created = *report.created_at();

        let mut view = ReportView::from(&report);
        view.id = Some(ReportId::new(99));
        view.employee_id = EmployeeId::new(77);
        view.title = "Edited".to_string();
        view.report_date = date(3);
        let now = Timestamp::now();
        view.updated_at = Some(now);

        view.copy_onto(&mut report, now);

        assert_eq!(report.id(), ReportId::new(10));
        assert_eq!(report.employee_id(), EmployeeId::new(2));
        assert_eq!(report.created_at(), &created);
        assert_eq!(report.title(), "Edited");
        assert_eq!(report.report_date(), date(3));
        assert_eq!(report.updated_at(), &now);
    }

    #[test]
    fn to_view_list_preserves_order() {
        let first = stored_report();
        let second = NewReport {
            employee_id: EmployeeId::new(3),
            report_date: date(4),
            title: "Second".to_string(),
            content: "Body".to_string(),
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        }
        .into_report(ReportId::new(9));

        let views = to_view_list(vec![first, second]);
        let ids: Vec<_> = views.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![Some(ReportId::new(10)), Some(ReportId::new(9))]);
    }
}
