//! Like record.
//!
//! One row per "employee liked report" fact. Likes are created and
//! removed, never edited.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmployeeId, LikeId, ReportId};

/// A like given by an employee to a report.
///
/// `id` is `None` until the store has inserted the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Like {
    id: Option<LikeId>,
    report_id: ReportId,
    employee_id: EmployeeId,
}

impl Like {
    /// Create an unsaved like; the store assigns the id on insert.
    pub fn new(report_id: ReportId, employee_id: EmployeeId) -> Self {
        Self {
            id: None,
            report_id,
            employee_id,
        }
    }

    /// Reconstitute a like from persistence.
    pub fn reconstitute(id: LikeId, report_id: ReportId, employee_id: EmployeeId) -> Self {
        Self {
            id: Some(id),
            report_id,
            employee_id,
        }
    }

    pub fn id(&self) -> Option<LikeId> {
        self.id
    }

    pub fn report_id(&self) -> ReportId {
        self.report_id
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }
}
