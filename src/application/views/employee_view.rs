//! Employee view handed in by the presentation layer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::EmployeeId;

/// Display-side shape of the signed-in or selected employee.
///
/// Only `id` is used by the report service; the rest travels along for
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeView {
    pub id: EmployeeId,
    pub code: String,
    pub name: String,
}

impl EmployeeView {
    pub fn new(id: EmployeeId, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
        }
    }
}
