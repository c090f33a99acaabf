//! Display-side views and the conversions between views and records.

mod employee_view;
mod report_view;

pub use employee_view::EmployeeView;
pub use report_view::{to_view_list, ReportView};
