//! Report domain module.

mod report;

pub use report::{NewReport, Report, MAX_TITLE_LENGTH};
