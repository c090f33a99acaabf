//! Input checks for report entry and edit forms.

use crate::application::views::ReportView;
use crate::domain::report::MAX_TITLE_LENGTH;

pub const TITLE_REQUIRED: &str = "Please enter a title.";
pub const CONTENT_REQUIRED: &str = "Please enter the report content.";
pub const TITLE_TOO_LONG: &str = "Title must be 255 characters or fewer.";

/// Validate a candidate report, returning messages in form order.
///
/// An empty list means the report may be written.
pub fn validate(view: &ReportView) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(error) = validate_title(&view.title) {
        errors.push(error.to_string());
    }

    if view.content.trim().is_empty() {
        errors.push(CONTENT_REQUIRED.to_string());
    }

    errors
}

fn validate_title(title: &str) -> Option<&'static str> {
    if title.trim().is_empty() {
        Some(TITLE_REQUIRED)
    } else if title.chars().count() > MAX_TITLE_LENGTH {
        Some(TITLE_TOO_LONG)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EmployeeId;
    use chrono::NaiveDate;

    fn view(title: &str, content: &str) -> ReportView {
        ReportView::draft(
            EmployeeId::new(1),
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            title,
            content,
        )
    }

    #[test]
    fn accepts_complete_report() {
        assert!(validate(&view("Daily", "Did things")).is_empty());
    }

    #[test]
    fn reports_missing_title_and_content_in_order() {
        let errors = validate(&view("", "  "));
        assert_eq!(errors, vec![TITLE_REQUIRED, CONTENT_REQUIRED]);
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_eq!(validate(&view("   ", "body")), vec![TITLE_REQUIRED]);
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        let title = "日".repeat(MAX_TITLE_LENGTH);
        assert!(validate(&view(&title, "body")).is_empty());

        let title = "a".repeat(MAX_TITLE_LENGTH + 1);
        assert_eq!(validate(&view(&title, "body")), vec![TITLE_TOO_LONG]);
    }
}
