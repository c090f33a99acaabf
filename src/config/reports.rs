//! Report listing configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Upper bound for `rows_per_page`.
pub const MAX_ROWS_PER_PAGE: u32 = 100;

/// Report listing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    /// Reports shown on one list page
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: u32,
}

impl ReportsConfig {
    /// Validate report listing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.rows_per_page == 0 || self.rows_per_page > MAX_ROWS_PER_PAGE {
            return Err(ValidationError::InvalidRowsPerPage);
        }
        Ok(())
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            rows_per_page: default_rows_per_page(),
        }
    }
}

fn default_rows_per_page() -> u32 {
    15
}
