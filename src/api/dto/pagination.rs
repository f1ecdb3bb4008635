//! Pagination query parameters.

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};

use crate::application::services::link_service::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::AppError;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Validates pagination parameters.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `page_size`: 25
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the page is 0 or the page size is
    /// outside `1..=100`.
    pub fn validate(&self) -> Result<(u32, u32), AppError> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(AppError::bad_request(
                "Page must be greater than 0",
                json!({ "field": "page" }),
            ));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(AppError::bad_request(
                format!("Page size must be between 1 and {MAX_PAGE_SIZE}"),
                json!({ "field": "page_size", "provided": page_size }),
            ));
        }

        Ok((page, page_size))
    }
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<u32>, page_size: Option<u32>) -> PaginationParams {
        PaginationParams { page, page_size }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(params(None, None).validate().unwrap(), (1, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_custom_page_and_size() {
        assert_eq!(params(Some(3), Some(50)).validate().unwrap(), (3, 50));
    }

    #[test]
    fn test_page_zero_is_error() {
        assert!(params(Some(0), None).validate().is_err());
    }

    #[test]
    fn test_page_size_bounds() {
        assert!(params(None, Some(0)).validate().is_err());
        assert!(params(None, Some(1)).validate().is_ok());
        assert!(params(None, Some(MAX_PAGE_SIZE)).validate().is_ok());
        assert!(params(None, Some(MAX_PAGE_SIZE + 1)).validate().is_err());
    }

    #[test]
    fn test_parses_numbers_sent_as_strings() {
        let p: PaginationParams =
            serde_json::from_str(r#"{"page": "2", "page_size": "10"}"#).unwrap();
        assert_eq!(p.page, Some(2));
        assert_eq!(p.page_size, Some(10));

        let empty: PaginationParams = serde_json::from_str("{}").unwrap();
        assert!(empty.page.is_none());
    }
}
