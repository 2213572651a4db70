use crate::error::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PAGE: u32 = 1;
pub const MAX_PER_PAGE: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("page must be at least 1, got {0}")]
    PageOutOfRange(u32),
    #[error("perPage must be between 1 and 500, got {0}")]
    PerPageOutOfRange(u32),
}

impl From<PaginationError> for AppError {
    fn from(err: PaginationError) -> Self {
        AppError::BadRequest(anyhow::Error::new(err))
    }
}

/// Row window handed to the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u32,
}

/// Validated page request: `page >= 1`, `1 <= per_page <= 500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationRequest {
    page: u32,
    per_page: u32,
}

impl PaginationRequest {
    pub fn new(page: u32, per_page: u32) -> Result<Self, PaginationError> {
        if page < 1 {
            return Err(PaginationError::PageOutOfRange(page));
        }
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(PaginationError::PerPageOutOfRange(per_page));
        }
        Ok(Self { page, per_page })
    }

    /// Apply endpoint defaults to optional query parameters.
    pub fn from_params(
        page: Option<u32>,
        per_page: Option<u32>,
        default_per_page: u32,
    ) -> Result<Self, PaginationError> {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            per_page.unwrap_or(default_per_page),
        )
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn skip(&self) -> u64 {
        u64::from(self.per_page) * u64::from(self.page - 1)
    }

    pub fn window(&self) -> Window {
        Window {
            offset: self.skip(),
            limit: self.per_page,
        }
    }
}

/// Number of pages needed for `total` rows: `ceil(total / per_page)`.
pub fn page_count(total: u64, per_page: u32) -> u64 {
    let per_page = u64::from(per_page.max(1));
    total / per_page + u64::from(total % per_page != 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub page_count: u64,
}

impl PageMeta {
    pub fn new(pagination: PaginationRequest, total: u64) -> Self {
        Self {
            page: pagination.page(),
            per_page: pagination.per_page(),
            total,
            page_count: page_count(total, pagination.per_page()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_ceiling_division() {
        assert_eq!(page_count(0, 25), 0);
        assert_eq!(page_count(25, 25), 1);
        assert_eq!(page_count(26, 25), 2);
        assert_eq!(page_count(1, 500), 1);
        for total in 0..200u64 {
            for per_page in 1..20u32 {
                let expected = total.div_ceil(u64::from(per_page));
                assert_eq!(page_count(total, per_page), expected);
            }
        }
    }

    #[test]
    fn first_page_skips_nothing() {
        let pagination = PaginationRequest::new(1, 25).unwrap();
        assert_eq!(pagination.skip(), 0);
        assert_eq!(pagination.window(), Window { offset: 0, limit: 25 });
    }

    #[test]
    fn skip_grows_with_page() {
        let pagination = PaginationRequest::new(4, 10).unwrap();
        assert_eq!(pagination.skip(), 30);
    }

    #[test]
    fn defaults_apply_when_params_are_absent() {
        let pagination = PaginationRequest::from_params(None, None, 10).unwrap();
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.per_page(), 10);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert_eq!(
            PaginationRequest::new(0, 10),
            Err(PaginationError::PageOutOfRange(0))
        );
        assert_eq!(
            PaginationRequest::new(1, 0),
            Err(PaginationError::PerPageOutOfRange(0))
        );
        assert_eq!(
            PaginationRequest::new(1, 501),
            Err(PaginationError::PerPageOutOfRange(501))
        );
        assert!(PaginationRequest::new(1, 500).is_ok());
    }

    #[test]
    fn meta_for_empty_result() {
        let meta = PageMeta::new(PaginationRequest::new(1, 25).unwrap(), 0);
        assert_eq!(meta.page_count, 0);
        assert_eq!(meta.total, 0);
    }
}
