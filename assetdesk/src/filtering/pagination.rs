use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Which page to return and how large pages are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u64,
    pub page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Resolve raw request values. Missing or zero values fall back to the
    /// defaults and the page size is clamped to `max_page_size`.
    #[must_use]
    pub fn from_params(page: Option<u64>, page_size: Option<u64>, default_page_size: u64, max_page_size: u64) -> Self {
        let default_page_size = default_page_size.max(1);
        let page_size = page_size
            .filter(|size| *size > 0)
            .unwrap_or(default_page_size)
            .min(max_page_size.max(1));
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1),
            page_size,
        }
    }

    /// Rows skipped before this page, `None` when it overflows.
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        (self.page - 1).checked_mul(self.page_size)
    }
}

/// Pagination metadata returned next to every list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageMeta {
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    /// 1-based index of the first record on this page
    pub from: Option<u64>,
    /// 1-based index of the last record on this page
    pub to: Option<u64>,
    pub total: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl PageMeta {
    #[must_use]
    pub fn new(current_page: u64, per_page: u64, total: u64, records_on_page: u64) -> Self {
        let last_page = total.div_ceil(per_page.max(1)).max(1);
        let (from, to) = if records_on_page == 0 {
            (None, None)
        } else {
            let from = (current_page - 1) * per_page + 1;
            (Some(from), Some(from + records_on_page - 1))
        };

        Self {
            current_page,
            last_page,
            per_page,
            from,
            to,
            total,
            has_previous_page: current_page > 1,
            has_next_page: current_page < last_page,
        }
    }
}

/// One page of records plus its metadata.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(records: Vec<T>, request: PageRequest, total: u64) -> Self {
        let meta = PageMeta::new(request.page, request.page_size, total, records.len() as u64);
        Self { records, meta }
    }
}
