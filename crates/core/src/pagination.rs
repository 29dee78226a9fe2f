//! Page-based listing parameters shared by the API and repository layers.

use serde::Serialize;

use crate::error::DesignError;
use crate::types::DbId;

/// Maximum number of rows a single page may request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Page metadata returned alongside a listing.
///
/// `total` is the number of matching rows across all pages, so clients can
/// compute the page count themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub total: i64,
}

/// A page request scoped to one owner, optionally filtered by name.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub user_id: DbId,
    pub limit: i64,
    /// 1-indexed page number.
    pub page: i64,
    /// Case-insensitive substring to match against design names.
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(user_id: DbId, limit: i64, page: i64) -> Self {
        Self {
            user_id,
            limit,
            page,
            search: None,
        }
    }

    /// Attach a search term. Blank terms are ignored.
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self
    }

    /// Row offset of the first row on this page.
    ///
    /// Saturates rather than overflowing; [`parse_page_params`] already
    /// rejects pages whose offset does not fit.
    pub fn offset(&self) -> i64 {
        self.limit.saturating_mul(self.page - 1)
    }
}

/// Parse the raw `count` and `page` query parameters.
///
/// Returns `(limit, page)`. Both must be present positive integers; `count`
/// is capped at [`MAX_PAGE_LIMIT`]. A page whose row offset overflows `i64`
/// is invalid.
pub fn parse_page_params(
    count: Option<&str>,
    page: Option<&str>,
) -> Result<(i64, i64), DesignError> {
    let count = count
        .filter(|c| !c.is_empty())
        .ok_or(DesignError::CountIsEmpty)?;
    let limit: i64 = count.parse().map_err(|_| DesignError::CountInvalid)?;
    if limit < 1 {
        return Err(DesignError::CountInvalid);
    }

    let page = page
        .filter(|p| !p.is_empty())
        .ok_or(DesignError::PageIsEmpty)?;
    let page: i64 = page.parse().map_err(|_| DesignError::PageInvalid)?;
    if page < 1 {
        return Err(DesignError::PageInvalid);
    }

    let limit = limit.min(MAX_PAGE_LIMIT);
    limit
        .checked_mul(page - 1)
        .ok_or(DesignError::PageInvalid)?;

    Ok((limit, page))
}
