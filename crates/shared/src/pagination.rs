//! Offset pagination utilities.
//!
//! Listings are addressed by a 1-based `page` and a `limit` (page size).
//! The storage layer only ever sees `skip`/`limit`.

use serde::Serialize;

/// Page used when the caller does not supply one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: i64 = 50;

/// Largest page size a single request may ask for.
pub const MAX_LIMIT: i64 = 500;

/// A normalized page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Creates a page request, clamping `page` to at least 1 and `limit` to `1..=MAX_LIMIT`.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Builds a page request from raw query-string values.
    ///
    /// Absent or non-numeric values fall back to the defaults.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(
            parse_or(page, DEFAULT_PAGE),
            parse_or(limit, DEFAULT_LIMIT),
        )
    }

    /// Number of records to skip before this page starts.
    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

/// Number of pages needed to hold `total` records at `limit` per page.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 || total <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// Pagination block returned alongside a page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

impl PageInfo {
    pub fn new(total: i64, request: &PageRequest) -> Self {
        Self {
            total,
            page: request.page,
            pages: total_pages(total, request.limit),
        }
    }
}
