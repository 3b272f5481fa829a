//! Pagination request and response envelope for listings.

use billy_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use serde::Serialize;

/// A clamped offset/limit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Clamp raw query values into a usable page.
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            offset: clamp_offset(offset),
            limit: clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of a listing, plus the total number of matching items.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            offset: request.offset,
            limit: request.limit,
            total,
        }
    }
}
