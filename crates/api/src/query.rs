//! Shared query parameter types for API handlers.

use billy_db::models::page::PageRequest;
use serde::Deserialize;

/// Pagination parameters (`?offset=&limit=`), clamped by [`PageRequest`].
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.offset, self.limit)
    }
}
