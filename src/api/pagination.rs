// src/api/pagination.rs
//! Cursor pagination without BoxFuture.

use super::types::{PaginatedResponse, PaginationResult};
use crate::error::AppError;

/// Fetches every page of a cursor-paginated listing.
///
/// The first request carries no cursor; each following request carries the
/// cursor reported by the previous one. Results are appended in the order the
/// source reports them. The first error aborts the walk and is returned as is.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_fn: F) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_fn(cursor).await?;
        pages_fetched += 1;

        let has_more = response.has_more;
        cursor = response.next_cursor;
        all_items.extend(response.results);

        if !has_more {
            break;
        }
        if cursor.is_none() {
            log::warn!(
                "Source reported more results without a cursor after {} request(s); stopping",
                pages_fetched
            );
            break;
        }
    }

    Ok(PaginationResult {
        items: all_items,
        pages_fetched,
    })
}
