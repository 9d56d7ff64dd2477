//! Path extractor for resource identifiers.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use parky_core::types::DbId;

use crate::error::AppError;

/// A positive integer `{id}` path segment.
///
/// Anything else (non-digits, signs, zero, overflow) is treated as a route
/// that does not exist and rejected with 404 rather than 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub DbId);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        let not_matched = || AppError::RouteNotMatched(path.clone());

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_matched())?;

        parse_id(&raw).map(RecordId).ok_or_else(not_matched)
    }
}

fn parse_id(raw: &str) -> Option<DbId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<DbId>().ok().filter(|id| *id > 0)
}
