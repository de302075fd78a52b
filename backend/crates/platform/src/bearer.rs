//! Access token extraction
//!
//! Admin clients present their session token either as
//! `Authorization: Bearer <token>` or as a `token` query parameter
//! (used by download links such as the CSV export). The header wins
//! when both are present.

use axum::extract::Query;
use axum::http::{HeaderMap, Uri, header};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively and the value must consist of
/// exactly two space-separated parts.
pub fn bearer_from_headers(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split(' ');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Some(token.to_string())
        }
        _ => None,
    }
}

/// Extract a non-blank, trimmed `token` query parameter.
pub fn token_from_query(uri: &Uri) -> Option<String> {
    let Query(query) = Query::<TokenQuery>::try_from_uri(uri).ok()?;
    query
        .token
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Extract the access token, header first, query parameter second.
pub fn extract_access_token(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    bearer_from_headers(headers).or_else(|| token_from_query(uri))
}
