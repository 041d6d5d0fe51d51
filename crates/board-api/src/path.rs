//! Request path decoding.
//!
//! Routing and the 404 page both see the percent-decoded path, so
//! `/asmt/%6Cist` reaches the list handler and an unmatched path is shown
//! the way the client meant it.

use std::borrow::Cow;

use axum::extract::Request;
use axum::http::Uri;
use axum::http::uri::PathAndQuery;
use tracing::debug;

/// Percent-decoded request path, recorded before routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath(pub String);

/// Decode `%XX` escapes. A path that decodes to invalid UTF-8 is kept raw.
pub fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

/// Runs ahead of the router: records the decoded path and, when it is a
/// valid URI path, routes on it instead of the raw one.
pub async fn decode_request_path(mut req: Request) -> Request {
    let raw = req.uri().path().to_string();
    let decoded = decode(&raw);

    if decoded != raw {
        match with_path(req.uri(), &decoded) {
            Some(uri) => *req.uri_mut() = uri,
            None => debug!(path = %raw, "decoded path not routable, keeping raw form"),
        }
    }

    req.extensions_mut().insert(RequestPath(decoded));
    req
}

/// `uri` with its path replaced and its query kept. `None` if `path` holds
/// `?` or `#` (which would change the URI's structure) or is not a legal
/// URI path.
fn with_path(uri: &Uri, path: &str) -> Option<Uri> {
    if path.contains(['?', '#']) {
        return None;
    }
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>().ok()?);
    Uri::from_parts(parts).ok()
}
